//! Principal types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Identifier of an authenticated principal (the `sub` of its access token)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(DomainError::invalid_id("Principal ID cannot be empty"));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PrincipalId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PrincipalId> for String {
    fn from(id: PrincipalId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated identity performing an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
}

impl Principal {
    pub fn new(id: PrincipalId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &PrincipalId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_id_valid() {
        let id = PrincipalId::new("0b7c2f9e-user").unwrap();
        assert_eq!(id.as_str(), "0b7c2f9e-user");
    }

    #[test]
    fn test_principal_id_rejects_blank() {
        assert!(PrincipalId::new("").is_err());
        assert!(PrincipalId::new("   ").is_err());
    }
}
