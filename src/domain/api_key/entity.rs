//! API key record and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identity::PrincipalId;
use crate::domain::DomainError;

/// Shortest key [`mask_key`] will partially reveal
pub const MASK_MIN_LEN: usize = 12;

const MASK_HEAD: usize = 8;
const MASK_TAIL: usize = 4;
const MASK_FILL: &str = "...";

/// Store-generated identifier of an API key record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(Uuid);

impl ApiKeyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("'{}' is not a valid API key ID", value)))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ApiKeyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ApiKeyId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ApiKeyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of an API key, derived from `revoked_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    #[default]
    Active,
    Revoked,
}

impl KeyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
        }
    }
}

/// The one destructive action offered for a record in its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Revoke,
    Delete,
}

/// Insert payload for a new record; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiKeyRecord {
    pub description: String,
    pub key: String,
    pub user_id: PrincipalId,
    pub created_by: PrincipalId,
}

/// A persisted API key owned by a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    id: ApiKeyId,
    description: String,
    /// Full plaintext key, only displayed in masked form after creation
    key: String,
    user_id: PrincipalId,
    created_by: PrincipalId,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revoked_at: Option<DateTime<Utc>>,
}

impl ApiKeyRecord {
    /// Materialize a stored row
    pub fn new(id: ApiKeyId, new: NewApiKeyRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: new.description,
            key: new.key,
            user_id: new.user_id,
            created_by: new.created_by,
            created_at,
            revoked_at: None,
        }
    }

    /// Set the revocation timestamp of a stored row
    pub fn with_revoked_at(mut self, revoked_at: Option<DateTime<Utc>>) -> Self {
        self.revoked_at = revoked_at;
        self
    }

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn masked_key(&self) -> String {
        mask_key(&self.key)
    }

    pub fn user_id(&self) -> &PrincipalId {
        &self.user_id
    }

    pub fn created_by(&self) -> &PrincipalId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn revoked_at(&self) -> Option<DateTime<Utc>> {
        self.revoked_at
    }

    pub fn status(&self) -> KeyStatus {
        if self.revoked_at.is_some() {
            KeyStatus::Revoked
        } else {
            KeyStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == KeyStatus::Active
    }

    pub fn is_owned_by(&self, principal: &PrincipalId) -> bool {
        &self.user_id == principal
    }

    /// Revoke is offered while active, delete only once revoked
    pub fn available_action(&self) -> KeyAction {
        match self.status() {
            KeyStatus::Active => KeyAction::Revoke,
            KeyStatus::Revoked => KeyAction::Delete,
        }
    }

    /// Mark the record revoked and reaffirm its owner.
    ///
    /// Returns false without touching anything if it was already revoked.
    pub fn revoke(&mut self, owner: &PrincipalId, at: DateTime<Utc>) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }

        self.revoked_at = Some(at);
        self.user_id = owner.clone();
        true
    }
}

/// Display form of a key: first 8 characters, `...`, last 4 characters.
///
/// Keys shorter than [`MASK_MIN_LEN`] reveal nothing and mask to `...`.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();

    if chars.len() < MASK_MIN_LEN {
        return MASK_FILL.to_string();
    }

    let head: String = chars[..MASK_HEAD].iter().collect();
    let tail: String = chars[chars.len() - MASK_TAIL..].iter().collect();

    format!("{}{}{}", head, MASK_FILL, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> PrincipalId {
        PrincipalId::new(id).unwrap()
    }

    fn create_record(description: &str) -> ApiKeyRecord {
        let owner = principal("user-1");
        ApiKeyRecord::new(
            ApiKeyId::new(),
            NewApiKeyRecord {
                description: description.to_string(),
                key: "sk-1234567890abcdef".to_string(),
                user_id: owner.clone(),
                created_by: owner,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-1234567890abcdef"), "sk-12345...cdef");
    }

    #[test]
    fn test_mask_key_exact_minimum() {
        assert_eq!(mask_key("abcdefghijkl"), "abcdefgh...ijkl");
    }

    #[test]
    fn test_mask_key_short_reveals_nothing() {
        assert_eq!(mask_key("sk-short"), "...");
        assert_eq!(mask_key(""), "...");
    }

    #[test]
    fn test_mask_generated_length_key() {
        let key = "sk-3f1e2d4c-5b6a-4789-8abc-def012345678";
        assert_eq!(key.len(), 39);
        assert_eq!(mask_key(key), "sk-3f1e2...5678");
    }

    #[test]
    fn test_api_key_id_parse() {
        let id = ApiKeyId::new();
        let parsed = ApiKeyId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);

        assert!(ApiKeyId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_new_record_is_active() {
        let record = create_record("CI pipeline");

        assert_eq!(record.status(), KeyStatus::Active);
        assert!(record.is_active());
        assert_eq!(record.available_action(), KeyAction::Revoke);
        assert_eq!(record.masked_key(), "sk-12345...cdef");
    }

    #[test]
    fn test_revoke_switches_action() {
        let mut record = create_record("CI pipeline");
        let owner = principal("user-1");

        assert!(record.revoke(&owner, Utc::now()));

        assert_eq!(record.status(), KeyStatus::Revoked);
        assert_eq!(record.available_action(), KeyAction::Delete);
        assert_eq!(record.description(), "CI pipeline");
        assert_eq!(record.key(), "sk-1234567890abcdef");
    }

    #[test]
    fn test_revoked_at_is_immutable() {
        let mut record = create_record("CI pipeline");
        let owner = principal("user-1");
        let first = Utc::now() - chrono::Duration::hours(1);

        assert!(record.revoke(&owner, first));
        assert!(!record.revoke(&owner, Utc::now()));

        assert_eq!(record.revoked_at(), Some(first));
    }

    #[test]
    fn test_ownership() {
        let record = create_record("CI pipeline");

        assert!(record.is_owned_by(&principal("user-1")));
        assert!(!record.is_owned_by(&principal("user-2")));
    }
}
