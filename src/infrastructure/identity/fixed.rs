//! Identity provider with a preset answer

use async_trait::async_trait;

use crate::domain::identity::{IdentityProvider, Principal, PrincipalId};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
enum Answer {
    SignedIn(Principal),
    Anonymous,
    Failing(String),
}

/// Always resolves to the same principal, to nobody, or to an error
#[derive(Debug, Clone)]
pub struct FixedIdentityProvider {
    answer: Answer,
}

impl FixedIdentityProvider {
    /// Resolves to `id`; a blank id behaves as anonymous
    pub fn signed_in(id: impl Into<String>) -> Self {
        let answer = match PrincipalId::new(id) {
            Ok(id) => Answer::SignedIn(Principal::new(id)),
            Err(_) => Answer::Anonymous,
        };

        Self { answer }
    }

    pub fn anonymous() -> Self {
        Self {
            answer: Answer::Anonymous,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            answer: Answer::Failing(message.into()),
        }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn current_principal(&self) -> Result<Option<Principal>, DomainError> {
        match &self.answer {
            Answer::SignedIn(principal) => Ok(Some(principal.clone())),
            Answer::Anonymous => Ok(None),
            Answer::Failing(message) => Err(DomainError::authentication(message.clone())),
        }
    }
}
