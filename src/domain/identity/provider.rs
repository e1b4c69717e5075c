//! Identity provider trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::principal::Principal;
use crate::domain::DomainError;

/// Resolves the current authenticated principal
///
/// `Ok(None)` means nobody is signed in; `Err` means the provider itself
/// could not answer (bad token, unreachable auth service).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_principal(&self) -> Result<Option<Principal>, DomainError>;
}
