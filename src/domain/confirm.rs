//! Confirmation gate for destructive actions

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::api_key::{ApiKeyId, KeyAction};

/// Asks the operator to confirm a revoke or delete.
///
/// A `false` answer aborts the action without touching the store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, action: KeyAction, id: &ApiKeyId, prompt: &str) -> bool;
}
