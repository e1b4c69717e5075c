//! Clipboard contract

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// System clipboard the console copies new keys into
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), DomainError>;
}
