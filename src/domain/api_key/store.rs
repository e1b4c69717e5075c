//! Record store trait for API key persistence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use thiserror::Error;

use super::entity::{ApiKeyId, ApiKeyRecord, NewApiKeyRecord};
use crate::domain::identity::PrincipalId;

/// SQLSTATE for `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `not_null_violation`
pub const NOT_NULL_VIOLATION: &str = "23502";
/// SQLSTATE for `check_violation`
pub const CHECK_VIOLATION: &str = "23514";

/// Failures reported by a record store.
///
/// Constraint violations keep their structured code so callers can tell a
/// duplicate description from a missing field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Required field missing: {column}")]
    NotNullViolation { column: String },

    #[error("Check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Build from a database error code, keeping unknown codes as backend errors
    pub fn from_sqlstate(code: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();

        match code {
            UNIQUE_VIOLATION => Self::UniqueViolation { constraint: detail },
            NOT_NULL_VIOLATION => Self::NotNullViolation { column: detail },
            CHECK_VIOLATION => Self::CheckViolation { constraint: detail },
            _ => Self::Backend(format!("[{}] {}", code, detail)),
        }
    }

    /// SQLSTATE code for constraint violations
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::UniqueViolation { .. } => Some(UNIQUE_VIOLATION),
            Self::NotNullViolation { .. } => Some(NOT_NULL_VIOLATION),
            Self::CheckViolation { .. } => Some(CHECK_VIOLATION),
            Self::NotFound(_) | Self::Backend(_) => None,
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Durable table of API key records
#[async_trait]
pub trait RecordStore: Send + Sync + Debug {
    /// All records owned by `owner`, newest first
    async fn list(&self, owner: &PrincipalId) -> Result<Vec<ApiKeyRecord>, StoreError>;

    /// Fetch one record by id regardless of owner
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKeyRecord>, StoreError>;

    /// Insert a record; the store assigns `id` and `created_at` and enforces
    /// non-empty descriptions unique per owner
    async fn insert(&self, record: NewApiKeyRecord) -> Result<ApiKeyRecord, StoreError>;

    /// Set `revoked_at` on an active record owned by `owner`.
    ///
    /// Fails with `NotFound` when no active record with that id and owner exists.
    async fn revoke(
        &self,
        id: &ApiKeyId,
        owner: &PrincipalId,
        revoked_at: DateTime<Utc>,
    ) -> Result<ApiKeyRecord, StoreError>;

    /// Remove a record; returns whether a row was deleted
    async fn delete(&self, id: &ApiKeyId) -> Result<bool, StoreError>;
}
