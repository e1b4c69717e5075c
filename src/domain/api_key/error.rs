//! Errors of the API key lifecycle

use thiserror::Error;

use super::entity::ApiKeyId;
use super::store::StoreError;
use crate::domain::DomainError;

/// User-facing error categories, each with one localized message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyErrorKind {
    Load,
    Auth,
    NotAuthenticated,
    DuplicateDescription,
    Validation,
    Generate,
    Revoke,
    Delete,
    Copy,
    Busy,
}

impl KeyErrorKind {
    /// Localization key of the banner message for this kind
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Load => "settings.apiKeys.errors.loadError",
            Self::Auth => "settings.apiKeys.errors.authError",
            Self::NotAuthenticated => "settings.apiKeys.errors.notAuthenticated",
            Self::DuplicateDescription => "settings.apiKeys.errors.duplicateDescription",
            Self::Validation => "settings.apiKeys.errors.validationError",
            Self::Generate => "settings.apiKeys.errors.generateError",
            Self::Revoke => "settings.apiKeys.errors.revokeError",
            Self::Delete => "settings.apiKeys.errors.deleteError",
            Self::Copy => "settings.apiKeys.errors.copyError",
            Self::Busy => "settings.apiKeys.errors.busy",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load_error",
            Self::Auth => "auth_error",
            Self::NotAuthenticated => "not_authenticated",
            Self::DuplicateDescription => "duplicate_description",
            Self::Validation => "validation_error",
            Self::Generate => "generate_error",
            Self::Revoke => "revoke_error",
            Self::Delete => "delete_error",
            Self::Copy => "copy_error",
            Self::Busy => "busy",
        }
    }
}

/// Failures of list / generate / revoke / delete / copy
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to load API keys: {0}")]
    Load(#[source] StoreError),

    #[error("Failed to resolve the current principal: {0}")]
    Auth(#[source] DomainError),

    #[error("No authenticated principal")]
    NotAuthenticated,

    #[error("An API key with description '{0}' already exists")]
    DuplicateDescription(String),

    #[error("API key is missing a required field: {0}")]
    Validation(#[source] StoreError),

    #[error("Failed to generate API key: {0}")]
    Generate(#[source] StoreError),

    #[error("Failed to revoke API key '{id}': {source}")]
    Revoke {
        id: ApiKeyId,
        #[source]
        source: StoreError,
    },

    #[error("API key '{0}' is already revoked")]
    AlreadyRevoked(ApiKeyId),

    #[error("Failed to delete API key '{id}': {source}")]
    Delete {
        id: ApiKeyId,
        #[source]
        source: StoreError,
    },

    #[error("API key '{0}' must be revoked before it can be deleted")]
    StillActive(ApiKeyId),

    #[error("Failed to copy to clipboard: {0}")]
    Copy(#[source] DomainError),

    #[error("Another API key change is in progress for principal '{0}'")]
    Busy(String),
}

impl KeyError {
    pub fn kind(&self) -> KeyErrorKind {
        match self {
            Self::Load(_) => KeyErrorKind::Load,
            Self::Auth(_) => KeyErrorKind::Auth,
            Self::NotAuthenticated => KeyErrorKind::NotAuthenticated,
            Self::DuplicateDescription(_) => KeyErrorKind::DuplicateDescription,
            Self::Validation(_) => KeyErrorKind::Validation,
            Self::Generate(_) => KeyErrorKind::Generate,
            Self::Revoke { .. } | Self::AlreadyRevoked(_) => KeyErrorKind::Revoke,
            Self::Delete { .. } | Self::StillActive(_) => KeyErrorKind::Delete,
            Self::Copy(_) => KeyErrorKind::Copy,
            Self::Busy(_) => KeyErrorKind::Busy,
        }
    }

    /// Classify an insert failure by its constraint code
    pub fn from_insert(description: &str, err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => {
                Self::DuplicateDescription(description.to_string())
            }
            StoreError::NotNullViolation { .. } | StoreError::CheckViolation { .. } => {
                Self::Validation(err)
            }
            other => Self::Generate(other),
        }
    }
}
