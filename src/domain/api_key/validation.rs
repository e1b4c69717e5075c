//! API key validation utilities

use thiserror::Error;
use uuid::Uuid;

/// Prefix of every generated key
pub const KEY_PREFIX: &str = "sk-";

/// `sk-` followed by a hyphenated UUID
pub const KEY_LENGTH: usize = 3 + 36;

/// Errors raised by key format checks
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyFormatError {
    #[error("API key must start with 'sk-'")]
    MissingPrefix,

    #[error("API key must be 39 characters long, got {0}")]
    WrongLength(usize),

    #[error("API key body is not a hyphenated UUID")]
    InvalidBody,
}

/// Trim a description typed by the user.
///
/// Returns `None` when nothing but whitespace is left.
pub fn normalize_description(description: &str) -> Option<String> {
    let trimmed = description.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check that a key looks like `sk-<uuid>`
pub fn validate_key_format(key: &str) -> Result<(), KeyFormatError> {
    let body = key
        .strip_prefix(KEY_PREFIX)
        .ok_or(KeyFormatError::MissingPrefix)?;

    if key.len() != KEY_LENGTH {
        return Err(KeyFormatError::WrongLength(key.len()));
    }

    Uuid::try_parse(body)
        .map(|_| ())
        .map_err(|_| KeyFormatError::InvalidBody)
}
