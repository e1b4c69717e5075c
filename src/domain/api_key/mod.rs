//! API Key domain
//!
//! Records, the record store contract, and the error taxonomy of the key
//! lifecycle (create, list, revoke, delete).

mod entity;
mod error;
mod store;
mod validation;

pub use entity::{
    mask_key, ApiKeyId, ApiKeyRecord, KeyAction, KeyStatus, NewApiKeyRecord, MASK_MIN_LEN,
};
pub use error::{KeyError, KeyErrorKind};
pub use store::{RecordStore, StoreError, CHECK_VIOLATION, NOT_NULL_VIOLATION, UNIQUE_VIOLATION};
pub use validation::{
    normalize_description, validate_key_format, KeyFormatError, KEY_LENGTH, KEY_PREFIX,
};
