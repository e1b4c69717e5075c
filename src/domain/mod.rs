//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod clipboard;
pub mod confirm;
pub mod error;
pub mod identity;

pub use api_key::{ApiKeyId, ApiKeyRecord, KeyAction, KeyError, KeyErrorKind, KeyStatus, RecordStore};
pub use clipboard::Clipboard;
pub use confirm::ConfirmationGate;
pub use error::DomainError;
pub use identity::{IdentityProvider, Principal, PrincipalId};
