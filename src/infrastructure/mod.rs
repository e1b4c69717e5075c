//! Infrastructure layer - External service implementations

pub mod api_key;
pub mod clipboard;
pub mod confirm;
pub mod diagnostics;
pub mod i18n;
pub mod identity;
pub mod logging;
pub mod openai;
pub mod storage;
