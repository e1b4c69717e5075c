//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::i18n::Locale;
use crate::infrastructure::identity::JwtService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Base service; handlers bind the caller's identity per request
    pub api_key_service: ApiKeyService,
    pub jwt_service: Arc<JwtService>,
    /// Language of error messages
    pub locale: Locale,
}

impl AppState {
    pub fn new(api_key_service: ApiKeyService, jwt_service: Arc<JwtService>, locale: Locale) -> Self {
        Self {
            api_key_service,
            jwt_service,
            locale,
        }
    }
}
