//! Respondo console
//!
//! API key lifecycle management for the Respondo support dashboard:
//! - Generate, list, revoke and delete per-user API keys
//! - PostgreSQL or in-memory key storage
//! - HTTP API for the web console and an operator CLI

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::state::AppState;
use domain::{IdentityProvider, RecordStore};
use infrastructure::{
    api_key::{ApiKeyService, InMemoryRecordStore, PostgresRecordStore},
    i18n::Locale,
    identity::{FixedIdentityProvider, JwtConfig, JwtService},
    storage::{connect_pool, PostgresConfig},
};

/// Postgres-backed store when `database.url` is set, in-memory otherwise
pub async fn create_record_store(config: &AppConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    match &config.database.url {
        Some(url) => {
            info!("Connecting to PostgreSQL...");
            let pg_config =
                PostgresConfig::new(url).with_max_connections(config.database.max_connections);
            let pool = connect_pool(&pg_config).await?;

            Ok(Arc::new(PostgresRecordStore::new(pool)))
        }
        None => {
            warn!("No database configured; API keys are kept in memory");
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
    }
}

/// Validator for bearer tokens; requires `auth.jwt_secret`
pub fn create_jwt_service(config: &AppConfig) -> anyhow::Result<Arc<JwtService>> {
    let secret = config
        .auth
        .jwt_secret
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("auth.jwt_secret is not configured (set APP__AUTH__JWT_SECRET)")
        })?;

    let mut jwt_config = JwtConfig::new(secret);
    jwt_config.expiration_hours = config.auth.expiration_hours;
    if let Some(audience) = &config.auth.audience {
        jwt_config = jwt_config.with_audience(audience);
    }

    Ok(Arc::new(JwtService::new(jwt_config)))
}

pub fn console_locale(config: &AppConfig) -> Locale {
    Locale::from_tag(&config.console.locale)
}

/// Service bound to `identity`, over the configured store
pub async fn create_api_key_service(
    config: &AppConfig,
    identity: Arc<dyn IdentityProvider>,
) -> anyhow::Result<ApiKeyService> {
    let store = create_record_store(config).await?;
    Ok(ApiKeyService::new(store, identity))
}

/// State for the HTTP server; each request binds its own caller
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt_service = create_jwt_service(config)?;
    let service =
        create_api_key_service(config, Arc::new(FixedIdentityProvider::anonymous())).await?;

    Ok(AppState::new(service, jwt_service, console_locale(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_secret_required() {
        let config = AppConfig::default();
        assert!(create_jwt_service(&config).is_err());
    }

    #[tokio::test]
    async fn test_app_state_in_memory() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("secret".to_string());
        config.console.locale = "es".to_string();

        let state = create_app_state(&config).await.unwrap();

        assert_eq!(state.locale, Locale::Es);
    }
}
