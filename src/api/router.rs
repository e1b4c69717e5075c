use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::admin;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Key management consumed by the web console
        .nest("/api", admin::create_admin_router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::api_key::{ApiKeyService, InMemoryRecordStore};
    use crate::infrastructure::i18n::Locale;
    use crate::infrastructure::identity::{FixedIdentityProvider, JwtConfig, JwtService};

    fn test_state() -> AppState {
        let service = ApiKeyService::new(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(FixedIdentityProvider::anonymous()),
        );
        let jwt = Arc::new(JwtService::new(JwtConfig::new("test-secret")));

        AppState::new(service, jwt, Locale::En)
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
