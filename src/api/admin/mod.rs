//! Console API endpoints

pub mod api_keys;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/api-keys", get(api_keys::list_api_keys))
        .route("/api-keys", post(api_keys::create_api_key))
        .route("/api-keys/{key_id}", delete(api_keys::delete_api_key))
        .route("/api-keys/{key_id}/revoke", post(api_keys::revoke_api_key))
}
