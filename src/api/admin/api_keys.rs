//! API key management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireCaller;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::api_key::{ApiKeyId, ApiKeyRecord, KeyStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApiKeyRequest {
    pub description: String,
}

/// A key as listed; the full key never appears here
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyResponse {
    pub id: String,
    pub description: String,
    pub masked_key: String,
    pub status: KeyStatus,
    pub created_at: String,
    pub revoked_at: Option<String>,
}

impl From<&ApiKeyRecord> for ApiKeyResponse {
    fn from(record: &ApiKeyRecord) -> Self {
        Self {
            id: record.id().to_string(),
            description: record.description().to_string(),
            masked_key: record.masked_key(),
            status: record.status(),
            created_at: record.created_at().to_rfc3339(),
            revoked_at: record.revoked_at().map(|at| at.to_rfc3339()),
        }
    }
}

/// Creation response, the only one carrying the full key
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyWithSecretResponse {
    #[serde(flatten)]
    pub api_key: ApiKeyResponse,
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListApiKeysResponse {
    pub api_keys: Vec<ApiKeyResponse>,
    pub total: usize,
}

/// GET /api/api-keys
pub async fn list_api_keys(
    State(state): State<AppState>,
    RequireCaller(service): RequireCaller,
) -> Result<Json<ListApiKeysResponse>, ApiError> {
    debug!("Listing API keys");

    let records = service
        .list()
        .await
        .map_err(|e| ApiError::from_key_error(&e, state.locale))?;

    let api_keys: Vec<ApiKeyResponse> = records.iter().map(ApiKeyResponse::from).collect();
    let total = api_keys.len();

    Ok(Json(ListApiKeysResponse { api_keys, total }))
}

/// POST /api/api-keys
pub async fn create_api_key(
    State(state): State<AppState>,
    RequireCaller(service): RequireCaller,
    Json(request): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<ApiKeyWithSecretResponse>), ApiError> {
    debug!(description = %request.description, "Creating API key");

    let generated = service
        .generate(&request.description)
        .await
        .map_err(|e| ApiError::from_key_error(&e, state.locale))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiKeyWithSecretResponse {
            api_key: ApiKeyResponse::from(&generated.record),
            key: generated.key,
        }),
    ))
}

/// POST /api/api-keys/{key_id}/revoke
pub async fn revoke_api_key(
    State(state): State<AppState>,
    RequireCaller(service): RequireCaller,
    Path(key_id): Path<String>,
) -> Result<Json<ApiKeyResponse>, ApiError> {
    debug!(key_id = %key_id, "Revoking API key");

    let id = ApiKeyId::parse(&key_id)?;
    let record = service
        .revoke(&id)
        .await
        .map_err(|e| ApiError::from_key_error(&e, state.locale))?;

    Ok(Json(ApiKeyResponse::from(&record)))
}

/// DELETE /api/api-keys/{key_id}
pub async fn delete_api_key(
    State(state): State<AppState>,
    RequireCaller(service): RequireCaller,
    Path(key_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(key_id = %key_id, "Deleting API key");

    let id = ApiKeyId::parse(&key_id)?;
    service
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_key_error(&e, state.locale))?;

    Ok(StatusCode::NO_CONTENT)
}
