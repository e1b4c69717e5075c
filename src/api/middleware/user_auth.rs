//! Caller identity from the `Authorization` header

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::identity::BearerIdentityProvider;

/// Key service bound to the caller's bearer token.
///
/// A missing token is not rejected here; the service reports it as
/// not authenticated so the error body carries the localized message.
#[derive(Clone)]
pub struct RequireCaller(pub ApiKeyService);

impl FromRequestParts<AppState> for RequireCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?,
            ),
            None => None,
        };

        let identity =
            BearerIdentityProvider::from_authorization(authorization, Arc::clone(&state.jwt_service));

        Ok(RequireCaller(
            state.api_key_service.for_identity(Arc::new(identity)),
        ))
    }
}
