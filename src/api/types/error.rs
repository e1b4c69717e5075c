//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::api_key::{KeyError, StoreError};
use crate::domain::DomainError;
use crate::infrastructure::i18n::{translate, Locale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    NotFoundError,
    ConflictError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// `{ "error": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    /// Localization key of the message, for clients that translate themselves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    /// Localized response for a key workflow failure
    pub fn from_key_error(err: &KeyError, locale: Locale) -> Self {
        let kind = err.kind();
        let message = translate(locale, kind.message_key());

        let error = match err {
            KeyError::Auth(_) | KeyError::NotAuthenticated => Self::unauthorized(message),
            KeyError::Validation(_) => Self::bad_request(message),
            KeyError::DuplicateDescription(_)
            | KeyError::AlreadyRevoked(_)
            | KeyError::StillActive(_)
            | KeyError::Busy(_) => Self::conflict(message),
            KeyError::Revoke {
                source: StoreError::NotFound(_),
                ..
            }
            | KeyError::Delete {
                source: StoreError::NotFound(_),
                ..
            } => Self::not_found(message),
            KeyError::Load(_)
            | KeyError::Generate(_)
            | KeyError::Revoke { .. }
            | KeyError::Delete { .. }
            | KeyError::Copy(_) => Self::internal(message),
        };

        error.with_code(kind.message_key())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidId { message } => {
                Self::bad_request(message).with_code("invalid_id")
            }
            DomainError::Authentication { message } => Self::unauthorized(message),
            DomainError::Provider { provider, message } => {
                Self::internal(format!("{}: {}", provider, message))
            }
            DomainError::Configuration { message }
            | DomainError::Internal { message }
            | DomainError::Storage { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::ApiKeyId;

    #[test]
    fn test_key_error_statuses() {
        let id = ApiKeyId::new();
        let cases = [
            (KeyError::NotAuthenticated, StatusCode::UNAUTHORIZED),
            (
                KeyError::Auth(DomainError::authentication("expired")),
                StatusCode::UNAUTHORIZED,
            ),
            (
                KeyError::DuplicateDescription("CI".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                KeyError::Validation(StoreError::from_sqlstate("23502", "user_id")),
                StatusCode::BAD_REQUEST,
            ),
            (KeyError::StillActive(id), StatusCode::CONFLICT),
            (KeyError::AlreadyRevoked(id), StatusCode::CONFLICT),
            (KeyError::Busy("user-1".to_string()), StatusCode::CONFLICT),
            (
                KeyError::Revoke {
                    id,
                    source: StoreError::not_found("gone"),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                KeyError::Revoke {
                    id,
                    source: StoreError::backend("down"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                KeyError::Load(StoreError::backend("down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from_key_error(&err, Locale::En).status, status, "{}", err);
        }
    }

    #[test]
    fn test_key_error_body_is_localized() {
        let err = KeyError::DuplicateDescription("CI".to_string());

        let api_err = ApiError::from_key_error(&err, Locale::Es);
        let json = serde_json::to_value(&api_err.response).unwrap();

        assert_eq!(
            json["error"]["message"],
            "Ya existe una clave API con esta descripción"
        );
        assert_eq!(json["error"]["type"], "conflict_error");
        assert_eq!(
            json["error"]["code"],
            "settings.apiKeys.errors.duplicateDescription"
        );
    }

    #[test]
    fn test_domain_error_conversion() {
        let api_err: ApiError = DomainError::invalid_id("not a uuid").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.response.error.code.as_deref(), Some("invalid_id"));
    }

    #[test]
    fn test_code_omitted_when_absent() {
        let json = serde_json::to_string(&ApiError::internal("boom").response).unwrap();

        assert!(!json.contains("code"));
        assert!(json.contains("server_error"));
    }
}
