//! Access-token validation for the identity provider
//!
//! Tokens are HS256 JWTs whose `sub` claim is the principal id, as issued by
//! the hosted auth service the dashboard signs in against.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::identity::{IdentityProvider, Principal, PrincipalId};
use crate::domain::DomainError;

/// Access-token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (principal ID)
    pub sub: String,
    /// Audience, `authenticated` for signed-in users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Create new claims for a principal
    pub fn new(principal: &PrincipalId, audience: Option<String>, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: principal.as_str().to_string(),
            aud: audience,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Configuration for JWT validation
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret the tokens are signed with
    pub secret: String,
    /// Required `aud` claim, if any
    pub audience: Option<String>,
    /// Lifetime of tokens issued by [`JwtService::issue`]
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            audience: None,
            expiration_hours: 1,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

/// HS256 JWT validation (and issuing, for local tooling and tests)
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("audience", &self.config.audience)
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a principal
    pub fn issue(&self, principal: &PrincipalId) -> Result<String, DomainError> {
        let claims = AccessTokenClaims::new(
            principal,
            self.config.audience.clone(),
            self.config.expiration_hours,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to issue JWT: {}", e)))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<AccessTokenClaims, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);

        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::authentication(format!("Invalid access token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Identity taken from an optional bearer token
#[derive(Debug, Clone)]
pub struct BearerIdentityProvider {
    token: Option<String>,
    jwt: Arc<JwtService>,
}

impl BearerIdentityProvider {
    pub fn new(token: Option<String>, jwt: Arc<JwtService>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token, jwt }
    }

    /// Parse an `Authorization` header value (`Bearer <token>`)
    pub fn from_authorization(header: Option<&str>, jwt: Arc<JwtService>) -> Self {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string());

        Self::new(token, jwt)
    }
}

#[async_trait]
impl IdentityProvider for BearerIdentityProvider {
    async fn current_principal(&self) -> Result<Option<Principal>, DomainError> {
        let Some(token) = &self.token else {
            return Ok(None);
        };

        let claims = self.jwt.validate(token)?;
        debug!("Resolved principal from access token: sub={}", claims.sub);

        let id = PrincipalId::new(claims.sub)
            .map_err(|e| DomainError::authentication(format!("Token subject rejected: {}", e)))?;

        Ok(Some(Principal::new(id)))
    }
}
