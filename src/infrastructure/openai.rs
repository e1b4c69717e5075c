//! Thin OpenAI REST helper
//!
//! One request per call: no retry, no streaming.

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::domain::DomainError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const FALLBACK_ERROR: &str = "OpenAI API error";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    auth_header: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration("OpenAI API key is not configured"));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            auth_header: format!("Bearer {}", api_key),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `body` as JSON to `endpoint` (e.g. `/models`) and return the JSON reply
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, DomainError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("OpenAI request: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Authorization", &self.auth_header);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::provider("openai", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_body: Option<Value> = response.json().await.ok();
            return Err(DomainError::provider(
                "openai",
                error_message(error_body.as_ref()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::provider("openai", format!("Failed to parse response: {}", e)))
    }
}

/// `error.message` of an error body, or the generic message
fn error_message(body: Option<&Value>) -> String {
    body.and_then(|b| b.pointer("/error/message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_ERROR)
        .to_string()
}
