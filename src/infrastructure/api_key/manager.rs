//! Key lifecycle manager
//!
//! Holds the state behind the API keys settings screen: the ordered record
//! list, the one-time plaintext of a new key, the description draft, the
//! loading flag and a single localized error banner. No operation returns an
//! error; failures are reported to the diagnostic sink and shown as the
//! banner instead.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::api_key::{ApiKeyId, ApiKeyRecord, KeyAction, KeyError, KeyErrorKind, KeyStatus};
use crate::domain::{Clipboard, ConfirmationGate};
use crate::infrastructure::diagnostics::{log_error, DiagnosticSink};
use crate::infrastructure::i18n::{translate, Locale};

use super::service::ApiKeyService;

/// How long the "copied" indicator stays on
pub const COPY_SUCCESS_WINDOW: Duration = Duration::from_millis(2000);

/// What happened to a requested action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// The operator declined the confirmation
    Declined,
    /// Nothing to do, e.g. a blank description
    Skipped,
    /// The error banner holds the reason
    Failed,
}

/// Render model of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRow {
    pub id: ApiKeyId,
    pub description: String,
    pub masked_key: String,
    pub created: String,
    pub status: KeyStatus,
    pub status_label: String,
    pub action: KeyAction,
    pub action_label: String,
}

pub struct KeyLifecycleManager {
    service: ApiKeyService,
    confirmation: Arc<dyn ConfirmationGate>,
    clipboard: Arc<dyn Clipboard>,
    diagnostics: Arc<dyn DiagnosticSink>,
    locale: Locale,
    records: Vec<ApiKeyRecord>,
    new_key: Option<String>,
    description: String,
    loading: bool,
    error: Option<KeyErrorKind>,
    copied_until: Option<Instant>,
}

impl KeyLifecycleManager {
    pub fn new(
        service: ApiKeyService,
        confirmation: Arc<dyn ConfirmationGate>,
        clipboard: Arc<dyn Clipboard>,
        diagnostics: Arc<dyn DiagnosticSink>,
        locale: Locale,
    ) -> Self {
        Self {
            service,
            confirmation,
            clipboard,
            diagnostics,
            locale,
            records: Vec::new(),
            new_key: None,
            description: String::new(),
            loading: true,
            error: None,
            copied_until: None,
        }
    }

    /// Reload the records; on failure the previous list stays
    pub async fn list(&mut self) -> ActionOutcome {
        self.loading = true;

        let outcome = match self.service.list().await {
            Ok(records) => {
                debug!("Loaded {} API keys", records.len());
                self.records = records;
                ActionOutcome::Completed
            }
            Err(e) => {
                // Principal failures while loading still show the load banner
                self.fail_as(KeyErrorKind::Load, &e, "ApiKeys.list", json!({}));
                ActionOutcome::Failed
            }
        };

        self.loading = false;
        outcome
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Generate a key from the current draft
    pub async fn submit(&mut self) -> ActionOutcome {
        let description = self.description.clone();
        self.generate(&description).await
    }

    /// Create a key; the plaintext is held until dismissed.
    ///
    /// The loading flag stays on while the insert is in flight.
    pub async fn generate(&mut self, description: &str) -> ActionOutcome {
        if description.trim().is_empty() {
            return ActionOutcome::Skipped;
        }

        self.error = None;
        self.new_key = None;
        self.loading = true;

        match self.service.generate(description).await {
            Ok(generated) => {
                info!("API key created: id={}", generated.record.id());
                self.new_key = Some(generated.key);
                self.description.clear();
                self.list().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                self.loading = false;
                self.fail(
                    &e,
                    "ApiKeys.generate",
                    json!({ "description": description.trim() }),
                );
                ActionOutcome::Failed
            }
        }
    }

    pub async fn revoke(&mut self, id: &ApiKeyId) -> ActionOutcome {
        if !self.confirm(KeyAction::Revoke, id).await {
            return ActionOutcome::Declined;
        }

        self.error = None;
        self.loading = true;

        match self.service.revoke(id).await {
            Ok(_) => {
                self.list().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                self.loading = false;
                self.fail(&e, "ApiKeys.revoke", json!({ "id": id.to_string() }));
                ActionOutcome::Failed
            }
        }
    }

    pub async fn delete(&mut self, id: &ApiKeyId) -> ActionOutcome {
        if !self.confirm(KeyAction::Delete, id).await {
            return ActionOutcome::Declined;
        }

        self.error = None;

        match self.service.delete(id).await {
            Ok(_) => {
                self.list().await;
                ActionOutcome::Completed
            }
            Err(e) => {
                self.fail(&e, "ApiKeys.delete", json!({ "id": id.to_string() }));
                ActionOutcome::Failed
            }
        }
    }

    /// Copy `text`; success lights the copied indicator for two seconds
    pub async fn copy_to_clipboard(&mut self, text: &str) -> ActionOutcome {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                self.copied_until = Some(Instant::now() + COPY_SUCCESS_WINDOW);
                ActionOutcome::Completed
            }
            Err(e) => {
                self.fail(&KeyError::Copy(e), "ApiKeys.copy", json!({}));
                ActionOutcome::Failed
            }
        }
    }

    /// Close the creation panel
    pub fn cancel(&mut self) {
        self.description.clear();
        self.new_key = None;
    }

    pub fn dismiss_new_key(&mut self) {
        self.new_key = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn records(&self) -> &[ApiKeyRecord] {
        &self.records
    }

    pub fn new_key(&self) -> Option<&str> {
        self.new_key.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_kind(&self) -> Option<KeyErrorKind> {
        self.error
    }

    /// Localized banner message
    pub fn error(&self) -> Option<String> {
        self.error
            .map(|kind| translate(self.locale, kind.message_key()))
    }

    pub fn copy_success(&self) -> bool {
        self.copied_until
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn rows(&self) -> Vec<KeyRow> {
        self.records
            .iter()
            .map(|record| {
                let status = record.status();
                let action = record.available_action();

                KeyRow {
                    id: *record.id(),
                    description: record.description().to_string(),
                    masked_key: record.masked_key(),
                    created: record.created_at().format("%Y-%m-%d").to_string(),
                    status,
                    status_label: translate(self.locale, status_label_key(status)),
                    action,
                    action_label: translate(self.locale, action_label_key(action)),
                }
            })
            .collect()
    }

    async fn confirm(&self, action: KeyAction, id: &ApiKeyId) -> bool {
        let prompt_key = match action {
            KeyAction::Revoke => "settings.apiKeys.confirmRevoke",
            KeyAction::Delete => "settings.apiKeys.confirmDelete",
        };
        let prompt = translate(self.locale, prompt_key);

        let confirmed = self.confirmation.confirm(action, id, &prompt).await;
        if !confirmed {
            debug!("Confirmation declined: id={}", id);
        }
        confirmed
    }

    fn fail(&mut self, error: &KeyError, context: &str, metadata: serde_json::Value) {
        self.fail_as(error.kind(), error, context, metadata);
    }

    fn fail_as(
        &mut self,
        kind: KeyErrorKind,
        error: &KeyError,
        context: &str,
        metadata: serde_json::Value,
    ) {
        log_error(self.diagnostics.as_ref(), error, kind.as_str(), context, metadata);
        self.error = Some(kind);
    }
}

fn status_label_key(status: KeyStatus) -> &'static str {
    match status {
        KeyStatus::Active => "settings.apiKeys.active",
        KeyStatus::Revoked => "settings.apiKeys.revoked",
    }
}

fn action_label_key(action: KeyAction) -> &'static str {
    match action {
        KeyAction::Revoke => "settings.apiKeys.revoke",
        KeyAction::Delete => "settings.apiKeys.delete",
    }
}
