//! Operator-facing error reports
//!
//! Every failure the key manager swallows is recorded here before it is
//! turned into a banner message.

use std::error::Error;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

/// A single logged failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Where the failure happened, e.g. `ApiKeys.generate`
    pub context: String,
    /// Short error kind
    pub kind: String,
    pub message: String,
    /// Messages of the source chain, outermost first
    pub stack: Vec<String>,
    pub metadata: Value,
}

impl ErrorReport {
    pub fn new(error: &dyn Error, kind: impl Into<String>, context: impl Into<String>, metadata: Value) -> Self {
        let mut stack = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push(cause.to_string());
            source = cause.source();
        }

        Self {
            timestamp: Utc::now().to_rfc3339(),
            context: context.into(),
            kind: kind.into(),
            message: error.to_string(),
            stack,
            metadata,
        }
    }
}

/// Destination for error reports
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, report: ErrorReport);
}

/// Emits reports as structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, report: ErrorReport) {
        error!(
            timestamp = %report.timestamp,
            context = %report.context,
            kind = %report.kind,
            stack = ?report.stack,
            metadata = %report.metadata,
            "{}",
            report.message
        );
    }
}

/// Keeps reports in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Arc<Mutex<Vec<ErrorReport>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, report: ErrorReport) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report);
        }
    }
}

/// Build a report for `error` and hand it to `sink`
pub fn log_error(
    sink: &dyn DiagnosticSink,
    error: &dyn Error,
    kind: &str,
    context: &str,
    metadata: Value,
) {
    sink.record(ErrorReport::new(error, kind, context, metadata));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::api_key::{KeyError, StoreError};

    #[test]
    fn test_report_carries_source_chain() {
        let err = KeyError::Load(StoreError::backend("connection refused"));

        let report = ErrorReport::new(&err, "load_error", "ApiKeys.list", json!({}));

        assert_eq!(report.context, "ApiKeys.list");
        assert_eq!(report.kind, "load_error");
        assert_eq!(report.message, err.to_string());
        assert_eq!(report.stack.len(), 1);
        assert!(report.stack[0].contains("connection refused"));
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[test]
    fn test_memory_sink_records() {
        let sink = MemorySink::new();
        let err = KeyError::NotAuthenticated;

        log_error(
            &sink,
            &err,
            "not_authenticated",
            "ApiKeys.generate",
            json!({ "description": "CI pipeline" }),
        );

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].stack.is_empty());
        assert_eq!(reports[0].metadata["description"], "CI pipeline");
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        let err = KeyError::Busy("user-1".to_string());
        log_error(&TracingSink, &err, "busy", "ApiKeys.revoke", Value::Null);
    }
}
