// crates/dwn-descriptor/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Structured audit events for descriptor validation outcomes.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each configured validation emits one [`ValidationAuditEvent`]. Events
//! carry the method, outcome, and error classification only; descriptor
//! values are never logged. Sinks are `Send + Sync` so a validator can be
//! shared across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::error::ValidationError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validation outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Descriptor accepted and normalized.
    Accepted,
    /// Descriptor rejected.
    Rejected,
}

/// Descriptor validation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Method the caller expected, when supplied.
    pub method_hint: Option<String>,
    /// Method the descriptor declares, when it is a string.
    pub method: Option<String>,
    /// Validation outcome.
    pub outcome: ValidationOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Offending field name when the error is field-scoped.
    pub error_field: Option<String>,
    /// Number of top-level fields supplied.
    pub field_count: usize,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs required to construct an audit event.
pub struct ValidationAuditEventParams {
    /// Method the caller expected, when supplied.
    pub method_hint: Option<String>,
    /// Method the descriptor declares, when it is a string.
    pub method: Option<String>,
    /// Validation result error, if any.
    pub error: Option<ValidationError>,
    /// Number of top-level fields supplied.
    pub field_count: usize,
}

impl ValidationAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ValidationAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let outcome = if params.error.is_some() {
            ValidationOutcome::Rejected
        } else {
            ValidationOutcome::Accepted
        };
        Self {
            event: "descriptor_validation",
            timestamp_ms,
            method_hint: params.method_hint,
            method: params.method,
            outcome,
            error_kind: params.error.as_ref().map(ValidationError::kind),
            error_field: params.error.as_ref().and_then(ValidationError::field).map(str::to_string),
            field_count: params.field_count,
            redaction: "field_names_only",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for descriptor validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}
