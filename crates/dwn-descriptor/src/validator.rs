// crates/dwn-descriptor/src/validator.rs
// ============================================================================
// Module: Descriptor Validation Entry Point
// Description: Resolves, checks, and normalizes candidate descriptors.
// Purpose: Turn an untrusted JSON descriptor into a normalized descriptor or a
//          single deterministic validation error.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`validate`] runs the fixed pipeline: determine the method, resolve the
//! schema, confirm required fields, check every present field, evaluate the
//! cross-field rules, and emit a normalized copy. The input is never mutated
//! and no state survives between calls.
//!
//! [`DescriptorValidator`] wraps the same pipeline with a configured unknown
//! field policy and an audit sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::audit::ValidationAuditEvent;
use crate::audit::ValidationAuditEventParams;
use crate::audit::ValidationAuditSink;
use crate::checks::check_fields;
use crate::config::ConfigError;
use crate::config::UnknownFieldPolicy;
use crate::config::ValidatorConfig;
use crate::descriptor::Descriptor;
use crate::error::ValidationError;
use crate::method::Method;
use crate::registry::SchemaRegistry;
use crate::rules;

// ============================================================================
// SECTION: Normalized Descriptor
// ============================================================================

/// Descriptor that passed validation.
///
/// # Invariants
/// - Fields appear in schema declaration order.
/// - Enumerated values hold their canonical literal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDescriptor {
    /// Resolved method.
    method: Method,
    /// Normalized fields.
    fields: Map<String, Value>,
}

impl NormalizedDescriptor {
    /// Returns the resolved method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns a field value by wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the normalized fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the normalized descriptor as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Consumes the descriptor and returns it as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Converts the descriptor into its typed variant.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the typed model cannot represent the
    /// normalized fields.
    pub fn to_typed(&self) -> Result<Descriptor, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl Serialize for NormalizedDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Validates a candidate descriptor, rejecting unknown fields.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(
    method_hint: Option<&str>,
    candidate: &Value,
) -> Result<NormalizedDescriptor, ValidationError> {
    validate_with_policy(method_hint, candidate, UnknownFieldPolicy::Reject)
}

/// Validates a candidate descriptor under an explicit unknown field policy.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_with_policy(
    method_hint: Option<&str>,
    candidate: &Value,
    policy: UnknownFieldPolicy,
) -> Result<NormalizedDescriptor, ValidationError> {
    let object = candidate.as_object().ok_or_else(|| ValidationError::wrong_type("descriptor"))?;
    let declared = match object.get("method") {
        Some(Value::String(method)) => method.as_str(),
        _ => return Err(ValidationError::unknown_method(None)),
    };
    if let Some(expected) = method_hint
        && expected != declared
    {
        return Err(ValidationError::MethodMismatch {
            expected: expected.to_string(),
            actual: declared.to_string(),
        });
    }

    let registry = SchemaRegistry::global();
    let schema = registry
        .resolve(declared)
        .map_err(|_| ValidationError::unknown_method(Some(declared)))?;
    let fields = check_fields(registry, schema.fields(), None, object, policy)?;
    rules::evaluate(registry, schema, &fields)?;

    Ok(NormalizedDescriptor {
        method: schema.method(),
        fields,
    })
}

/// Validates the `descriptor` object of a full protocol message.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for a non-object message or
/// descriptor, [`ValidationError::MissingField`] when `descriptor` is absent,
/// and otherwise the first error from [`validate`].
pub fn validate_message(
    method_hint: Option<&str>,
    message: &Value,
) -> Result<NormalizedDescriptor, ValidationError> {
    validate(method_hint, message_descriptor(message)?)
}

/// Extracts the `descriptor` member of a message.
fn message_descriptor(message: &Value) -> Result<&Value, ValidationError> {
    let object = message.as_object().ok_or_else(|| ValidationError::wrong_type("message"))?;
    let descriptor = object.get("descriptor").ok_or_else(|| ValidationError::missing("descriptor"))?;
    if descriptor.is_object() { Ok(descriptor) } else { Err(ValidationError::wrong_type("descriptor")) }
}

// ============================================================================
// SECTION: Configured Validator
// ============================================================================

/// Descriptor validator with configured policy and audit output.
///
/// # Invariants
/// - Behavior is fully determined by the stored policy; the sink only observes.
#[derive(Clone)]
pub struct DescriptorValidator {
    /// Unknown field policy.
    policy: UnknownFieldPolicy,
    /// Audit event sink.
    audit: Arc<dyn ValidationAuditSink>,
}

impl DescriptorValidator {
    /// Creates a validator from configuration, opening the audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid or the audit
    /// file cannot be opened.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let audit: Arc<dyn ValidationAuditSink> = match (config.audit.enabled, &config.audit.path) {
            (false, _) => Arc::new(NoopAuditSink),
            (true, None) => Arc::new(StderrAuditSink),
            (true, Some(path)) => Arc::new(
                FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?,
            ),
        };
        Ok(Self::with_sink(config.validation.unknown_fields, audit))
    }

    /// Creates a validator with an explicit policy and sink.
    #[must_use]
    pub fn with_sink(policy: UnknownFieldPolicy, audit: Arc<dyn ValidationAuditSink>) -> Self {
        Self {
            policy,
            audit,
        }
    }

    /// Returns the unknown field policy.
    #[must_use]
    pub const fn policy(&self) -> UnknownFieldPolicy {
        self.policy
    }

    /// Validates a candidate descriptor and records an audit event.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(
        &self,
        method_hint: Option<&str>,
        candidate: &Value,
    ) -> Result<NormalizedDescriptor, ValidationError> {
        let result = validate_with_policy(method_hint, candidate, self.policy);
        self.record(method_hint, candidate, result.as_ref().err());
        result
    }

    /// Validates the `descriptor` of a full message and records an audit event.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate_message(
        &self,
        method_hint: Option<&str>,
        message: &Value,
    ) -> Result<NormalizedDescriptor, ValidationError> {
        match message_descriptor(message) {
            Ok(descriptor) => self.validate(method_hint, descriptor),
            Err(err) => {
                self.record(method_hint, message, Some(&err));
                Err(err)
            }
        }
    }

    /// Emits the audit event for one validation.
    fn record(&self, method_hint: Option<&str>, candidate: &Value, error: Option<&ValidationError>) {
        let object = candidate.as_object();
        let event = ValidationAuditEvent::new(ValidationAuditEventParams {
            method_hint: method_hint.map(str::to_string),
            method: object
                .and_then(|object| object.get("method"))
                .and_then(Value::as_str)
                .map(str::to_string),
            error: error.cloned(),
            field_count: object.map_or(0, Map::len),
        });
        self.audit.record(&event);
    }
}

impl Default for DescriptorValidator {
    fn default() -> Self {
        Self::with_sink(UnknownFieldPolicy::Reject, Arc::new(NoopAuditSink))
    }
}
