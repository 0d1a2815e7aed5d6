// crates/dwn-descriptor/src/error.rs
// ============================================================================
// Module: Validation Errors
// Description: Structured error taxonomy for descriptor validation.
// Purpose: Report the first violation of a descriptor as a stable value.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Validation never faults: every rejection is a [`ValidationError`] value
//! naming the offending field (dotted for nested objects, e.g.
//! `scope.identifier`) or the failed cross-field rule. Errors are comparable
//! so identical inputs can be checked for identical outcomes.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::registry::CrossFieldRule;

/// Descriptor validation error.
///
/// # Invariants
/// - Variants are stable for validation error classification.
/// - Field names are reported exactly as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// `method` absent, not a string, or not a known literal.
    #[error("unknown method: {}", .method.as_deref().unwrap_or("<absent>"))]
    UnknownMethod {
        /// Declared method string when present.
        method: Option<String>,
    },
    /// Caller-supplied method disagrees with the descriptor's own `method`.
    #[error("method mismatch: expected {expected}, descriptor declares {actual}")]
    MethodMismatch {
        /// Method the caller expected.
        expected: String,
        /// Method the descriptor declares.
        actual: String,
    },
    /// A required field is absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Field name.
        field: String,
    },
    /// A field is present with the wrong primitive kind.
    #[error("wrong type for field: {field}")]
    WrongType {
        /// Field name.
        field: String,
    },
    /// A field has the right kind but fails format validation.
    #[error("invalid format for field: {field}")]
    InvalidFormat {
        /// Field name.
        field: String,
    },
    /// A field value is outside its permitted literal set.
    #[error("value {value:?} not permitted for field: {field}")]
    NotInEnum {
        /// Field name.
        field: String,
        /// Offending value.
        value: String,
    },
    /// A field outside the schema's declared set was supplied.
    #[error("unknown field: {field}")]
    UnknownField {
        /// Field name.
        field: String,
    },
    /// A conditional rule spanning several fields failed.
    #[error("cross-field rule violated: {rule}")]
    CrossFieldViolation {
        /// Identifier of the failed rule.
        rule: CrossFieldRule,
    },
}

impl ValidationError {
    /// Builds an [`ValidationError::UnknownMethod`] error.
    #[must_use]
    pub fn unknown_method(method: Option<&str>) -> Self {
        Self::UnknownMethod {
            method: method.map(str::to_string),
        }
    }

    /// Builds a [`ValidationError::MissingField`] error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Builds a [`ValidationError::WrongType`] error.
    #[must_use]
    pub fn wrong_type(field: impl Into<String>) -> Self {
        Self::WrongType {
            field: field.into(),
        }
    }

    /// Builds a [`ValidationError::InvalidFormat`] error.
    #[must_use]
    pub fn invalid_format(field: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
        }
    }

    /// Builds a [`ValidationError::NotInEnum`] error.
    #[must_use]
    pub fn not_in_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotInEnum {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds a [`ValidationError::UnknownField`] error.
    #[must_use]
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Builds a [`ValidationError::CrossFieldViolation`] error.
    #[must_use]
    pub const fn cross_field(rule: CrossFieldRule) -> Self {
        Self::CrossFieldViolation {
            rule,
        }
    }

    /// Returns a stable snake_case label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMethod {
                ..
            } => "unknown_method",
            Self::MethodMismatch {
                ..
            } => "method_mismatch",
            Self::MissingField {
                ..
            } => "missing_field",
            Self::WrongType {
                ..
            } => "wrong_type",
            Self::InvalidFormat {
                ..
            } => "invalid_format",
            Self::NotInEnum {
                ..
            } => "not_in_enum",
            Self::UnknownField {
                ..
            } => "unknown_field",
            Self::CrossFieldViolation {
                ..
            } => "cross_field_violation",
        }
    }

    /// Returns the offending field name when the error is field-scoped.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField {
                field,
            }
            | Self::WrongType {
                field,
            }
            | Self::InvalidFormat {
                field,
            }
            | Self::NotInEnum {
                field,
                ..
            }
            | Self::UnknownField {
                field,
            } => Some(field),
            Self::UnknownMethod {
                ..
            }
            | Self::MethodMismatch {
                ..
            }
            | Self::CrossFieldViolation {
                ..
            } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationError;
    use crate::registry::CrossFieldRule;

    #[test]
    fn messages_name_the_offending_field() {
        assert_eq!(
            ValidationError::missing("dateCreated").to_string(),
            "missing required field: dateCreated"
        );
        assert_eq!(
            ValidationError::not_in_enum("dateSort", "bogus").to_string(),
            "value \"bogus\" not permitted for field: dateSort"
        );
        assert_eq!(
            ValidationError::cross_field(CrossFieldRule::ScopeIdentifierRequiresSchema)
                .to_string(),
            "cross-field rule violated: scope_identifier_requires_schema"
        );
    }

    #[test]
    fn kind_and_field_accessors() {
        let error = ValidationError::invalid_format("recordId");
        assert_eq!(error.kind(), "invalid_format");
        assert_eq!(error.field(), Some("recordId"));
        assert_eq!(ValidationError::unknown_method(None).field(), None);
    }
}
