// crates/dwn-descriptor/src/checks.rs
// ============================================================================
// Module: Field Checkers
// Description: Per-type field checks and ordered object field validation.
// Purpose: Reject malformed field values with the offending field attached.
// Dependencies: iri-string, serde_json, uuid
// ============================================================================

//! ## Overview
//! One checker exists per [`FieldType`]. Each returns the normalized value
//! (enum literals canonicalized, nested objects reordered) or a
//! [`ValidationError`] naming the field. [`check_fields`] applies the
//! checkers to an object in three ordered passes: required-field presence,
//! per-field type and format checks, then unknown-field handling. The first
//! failure of the earliest pass wins, and within a pass fields are visited in
//! schema declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use iri_string::types::UriStr;
use serde_json::Map;
use serde_json::Value;
use uuid::Uuid;
use uuid::Variant;

use crate::config::UnknownFieldPolicy;
use crate::error::ValidationError;
use crate::registry::FieldSpec;
use crate::registry::FieldType;
use crate::registry::SchemaRegistry;
use crate::values::ValueSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of a hyphenated UUID string.
const UUID_HYPHENATED_LENGTH: usize = 36;
/// Byte offsets of the hyphens in a hyphenated UUID.
const UUID_HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

// ============================================================================
// SECTION: Object Validation
// ============================================================================

/// Checks `object` against `fields` and returns the normalized field map.
///
/// `prefix` qualifies reported field names for nested objects.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, in pass order: missing
/// required field, invalid field value, unknown field.
pub fn check_fields(
    registry: &SchemaRegistry,
    fields: &[FieldSpec],
    prefix: Option<&str>,
    object: &Map<String, Value>,
    policy: UnknownFieldPolicy,
) -> Result<Map<String, Value>, ValidationError> {
    if let Some(missing) =
        fields.iter().find(|field| field.required && !object.contains_key(field.name))
    {
        return Err(ValidationError::missing(qualify(prefix, missing.name)));
    }

    let mut normalized = Map::new();
    for field in fields {
        if let Some(value) = object.get(field.name) {
            let name = qualify(prefix, field.name);
            let checked = check_value(registry, field.field_type, &name, value, policy)?;
            normalized.insert(field.name.to_string(), checked);
        }
    }

    if policy == UnknownFieldPolicy::Reject
        && let Some(unknown) =
            object.keys().find(|key| !fields.iter().any(|field| field.name == key.as_str()))
    {
        return Err(ValidationError::unknown_field(qualify(prefix, unknown)));
    }

    Ok(normalized)
}

/// Checks a single value against its field type.
///
/// # Errors
///
/// Returns [`ValidationError`] when the value has the wrong kind, format, or
/// literal, or when a nested object fails its own field checks.
pub fn check_value(
    registry: &SchemaRegistry,
    field_type: FieldType,
    name: &str,
    value: &Value,
    policy: UnknownFieldPolicy,
) -> Result<Value, ValidationError> {
    match field_type {
        FieldType::Uuid => check_uuid(name, value),
        FieldType::Uri => check_uri(name, value),
        FieldType::Timestamp => check_timestamp(name, value),
        FieldType::Enum(values) => check_enum(name, value, values),
        FieldType::Boolean => check_boolean(name, value),
        FieldType::FreeString => check_string(name, value),
        FieldType::Object(kind) => {
            let object = value.as_object().ok_or_else(|| ValidationError::wrong_type(name))?;
            let nested =
                check_fields(registry, registry.nested_fields(kind), Some(name), object, policy)?;
            Ok(Value::Object(nested))
        }
    }
}

// ============================================================================
// SECTION: Field Checkers
// ============================================================================

/// Checks a version 4 UUID string.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for non-strings and
/// [`ValidationError::InvalidFormat`] for malformed UUIDs.
pub fn check_uuid(name: &str, value: &Value) -> Result<Value, ValidationError> {
    let text = value.as_str().ok_or_else(|| ValidationError::wrong_type(name))?;
    if is_uuid_v4(text) {
        Ok(value.clone())
    } else {
        Err(ValidationError::invalid_format(name))
    }
}

/// Checks a URI string.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for non-strings and
/// [`ValidationError::InvalidFormat`] for malformed URIs.
pub fn check_uri(name: &str, value: &Value) -> Result<Value, ValidationError> {
    let text = value.as_str().ok_or_else(|| ValidationError::wrong_type(name))?;
    if is_uri(text) {
        Ok(value.clone())
    } else {
        Err(ValidationError::invalid_format(name))
    }
}

/// Checks a Unix epoch timestamp in seconds.
///
/// Back-dated values are accepted and no protocol upper bound applies; the
/// representable ceiling is `u64::MAX`. Integers above it, and numbers
/// written with a fraction or exponent (`1650000000.0`), are reported as
/// [`ValidationError::InvalidFormat`].
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for non-numbers and
/// [`ValidationError::InvalidFormat`] for negative or fractional numbers.
pub fn check_timestamp(name: &str, value: &Value) -> Result<Value, ValidationError> {
    let Value::Number(number) = value else {
        return Err(ValidationError::wrong_type(name));
    };
    if number.as_u64().is_some() {
        Ok(value.clone())
    } else {
        Err(ValidationError::invalid_format(name))
    }
}

/// Checks an enumerated string and returns its canonical literal.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for non-strings and
/// [`ValidationError::NotInEnum`] for values outside the set.
pub fn check_enum(name: &str, value: &Value, values: &ValueSet) -> Result<Value, ValidationError> {
    let text = value.as_str().ok_or_else(|| ValidationError::wrong_type(name))?;
    values
        .canonicalize(text)
        .map(|literal| Value::String(literal.to_string()))
        .ok_or_else(|| ValidationError::not_in_enum(name, text))
}

/// Checks a boolean.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for non-booleans.
pub fn check_boolean(name: &str, value: &Value) -> Result<Value, ValidationError> {
    if value.is_boolean() { Ok(value.clone()) } else { Err(ValidationError::wrong_type(name)) }
}

/// Checks a free-form string.
///
/// # Errors
///
/// Returns [`ValidationError::WrongType`] for non-strings.
pub fn check_string(name: &str, value: &Value) -> Result<Value, ValidationError> {
    if value.is_string() { Ok(value.clone()) } else { Err(ValidationError::wrong_type(name)) }
}

// ============================================================================
// SECTION: Format Predicates
// ============================================================================

/// Returns true for a canonical 8-4-4-4-12 UUID with version 4 and RFC 4122 variant.
#[must_use]
pub fn is_uuid_v4(text: &str) -> bool {
    if text.len() != UUID_HYPHENATED_LENGTH {
        return false;
    }
    let layout_ok = text.char_indices().all(|(index, ch)| {
        if UUID_HYPHEN_OFFSETS.contains(&index) { ch == '-' } else { ch.is_ascii_hexdigit() }
    });
    if !layout_ok {
        return false;
    }
    Uuid::parse_str(text)
        .is_ok_and(|uuid| uuid.get_version_num() == 4 && uuid.get_variant() == Variant::RFC4122)
}

/// Returns true for an RFC 3986 `URI` (scheme required, fragment allowed).
///
/// Characters are checked per component: `[` and `]` only inside an IP
/// literal host, at most one `#`, and every `%` followed by two hex digits.
/// Port digits are not range checked and an empty authority is permitted.
#[must_use]
pub fn is_uri(text: &str) -> bool {
    UriStr::new(text).is_ok()
}

/// Qualifies a field name with its parent object name.
fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::check_enum;
    use super::check_timestamp;
    use super::is_uri;
    use super::is_uuid_v4;
    use crate::error::ValidationError;
    use crate::values::DATE_SORT_VALUES;

    #[test]
    fn uuid_v4_layout_version_and_variant() {
        assert!(is_uuid_v4("b6464162-84af-4aab-aff5-f1f8438dfc1e"));
        assert!(is_uuid_v4("B6464162-84AF-4AAB-AFF5-F1F8438DFC1E"));
        // version 1
        assert!(!is_uuid_v4("b6464162-84af-1aab-aff5-f1f8438dfc1e"));
        // NCS variant
        assert!(!is_uuid_v4("b6464162-84af-4aab-0ff5-f1f8438dfc1e"));
        assert!(!is_uuid_v4("b646416284af4aabaff5f1f8438dfc1e"));
        assert!(!is_uuid_v4("{b6464162-84af-4aab-aff5-f1f8438dfc1e}"));
        assert!(!is_uuid_v4("not-a-uuid"));
    }

    #[test]
    fn uri_requires_scheme_and_legal_characters() {
        assert!(is_uri("https://schema.org/MusicPlaylist"));
        assert!(is_uri("did:example:123456789abcdefghi"));
        assert!(is_uri("https://example.com/a%20b"));
        assert!(!is_uri("schema.org/MusicPlaylist"));
        assert!(!is_uri("https://example.com/a b"));
        assert!(!is_uri("https://example.com/%zz"));
        assert!(!is_uri("https://example.com/<tag>"));
        assert!(!is_uri(""));
    }

    #[test]
    fn uri_follows_generic_component_grammar() {
        assert!(is_uri("https://example.com:99999/x"));
        assert!(is_uri("https://"));
        assert!(is_uri("http://[2001:db8::1]/x"));
        assert!(is_uri("urn:isbn:0451450523"));
        assert!(!is_uri("http://a/[x]"));
        assert!(!is_uri("did:ex:a?b=[1]"));
        assert!(!is_uri("http://a/#b#c"));
        assert!(!is_uri("https://example.com:80a/x"));
        assert!(!is_uri("1http://example.com"));
    }

    #[test]
    fn timestamps_are_non_negative_integers() {
        assert!(check_timestamp("dateCreated", &json!(0)).is_ok());
        assert!(check_timestamp("dateCreated", &json!(u64::MAX)).is_ok());
        assert_eq!(
            check_timestamp("dateCreated", &json!(-1)),
            Err(ValidationError::invalid_format("dateCreated"))
        );
        assert_eq!(
            check_timestamp("dateCreated", &json!(1.5)),
            Err(ValidationError::invalid_format("dateCreated"))
        );
        assert_eq!(
            check_timestamp("dateCreated", &json!(1_650_000_000.0)),
            Err(ValidationError::invalid_format("dateCreated"))
        );
        let above_ceiling: serde_json::Value =
            serde_json::from_str("18446744073709551616").unwrap_or_default();
        assert_eq!(
            check_timestamp("dateCreated", &above_ceiling),
            Err(ValidationError::invalid_format("dateCreated"))
        );
        assert_eq!(
            check_timestamp("dateCreated", &json!("1650000000")),
            Err(ValidationError::wrong_type("dateCreated"))
        );
    }

    #[test]
    fn enum_values_are_canonicalized() {
        assert_eq!(
            check_enum("dateSort", &json!("CREATED_DESCENDING"), &DATE_SORT_VALUES),
            Ok(json!("createdDescending"))
        );
        assert_eq!(
            check_enum("dateSort", &json!("bogus"), &DATE_SORT_VALUES),
            Err(ValidationError::not_in_enum("dateSort", "bogus"))
        );
    }
}
