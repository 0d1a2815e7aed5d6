// crates/dwn-descriptor/tests/determinism.rs
// ============================================================================
// Module: Validation Determinism Tests
// Description: Repeatability and concurrency checks for validation.
// Purpose: Detect panics and confirm identical inputs always yield identical
//          results, across threads and arbitrary inputs.
// ============================================================================

//! Property-based and concurrency tests for validation determinism.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::thread;

use dwn_descriptor::Method;
use dwn_descriptor::ValidationError;
use dwn_descriptor::validate;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Concurrency
// ============================================================================

#[test]
fn concurrent_validation_reports_identical_errors() -> TestResult {
    let candidate = json!({
        "method": "PermissionsGrant",
        "permissionGrantId": common::GRANT_ID,
        "grantedBy": common::ALICE,
        "grantedTo": common::BOB,
        "expiry": 1_700_000_000,
        "scope": { "method": "CollectionsQuery", "identifier": common::RECORD_ID }
    });
    let handles: Vec<_> = (0 .. 8)
        .map(|_| {
            let candidate = candidate.clone();
            thread::spawn(move || validate(None, &candidate).map(|normalized| normalized.into_value()))
        })
        .collect();
    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.join().map_err(|_| "validation thread panicked".to_string())?);
    }
    let expected = validate(None, &candidate).map(|normalized| normalized.into_value());
    if results.iter().any(|result| result != &expected) {
        return Err(format!("divergent results: {results:?}"));
    }
    if !matches!(expected, Err(ValidationError::CrossFieldViolation { .. })) {
        return Err(format!("expected cross-field violation, got {expected:?}"));
    }
    Ok(())
}

#[test]
fn concurrent_validation_of_every_method_succeeds() -> TestResult {
    let handles: Vec<_> = Method::ALL
        .into_iter()
        .map(|method| thread::spawn(move || (method, validate(None, &common::minimal(method)))))
        .collect();
    for handle in handles {
        let (method, result) = handle.join().map_err(|_| "validation thread panicked".to_string())?;
        let normalized = result.map_err(|err| format!("{method}: {err}"))?;
        if normalized.method() != method {
            return Err(format!("{method}: resolved {}", normalized.method()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Properties
// ============================================================================

fn method_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(Method::ALL.to_vec())
            .prop_map(|method| method.as_str().to_string()),
        "[A-Za-z]{0,20}",
    ]
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|value| json!(value)),
        "[ -~]{0,40}".prop_map(Value::String),
        Just(json!(common::RECORD_ID)),
        Just(json!(common::SCHEMA_URI)),
        Just(json!({ "method": "CollectionsWrite" })),
    ]
}

fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(vec![
            "nonce",
            "recordId",
            "schema",
            "dateCreated",
            "datePublished",
            "published",
            "threadId",
            "parentId",
            "threadType",
            "dateSort",
            "grantedBy",
            "grantedTo",
            "expiry",
            "scope",
            "conditions",
        ])
        .prop_map(str::to_string),
        "[a-z]{1,12}",
    ]
}

fn candidate() -> impl Strategy<Value = Value> {
    (method_literal(), proptest::collection::vec((field_name(), field_value()), 0 .. 8)).prop_map(
        |(method, fields)| {
            let mut object = Map::new();
            object.insert("method".to_string(), Value::String(method));
            for (name, value) in fields {
                object.insert(name, value);
            }
            Value::Object(object)
        },
    )
}

proptest! {
    #[test]
    fn validation_is_repeatable(candidate in candidate()) {
        let first = validate(None, &candidate);
        let second = validate(None, &candidate);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn accepted_descriptors_are_fixed_points(candidate in candidate()) {
        if let Ok(normalized) = validate(None, &candidate) {
            let again = validate(None, &normalized.to_value());
            prop_assert_eq!(again, Ok(normalized));
        }
    }

    #[test]
    fn errors_name_a_field_or_method(candidate in candidate()) {
        if let Err(error) = validate(None, &candidate) {
            let named = match &error {
                ValidationError::UnknownMethod { .. }
                | ValidationError::MethodMismatch { .. }
                | ValidationError::CrossFieldViolation { .. } => true,
                _ => error.field().is_some_and(|field| !field.is_empty()),
            };
            prop_assert!(named, "error without field: {}", error);
        }
    }
}
