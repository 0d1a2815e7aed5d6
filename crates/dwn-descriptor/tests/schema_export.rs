//! JSON Schema export tests for dwn-descriptor.
// crates/dwn-descriptor/tests/schema_export.rs
// =============================================================================
// Module: Schema Export Tests
// Description: Compile and exercise the generated descriptor schemas.
// Purpose: Ensure exported schemas agree with the validator on what is valid.
// =============================================================================

use dwn_descriptor::Method;
use dwn_descriptor::PermissionConditions;
use dwn_descriptor::descriptor_schema;
use dwn_descriptor::descriptor_schemas;
use dwn_descriptor::validate;
use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

fn compile_schema(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| format!("failed to compile schema: {err}"))
}

fn compile_method(method: Method) -> Result<Validator, String> {
    compile_schema(&descriptor_schema(method)).map_err(|err| format!("{method}: {err}"))
}

// ============================================================================
// SECTION: Acceptance
// ============================================================================

#[test]
fn minimal_descriptors_match_their_schema() -> TestResult {
    for method in Method::ALL {
        let validator = compile_method(method)?;
        if !validator.is_valid(&common::minimal(method)) {
            return Err(format!("{method}: minimal descriptor rejected by schema"));
        }
    }
    Ok(())
}

#[test]
fn union_schema_accepts_every_method() -> TestResult {
    let validator = compile_schema(&descriptor_schemas())?;
    for method in Method::ALL {
        if !validator.is_valid(&common::minimal(method)) {
            return Err(format!("{method}: rejected by union schema"));
        }
    }
    if validator.is_valid(&json!({ "method": "PermissionsRevoke" })) {
        return Err("union schema accepted an unregistered method".to_string());
    }
    Ok(())
}

#[test]
fn schema_rejects_other_method_literal() -> TestResult {
    let validator = compile_method(Method::ThreadsClose)?;
    if validator.is_valid(&json!({ "method": "ThreadsDelete", "threadId": common::THREAD_ID })) {
        return Err("ThreadsClose schema accepted a ThreadsDelete descriptor".to_string());
    }
    Ok(())
}

#[test]
fn normalized_output_matches_schema() -> TestResult {
    let candidate = json!({
        "method": "CollectionsQuery",
        "dateSort": "CREATED_DESCENDING",
        "schema": common::SCHEMA_URI
    });
    let validator = compile_method(Method::CollectionsQuery)?;
    if validator.is_valid(&candidate) {
        return Err("schema lists only canonical literals".to_string());
    }
    let normalized = validate(None, &candidate).map_err(|err| err.to_string())?;
    if !validator.is_valid(&normalized.to_value()) {
        return Err(format!("normalized descriptor rejected: {}", normalized.to_value()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Rejection
// ============================================================================

#[test]
fn schema_rejects_what_validator_rejects() -> TestResult {
    let cases = [
        (Method::CollectionsWrite, common::without(&common::minimal(Method::CollectionsWrite), "dateCreated")),
        (
            Method::CollectionsDelete,
            common::with(&common::minimal(Method::CollectionsDelete), "recordId", json!("not-a-uuid")),
        ),
        (
            Method::CollectionsQuery,
            common::with(&common::minimal(Method::CollectionsQuery), "dateSort", json!("bogus")),
        ),
        (Method::ThreadsQuery, common::with(&common::minimal(Method::ThreadsQuery), "owner", json!("x"))),
        (
            Method::PermissionsGrant,
            common::with(
                &common::minimal(Method::PermissionsGrant),
                "scope",
                json!({ "method": "CollectionsQuery", "identifier": common::RECORD_ID }),
            ),
        ),
        (Method::PermissionsGrant, common::with(&common::minimal(Method::PermissionsGrant), "expiry", json!(-1))),
    ];
    for (method, candidate) in cases {
        if validate(None, &candidate).is_ok() {
            return Err(format!("{method}: validator accepted {candidate}"));
        }
        if compile_method(method)?.is_valid(&candidate) {
            return Err(format!("{method}: schema accepted {candidate}"));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Structure
// ============================================================================

#[test]
fn schema_marks_declared_required_fields() -> TestResult {
    let schema = descriptor_schema(Method::PermissionsGrant);
    let required = schema.pointer("/required").ok_or("missing required list")?;
    let expected = json!(["method", "permissionGrantId", "grantedBy", "grantedTo", "expiry", "scope"]);
    if required != &expected {
        return Err(format!("unexpected required list: {required}"));
    }
    if schema.pointer("/properties/method/const") != Some(&json!("PermissionsGrant")) {
        return Err("method is not pinned to its literal".to_string());
    }
    Ok(())
}

#[test]
fn condition_defaults_match_typed_defaults() -> TestResult {
    let schema = descriptor_schema(Method::PermissionsRequest);
    let properties = schema
        .pointer("/properties/conditions/properties")
        .and_then(Value::as_object)
        .ok_or("missing conditions properties")?;
    let defaults = serde_json::to_value(PermissionConditions::default()).map_err(|err| err.to_string())?;
    let defaults = defaults.as_object().ok_or("defaults are not an object")?;
    for (name, value) in defaults {
        let declared = properties.get(name).and_then(|property| property.get("default"));
        if declared != Some(value) {
            return Err(format!("default for {name} is {declared:?}, expected {value}"));
        }
    }
    Ok(())
}

#[test]
fn schema_ids_are_stable() -> TestResult {
    let schema = descriptor_schema(Method::ThreadsReply);
    if schema.get("$id") != Some(&json!("dwn-descriptor://schemas/ThreadsReply.schema.json")) {
        return Err(format!("unexpected $id: {:?}", schema.get("$id")));
    }
    if descriptor_schemas().pointer("/oneOf").and_then(Value::as_array).map(Vec::len) != Some(12) {
        return Err("union schema must list every method".to_string());
    }
    Ok(())
}
