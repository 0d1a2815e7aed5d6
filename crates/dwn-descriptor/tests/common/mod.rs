// crates/dwn-descriptor/tests/common/mod.rs
// =============================================================================
// Module: Descriptor Test Helpers
// Description: Shared descriptor fixtures for integration tests.
// Purpose: Reduce duplication across validation suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use dwn_descriptor::Method;
use serde_json::Value;
use serde_json::json;

/// Valid version 4 UUID used as a record identifier.
pub const RECORD_ID: &str = "b6464162-84af-4aab-aff5-f1f8438dfc1e";
/// Valid version 4 UUID used as a thread identifier.
pub const THREAD_ID: &str = "3f2c9a1e-5d7b-4c8e-9a0b-1c2d3e4f5a6b";
/// Valid version 4 UUID used as a parent message identifier.
pub const PARENT_ID: &str = "7e57d004-2b97-4e7a-b45f-5387367791cd";
/// Valid version 4 UUID used as a permission grant identifier.
pub const GRANT_ID: &str = "c0ffee00-1234-4abc-8def-0123456789ab";
/// Schema URI used in fixtures.
pub const SCHEMA_URI: &str = "https://schema.org/MusicPlaylist";
/// Granting DID.
pub const ALICE: &str = "did:example:alice";
/// Grantee DID.
pub const BOB: &str = "did:example:bob";

/// Returns a minimal valid descriptor (required fields only) for `method`.
pub fn minimal(method: Method) -> Value {
    match method {
        Method::CollectionsQuery => json!({ "method": "CollectionsQuery" }),
        Method::CollectionsWrite => json!({
            "method": "CollectionsWrite",
            "recordId": RECORD_ID,
            "dateCreated": 1_650_000_000
        }),
        Method::CollectionsCommit => json!({
            "method": "CollectionsCommit",
            "recordId": RECORD_ID,
            "dateCreated": 1_650_000_000
        }),
        Method::CollectionsDelete => json!({
            "method": "CollectionsDelete",
            "recordId": RECORD_ID
        }),
        Method::ThreadsQuery => json!({ "method": "ThreadsQuery" }),
        Method::ThreadsCreate => json!({
            "method": "ThreadsCreate",
            "threadId": THREAD_ID,
            "threadType": "https://example.com/threads/support",
            "schema": SCHEMA_URI
        }),
        Method::ThreadsReply => json!({
            "method": "ThreadsReply",
            "threadId": THREAD_ID,
            "parentId": PARENT_ID,
            "schema": SCHEMA_URI
        }),
        Method::ThreadsClose => json!({ "method": "ThreadsClose", "threadId": THREAD_ID }),
        Method::ThreadsDelete => json!({ "method": "ThreadsDelete", "threadId": THREAD_ID }),
        Method::PermissionsRequest => json!({
            "method": "PermissionsRequest",
            "grantedBy": ALICE,
            "grantedTo": BOB,
            "scope": { "method": "CollectionsQuery" }
        }),
        Method::PermissionsGrant => json!({
            "method": "PermissionsGrant",
            "permissionGrantId": GRANT_ID,
            "grantedBy": ALICE,
            "grantedTo": BOB,
            "expiry": 1_700_000_000,
            "scope": { "method": "CollectionsQuery" }
        }),
        Method::PermissionsQuery => json!({ "method": "PermissionsQuery" }),
    }
}

/// Returns a copy of `value` with `field` removed.
pub fn without(value: &Value, field: &str) -> Value {
    let mut copy = value.clone();
    if let Some(object) = copy.as_object_mut() {
        object.remove(field);
    }
    copy
}

/// Returns a copy of `value` with `field` set to `new_value`.
pub fn with(value: &Value, field: &str, new_value: Value) -> Value {
    let mut copy = value.clone();
    if let Some(object) = copy.as_object_mut() {
        object.insert(field.to_string(), new_value);
    }
    copy
}
