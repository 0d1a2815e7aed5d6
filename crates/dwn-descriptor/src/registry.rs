// crates/dwn-descriptor/src/registry.rs
// ============================================================================
// Module: Schema Registry
// Description: Immutable table of descriptor schemas keyed by method literal.
// Purpose: Resolve the schema that applies to a descriptor's declared method.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The registry is built once from a hand-authored table and never changes
//! afterwards. Field order in each [`Schema`] is the declaration order used for
//! deterministic error reporting and for the field order of normalized output.
//! Failing to find a method yields [`LookupError::NotFound`]; no schema is
//! ever defaulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::OnceLock;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::method::Method;
use crate::values::ATTESTATION_VALUES;
use crate::values::DATE_SORT_VALUES;
use crate::values::ENCRYPTION_VALUES;
use crate::values::METHOD_VALUES;
use crate::values::ValueSet;

// ============================================================================
// SECTION: Field Specifications
// ============================================================================

/// Nested object kinds carried by permission descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedObject {
    /// `{ method, schema?, identifier? }` narrowing a permission.
    Scope,
    /// Signing, encryption, delegation, and publication conditions.
    Conditions,
}

/// Value type expected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// RFC 4122 version 4 UUID in canonical hyphenated layout.
    Uuid,
    /// Syntactically valid absolute URI.
    Uri,
    /// Non-negative integer Unix epoch seconds.
    Timestamp,
    /// One of a closed set of string literals.
    Enum(&'static ValueSet),
    /// JSON boolean.
    Boolean,
    /// Any JSON string.
    FreeString,
    /// Nested object checked against its own field table.
    Object(NestedObject),
}

/// Specification of a single descriptor field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// Whether the field must be present.
    pub required: bool,
    /// Expected value type.
    pub field_type: FieldType,
}

impl FieldSpec {
    /// Declares a required field.
    #[must_use]
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            required: true,
            field_type,
        }
    }

    /// Declares an optional field.
    #[must_use]
    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            required: false,
            field_type,
        }
    }
}

// ============================================================================
// SECTION: Cross-Field Rules
// ============================================================================

/// Conditional constraint spanning more than one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossFieldRule {
    /// The `method` value must equal the schema's own literal.
    MethodLiteralMatchesSchema,
    /// `scope.identifier` present requires `scope.schema` present.
    ScopeIdentifierRequiresSchema,
    /// `conditions.publication = true` requires a scope method that declares `published`.
    PublicationRequiresPublishableMethod,
}

impl CrossFieldRule {
    /// Returns the stable rule identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::MethodLiteralMatchesSchema => "method_literal_matches_schema",
            Self::ScopeIdentifierRequiresSchema => "scope_identifier_requires_schema",
            Self::PublicationRequiresPublishableMethod => "publication_requires_publishable_method",
        }
    }
}

impl fmt::Display for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Descriptor schema for a single method.
///
/// # Invariants
/// - The first field is always the required `method` field.
/// - Field names are unique within a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Method literal the descriptor's `method` field must equal.
    method: Method,
    /// Fields in declaration order.
    fields: Vec<FieldSpec>,
    /// Cross-field rules in evaluation order.
    rules: Vec<CrossFieldRule>,
}

impl Schema {
    /// Returns the schema's method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the cross-field rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Returns the field spec named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns true when the schema declares a field named `name`.
    #[must_use]
    pub fn supports_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Iterates the names of required fields in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|field| field.required).map(|field| field.name)
    }
}

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No schema is registered for the method literal.
    #[error("no schema registered for method: {0}")]
    NotFound(String),
}

/// Immutable mapping from method literal to [`Schema`].
#[derive(Debug)]
pub struct SchemaRegistry {
    /// Descriptor schemas in canonical method order.
    schemas: Vec<Schema>,
    /// Field table of the nested scope object.
    scope: Vec<FieldSpec>,
    /// Field table of the nested conditions object.
    conditions: Vec<FieldSpec>,
}

impl SchemaRegistry {
    /// Returns the process-wide registry, building it on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::build)
    }

    /// Resolves the schema registered for `method`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] when the literal is not registered.
    pub fn resolve(&self, method: &str) -> Result<&Schema, LookupError> {
        self.schemas
            .iter()
            .find(|schema| schema.method.as_str() == method)
            .ok_or_else(|| LookupError::NotFound(method.to_string()))
    }

    /// Returns the schema for a typed method.
    #[must_use]
    pub fn schema(&self, method: Method) -> Option<&Schema> {
        self.schemas.iter().find(|schema| schema.method == method)
    }

    /// Iterates all schemas in canonical method order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    /// Returns the field table of a nested object.
    #[must_use]
    pub fn nested_fields(&self, object: NestedObject) -> &[FieldSpec] {
        match object {
            NestedObject::Scope => &self.scope,
            NestedObject::Conditions => &self.conditions,
        }
    }

    /// Builds the registry from the fixed table.
    fn build() -> Self {
        let schemas = Method::ALL.into_iter().map(schema_for).collect();
        Self {
            schemas,
            scope: vec![
                FieldSpec::required("method", FieldType::Enum(&METHOD_VALUES)),
                FieldSpec::optional("schema", FieldType::Uri),
                FieldSpec::optional("identifier", FieldType::Uuid),
            ],
            conditions: vec![
                FieldSpec::optional("attestation", FieldType::Enum(&ATTESTATION_VALUES)),
                FieldSpec::optional("encryption", FieldType::Enum(&ENCRYPTION_VALUES)),
                FieldSpec::optional("delegation", FieldType::Boolean),
                FieldSpec::optional("publication", FieldType::Boolean),
                FieldSpec::optional("sharedAccess", FieldType::Boolean),
            ],
        }
    }
}

// ============================================================================
// SECTION: Schema Table
// ============================================================================

/// Returns the hand-authored schema for `method`.
fn schema_for(method: Method) -> Schema {
    use FieldType::Boolean;
    use FieldType::FreeString;
    use FieldType::Timestamp;
    use FieldType::Uri;
    use FieldType::Uuid;

    let scope = FieldType::Object(NestedObject::Scope);
    let conditions = FieldType::Object(NestedObject::Conditions);

    let (fields, permission_rules): (Vec<FieldSpec>, &[CrossFieldRule]) = match method {
        Method::CollectionsQuery => (
            vec![
                FieldSpec::optional("schema", Uri),
                FieldSpec::optional("recordId", Uuid),
                FieldSpec::optional("dataFormat", FreeString),
                FieldSpec::optional("dateSort", FieldType::Enum(&DATE_SORT_VALUES)),
            ],
            &[],
        ),
        Method::CollectionsWrite => (
            vec![
                FieldSpec::required("recordId", Uuid),
                FieldSpec::optional("schema", Uri),
                FieldSpec::optional("published", Boolean),
                FieldSpec::required("dateCreated", Timestamp),
                FieldSpec::optional("datePublished", Timestamp),
            ],
            &[],
        ),
        Method::CollectionsCommit => (
            vec![
                FieldSpec::required("recordId", Uuid),
                FieldSpec::optional("schema", Uri),
                FieldSpec::required("dateCreated", Timestamp),
                FieldSpec::optional("datePublished", Timestamp),
            ],
            &[],
        ),
        Method::CollectionsDelete => (vec![FieldSpec::required("recordId", Uuid)], &[]),
        Method::ThreadsQuery => (vec![FieldSpec::optional("threadId", Uuid)], &[]),
        Method::ThreadsCreate => (
            vec![
                FieldSpec::required("threadId", Uuid),
                FieldSpec::required("threadType", Uri),
                FieldSpec::required("schema", Uri),
                FieldSpec::optional("published", Boolean),
            ],
            &[],
        ),
        Method::ThreadsReply => (
            vec![
                FieldSpec::required("threadId", Uuid),
                FieldSpec::required("parentId", Uuid),
                FieldSpec::required("schema", Uri),
            ],
            &[],
        ),
        Method::ThreadsClose | Method::ThreadsDelete => {
            (vec![FieldSpec::required("threadId", Uuid)], &[])
        }
        Method::PermissionsRequest => (
            vec![
                FieldSpec::required("grantedBy", Uri),
                FieldSpec::required("grantedTo", Uri),
                FieldSpec::optional("description", FreeString),
                FieldSpec::required("scope", scope),
                FieldSpec::optional("conditions", conditions),
            ],
            &[
                CrossFieldRule::ScopeIdentifierRequiresSchema,
                CrossFieldRule::PublicationRequiresPublishableMethod,
            ],
        ),
        Method::PermissionsGrant => (
            vec![
                FieldSpec::required("permissionGrantId", Uuid),
                FieldSpec::optional("permissionRequestId", Uuid),
                FieldSpec::required("grantedBy", Uri),
                FieldSpec::required("grantedTo", Uri),
                FieldSpec::optional("delegatedFrom", Uuid),
                FieldSpec::required("expiry", Timestamp),
                FieldSpec::required("scope", scope),
                FieldSpec::optional("conditions", conditions),
            ],
            &[
                CrossFieldRule::ScopeIdentifierRequiresSchema,
                CrossFieldRule::PublicationRequiresPublishableMethod,
            ],
        ),
        Method::PermissionsQuery => (
            vec![
                FieldSpec::optional("permissionRequestId", Uuid),
                FieldSpec::optional("permissionGrantId", Uuid),
                FieldSpec::optional("permissionRevokeId", Uuid),
                FieldSpec::optional("grantedBy", Uri),
                FieldSpec::optional("grantedTo", Uri),
                FieldSpec::optional("delegatedFrom", Uuid),
                FieldSpec::optional("scope", scope),
            ],
            &[CrossFieldRule::ScopeIdentifierRequiresSchema],
        ),
    };

    let mut all_fields = Vec::with_capacity(fields.len() + 2);
    all_fields.push(FieldSpec::required("method", FieldType::Enum(&METHOD_VALUES)));
    all_fields.push(FieldSpec::optional("nonce", FreeString));
    all_fields.extend(fields);

    let mut rules = vec![CrossFieldRule::MethodLiteralMatchesSchema];
    rules.extend_from_slice(permission_rules);

    Schema {
        method,
        fields: all_fields,
        rules,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
