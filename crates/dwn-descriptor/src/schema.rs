// crates/dwn-descriptor/src/schema.rs
// ============================================================================
// Module: Descriptor JSON Schemas
// Description: JSON Schema builders for every registered descriptor.
// Purpose: Publish the registry as draft 2020-12 schemas for external tooling.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Schemas are generated from the [`SchemaRegistry`] so they cannot drift from
//! the validator. Rules JSON Schema can express are encoded (required fields,
//! literal sets, `dependentRequired` for the scope identifier rule); the
//! publication rule needs the registry and is enforced only by the validator.

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::method::Method;
use crate::registry::FieldSpec;
use crate::registry::FieldType;
use crate::registry::NestedObject;
use crate::registry::Schema;
use crate::registry::SchemaRegistry;

/// JSON Schema dialect used by generated schemas.
const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";
/// Pattern matching a canonical version 4 UUID.
pub const UUID_V4_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$";

/// Returns the JSON schema for a single method's descriptor.
#[must_use]
pub fn descriptor_schema(method: Method) -> Value {
    let registry = SchemaRegistry::global();
    let Some(schema) = registry.schema(method) else {
        return Value::Bool(false);
    };
    let mut body = descriptor_body(registry, schema);
    if let Value::Object(object) = &mut body {
        object.insert("$schema".to_string(), json!(SCHEMA_DIALECT));
        object.insert(
            "$id".to_string(),
            json!(format!("dwn-descriptor://schemas/{}.schema.json", method.as_str())),
        );
    }
    body
}

/// Returns a schema accepting a descriptor of any registered method.
#[must_use]
pub fn descriptor_schemas() -> Value {
    let registry = SchemaRegistry::global();
    let variants: Vec<Value> =
        registry.schemas().map(|schema| descriptor_body(registry, schema)).collect();
    json!({
        "$schema": SCHEMA_DIALECT,
        "$id": "dwn-descriptor://schemas/descriptor.schema.json",
        "title": "Descriptor",
        "description": "Message descriptor of any Collections, Threads, or Permissions method.",
        "oneOf": variants
    })
}

/// Builds the schema body for a descriptor, without dialect or id.
fn descriptor_body(registry: &SchemaRegistry, schema: &Schema) -> Value {
    let mut body = object_schema(registry, schema.fields());
    if let Value::Object(object) = &mut body {
        object.insert("title".to_string(), json!(schema.method().as_str()));
        if let Some(Value::Object(properties)) = object.get_mut("properties") {
            properties.insert("method".to_string(), json!({ "const": schema.method().as_str() }));
        }
    }
    body
}

/// Builds an object schema from a field table.
fn object_schema(registry: &SchemaRegistry, fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.name.to_string(), field_schema(registry, field.field_type));
    }
    let required: Vec<&str> =
        fields.iter().filter(|field| field.required).map(|field| field.name).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Builds the schema of a single field value.
fn field_schema(registry: &SchemaRegistry, field_type: FieldType) -> Value {
    match field_type {
        FieldType::Uuid => json!({
            "type": "string",
            "format": "uuid",
            "pattern": UUID_V4_PATTERN
        }),
        FieldType::Uri => json!({ "type": "string", "format": "uri" }),
        FieldType::Timestamp => json!({ "type": "integer", "minimum": 0 }),
        FieldType::Enum(values) => json!({ "type": "string", "enum": values.literals() }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::FreeString => json!({ "type": "string" }),
        FieldType::Object(kind) => nested_schema(registry, kind),
    }
}

/// Builds the schema of a nested object.
fn nested_schema(registry: &SchemaRegistry, kind: NestedObject) -> Value {
    let mut schema = object_schema(registry, registry.nested_fields(kind));
    if let Value::Object(object) = &mut schema {
        match kind {
            NestedObject::Scope => {
                object.insert(
                    "dependentRequired".to_string(),
                    json!({ "identifier": ["schema"] }),
                );
            }
            NestedObject::Conditions => {
                if let Some(Value::Object(properties)) = object.get_mut("properties") {
                    for (name, default) in [
                        ("attestation", json!("optional")),
                        ("encryption", json!("optional")),
                        ("delegation", json!(false)),
                        ("publication", json!(false)),
                        ("sharedAccess", json!(false)),
                    ] {
                        if let Some(Value::Object(property)) = properties.get_mut(name) {
                            property.insert("default".to_string(), default);
                        }
                    }
                }
            }
        }
    }
    schema
}
