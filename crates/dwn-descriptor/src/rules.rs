// crates/dwn-descriptor/src/rules.rs
// ============================================================================
// Module: Cross-Field Rule Evaluator
// Description: Conditional constraints spanning several descriptor fields.
// Purpose: Enforce dependency rules once every field is individually valid.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Rules run after field checks, over the normalized field map, in the order
//! the schema lists them. Evaluation stops at the first failing rule so a
//! given bad input always produces the same error.

use serde_json::Map;
use serde_json::Value;

use crate::error::ValidationError;
use crate::method::Method;
use crate::registry::CrossFieldRule;
use crate::registry::Schema;
use crate::registry::SchemaRegistry;

/// Evaluates the schema's cross-field rules against a checked descriptor.
///
/// # Errors
///
/// Returns [`ValidationError::CrossFieldViolation`] for the first rule that fails.
pub fn evaluate(
    registry: &SchemaRegistry,
    schema: &Schema,
    descriptor: &Map<String, Value>,
) -> Result<(), ValidationError> {
    for rule in schema.rules() {
        if !holds(registry, schema, *rule, descriptor) {
            return Err(ValidationError::cross_field(*rule));
        }
    }
    Ok(())
}

/// Returns true when `rule` holds for `descriptor`.
fn holds(
    registry: &SchemaRegistry,
    schema: &Schema,
    rule: CrossFieldRule,
    descriptor: &Map<String, Value>,
) -> bool {
    match rule {
        CrossFieldRule::MethodLiteralMatchesSchema => {
            descriptor.get("method").and_then(Value::as_str) == Some(schema.method().as_str())
        }
        CrossFieldRule::ScopeIdentifierRequiresSchema => {
            scope_identifier_has_schema(descriptor.get("scope"))
        }
        CrossFieldRule::PublicationRequiresPublishableMethod => {
            publication_is_supported(registry, descriptor)
        }
    }
}

/// `scope.identifier` present implies `scope.schema` present.
fn scope_identifier_has_schema(scope: Option<&Value>) -> bool {
    let Some(scope) = scope.and_then(Value::as_object) else {
        return true;
    };
    !scope.contains_key("identifier") || scope.contains_key("schema")
}

/// `conditions.publication = true` requires the scope method to declare `published`.
fn publication_is_supported(registry: &SchemaRegistry, descriptor: &Map<String, Value>) -> bool {
    let publication = descriptor
        .get("conditions")
        .and_then(|conditions| conditions.get("publication"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !publication {
        return true;
    }
    descriptor
        .get("scope")
        .and_then(|scope| scope.get("method"))
        .and_then(Value::as_str)
        .and_then(Method::from_literal)
        .and_then(|method| registry.schema(method))
        .is_some_and(|schema| schema.supports_field("published"))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use serde_json::json;

    use super::evaluate;
    use crate::error::ValidationError;
    use crate::method::Method;
    use crate::registry::CrossFieldRule;
    use crate::registry::SchemaRegistry;

    fn run(method: Method, descriptor: &Value) -> Result<(), ValidationError> {
        let registry = SchemaRegistry::global();
        let Some(schema) = registry.schema(method) else {
            return Ok(());
        };
        let Some(map) = descriptor.as_object() else {
            return Ok(());
        };
        evaluate(registry, schema, map)
    }

    #[test]
    fn method_literal_must_match_schema() {
        let descriptor = json!({ "method": "ThreadsClose" });
        assert_eq!(
            run(Method::ThreadsDelete, &descriptor),
            Err(ValidationError::cross_field(CrossFieldRule::MethodLiteralMatchesSchema))
        );
    }

    #[test]
    fn publication_on_publishable_method_holds() {
        let descriptor = json!({
            "method": "PermissionsRequest",
            "scope": { "method": "CollectionsWrite" },
            "conditions": { "publication": true }
        });
        assert_eq!(run(Method::PermissionsRequest, &descriptor), Ok(()));
    }

    #[test]
    fn publication_false_never_fails() {
        let descriptor = json!({
            "method": "PermissionsGrant",
            "scope": { "method": "CollectionsDelete" },
            "conditions": { "publication": false }
        });
        assert_eq!(run(Method::PermissionsGrant, &descriptor), Ok(()));
    }

    #[test]
    fn rules_short_circuit_in_declared_order() {
        let descriptor = json!({
            "method": "PermissionsRequest",
            "scope": { "method": "ThreadsReply", "identifier": "b6464162-84af-4aab-aff5-f1f8438dfc1e" },
            "conditions": { "publication": true }
        });
        assert_eq!(
            run(Method::PermissionsRequest, &descriptor),
            Err(ValidationError::cross_field(CrossFieldRule::ScopeIdentifierRequiresSchema))
        );
    }
}
