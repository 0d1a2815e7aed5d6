// crates/dwn-descriptor/src/features.rs
// ============================================================================
// Module: Feature Detection
// Description: Model and validation of a node's FeatureDetection document.
// Purpose: Let callers learn which interface methods a node supports.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A FeatureDetection document lists, per interface, which methods a node
//! supports. An absent interface means none of its methods are supported; an
//! absent or `false` method flag means that method is unsupported. The
//! `messaging.batching` flag defaults to supported when absent.
//!
//! Validation is strict: unknown keys are always rejected and errors use the
//! same [`ValidationError`] taxonomy as descriptors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

use crate::checks::check_boolean;
use crate::error::ValidationError;
use crate::method::Interface;
use crate::method::Method;
use crate::values::ValueSet;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Literal value of the document's `type` field.
pub const FEATURE_DETECTION_TYPE: &str = "FeatureDetection";

/// Method flags accepted under `interfaces.collections`.
static COLLECTIONS_FLAGS: ValueSet = ValueSet::exact(
    "collections",
    &["CollectionsQuery", "CollectionsWrite", "CollectionsCommit", "CollectionsDelete"],
);

/// Method flags accepted under `interfaces.actions`.
static ACTIONS_FLAGS: ValueSet = ValueSet::exact(
    "actions",
    &["ThreadsQuery", "ThreadsCreate", "ThreadsReply", "ThreadsClose", "ThreadsDelete"],
);

/// Method flags accepted under `interfaces.permissions`.
static PERMISSIONS_FLAGS: ValueSet = ValueSet::exact(
    "permissions",
    &["PermissionsRequest", "PermissionsGrant", "PermissionsRevoke"],
);

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validated FeatureDetection document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureDetection {
    /// Supported interfaces.
    pub interfaces: FeatureInterfaces,
}

/// Interface support flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureInterfaces {
    /// Collections method flags.
    pub collections: Option<BTreeMap<String, bool>>,
    /// Threads method flags (wire key `actions`).
    pub threads: Option<BTreeMap<String, bool>>,
    /// Permissions method flags.
    pub permissions: Option<BTreeMap<String, bool>>,
    /// Messaging capabilities.
    pub messaging: Option<Messaging>,
}

/// Messaging capabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Messaging {
    /// Multiple messages per request; absence means supported.
    pub batching: Option<bool>,
}

impl FeatureDetection {
    /// Returns true when the node declares support for `method`.
    ///
    /// The `permissions` interface carries no `PermissionsQuery` flag, so
    /// `PermissionsQuery` always reports false.
    #[must_use]
    pub fn supports(&self, method: Method) -> bool {
        let flags = match method.interface() {
            Interface::Collections => self.interfaces.collections.as_ref(),
            Interface::Threads => self.interfaces.threads.as_ref(),
            Interface::Permissions => self.interfaces.permissions.as_ref(),
        };
        flags.and_then(|flags| flags.get(method.as_str())).copied().unwrap_or(false)
    }

    /// Returns true unless the node explicitly disables batching.
    #[must_use]
    pub fn supports_batching(&self) -> bool {
        self.interfaces.messaging.and_then(|messaging| messaging.batching).unwrap_or(true)
    }

    /// Renders the document as JSON, including the `type` literal.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut interfaces = Map::new();
        let declared = [
            (&COLLECTIONS_FLAGS, &self.interfaces.collections),
            (&ACTIONS_FLAGS, &self.interfaces.threads),
            (&PERMISSIONS_FLAGS, &self.interfaces.permissions),
        ];
        for (flags, parsed) in declared {
            if let Some(parsed) = parsed {
                interfaces.insert(flags.name().to_string(), render_flags(parsed));
            }
        }
        if let Some(messaging) = self.interfaces.messaging {
            let mut object = Map::new();
            if let Some(batching) = messaging.batching {
                object.insert("batching".to_string(), Value::Bool(batching));
            }
            interfaces.insert("messaging".to_string(), Value::Object(object));
        }

        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(FEATURE_DETECTION_TYPE.to_string()));
        object.insert("interfaces".to_string(), Value::Object(interfaces));
        Value::Object(object)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a FeatureDetection document.
///
/// # Errors
///
/// Returns [`ValidationError`] for a missing or wrong `type`, a missing
/// `interfaces` object, non-boolean flags, or unknown keys.
pub fn validate_feature_detection(value: &Value) -> Result<FeatureDetection, ValidationError> {
    let object = value.as_object().ok_or_else(|| ValidationError::wrong_type("featureDetection"))?;
    let kind = object.get("type").ok_or_else(|| ValidationError::missing("type"))?;
    let interfaces = object.get("interfaces").ok_or_else(|| ValidationError::missing("interfaces"))?;

    let kind_text = kind.as_str().ok_or_else(|| ValidationError::wrong_type("type"))?;
    if kind_text != FEATURE_DETECTION_TYPE {
        return Err(ValidationError::not_in_enum("type", kind_text));
    }
    let interfaces =
        interfaces.as_object().ok_or_else(|| ValidationError::wrong_type("interfaces"))?;

    let parsed = FeatureInterfaces {
        collections: method_flags(interfaces, &COLLECTIONS_FLAGS)?,
        threads: method_flags(interfaces, &ACTIONS_FLAGS)?,
        permissions: method_flags(interfaces, &PERMISSIONS_FLAGS)?,
        messaging: messaging(interfaces)?,
    };

    reject_unknown(object, None, &["type", "interfaces"])?;
    reject_unknown(interfaces, Some("interfaces"), &[
        COLLECTIONS_FLAGS.name(),
        ACTIONS_FLAGS.name(),
        PERMISSIONS_FLAGS.name(),
        "messaging",
    ])?;

    Ok(FeatureDetection {
        interfaces: parsed,
    })
}

/// Parses the method flags of one interface.
fn method_flags(
    interfaces: &Map<String, Value>,
    flags: &ValueSet,
) -> Result<Option<BTreeMap<String, bool>>, ValidationError> {
    let Some(value) = interfaces.get(flags.name()) else {
        return Ok(None);
    };
    let prefix = format!("interfaces.{}", flags.name());
    let object = value.as_object().ok_or_else(|| ValidationError::wrong_type(prefix.as_str()))?;
    let mut parsed = BTreeMap::new();
    for (key, flag) in object {
        let name = format!("{prefix}.{key}");
        if !flags.contains(key) {
            return Err(ValidationError::unknown_field(name));
        }
        check_boolean(&name, flag)?;
        parsed.insert(key.clone(), flag.as_bool().unwrap_or(false));
    }
    Ok(Some(parsed))
}

/// Parses the messaging capabilities.
fn messaging(interfaces: &Map<String, Value>) -> Result<Option<Messaging>, ValidationError> {
    let Some(value) = interfaces.get("messaging") else {
        return Ok(None);
    };
    let object =
        value.as_object().ok_or_else(|| ValidationError::wrong_type("interfaces.messaging"))?;
    let batching = match object.get("batching") {
        Some(flag) => check_boolean("interfaces.messaging.batching", flag)?.as_bool(),
        None => None,
    };
    reject_unknown(object, Some("interfaces.messaging"), &["batching"])?;
    Ok(Some(Messaging {
        batching,
    }))
}

/// Renders one interface's method flags.
fn render_flags(flags: &BTreeMap<String, bool>) -> Value {
    Value::Object(flags.iter().map(|(name, flag)| (name.clone(), Value::Bool(*flag))).collect())
}

/// Rejects keys outside `allowed`.
fn reject_unknown(
    object: &Map<String, Value>,
    prefix: Option<&str>,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match object.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(ValidationError::unknown_field(match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        })),
        None => Ok(()),
    }
}
