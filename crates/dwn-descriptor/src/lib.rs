// crates/dwn-descriptor/src/lib.rs
// ============================================================================
// Module: DWN Descriptor Library
// Description: Message descriptor schemas, validation, and normalization.
// Purpose: Single source of truth for Collections/Threads/Permissions descriptors.
// Dependencies: iri-string, serde, serde_json, thiserror, toml, uuid
// ============================================================================

//! ## Overview
//! `dwn-descriptor` defines the descriptor vocabulary of a decentralized web
//! node: Collections (records), Threads (linked message series), and
//! Permissions (capability grants). It provides a fail-closed validator that
//! resolves the schema for a descriptor's `method`, checks required and
//! optional fields, evaluates cross-field rules, and returns either a
//! normalized descriptor or the first violation found.
//!
//! Validation is pure: the schema registry is immutable after first use and
//! every call allocates only call-local state, so the validator can be shared
//! freely across threads.
//!
//! Security posture: descriptors are untrusted inputs; every rejection is
//! reported as a value and never as a panic.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod checks;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod features;
pub mod method;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod validator;
pub mod values;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ValidationAuditEvent;
pub use audit::ValidationAuditSink;
pub use audit::ValidationOutcome;
pub use config::AuditConfig;
pub use config::ConfigError;
pub use config::UnknownFieldPolicy;
pub use config::ValidationSettings;
pub use config::ValidatorConfig;
pub use descriptor::*;
pub use error::ValidationError;
pub use features::FeatureDetection;
pub use features::validate_feature_detection;
pub use method::Interface;
pub use method::Method;
pub use registry::CrossFieldRule;
pub use registry::FieldSpec;
pub use registry::FieldType;
pub use registry::LookupError;
pub use registry::NestedObject;
pub use registry::Schema;
pub use registry::SchemaRegistry;
pub use schema::descriptor_schema;
pub use schema::descriptor_schemas;
pub use validator::DescriptorValidator;
pub use validator::NormalizedDescriptor;
pub use validator::validate;
pub use validator::validate_message;
pub use validator::validate_with_policy;
