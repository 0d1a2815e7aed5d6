// crates/dwn-descriptor/src/descriptor.rs
// ============================================================================
// Module: Typed Descriptors
// Description: Tagged-union model of every descriptor keyed by method literal.
// Purpose: Give downstream code strongly typed access to validated descriptors.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`Descriptor`] is a sum type with one variant per method, tagged on the
//! wire by the `method` field. Field names serialize in their camelCase wire
//! form. These types do not validate formats themselves; obtain them from a
//! [`crate::NormalizedDescriptor`] so that every invariant has already been
//! checked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::method::Method;

// ============================================================================
// SECTION: Descriptor Union
// ============================================================================

/// Descriptor of any supported method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Descriptor {
    /// `CollectionsQuery` descriptor.
    CollectionsQuery(CollectionsQuery),
    /// `CollectionsWrite` descriptor.
    CollectionsWrite(CollectionsWrite),
    /// `CollectionsCommit` descriptor.
    CollectionsCommit(CollectionsCommit),
    /// `CollectionsDelete` descriptor.
    CollectionsDelete(CollectionsDelete),
    /// `ThreadsQuery` descriptor.
    ThreadsQuery(ThreadsQuery),
    /// `ThreadsCreate` descriptor.
    ThreadsCreate(ThreadsCreate),
    /// `ThreadsReply` descriptor.
    ThreadsReply(ThreadsReply),
    /// `ThreadsClose` descriptor.
    ThreadsClose(ThreadsClose),
    /// `ThreadsDelete` descriptor.
    ThreadsDelete(ThreadsDelete),
    /// `PermissionsRequest` descriptor.
    PermissionsRequest(PermissionsRequest),
    /// `PermissionsGrant` descriptor.
    PermissionsGrant(PermissionsGrant),
    /// `PermissionsQuery` descriptor.
    PermissionsQuery(PermissionsQuery),
}

impl Descriptor {
    /// Returns the method discriminant.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::CollectionsQuery(_) => Method::CollectionsQuery,
            Self::CollectionsWrite(_) => Method::CollectionsWrite,
            Self::CollectionsCommit(_) => Method::CollectionsCommit,
            Self::CollectionsDelete(_) => Method::CollectionsDelete,
            Self::ThreadsQuery(_) => Method::ThreadsQuery,
            Self::ThreadsCreate(_) => Method::ThreadsCreate,
            Self::ThreadsReply(_) => Method::ThreadsReply,
            Self::ThreadsClose(_) => Method::ThreadsClose,
            Self::ThreadsDelete(_) => Method::ThreadsDelete,
            Self::PermissionsRequest(_) => Method::PermissionsRequest,
            Self::PermissionsGrant(_) => Method::PermissionsGrant,
            Self::PermissionsQuery(_) => Method::PermissionsQuery,
        }
    }

    /// Returns the descriptor nonce when present.
    #[must_use]
    pub fn nonce(&self) -> Option<&str> {
        match self {
            Self::CollectionsQuery(inner) => inner.nonce.as_deref(),
            Self::CollectionsWrite(inner) => inner.nonce.as_deref(),
            Self::CollectionsCommit(inner) => inner.nonce.as_deref(),
            Self::CollectionsDelete(inner) => inner.nonce.as_deref(),
            Self::ThreadsQuery(inner) => inner.nonce.as_deref(),
            Self::ThreadsCreate(inner) => inner.nonce.as_deref(),
            Self::ThreadsReply(inner) => inner.nonce.as_deref(),
            Self::ThreadsClose(inner) => inner.nonce.as_deref(),
            Self::ThreadsDelete(inner) => inner.nonce.as_deref(),
            Self::PermissionsRequest(inner) => inner.nonce.as_deref(),
            Self::PermissionsGrant(inner) => inner.nonce.as_deref(),
            Self::PermissionsQuery(inner) => inner.nonce.as_deref(),
        }
    }
}

// ============================================================================
// SECTION: Value Enums
// ============================================================================

/// Result ordering for `CollectionsQuery`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateSort {
    /// Earliest `dateCreated` first.
    CreatedAscending,
    /// Latest `dateCreated` first.
    CreatedDescending,
    /// Earliest `datePublished` first.
    PublishedAscending,
    /// Latest `datePublished` first.
    PublishedDescending,
}

/// Signing condition of a permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attestation {
    /// The object must not be signed.
    Prohibited,
    /// The object may be signed.
    #[default]
    Optional,
    /// The object must be signed.
    Required,
}

/// Encryption condition of a permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Encryption {
    /// The object may be encrypted.
    #[default]
    Optional,
    /// The object must be encrypted.
    Required,
}

// ============================================================================
// SECTION: Collections
// ============================================================================

/// `CollectionsQuery` descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsQuery {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Schema URI of the associated data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Record identifier (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// MIME type of the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<String>,
    /// Result ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_sort: Option<DateSort>,
}

/// `CollectionsWrite` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsWrite {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Record identifier (UUID v4).
    pub record_id: String,
    /// Schema URI of the associated data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Publication state; absence means unpublished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    /// Creation time (Unix epoch seconds).
    pub date_created: u64,
    /// Publication time (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<u64>,
}

/// `CollectionsCommit` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsCommit {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Record identifier (UUID v4).
    pub record_id: String,
    /// Schema URI of the associated data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Creation time (Unix epoch seconds).
    pub date_created: u64,
    /// Publication time (Unix epoch seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<u64>,
}

/// `CollectionsDelete` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsDelete {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Identifier of the record to delete (UUID v4).
    pub record_id: String,
}

// ============================================================================
// SECTION: Threads
// ============================================================================

/// `ThreadsQuery` descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsQuery {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Thread identifier (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// `ThreadsCreate` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsCreate {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Identifier of the thread being created (UUID v4).
    pub thread_id: String,
    /// URI of the overall thread type.
    pub thread_type: String,
    /// Schema URI of the thread message data.
    pub schema: String,
    /// Publication state; absence means unpublished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

/// `ThreadsReply` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsReply {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Thread the reply belongs to (UUID v4).
    pub thread_id: String,
    /// Message being replied to (UUID v4).
    pub parent_id: String,
    /// Schema URI of the thread message data.
    pub schema: String,
}

/// `ThreadsClose` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsClose {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Thread to close (UUID v4).
    pub thread_id: String,
}

/// `ThreadsDelete` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsDelete {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Thread to delete (UUID v4).
    pub thread_id: String,
}

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Method, schema, and identifier narrowing a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    /// Interface method the permission applies to.
    pub method: Method,
    /// Schema URI of the associated data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Object reference (UUID v4); requires `schema`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Conditions attached to a permission, with protocol defaults applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermissionConditions {
    /// Signing condition; defaults to `optional`.
    pub attestation: Attestation,
    /// Encryption condition; defaults to `optional`.
    pub encryption: Encryption,
    /// Grantee may delegate the capability.
    pub delegation: bool,
    /// Grantee may publish data for publishable methods.
    pub publication: bool,
    /// Permission applies to objects created by any entity.
    pub shared_access: bool,
}

/// `PermissionsRequest` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsRequest {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// DID URI of the granting party.
    pub granted_by: String,
    /// DID URI of the party being granted the permission.
    pub granted_to: String,
    /// Purpose of the permission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scope of the permission.
    pub scope: Scope,
    /// Conditions of the permission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PermissionConditions>,
}

impl PermissionsRequest {
    /// Returns the conditions in effect, applying defaults when absent.
    #[must_use]
    pub fn effective_conditions(&self) -> PermissionConditions {
        self.conditions.unwrap_or_default()
    }
}

/// `PermissionsGrant` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsGrant {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Identifier of this grant (UUID v4).
    pub permission_grant_id: String,
    /// Request this grant answers (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_request_id: Option<String>,
    /// DID URI of the granting party.
    pub granted_by: String,
    /// DID URI of the party being granted the permission.
    pub granted_to: String,
    /// Grant this one was delegated from (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated_from: Option<String>,
    /// Expiry (Unix epoch seconds).
    pub expiry: u64,
    /// Scope of the permission.
    pub scope: Scope,
    /// Conditions of the permission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PermissionConditions>,
}

impl PermissionsGrant {
    /// Returns the conditions in effect, applying defaults when absent.
    #[must_use]
    pub fn effective_conditions(&self) -> PermissionConditions {
        self.conditions.unwrap_or_default()
    }

    /// Returns true when the grant was delegated from another grant.
    #[must_use]
    pub const fn is_delegated(&self) -> bool {
        self.delegated_from.is_some()
    }
}

/// `PermissionsQuery` descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsQuery {
    /// Author-supplied nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Request identifier (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_request_id: Option<String>,
    /// Grant identifier (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_grant_id: Option<String>,
    /// Revocation identifier (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_revoke_id: Option<String>,
    /// DID URI of the granting party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<String>,
    /// DID URI of the grantee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_to: Option<String>,
    /// Grant the permission was delegated from (UUID v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated_from: Option<String>,
    /// Scope filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}
