// crates/dwn-descriptor/src/method.rs
// ============================================================================
// Module: Descriptor Methods
// Description: Closed set of descriptor method literals.
// Purpose: Provide the discriminant used to dispatch descriptor schemas.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every descriptor carries a `method` string naming exactly one schema. The
//! literals are bit-exact on the wire; no case folding is applied to them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Method literals in canonical registry order.
pub const METHOD_LITERALS: [&str; 12] = [
    "CollectionsQuery",
    "CollectionsWrite",
    "CollectionsCommit",
    "CollectionsDelete",
    "ThreadsQuery",
    "ThreadsCreate",
    "ThreadsReply",
    "ThreadsClose",
    "ThreadsDelete",
    "PermissionsRequest",
    "PermissionsGrant",
    "PermissionsQuery",
];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Descriptor method discriminant.
///
/// # Invariants
/// - Serialized form equals the wire literal exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Method {
    /// Query records of a collection.
    CollectionsQuery,
    /// Write a record.
    CollectionsWrite,
    /// Commit a previously written record.
    CollectionsCommit,
    /// Delete a record.
    CollectionsDelete,
    /// Query threads.
    ThreadsQuery,
    /// Create a thread.
    ThreadsCreate,
    /// Reply within a thread.
    ThreadsReply,
    /// Close a thread.
    ThreadsClose,
    /// Delete a thread.
    ThreadsDelete,
    /// Request a permission.
    PermissionsRequest,
    /// Grant a permission.
    PermissionsGrant,
    /// Query permissions.
    PermissionsQuery,
}

/// Interface family a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interface {
    /// Record-oriented interface.
    Collections,
    /// Linked message series.
    Threads,
    /// Capability grants.
    Permissions,
}

impl Method {
    /// All methods in canonical registry order.
    pub const ALL: [Self; 12] = [
        Self::CollectionsQuery,
        Self::CollectionsWrite,
        Self::CollectionsCommit,
        Self::CollectionsDelete,
        Self::ThreadsQuery,
        Self::ThreadsCreate,
        Self::ThreadsReply,
        Self::ThreadsClose,
        Self::ThreadsDelete,
        Self::PermissionsRequest,
        Self::PermissionsGrant,
        Self::PermissionsQuery,
    ];

    /// Returns the wire literal for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CollectionsQuery => "CollectionsQuery",
            Self::CollectionsWrite => "CollectionsWrite",
            Self::CollectionsCommit => "CollectionsCommit",
            Self::CollectionsDelete => "CollectionsDelete",
            Self::ThreadsQuery => "ThreadsQuery",
            Self::ThreadsCreate => "ThreadsCreate",
            Self::ThreadsReply => "ThreadsReply",
            Self::ThreadsClose => "ThreadsClose",
            Self::ThreadsDelete => "ThreadsDelete",
            Self::PermissionsRequest => "PermissionsRequest",
            Self::PermissionsGrant => "PermissionsGrant",
            Self::PermissionsQuery => "PermissionsQuery",
        }
    }

    /// Parses an exact wire literal.
    #[must_use]
    pub fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == literal)
    }

    /// Returns the interface family of the method.
    #[must_use]
    pub const fn interface(self) -> Interface {
        match self {
            Self::CollectionsQuery
            | Self::CollectionsWrite
            | Self::CollectionsCommit
            | Self::CollectionsDelete => Interface::Collections,
            Self::ThreadsQuery
            | Self::ThreadsCreate
            | Self::ThreadsReply
            | Self::ThreadsClose
            | Self::ThreadsDelete => Interface::Threads,
            Self::PermissionsRequest | Self::PermissionsGrant | Self::PermissionsQuery => {
                Interface::Permissions
            }
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Interface {
    /// Returns the interface label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collections => "collections",
            Self::Threads => "threads",
            Self::Permissions => "permissions",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Interface;
    use super::METHOD_LITERALS;
    use super::Method;

    #[test]
    fn literals_follow_registry_order() {
        for (method, literal) in Method::ALL.iter().zip(METHOD_LITERALS) {
            assert_eq!(method.as_str(), literal);
        }
    }

    #[test]
    fn from_literal_is_exact() {
        assert_eq!(Method::from_literal("ThreadsReply"), Some(Method::ThreadsReply));
        assert_eq!(Method::from_literal("threadsreply"), None);
        assert_eq!(Method::from_literal("PermissionsRevoke"), None);
    }

    #[test]
    fn interface_labels_follow_method_prefix() {
        for method in Method::ALL {
            let label = method.interface().as_str();
            assert!(method.as_str().to_ascii_lowercase().starts_with(label));
        }
        assert_eq!(Method::ThreadsReply.interface(), Interface::Threads);
        assert_eq!(Interface::Permissions.as_str(), "permissions");
    }
}
