// crates/dwn-descriptor/src/values.rs
// ============================================================================
// Module: Closed Value Sets
// Description: Enumerated string literal sets used by descriptor fields.
// Purpose: Validate enumerated strings by table lookup and canonicalize them.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Enumerated string fields (method literals, `dateSort`, `attestation`,
//! `encryption`) are closed sets. Membership is decided here and nowhere else.
//! Sets marked [`LiteralFolding::Relaxed`] also accept spellings that differ
//! only in ASCII case or `_`/`-` separators (for example `CREATED_ASCENDING`)
//! and canonicalize them to the defined literal.

use crate::method::METHOD_LITERALS;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Matching mode for a value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralFolding {
    /// Only the exact literal is accepted.
    Exact,
    /// Case and separator differences are folded before matching.
    Relaxed,
}

/// Closed set of permitted string literals.
///
/// # Invariants
/// - `literals` is non-empty and holds the canonical spelling of each value.
#[derive(Debug, PartialEq, Eq)]
pub struct ValueSet {
    /// Label of the set, used in generated schemas.
    name: &'static str,
    /// Canonical literals.
    literals: &'static [&'static str],
    /// Matching mode.
    folding: LiteralFolding,
}

impl ValueSet {
    /// Creates a value set that accepts exact literals only.
    #[must_use]
    pub const fn exact(name: &'static str, literals: &'static [&'static str]) -> Self {
        Self {
            name,
            literals,
            folding: LiteralFolding::Exact,
        }
    }

    /// Creates a value set that folds case and separators.
    #[must_use]
    pub const fn relaxed(name: &'static str, literals: &'static [&'static str]) -> Self {
        Self {
            name,
            literals,
            folding: LiteralFolding::Relaxed,
        }
    }

    /// Returns the label of the set.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the canonical literals.
    #[must_use]
    pub const fn literals(&self) -> &'static [&'static str] {
        self.literals
    }

    /// Returns the matching mode.
    #[must_use]
    pub const fn folding(&self) -> LiteralFolding {
        self.folding
    }

    /// Returns the canonical literal matching `value`, if any.
    #[must_use]
    pub fn canonicalize(&self, value: &str) -> Option<&'static str> {
        if let Some(exact) = self.literals.iter().copied().find(|literal| *literal == value) {
            return Some(exact);
        }
        match self.folding {
            LiteralFolding::Exact => None,
            LiteralFolding::Relaxed => {
                let folded = fold(value);
                self.literals.iter().copied().find(|literal| fold(literal) == folded)
            }
        }
    }

    /// Returns true when `value` is a member of the set.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.canonicalize(value).is_some()
    }
}

// ============================================================================
// SECTION: Value Sets
// ============================================================================

/// Descriptor method literals.
pub static METHOD_VALUES: ValueSet = ValueSet::exact("method", &METHOD_LITERALS);

/// `dateSort` literals for `CollectionsQuery`.
pub static DATE_SORT_VALUES: ValueSet = ValueSet::relaxed(
    "dateSort",
    &["createdAscending", "createdDescending", "publishedAscending", "publishedDescending"],
);

/// `attestation` literals for permission conditions.
pub static ATTESTATION_VALUES: ValueSet =
    ValueSet::relaxed("attestation", &["prohibited", "optional", "required"]);

/// `encryption` literals for permission conditions.
pub static ENCRYPTION_VALUES: ValueSet =
    ValueSet::relaxed("encryption", &["optional", "required"]);

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Lowercases ASCII and strips `_`/`-` separators.
fn fold(value: &str) -> String {
    value.chars().filter(|ch| *ch != '_' && *ch != '-').map(|ch| ch.to_ascii_lowercase()).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ATTESTATION_VALUES;
    use super::DATE_SORT_VALUES;
    use super::ENCRYPTION_VALUES;
    use super::LiteralFolding;
    use super::METHOD_VALUES;

    #[test]
    fn relaxed_sets_canonicalize_alternate_spellings() {
        assert_eq!(DATE_SORT_VALUES.canonicalize("CREATED_ASCENDING"), Some("createdAscending"));
        assert_eq!(DATE_SORT_VALUES.canonicalize("publisheddescending"), Some("publishedDescending"));
        assert_eq!(ATTESTATION_VALUES.canonicalize("Required"), Some("required"));
        assert_eq!(DATE_SORT_VALUES.canonicalize("bogus"), None);
    }

    #[test]
    fn exact_sets_reject_alternate_spellings() {
        assert_eq!(METHOD_VALUES.canonicalize("CollectionsQuery"), Some("CollectionsQuery"));
        assert_eq!(METHOD_VALUES.canonicalize("collectionsquery"), None);
    }

    #[test]
    fn only_method_literals_match_exactly() {
        assert_eq!(METHOD_VALUES.folding(), LiteralFolding::Exact);
        for set in [&DATE_SORT_VALUES, &ATTESTATION_VALUES, &ENCRYPTION_VALUES] {
            assert_eq!(set.folding(), LiteralFolding::Relaxed, "{}", set.name());
        }
    }
}
