//! # Core Type Definitions
//!
//! This module contains the value types shared by every layer of the
//! coercion pipeline:
//! - Raw storage scalars (`Scalar`)
//! - Boundary values exchanged with callers (`Value`)
//! - Per-property storage representation choice (`StorageRepr`)
//! - Error types (`CastError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they key `BTreeMap`/`BTreeSet` collections
//! - Serialize only the persisted forms; boundary values stay transient

use crate::enumerable::Variant;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RAW STORAGE SCALAR
// =============================================================================

/// The raw value actually held by a property store.
///
/// This is the only persisted form. For an enum-backed property the
/// scalar is always `Int` (the variant ordinal) or `Text` (the variant
/// label) while under the coercion layer's control; `Bool` exists for
/// passthrough properties only and can never name a variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scalar {
    /// An integer scalar (variant ordinal for enum-backed properties).
    Int(i64),
    /// A string scalar (variant label for enum-backed properties).
    Text(String),
    /// A boolean scalar (passthrough properties only).
    Bool(bool),
}

impl Scalar {
    /// Build a text scalar from anything string-like.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

// =============================================================================
// BOUNDARY VALUE
// =============================================================================

/// A value crossing the property boundary in either direction.
///
/// On write this is the tagged input union of the coercion layer: a raw
/// ordinal, a raw label, a passthrough boolean, or an already-materialized
/// enum instance. On read it is what the accessor hands back: a lifted
/// scalar for passthrough keys, a `Variant` for enum-backed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A raw integer (ordinal for enum-backed keys).
    Int(i64),
    /// A raw string (label for enum-backed keys).
    Text(String),
    /// A raw boolean (never valid for enum-backed keys).
    Bool(bool),
    /// A materialized enum instance.
    Variant(Variant),
}

impl Value {
    /// Lift a storage scalar into a boundary value.
    #[must_use]
    pub fn from_scalar(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int(i) => Self::Int(i),
            Scalar::Text(s) => Self::Text(s),
            Scalar::Bool(b) => Self::Bool(b),
        }
    }

    /// Lower a boundary value back to a storage scalar.
    ///
    /// Returns `None` for `Variant` values: instances never reach storage
    /// without passing through coercion first.
    #[must_use]
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Self::Int(i) => Some(Scalar::Int(i)),
            Self::Text(s) => Some(Scalar::Text(s)),
            Self::Bool(b) => Some(Scalar::Bool(b)),
            Self::Variant(_) => None,
        }
    }

    /// View the materialized instance, if this value carries one.
    #[must_use]
    pub fn as_variant(&self) -> Option<&Variant> {
        match self {
            Self::Variant(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::from_scalar(scalar)
    }
}

impl From<Variant> for Value {
    fn from(variant: Variant) -> Self {
        Self::Variant(variant)
    }
}

// =============================================================================
// STORAGE REPRESENTATION CHOICE
// =============================================================================

/// Per-property choice of which raw form an enum-backed property persists.
///
/// This is declared by the host store's cast declarations and is read-only
/// input to the coercion layer. Properties without a declaration store
/// the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageRepr {
    /// Persist the variant's integer ordinal.
    Ordinal,
    /// Persist the variant's string label.
    #[default]
    Label,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised at the property boundary.
///
/// - No silent failures
/// - All variants are raised synchronously at the offending get/set call
/// - Nothing is caught or retried internally
#[derive(Debug, Error)]
pub enum CastError {
    /// A property was bound to an enum type name that was never declared.
    /// This is a setup defect, raised at first resolution of the property.
    #[error("property `{key}` is bound to enum type `{type_name}`, which is not declared")]
    Configuration {
        /// The enum-backed property key.
        key: String,
        /// The undeclared enum type name.
        type_name: String,
    },

    /// A raw scalar names no variant of the target enum type.
    #[error("no variant of `{type_name}` matches raw value {raw}")]
    NoMatchingVariant {
        /// The enum type that was searched.
        type_name: &'static str,
        /// The raw scalar that matched nothing.
        raw: Scalar,
    },

    /// A coerced value is not an instance of the property's configured
    /// enum type. Carries the full diagnostic context.
    #[error(
        "entity `{entity}` property `{key}`: expected an instance of `{expected}`, found `{actual}`"
    )]
    TypeMismatch {
        /// The host entity name.
        entity: String,
        /// The property key being written.
        key: String,
        /// The configured enum type name.
        expected: &'static str,
        /// What the caller actually supplied.
        actual: String,
    },

    /// An enum instance was written to a property with no enum binding.
    /// Raw property storage holds scalars only, never instances.
    #[error(
        "entity `{entity}` property `{key}` has no enum binding; refusing to store an enum instance"
    )]
    NotEnumBacked {
        /// The host entity name.
        entity: String,
        /// The unbound property key.
        key: String,
    },

    /// An I/O or encoding failure inside a persistent property store.
    #[error("storage error: {0}")]
    Storage(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_display_forms() {
        assert_eq!(Scalar::Int(7).to_string(), "7");
        assert_eq!(Scalar::text("active").to_string(), "\"active\"");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
    }

    #[test]
    fn value_scalar_round_trip() {
        let scalar = Scalar::text("active");
        let value = Value::from_scalar(scalar.clone());
        assert_eq!(value.into_scalar(), Some(scalar));
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(7), Value::Int(7));
        assert_eq!(Value::from("active"), Value::Text("active".to_string()));
        assert_eq!(Value::from(false), Value::Bool(false));
    }

    #[test]
    fn storage_repr_defaults_to_label() {
        assert_eq!(StorageRepr::default(), StorageRepr::Label);
    }

    #[test]
    fn error_messages_carry_context() {
        let err = CastError::NoMatchingVariant {
            type_name: "Status",
            raw: Scalar::Int(7),
        };
        assert_eq!(err.to_string(), "no variant of `Status` matches raw value 7");

        let err = CastError::TypeMismatch {
            entity: "user".to_string(),
            key: "status".to_string(),
            expected: "Status",
            actual: "Priority".to_string(),
        };
        assert!(err.to_string().contains("`user`"));
        assert!(err.to_string().contains("`status`"));
        assert!(err.to_string().contains("`Status`"));
        assert!(err.to_string().contains("`Priority`"));
    }
}
