//! # Enumerable Capability
//!
//! The contract a closed enumeration must satisfy to back a property:
//! a factory from raw ordinal or label, plus ordinal and label accessors
//! on each variant.
//!
//! - `Enumerable` is the compile-time form of the capability: binding a
//!   property with `EnumBindings::bind::<E>` proves it by trait bound.
//! - `EnumType` is the erased runtime form: the identifier that bindings
//!   store and resolution returns.
//! - `Variant` is the transient materialized instance produced on read.
//!
//! # Extension Point
//!
//! This trait is intentionally defined without in-crate implementations.
//! Host crates implement it for their own closed enums; implementors must
//! keep ordinals and labels stable, since they are the persisted forms.

use crate::types::{CastError, Scalar};
use std::fmt;

// =============================================================================
// MATERIALIZED VARIANT
// =============================================================================

/// A materialized enum instance, erased to its type name, ordinal, and
/// label.
///
/// Variants are created fresh on every read and are never stored: writes
/// immediately strip them back down to a raw scalar. Fields are private so
/// that instances are constructible only through `Enumerable` factory
/// methods; type identity is therefore sufficient proof of membership and
/// the coercion layer performs no separate membership re-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    type_name: &'static str,
    ordinal: i64,
    label: &'static str,
}

impl Variant {
    pub(crate) const fn new(type_name: &'static str, ordinal: i64, label: &'static str) -> Self {
        Self {
            type_name,
            ordinal,
            label,
        }
    }

    /// The name of the enum type this instance belongs to.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The variant's stable integer ordinal.
    #[must_use]
    pub const fn ordinal(&self) -> i64 {
        self.ordinal
    }

    /// The variant's stable string label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.label)
    }
}

// =============================================================================
// ENUMERABLE TRAIT
// =============================================================================

/// The capability contract for closed enumerations backing properties.
///
/// Required operations mirror the data model: a stable type name, a
/// factory per raw form, and per-instance ordinal/label accessors. The
/// provided methods derive the two-way erased conversions from them.
pub trait Enumerable: Sized + 'static {
    /// Stable name identifying this enum type in bindings and diagnostics.
    const NAME: &'static str;

    /// Return the variant with the given ordinal, if any.
    fn from_ordinal(ordinal: i64) -> Option<Self>;

    /// Return the variant with the given label, if any.
    fn from_label(label: &str) -> Option<Self>;

    /// This variant's stable integer ordinal.
    fn ordinal(&self) -> i64;

    /// This variant's stable string label.
    fn label(&self) -> &'static str;

    /// Factory: materialize the variant named by a raw scalar.
    ///
    /// Returns `CastError::NoMatchingVariant` if the scalar names no
    /// variant. A `Bool` scalar can never match.
    fn make(raw: &Scalar) -> Result<Self, CastError> {
        let found = match raw {
            Scalar::Int(i) => Self::from_ordinal(*i),
            Scalar::Text(s) => Self::from_label(s),
            Scalar::Bool(_) => None,
        };
        found.ok_or_else(|| CastError::NoMatchingVariant {
            type_name: Self::NAME,
            raw: raw.clone(),
        })
    }

    /// Erase this instance into a transient `Variant`.
    fn to_variant(&self) -> Variant {
        Variant::new(Self::NAME, self.ordinal(), self.label())
    }

    /// Reconstruct a typed instance from an erased `Variant`.
    ///
    /// Returns `None` when the variant belongs to a different enum type.
    fn try_from_variant(variant: &Variant) -> Option<Self> {
        if variant.type_name() != Self::NAME {
            return None;
        }
        Self::from_ordinal(variant.ordinal())
    }
}

// =============================================================================
// ERASED TYPE DESCRIPTOR
// =============================================================================

/// Erased runtime descriptor of an `Enumerable` implementation.
///
/// This is the enum type identifier that property bindings store and
/// resolution returns: a stable name plus the monomorphized factory. A
/// descriptor can only be built from a type satisfying the capability,
/// so holding one is holding the capability proof.
#[derive(Clone, Copy)]
pub struct EnumType {
    name: &'static str,
    factory: fn(&Scalar) -> Option<Variant>,
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumType {}

impl EnumType {
    /// Build the descriptor for an `Enumerable` type.
    #[must_use]
    pub fn of<E: Enumerable>() -> Self {
        Self {
            name: E::NAME,
            factory: erased_make::<E>,
        }
    }

    /// The described enum type's stable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the factory with a raw scalar.
    ///
    /// Returns `CastError::NoMatchingVariant` if the scalar names no
    /// variant of the described type.
    pub fn make(&self, raw: &Scalar) -> Result<Variant, CastError> {
        (self.factory)(raw).ok_or_else(|| CastError::NoMatchingVariant {
            type_name: self.name,
            raw: raw.clone(),
        })
    }
}

/// Monomorphized factory body behind `EnumType`.
fn erased_make<E: Enumerable>(raw: &Scalar) -> Option<Variant> {
    let instance = match raw {
        Scalar::Int(i) => E::from_ordinal(*i),
        Scalar::Text(s) => E::from_label(s),
        Scalar::Bool(_) => None,
    };
    instance.map(|e| e.to_variant())
}

// =============================================================================
// TESTS
// =============================================================================
