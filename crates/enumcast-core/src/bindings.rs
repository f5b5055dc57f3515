//! # Property Bindings
//!
//! The per-entity mapping from property key to enum type.
//!
//! - Declared once at entity-definition time, immutable afterwards
//! - `BTreeMap` only, for deterministic ordering
//! - Resolution validates the capability on every call; static bindings
//!   carry the proof in the descriptor, named bindings are checked
//!   against the declared-type table at first use

use crate::enumerable::{EnumType, Enumerable};
use crate::types::CastError;
use std::collections::BTreeMap;

// =============================================================================
// BINDING ENTRY
// =============================================================================

/// One property binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Bound directly to a descriptor; capability proven by trait bound
    /// at the `bind` call site.
    Static(EnumType),
    /// Bound to a dynamic type name; resolved against the declared-type
    /// table at first use, not at declaration time.
    Named(&'static str),
}

// =============================================================================
// ENUM BINDINGS
// =============================================================================

/// The immutable mapping from property key to enum type.
///
/// Keys present in the mapping are enum-backed; every other key passes
/// through the interception layer unchanged. Construction is chaining:
///
/// ```
/// # use enumcast_core::{EnumBindings, Enumerable};
/// # #[derive(Clone, Copy)] enum Status { Active }
/// # impl Enumerable for Status {
/// #     const NAME: &'static str = "Status";
/// #     fn from_ordinal(o: i64) -> Option<Self> { (o == 0).then_some(Self::Active) }
/// #     fn from_label(l: &str) -> Option<Self> { (l == "active").then_some(Self::Active) }
/// #     fn ordinal(&self) -> i64 { 0 }
/// #     fn label(&self) -> &'static str { "active" }
/// # }
/// let bindings = EnumBindings::new().bind::<Status>("status");
/// assert!(bindings.is_enum_backed("status"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumBindings {
    /// Property key -> binding.
    bindings: BTreeMap<String, Binding>,
    /// Declared types, resolvable by name for `Named` bindings.
    declared: BTreeMap<&'static str, EnumType>,
}

impl EnumBindings {
    /// Create an empty mapping (no enum-backed properties).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a property key to an enum type.
    ///
    /// The trait bound is the capability check: this cannot be declared
    /// for a type lacking the factory or accessors.
    #[must_use]
    pub fn bind<E: Enumerable>(mut self, key: impl Into<String>) -> Self {
        self.bindings
            .insert(key.into(), Binding::Static(EnumType::of::<E>()));
        self
    }

    /// Bind a property key to an enum type by name.
    ///
    /// No validation happens here. The name is checked against the
    /// declared-type table on every resolution, so an undeclared name
    /// fails with `CastError::Configuration` at first use of the
    /// property, not at declaration time.
    #[must_use]
    pub fn bind_named(mut self, key: impl Into<String>, type_name: &'static str) -> Self {
        self.bindings.insert(key.into(), Binding::Named(type_name));
        self
    }

    /// Declare an enum type, making it resolvable by name.
    #[must_use]
    pub fn declare<E: Enumerable>(mut self) -> Self {
        self.declared.insert(E::NAME, EnumType::of::<E>());
        self
    }

    /// True iff `key` is present in the mapping.
    #[must_use]
    pub fn is_enum_backed(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Number of enum-backed properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True iff no property is enum-backed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve the enum type configured for `key`.
    ///
    /// Returns `Ok(None)` for keys that are not enum-backed. Fails with
    /// `CastError::Configuration` when a named binding's type was never
    /// declared.
    pub fn resolve(&self, key: &str) -> Result<Option<EnumType>, CastError> {
        match self.bindings.get(key) {
            None => Ok(None),
            Some(Binding::Static(ty)) => Ok(Some(*ty)),
            Some(Binding::Named(name)) => match self.declared.get(name) {
                Some(ty) => Ok(Some(*ty)),
                None => Err(CastError::Configuration {
                    key: key.to_string(),
                    type_name: (*name).to_string(),
                }),
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
