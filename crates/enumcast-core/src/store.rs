//! # Property Store Seam
//!
//! The host entity's generic raw property storage, as a trait.
//!
//! The coercion layers never touch a concrete store: they see this seam
//! only. The store holds `Scalar` values exclusively, so the invariant
//! that storage never holds enum instances is enforced by the type
//! system rather than by discipline.

use crate::types::{CastError, Scalar, StorageRepr};
use std::collections::BTreeMap;

// =============================================================================
// PROPERTYSTORE TRAIT
// =============================================================================

/// Generic, dynamically-keyed raw property storage.
///
/// All fallible operations return `Result<T, CastError>` to support both
/// in-memory and persistent storage backends uniformly.
pub trait PropertyStore {
    /// Name of the host entity, used in diagnostics.
    fn entity_name(&self) -> &str;

    /// Fetch the raw scalar currently stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<Scalar>, CastError>;

    /// Store a raw scalar under `key`, replacing any prior value.
    fn set_raw(&mut self, key: &str, value: Scalar) -> Result<(), CastError>;

    /// The declared storage representation for `key`.
    ///
    /// Cast declarations are entity-definition data, fixed before any
    /// property access. Properties without a declaration store the label.
    fn storage_repr(&self, key: &str) -> StorageRepr;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// The in-memory reference store.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
/// No `HashMap` allowed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Host entity name for diagnostics.
    name: String,

    /// Property key -> raw scalar.
    values: BTreeMap<String, Scalar>,

    /// Cast declarations: property key -> representation choice.
    casts: BTreeMap<String, StorageRepr>,
}

impl MemoryStore {
    /// Create an empty store for the named entity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            casts: BTreeMap::new(),
        }
    }

    /// Declare the storage representation for a property.
    #[must_use]
    pub fn with_cast(mut self, key: impl Into<String>, repr: StorageRepr) -> Self {
        self.casts.insert(key.into(), repr);
        self
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True iff no property is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertyStore for MemoryStore {
    fn entity_name(&self) -> &str {
        &self.name
    }

    fn get_raw(&self, key: &str) -> Result<Option<Scalar>, CastError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: Scalar) -> Result<(), CastError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn storage_repr(&self, key: &str) -> StorageRepr {
        self.casts.get(key).copied().unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut store = MemoryStore::new("user");

        assert_eq!(store.get_raw("status").unwrap(), None);
        store.set_raw("status", Scalar::Int(0)).unwrap();
        assert_eq!(store.get_raw("status").unwrap(), Some(Scalar::Int(0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn overwrite_replaces_prior_value() {
        let mut store = MemoryStore::new("user");

        store.set_raw("status", Scalar::Int(0)).unwrap();
        store.set_raw("status", Scalar::Int(1)).unwrap();
        assert_eq!(store.get_raw("status").unwrap(), Some(Scalar::Int(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn undeclared_cast_defaults_to_label() {
        let store = MemoryStore::new("user").with_cast("status", StorageRepr::Ordinal);

        assert_eq!(store.storage_repr("status"), StorageRepr::Ordinal);
        assert_eq!(store.storage_repr("priority"), StorageRepr::Label);
    }

    #[test]
    fn entity_name_is_exposed() {
        let store = MemoryStore::new("user");
        assert_eq!(store.entity_name(), "user");
    }
}
