//! # Property Interception Layer
//!
//! `EnumAccessor` decorates a `PropertyStore`: every get/set is routed
//! through enum resolution, enum-backed keys go through coercion, and
//! all other keys pass through unchanged.
//!
//! Both paths leave the underlying store holding only raw scalars, never
//! instances. The rest of the host entity (persistence included) relies
//! on that invariant.

use crate::bindings::EnumBindings;
use crate::coerce::Coercer;
use crate::enumerable::Enumerable;
use crate::store::PropertyStore;
use crate::types::{CastError, Value};

// =============================================================================
// PROPERTYACCESSOR TRAIT
// =============================================================================

/// The transparent property access surface exposed to callers.
///
/// Callers hand in plain values (raw scalars or instances) on write and
/// receive typed instances for enum-backed keys on read. No additional
/// API surface exists; non-enum keys behave as if the store were used
/// directly.
pub trait PropertyAccessor {
    /// Read a property. Enum-backed keys materialize into
    /// `Value::Variant`; other keys return the stored scalar lifted.
    /// Missing properties read as `None`.
    fn get(&self, key: &str) -> Result<Option<Value>, CastError>;

    /// Write a property. Enum-backed keys are normalized to their raw
    /// scalar first; a failed write leaves the prior value untouched.
    fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<(), CastError>;
}

// =============================================================================
// ENUM ACCESSOR
// =============================================================================

/// Decorator wiring a raw store and its enum bindings into one entity.
///
/// Owns both halves; the bindings are immutable for the accessor's
/// lifetime, matching the entity-definition contract.
#[derive(Debug)]
pub struct EnumAccessor<S: PropertyStore> {
    /// The underlying raw storage mechanism.
    store: S,
    /// Property key -> enum type mapping.
    bindings: EnumBindings,
}

impl<S: PropertyStore> EnumAccessor<S> {
    /// Wrap a store with its enum bindings.
    #[must_use]
    pub fn new(store: S, bindings: EnumBindings) -> Self {
        Self { store, bindings }
    }

    /// The enum bindings of this entity.
    #[must_use]
    pub fn bindings(&self) -> &EnumBindings {
        &self.bindings
    }

    /// Read-only view of the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the accessor, returning the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Typed read: materialize an enum-backed property as `E`.
    ///
    /// Fails with `CastError::TypeMismatch` when `key` is configured with
    /// a different enum type than `E`, and `CastError::NotEnumBacked`
    /// when `key` has no binding at all.
    pub fn get_enum<E: Enumerable>(&self, key: &str) -> Result<Option<E>, CastError> {
        let Some(ty) = self.bindings.resolve(key)? else {
            return Err(CastError::NotEnumBacked {
                entity: self.store.entity_name().to_string(),
                key: key.to_string(),
            });
        };
        if ty.name() != E::NAME {
            return Err(CastError::TypeMismatch {
                entity: self.store.entity_name().to_string(),
                key: key.to_string(),
                expected: ty.name(),
                actual: E::NAME.to_string(),
            });
        }
        match self.store.get_raw(key)? {
            Some(raw) => Ok(Some(E::make(&raw)?)),
            None => Ok(None),
        }
    }

    /// Typed write: store an enum instance under an enum-backed key.
    pub fn set_enum<E: Enumerable>(&mut self, key: &str, value: &E) -> Result<(), CastError> {
        self.set(key, Value::Variant(value.to_variant()))
    }
}

impl<S: PropertyStore> PropertyAccessor for EnumAccessor<S> {
    fn get(&self, key: &str) -> Result<Option<Value>, CastError> {
        // Resolution runs before the raw value is inspected, so a broken
        // configuration surfaces on first use even for unset properties.
        let ty = self.bindings.resolve(key)?;
        let raw = self.store.get_raw(key)?;
        match ty {
            Some(ty) => match raw {
                Some(scalar) => Ok(Some(Value::Variant(Coercer::materialize(ty, &scalar)?))),
                None => Ok(None),
            },
            None => Ok(raw.map(Value::from_scalar)),
        }
    }

    fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<(), CastError> {
        let value = value.into();
        match self.bindings.resolve(key)? {
            Some(ty) => {
                let repr = self.store.storage_repr(key);
                let raw =
                    Coercer::normalize(ty, self.store.entity_name(), key, value, repr)?;
                self.store.set_raw(key, raw)
            }
            None => match value.into_scalar() {
                Some(scalar) => self.store.set_raw(key, scalar),
                None => Err(CastError::NotEnumBacked {
                    entity: self.store.entity_name().to_string(),
                    key: key.to_string(),
                }),
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
