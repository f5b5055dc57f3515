//! # enumcast-core
//!
//! Enum-backed property coercion for record stores - THE LOGIC.
//!
//! A record-like entity with generic, dynamically-keyed property storage
//! declares that certain keys are backed by closed enumerations. This
//! crate intercepts every get/set of such a property: on write, a raw
//! scalar (ordinal or label) or an already-materialized instance is
//! validated and normalized into the configured raw storage form; on
//! read, the stored raw scalar is reconstituted into a typed instance.
//! Storage holds only raw scalars, consumers see only typed instances.
//!
//! ## Pipeline
//!
//! Every property access flows through three layers:
//! - `accessor`: interception. Enum-backed keys route through coercion,
//!   all other keys pass through unchanged.
//! - `bindings`: resolution. Which enum type governs this key, and does
//!   it satisfy the capability contract.
//! - `coerce`: conversion. Raw scalar to instance and back, honoring
//!   the per-property storage representation choice.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is pure Rust: no async, no network dependencies
//! - Is deterministic: BTreeMap only, no HashMap, no floats
//! - Never stores an enum instance; the `PropertyStore` seam accepts
//!   scalars exclusively
//! - Fails loudly: every mismatch at the trust boundary is an error with
//!   full diagnostic context, never a silent fallback

// =============================================================================
// MODULES
// =============================================================================

pub mod accessor;
pub mod bindings;
pub mod coerce;
pub mod enumerable;
pub mod storage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CastError, Scalar, StorageRepr, Value};

// =============================================================================
// RE-EXPORTS: Capability & Resolution
// =============================================================================

pub use bindings::EnumBindings;
pub use enumerable::{EnumType, Enumerable, Variant};

// =============================================================================
// RE-EXPORTS: Coercion Pipeline
// =============================================================================

pub use accessor::{EnumAccessor, PropertyAccessor};
pub use coerce::Coercer;

// =============================================================================
// RE-EXPORTS: Property Stores
// =============================================================================

pub use storage::RedbStore;
pub use store::{MemoryStore, PropertyStore};
