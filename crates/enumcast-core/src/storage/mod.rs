//! # Storage Module
//!
//! Disk-backed `PropertyStore` backends.
//!
//! The coercion layers only ever see the `PropertyStore` seam; this
//! module provides the persistent implementation of it.

mod redb_store;

pub use redb_store::*;
