//! # redb-backed Property Storage
//!
//! A disk-backed property store using the redb embedded database,
//! providing:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//! - Zero configuration
//!
//! Rows are postcard-encoded `Scalar` values keyed by property name.
//! Only raw scalars ever reach this table; coercion happens above the
//! `PropertyStore` seam. Cast declarations are entity-definition data
//! and stay in memory.

use crate::store::PropertyStore;
use crate::types::{CastError, Scalar, StorageRepr};
use redb::{Database, ReadableDatabase, TableDefinition};
use std::collections::BTreeMap;
use std::path::Path;

/// Table for properties: key string -> postcard-encoded Scalar bytes
const PROPERTIES: TableDefinition<&str, &[u8]> = TableDefinition::new("properties");

/// A disk-backed property store using redb.
///
/// Each get/set runs in its own transaction; a failed write commits
/// nothing, so the prior stored value survives any coercion or I/O
/// failure.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
    /// Host entity name for diagnostics.
    name: String,
    /// Cast declarations: property key -> representation choice.
    casts: BTreeMap<String, StorageRepr>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("name", &self.name)
            .field("cast_count", &self.casts.len())
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a property database at the given path.
    pub fn open(path: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, CastError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| CastError::Storage(e.to_string()))?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| CastError::Storage(e.to_string()))?;
            let _ = write_txn
                .open_table(PROPERTIES)
                .map_err(|e| CastError::Storage(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| CastError::Storage(e.to_string()))?;
        }

        Ok(Self {
            db,
            name: name.into(),
            casts: BTreeMap::new(),
        })
    }

    /// Declare the storage representation for a property.
    #[must_use]
    pub fn with_cast(mut self, key: impl Into<String>, repr: StorageRepr) -> Self {
        self.casts.insert(key.into(), repr);
        self
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), CastError> {
        self.db
            .compact()
            .map_err(|e| CastError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl PropertyStore for RedbStore {
    fn entity_name(&self) -> &str {
        &self.name
    }

    fn get_raw(&self, key: &str) -> Result<Option<Scalar>, CastError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| CastError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(PROPERTIES)
            .map_err(|e| CastError::Storage(e.to_string()))?;

        let Some(bytes) = table
            .get(key)
            .map_err(|e| CastError::Storage(e.to_string()))?
        else {
            return Ok(None);
        };

        let scalar: Scalar = postcard::from_bytes(bytes.value())
            .map_err(|e| CastError::Storage(e.to_string()))?;
        Ok(Some(scalar))
    }

    fn set_raw(&mut self, key: &str, value: Scalar) -> Result<(), CastError> {
        let bytes =
            postcard::to_allocvec(&value).map_err(|e| CastError::Storage(e.to_string()))?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| CastError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(PROPERTIES)
                .map_err(|e| CastError::Storage(e.to_string()))?;
            table
                .insert(key, bytes.as_slice())
                .map_err(|e| CastError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| CastError::Storage(e.to_string()))?;
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
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn basic_operations() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("props.redb");
        let mut store = RedbStore::open(&db_path, "user").expect("open db");

        assert_eq!(store.get_raw("status").expect("get"), None);
        store.set_raw("status", Scalar::Int(0)).expect("set");
        assert_eq!(store.get_raw("status").expect("get"), Some(Scalar::Int(0)));
    }

    #[test]
    fn overwrite_replaces_prior_value() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("props.redb");
        let mut store = RedbStore::open(&db_path, "user").expect("open db");

        store.set_raw("status", Scalar::text("active")).expect("set");
        store
            .set_raw("status", Scalar::text("inactive"))
            .expect("set");
        assert_eq!(
            store.get_raw("status").expect("get"),
            Some(Scalar::text("inactive"))
        );
    }

    #[test]
    fn persistence() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("props.redb");

        // Create and populate
        {
            let mut store = RedbStore::open(&db_path, "user").expect("open db");
            store.set_raw("status", Scalar::Int(1)).expect("set");
            store.set_raw("nickname", Scalar::text("ada")).expect("set");
        }

        // Reopen and verify
        {
            let store = RedbStore::open(&db_path, "user").expect("open db");
            assert_eq!(store.get_raw("status").expect("get"), Some(Scalar::Int(1)));
            assert_eq!(
                store.get_raw("nickname").expect("get"),
                Some(Scalar::text("ada"))
            );
        }
    }

    #[test]
    fn cast_declarations_stay_in_memory() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("props.redb");
        let store = RedbStore::open(&db_path, "user")
            .expect("open db")
            .with_cast("status", StorageRepr::Ordinal);

        assert_eq!(store.storage_repr("status"), StorageRepr::Ordinal);
        assert_eq!(store.storage_repr("priority"), StorageRepr::Label);
        assert_eq!(store.entity_name(), "user");
    }
}
