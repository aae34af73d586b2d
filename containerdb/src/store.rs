//! Shared physical store abstraction.
//!
//! `KeyValueStore` defines the byte-level interface to the store all
//! contract namespaces share. The real backend (and whatever
//! write-buffering, snapshotting, or commit/rollback it performs) lives
//! outside this layer; this crate only issues get/put/delete in the
//! caller's order.
//!
//! Implementations:
//! - `MemStore` (this crate) — in-memory BTreeMap for testing
//! - the production state database, provided by the surrounding engine

use crate::error::StoreError;

/// Byte-key/byte-value store shared across all contract namespaces.
///
/// Absence of a key must be distinguishable from an empty-bytes value:
/// `get` returns `Ok(None)` only when the key has never been written.
/// Handles are shared, so mutation goes through `&self`; implementations
/// provide their own interior locking.
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key. `Ok(None)` if the key does not exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set a value for a key, overwriting any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting an absent key is a no-op.
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Release the handle. Further operations are a caller error.
    fn close(&self) -> Result<(), StoreError>;

    /// Check if a key exists.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}
