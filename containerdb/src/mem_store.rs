//! In-memory key-value store for testing.
//!
//! `MemStore` implements `KeyValueStore` using a `BTreeMap` for
//! deterministic key ordering. Useful for unit tests and integration tests
//! where a real storage backend is not needed.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// In-memory store backed by `BTreeMap` behind an `RwLock`.
#[derive(Debug, Default)]
pub struct MemStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    closed: AtomicBool,
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with data.
    pub fn with_data(data: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            data: RwLock::new(data),
            closed: AtomicBool::new(false),
        }
    }

    /// Insert a key-value pair directly, bypassing the trait interface.
    pub fn insert(&self, key: Vec<u8>, value: Vec<u8>) {
        self.data.write().insert(key, value);
    }

    /// Returns the number of entries in the store.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// All physical keys currently stored, in sorted order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.data.read().keys().cloned().collect()
    }

    fn check_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Backend("store is closed".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_open()?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.check_open()?;
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.check_open()?;
        self.data.write().remove(key);
        Ok(())
    }

    fn close(&self) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.check_open()?;
        Ok(self.data.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = MemStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.get(b"missing").unwrap(), None);
        assert!(!store.contains(b"missing").unwrap());
    }

    #[test]
    fn test_put_and_get() {
        let store = MemStore::new();
        store.put(b"key1", b"value1").unwrap();

        assert_eq!(store.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert!(store.contains(b"key1").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite() {
        let store = MemStore::new();
        store.put(b"key1", b"v1").unwrap();
        store.put(b"key1", b"v2").unwrap();

        assert_eq!(store.get(b"key1").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete() {
        let store = MemStore::new();
        store.put(b"key1", b"value1").unwrap();
        store.delete(b"key1").unwrap();

        assert_eq!(store.get(b"key1").unwrap(), None);
        assert!(store.is_empty());

        // Deleting an absent key is a no-op.
        store.delete(b"key1").unwrap();
    }

    #[test]
    fn test_absence_distinct_from_empty_value() {
        let store = MemStore::new();
        store.put(b"key1", b"").unwrap();

        assert_eq!(store.get(b"key1").unwrap(), Some(vec![]));
        assert_eq!(store.get(b"key2").unwrap(), None);
    }

    #[test]
    fn test_closed_store_rejects_operations() {
        let store = MemStore::new();
        store.put(b"key1", b"value1").unwrap();
        store.close().unwrap();

        assert!(store.get(b"key1").is_err());
        assert!(store.put(b"key1", b"v2").is_err());
        assert!(store.delete(b"key1").is_err());
        // close is idempotent
        store.close().unwrap();
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemStore::new();
        store.put(b"b", b"2").unwrap();
        store.put(b"a", b"1").unwrap();
        store.put(b"c", b"3").unwrap();

        assert_eq!(
            store.keys(),
            vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
        );
    }
}
