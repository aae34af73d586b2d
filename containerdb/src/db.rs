//! Per-contract database facade and nested namespace views.
//!
//! `ScoreDatabase` is the single entry point for one contract's storage: it
//! owns the namespace derived from the contract's address, enforces
//! ownership on every mutating call, selects the key format from the
//! effective chain revision, and dispatches change-observer notifications.
//!
//! `SubDatabase` is a nested view carved from a root (or another sub): it
//! prefixes keys for its own scope and forwards the opaque result upward,
//! so ownership and observer behavior are inherited from the eventual root.
//! Scopes are plain values recomputed from their prefix bytes on demand;
//! nothing is persisted for a namespace itself.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use scorestore_primitives::Address;

use crate::context::{ExecutionContext, REV_COMPACT_CONTAINER_KEYS};
use crate::error::StoreError;
use crate::observer::DatabaseObserver;
use crate::prefix::{KeyFormat, KEY_SEPARATOR};
use crate::store::KeyValueStore;

/// Shared capability surface of root and nested database views.
pub trait Database: Send + Sync {
    /// Get the raw value for a logical key within this scope.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set a raw value for a logical key within this scope.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Delete the record for a logical key within this scope.
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Release the underlying store handle.
    fn close(&self) -> Result<(), StoreError>;

    /// The contract address owning this namespace.
    fn address(&self) -> &Address;

    /// True for the namespace root, false for nested views. Governs the
    /// compact format's nested-prefix asymmetry.
    fn is_root(&self) -> bool;

    /// True iff the effective revision selects the compact key format.
    fn is_v2(&self) -> bool;
}

/// Observer slot shared by a root facade and every view carved from it.
type ObserverSlot = Arc<RwLock<Option<Arc<dyn DatabaseObserver>>>>;

/// Root facade for one contract's namespace over the shared store.
#[derive(Clone)]
pub struct ScoreDatabase {
    address: Address,
    store: Arc<dyn KeyValueStore>,
    context: Arc<dyn ExecutionContext>,
    observer: ObserverSlot,
    prefix: Vec<u8>,
}

impl ScoreDatabase {
    pub fn new(
        address: Address,
        store: Arc<dyn KeyValueStore>,
        context: Arc<dyn ExecutionContext>,
    ) -> Self {
        let prefix = address.to_bytes().to_vec();
        Self {
            address,
            store,
            context,
            observer: Arc::new(RwLock::new(None)),
            prefix,
        }
    }

    /// Attach the change observer. At most one per database; replacing it
    /// drops the previous one. The slot is shared with every view already
    /// carved from this facade, so attachment order does not matter.
    pub fn set_observer(&self, observer: Arc<dyn DatabaseObserver>) {
        *self.observer.write() = Some(observer);
    }

    fn observer(&self) -> Option<Arc<dyn DatabaseObserver>> {
        self.observer.read().clone()
    }

    /// The key format selected by the effective revision.
    pub fn key_format(&self) -> KeyFormat {
        KeyFormat::from_is_v2(self.is_v2())
    }

    /// Carve a nested view scoped under `prefix`.
    pub fn sub_db(&self, prefix: &[u8]) -> Result<SubDatabase, StoreError> {
        if prefix.is_empty() {
            return Err(StoreError::MissingPrefix);
        }
        Ok(SubDatabase {
            parent: Arc::new(self.clone()),
            address: self.address,
            prefix: prefix.to_vec(),
        })
    }

    /// The revision this execution unit operates under.
    ///
    /// While the context reports the compact-key revision as having just
    /// become active within the current unit, the database keeps operating
    /// one revision behind: an in-flight execution must not start writing
    /// legacy keys and finish writing compact ones.
    fn effective_revision(&self) -> u64 {
        let revision = self.context.revision();
        if self.context.is_revision_changed(REV_COMPACT_CONTAINER_KEYS) {
            revision.saturating_sub(1)
        } else {
            revision
        }
    }

    /// Hash a logical key into this contract's namespace.
    ///
    /// Every key a contract issues carries its address prefix, so no two
    /// contracts can produce the same physical key.
    fn hash_key(&self, key: &[u8]) -> Vec<u8> {
        if self.is_v2() {
            [self.prefix.as_slice(), key].concat()
        } else {
            [self.prefix.as_slice(), &[KEY_SEPARATOR], key].concat()
        }
    }

    /// Prevent a contract from mutating another contract's namespace.
    fn validate_ownership(&self) -> Result<(), StoreError> {
        let current = self.context.current_address();
        if current != self.address {
            return Err(StoreError::AccessDenied {
                current,
                owner: self.address,
            });
        }
        Ok(())
    }
}

impl Database for ScoreDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let hashed = self.hash_key(key);
        let value = self.store.get(&hashed)?;
        if let Some(observer) = self.observer() {
            observer.on_get(key, value.as_deref());
        }
        Ok(value)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.validate_ownership()?;
        let hashed = self.hash_key(key);
        if let Some(observer) = self.observer() {
            let old_value = self.store.get(&hashed)?;
            if !value.is_empty() {
                observer.on_put(key, old_value.as_deref(), value);
            } else if let Some(old_value) = &old_value {
                // An empty value is a delete for observer purposes, even
                // though the physical write still proceeds.
                observer.on_delete(key, old_value);
            }
        }
        self.store.put(&hashed, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.validate_ownership()?;
        let hashed = self.hash_key(key);
        if let Some(observer) = self.observer() {
            // No prior value, no callback.
            if let Some(old_value) = self.store.get(&hashed)? {
                observer.on_delete(key, &old_value);
            }
        }
        self.store.delete(&hashed)
    }

    fn close(&self) -> Result<(), StoreError> {
        self.store.close()
    }

    fn address(&self) -> &Address {
        &self.address
    }

    fn is_root(&self) -> bool {
        true
    }

    fn is_v2(&self) -> bool {
        self.effective_revision() >= REV_COMPACT_CONTAINER_KEYS
    }
}

/// Nested namespace view with no ownership check of its own.
#[derive(Clone)]
pub struct SubDatabase {
    parent: Arc<dyn Database>,
    address: Address,
    prefix: Vec<u8>,
}

impl fmt::Debug for SubDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubDatabase")
            .field("address", &self.address)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl SubDatabase {
    /// Carve a deeper view scoped under `prefix`.
    pub fn sub_db(&self, prefix: &[u8]) -> Result<SubDatabase, StoreError> {
        if prefix.is_empty() {
            return Err(StoreError::MissingPrefix);
        }
        Ok(SubDatabase {
            parent: Arc::new(self.clone()),
            address: self.address,
            prefix: prefix.to_vec(),
        })
    }

    fn hash_key(&self, key: &[u8]) -> Vec<u8> {
        if self.is_v2() {
            [self.prefix.as_slice(), key].concat()
        } else {
            [self.prefix.as_slice(), &[KEY_SEPARATOR], key].concat()
        }
    }
}

impl Database for SubDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.parent.get(&self.hash_key(key))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.parent.put(&self.hash_key(key), value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.parent.delete(&self.hash_key(key))
    }

    fn close(&self) -> Result<(), StoreError> {
        self.parent.close()
    }

    fn address(&self) -> &Address {
        &self.address
    }

    fn is_root(&self) -> bool {
        false
    }

    fn is_v2(&self) -> bool {
        self.parent.is_v2()
    }
}
