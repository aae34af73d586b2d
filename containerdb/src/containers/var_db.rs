//! Scalar container: a single named slot.

use scorestore_primitives::{decode_value, encode_value, StorageKey, StorageValue, ValueKind};

use crate::db::{Database, ScoreDatabase};
use crate::error::StoreError;
use crate::prefix::ContainerId;

/// A single typed slot in contract storage.
///
/// All of a contract's scalars share one reserved sub-namespace (the `Var`
/// tag); each slot is keyed by its own encoded declaration name inside that
/// shared scope.
pub struct VarDb {
    db: crate::db::SubDatabase,
    key: Vec<u8>,
    kind: ValueKind,
}

impl VarDb {
    pub fn new(
        name: impl Into<StorageKey>,
        db: &ScoreDatabase,
        kind: ValueKind,
    ) -> Result<Self, StoreError> {
        let format = db.key_format();
        let sub = db.sub_db(ContainerId::Var.tag())?;
        let key = format.encoded_key(&name.into());
        Ok(Self { db: sub, key, kind })
    }

    /// Set the slot value.
    pub fn set(&self, value: &StorageValue) -> Result<(), StoreError> {
        self.db.put(&self.key, &encode_value(value))
    }

    /// Get the slot value, or the type default if unset.
    pub fn get(&self) -> Result<Option<StorageValue>, StoreError> {
        let raw = self.db.get(&self.key)?;
        Ok(decode_value(raw.as_deref(), self.kind)?)
    }

    /// Delete the slot. No error if already absent.
    pub fn remove(&self) -> Result<(), StoreError> {
        self.db.delete(&self.key)
    }
}
