//! Sequence container: an append-ordered list addressable by index.

use scorestore_primitives::{
    bytes_to_int, decode_value, encode_value, StorageKey, StorageValue, ValueKind,
};

use crate::db::{Database, ScoreDatabase, SubDatabase};
use crate::error::StoreError;
use crate::prefix::{ContainerId, KeyFormat};

/// An append-ordered sequence with its own sub-namespace.
///
/// Elements are keyed by their encoded index; the length lives in a
/// dedicated size record at a fixed sentinel key within the scope. The size
/// is loaded once at construction and maintained alongside every mutation,
/// so `len` never touches the store.
pub struct ArrayDb {
    db: SubDatabase,
    kind: ValueKind,
    format: KeyFormat,
    size: u64,
}

impl ArrayDb {
    pub fn new(
        name: impl Into<StorageKey>,
        db: &ScoreDatabase,
        kind: ValueKind,
    ) -> Result<Self, StoreError> {
        let format = db.key_format();
        let prefix = format.container_prefix(ContainerId::Array, &name.into());
        let sub = db.sub_db(&prefix)?;
        let size = Self::load_size(&sub, format)?;
        Ok(Self {
            db: sub,
            kind,
            format,
            size,
        })
    }

    /// The sentinel key holding the size record.
    ///
    /// The compact format spends no key material on it: the scope prefix
    /// alone already disambiguates the record.
    fn size_key(format: KeyFormat) -> Vec<u8> {
        match format {
            KeyFormat::Separated => b"size".to_vec(),
            KeyFormat::Compact => Vec::new(),
        }
    }

    fn load_size(db: &SubDatabase, format: KeyFormat) -> Result<u64, StoreError> {
        match db.get(&Self::size_key(format))? {
            Some(raw) => {
                let size = bytes_to_int(&raw).map_err(StoreError::Codec)?;
                u64::try_from(size)
                    .map_err(|_| StoreError::Backend("negative array size record".into()))
            }
            None => Ok(0),
        }
    }

    fn element_key(&self, index: u64) -> Vec<u8> {
        self.format.encoded_key(&StorageKey::Int(index as i64))
    }

    fn persist_size(&mut self, size: u64) -> Result<(), StoreError> {
        self.size = size;
        self.db.put(
            &Self::size_key(self.format),
            &encode_value(&StorageValue::Int(size as i64)),
        )
    }

    /// Append a value at the end of the sequence.
    pub fn push(&mut self, value: &StorageValue) -> Result<(), StoreError> {
        let index = self.size;
        self.db.put(&self.element_key(index), &encode_value(value))?;
        self.persist_size(index + 1)
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop(&mut self) -> Result<Option<StorageValue>, StoreError> {
        if self.size == 0 {
            return Ok(None);
        }
        let index = self.size - 1;
        let last = self.get(index as i64)?;
        self.db.delete(&self.element_key(index))?;
        self.persist_size(index)?;
        Ok(last)
    }

    /// Get the element at `index`. Negative indices count from the end.
    pub fn get(&self, index: i64) -> Result<Option<StorageValue>, StoreError> {
        let index = self.normalize(index)?;
        let raw = self.db.get(&self.element_key(index))?;
        Ok(decode_value(raw.as_deref(), self.kind)?)
    }

    /// Overwrite the element at `index` in place; the size is unchanged.
    pub fn set(&mut self, index: i64, value: &StorageValue) -> Result<(), StoreError> {
        let index = self.normalize(index)?;
        self.db.put(&self.element_key(index), &encode_value(value))
    }

    /// Number of elements.
    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Lazy iteration over `[0, len)` as observed now. Restartable; the
    /// borrow rules prevent mutation while an iterator is live.
    pub fn iter(&self) -> ArrayDbIter<'_> {
        ArrayDbIter {
            array: self,
            size: self.size,
            index: 0,
        }
    }

    /// Linear-scan membership test over decoded elements.
    pub fn contains(&self, value: &StorageValue) -> Result<bool, StoreError> {
        for element in self.iter() {
            if element?.as_ref() == Some(value) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Map `index` into `[0, size)`, counting negatives from the end.
    fn normalize(&self, index: i64) -> Result<u64, StoreError> {
        let size = self.size;
        let adjusted = if index < 0 {
            index.checked_add(size as i64)
        } else {
            Some(index)
        };
        match adjusted {
            Some(i) if i >= 0 && (i as u64) < size => Ok(i as u64),
            _ => Err(StoreError::IndexOutOfRange { index, size }),
        }
    }
}

/// Iterator over an [`ArrayDb`]'s elements.
pub struct ArrayDbIter<'a> {
    array: &'a ArrayDb,
    size: u64,
    index: u64,
}

impl Iterator for ArrayDbIter<'_> {
    type Item = Result<Option<StorageValue>, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.size {
            return None;
        }
        let index = self.index;
        self.index += 1;
        Some(self.array.get(index as i64))
    }
}
