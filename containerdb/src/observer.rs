//! Change observer collaborator.
//!
//! The observer is attached to a [`ScoreDatabase`](crate::ScoreDatabase) by
//! the surrounding engine and receives one notification per logical
//! operation, keyed by the logical (unhashed) key. Callers use it for fee
//! metering and change logs.
//!
//! Guarantees made by the database facade:
//! - at most one notification per logical get/put/delete;
//! - a `put` of an empty value over an existing record notifies a deletion,
//!   not an update;
//! - a delete of an absent key notifies nothing.

/// Receiver for logical read/write/delete notifications.
pub trait DatabaseObserver: Send + Sync {
    /// A value was read. `value` is the raw stored bytes, or `None` when
    /// the key is absent.
    fn on_get(&self, key: &[u8], value: Option<&[u8]>);

    /// A non-empty value was written. `old_value` is the raw bytes it
    /// replaced, or `None` for a fresh key.
    fn on_put(&self, key: &[u8], old_value: Option<&[u8]>, new_value: &[u8]);

    /// An existing record was removed, either by an explicit delete or by a
    /// `put` of an empty value.
    fn on_delete(&self, key: &[u8], old_value: &[u8]);
}
