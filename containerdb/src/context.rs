//! Execution context collaborator.
//!
//! The context is owned by the surrounding execution engine; this layer only
//! reads three facts from it: which contract is currently executing, the
//! chain revision, and whether a given revision became active within the
//! current unit of execution. The last predicate drives the version freeze
//! in [`ScoreDatabase`](crate::ScoreDatabase): an in-flight execution must
//! not switch key formats halfway through.

use parking_lot::RwLock;
use scorestore_primitives::Address;

/// Chain revision at which the compact (length-prefixed, separator-free)
/// container key format becomes active.
pub const REV_COMPACT_CONTAINER_KEYS: u64 = 10;

/// Read-only view of the surrounding execution state.
pub trait ExecutionContext: Send + Sync {
    /// Address of the contract currently executing.
    fn current_address(&self) -> Address;

    /// Current chain revision.
    fn revision(&self) -> u64;

    /// True iff `revision` became active within the current unit of
    /// execution (i.e. the in-flight revision differs from the revision
    /// recorded when this unit started).
    fn is_revision_changed(&self, revision: u64) -> bool;
}

/// Directly configurable context for tests.
///
/// All fields can be changed mid-test through shared references, which is
/// how cross-contract access and revision transitions are simulated.
#[derive(Debug)]
pub struct FixedContext {
    current: RwLock<Address>,
    revision: RwLock<u64>,
    changed_revision: RwLock<Option<u64>>,
}

impl FixedContext {
    pub fn new(current: Address, revision: u64) -> Self {
        Self {
            current: RwLock::new(current),
            revision: RwLock::new(revision),
            changed_revision: RwLock::new(None),
        }
    }

    /// Change the currently executing contract.
    pub fn set_current_address(&self, address: Address) {
        *self.current.write() = address;
    }

    /// Change the chain revision.
    pub fn set_revision(&self, revision: u64) {
        *self.revision.write() = revision;
    }

    /// Mark `revision` as having just become active in this unit of
    /// execution, or clear the marker with `None`.
    pub fn set_revision_changed(&self, revision: Option<u64>) {
        *self.changed_revision.write() = revision;
    }
}

impl ExecutionContext for FixedContext {
    fn current_address(&self) -> Address {
        *self.current.read()
    }

    fn revision(&self) -> u64 {
        *self.revision.read()
    }

    fn is_revision_changed(&self, revision: u64) -> bool {
        *self.changed_revision.read() == Some(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorestore_primitives::ADDRESS_BODY_LEN;

    #[test]
    fn test_fixed_context() {
        let owner = Address::contract([1; ADDRESS_BODY_LEN]);
        let other = Address::contract([2; ADDRESS_BODY_LEN]);
        let ctx = FixedContext::new(owner, 9);

        assert_eq!(ctx.current_address(), owner);
        assert_eq!(ctx.revision(), 9);
        assert!(!ctx.is_revision_changed(REV_COMPACT_CONTAINER_KEYS));

        ctx.set_current_address(other);
        ctx.set_revision(REV_COMPACT_CONTAINER_KEYS);
        ctx.set_revision_changed(Some(REV_COMPACT_CONTAINER_KEYS));

        assert_eq!(ctx.current_address(), other);
        assert_eq!(ctx.revision(), REV_COMPACT_CONTAINER_KEYS);
        assert!(ctx.is_revision_changed(REV_COMPACT_CONTAINER_KEYS));
        assert!(!ctx.is_revision_changed(REV_COMPACT_CONTAINER_KEYS + 1));
    }
}
