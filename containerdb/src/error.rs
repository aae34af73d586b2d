//! Storage-layer error type.
//!
//! Every variant is a synchronous failure raised at the point of violation
//! and expected to abort the enclosing contract invocation; nothing here is
//! retried internally. Absent-value reads are never errors.

use scorestore_primitives::{Address, CodecError};

/// Top-level error type for the container database layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A stored record failed to decode against its declared type.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A mutating call was issued by a contract that does not own the
    /// namespace.
    #[error("invalid database ownership: current={current}, owner={owner}")]
    AccessDenied { current: Address, owner: Address },

    /// An empty sub-namespace prefix was requested.
    #[error("invalid sub-database prefix: empty")]
    MissingPrefix,

    /// A sequence index falls outside `[0, size)` after negative-index
    /// normalization.
    #[error("array index out of range: index={index}, size={size}")]
    IndexOutOfRange { index: i64, size: u64 },

    /// A leaf-only map operation was invoked at the wrong depth.
    #[error("dict depth mismatch")]
    DepthMismatch,

    /// Iteration was attempted on a map container.
    #[error("iteration not supported on dict containers")]
    UnsupportedOperation,

    /// The underlying store reported a failure.
    #[error("store backend error: {0}")]
    Backend(String),
}
