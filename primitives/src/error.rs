//! Codec error type.
//!
//! Only decoding can fail: encoding is total over the closed
//! `StorageKey`/`StorageValue` unions, and an absent value decodes to the
//! type default rather than an error.

/// Decode-side failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A text value holds bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in text value")]
    InvalidUtf8,

    /// An address value has the wrong byte length.
    #[error("invalid address length: {0}")]
    InvalidAddressLength(usize),

    /// An address value carries an unknown tag byte.
    #[error("invalid address tag: {0:#04x}")]
    InvalidAddressTag(u8),

    /// An integer value is wider than the supported range.
    #[error("integer value too wide: {0} bytes")]
    IntegerOverflow(usize),

    /// A length-prefixed byte string ends before its declared length.
    #[error("truncated length-prefixed input")]
    Truncated,
}
