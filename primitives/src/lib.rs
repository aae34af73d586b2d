//! `scorestore-primitives` — foundational types for the scorestore state layer.
//!
//! This crate provides the canonical byte encodings shared by the container
//! database and anything that needs to reproduce its key layout:
//!
//! - `Address` — fixed-width contract/account address
//! - `StorageKey` / `StorageValue` — the closed set of supported key and
//!   value types, with canonical encode/decode
//! - `rlp_encode_bytes` / `rlp_decode_bytes` — the self-delimiting
//!   byte-string scheme used by the compact key format
//! - `CodecError` — decode-side failures

pub mod codec;
pub mod error;
pub mod types;

// Re-export commonly used types at the crate root for convenience.
pub use codec::{
    bytes_to_int, decode_value, encode_key, encode_value, int_to_bytes, rlp_decode_bytes,
    rlp_encode_bytes, StorageKey, StorageValue, ValueKind,
};
pub use error::CodecError;
pub use types::{Address, ADDRESS_BODY_LEN, ADDRESS_LEN};
