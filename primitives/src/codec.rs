//! Canonical, type-directed encoding for container keys and values.
//!
//! Encoding rules:
//! - Integers: minimal-length big-endian two's complement; zero is the
//!   single byte `0x00`
//! - Text: UTF-8 bytes
//! - Addresses: the fixed 21-byte wire form
//! - Booleans: the integer encoding of 0/1
//! - Raw bytes: passed through unchanged
//!
//! Decoding an absent value is not an error: it yields the type default
//! (`0`, empty text, `false`) or no value at all for bytes and addresses.
//!
//! `rlp_encode_bytes` implements the self-delimiting length-prefix scheme
//! the compact key format relies on: any concatenation of encoded strings
//! splits back unambiguously without separator bytes.

use crate::error::CodecError;
use crate::types::Address;

/// A container key: the closed set of supported key types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKey {
    Int(i64),
    Text(String),
    Addr(Address),
    Bytes(Vec<u8>),
}

/// A container value: the closed set of supported value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageValue {
    Int(i64),
    Text(String),
    Addr(Address),
    Bytes(Vec<u8>),
    Bool(bool),
}

/// The declared value type a container decodes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Text,
    Addr,
    Bytes,
    Bool,
}

impl ValueKind {
    /// The value an absent record decodes to, if any.
    ///
    /// Integers default to 0, text to the empty string, booleans to false.
    /// Bytes and addresses have no default and decode to `None`.
    pub fn default_value(self) -> Option<StorageValue> {
        match self {
            ValueKind::Int => Some(StorageValue::Int(0)),
            ValueKind::Text => Some(StorageValue::Text(String::new())),
            ValueKind::Bool => Some(StorageValue::Bool(false)),
            ValueKind::Addr | ValueKind::Bytes => None,
        }
    }
}

impl From<i64> for StorageKey {
    fn from(v: i64) -> Self {
        StorageKey::Int(v)
    }
}

impl From<&str> for StorageKey {
    fn from(v: &str) -> Self {
        StorageKey::Text(v.to_owned())
    }
}

impl From<String> for StorageKey {
    fn from(v: String) -> Self {
        StorageKey::Text(v)
    }
}

impl From<Address> for StorageKey {
    fn from(v: Address) -> Self {
        StorageKey::Addr(v)
    }
}

impl From<Vec<u8>> for StorageKey {
    fn from(v: Vec<u8>) -> Self {
        StorageKey::Bytes(v)
    }
}

impl From<i64> for StorageValue {
    fn from(v: i64) -> Self {
        StorageValue::Int(v)
    }
}

impl From<&str> for StorageValue {
    fn from(v: &str) -> Self {
        StorageValue::Text(v.to_owned())
    }
}

impl From<String> for StorageValue {
    fn from(v: String) -> Self {
        StorageValue::Text(v)
    }
}

impl From<Address> for StorageValue {
    fn from(v: Address) -> Self {
        StorageValue::Addr(v)
    }
}

impl From<Vec<u8>> for StorageValue {
    fn from(v: Vec<u8>) -> Self {
        StorageValue::Bytes(v)
    }
}

impl From<bool> for StorageValue {
    fn from(v: bool) -> Self {
        StorageValue::Bool(v)
    }
}

impl StorageValue {
    /// The declared kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            StorageValue::Int(_) => ValueKind::Int,
            StorageValue::Text(_) => ValueKind::Text,
            StorageValue::Addr(_) => ValueKind::Addr,
            StorageValue::Bytes(_) => ValueKind::Bytes,
            StorageValue::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StorageValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StorageValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StorageValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

// ── Integer encoding ──

/// Encode an integer as minimal-length big-endian two's complement.
///
/// Zero encodes as the single byte `0x00`.
pub fn int_to_bytes(v: i64) -> Vec<u8> {
    let full = v.to_be_bytes();
    let mut start = 0;
    while start < full.len() - 1 {
        let byte = full[start];
        let next_negative = full[start + 1] & 0x80 != 0;
        let redundant =
            (byte == 0x00 && !next_negative) || (byte == 0xFF && next_negative);
        if !redundant {
            break;
        }
        start += 1;
    }
    full[start..].to_vec()
}

/// Decode a big-endian two's-complement integer.
///
/// Empty input decodes to 0. Inputs wider than 8 bytes are rejected.
pub fn bytes_to_int(bytes: &[u8]) -> Result<i64, CodecError> {
    if bytes.len() > 8 {
        return Err(CodecError::IntegerOverflow(bytes.len()));
    }
    let Some(&first) = bytes.first() else {
        return Ok(0);
    };
    let mut acc: i64 = if first & 0x80 != 0 { -1 } else { 0 };
    for &byte in bytes {
        acc = (acc << 8) | i64::from(byte);
    }
    Ok(acc)
}

// ── Key/value encoding ──

/// Encode a key to its canonical bytes.
pub fn encode_key(key: &StorageKey) -> Vec<u8> {
    match key {
        StorageKey::Int(v) => int_to_bytes(*v),
        StorageKey::Text(s) => s.as_bytes().to_vec(),
        StorageKey::Addr(a) => a.to_bytes().to_vec(),
        StorageKey::Bytes(b) => b.clone(),
    }
}

/// Encode a value to its canonical bytes.
pub fn encode_value(value: &StorageValue) -> Vec<u8> {
    match value {
        StorageValue::Int(v) => int_to_bytes(*v),
        StorageValue::Text(s) => s.as_bytes().to_vec(),
        StorageValue::Addr(a) => a.to_bytes().to_vec(),
        StorageValue::Bytes(b) => b.clone(),
        StorageValue::Bool(v) => int_to_bytes(i64::from(*v)),
    }
}

/// Decode a stored record against the declared value kind.
///
/// `None` input yields the kind's default value; see
/// [`ValueKind::default_value`]. Present but malformed input fails.
pub fn decode_value(
    raw: Option<&[u8]>,
    kind: ValueKind,
) -> Result<Option<StorageValue>, CodecError> {
    let Some(raw) = raw else {
        return Ok(kind.default_value());
    };
    let value = match kind {
        ValueKind::Int => StorageValue::Int(bytes_to_int(raw)?),
        ValueKind::Text => StorageValue::Text(
            String::from_utf8(raw.to_vec()).map_err(|_| CodecError::InvalidUtf8)?,
        ),
        ValueKind::Addr => StorageValue::Addr(Address::from_bytes(raw)?),
        ValueKind::Bytes => StorageValue::Bytes(raw.to_vec()),
        ValueKind::Bool => StorageValue::Bool(bytes_to_int(raw)? != 0),
    };
    Ok(Some(value))
}

// ── Self-delimiting byte strings ──

const LP_BASE: u8 = 0x80;
const LP_SHORT_MAX: usize = 55;

/// Length-prefix a byte string so concatenations split unambiguously.
///
/// - a single byte below `0x80` is emitted unchanged;
/// - up to 55 bytes get one prefix byte `0x80 + len`;
/// - longer strings get `0x80 + 55 + len(L)` followed by the minimal
///   big-endian length `L` and the payload.
pub fn rlp_encode_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() == 1 && bytes[0] < LP_BASE {
        return bytes.to_vec();
    }
    if bytes.len() <= LP_SHORT_MAX {
        let mut out = Vec::with_capacity(1 + bytes.len());
        out.push(LP_BASE + bytes.len() as u8);
        out.extend_from_slice(bytes);
        return out;
    }
    let len_bytes = be_bytes_trimmed(bytes.len() as u64);
    let mut out = Vec::with_capacity(1 + len_bytes.len() + bytes.len());
    out.push(LP_BASE + LP_SHORT_MAX as u8 + len_bytes.len() as u8);
    out.extend_from_slice(&len_bytes);
    out.extend_from_slice(bytes);
    out
}

/// Split one length-prefixed byte string off the front of `data`.
///
/// Returns the payload and the number of input bytes consumed.
pub fn rlp_decode_bytes(data: &[u8]) -> Result<(Vec<u8>, usize), CodecError> {
    let &first = data.first().ok_or(CodecError::Truncated)?;
    if first < LP_BASE {
        return Ok((vec![first], 1));
    }
    let marker = (first - LP_BASE) as usize;
    if marker <= LP_SHORT_MAX {
        let end = 1 + marker;
        if data.len() < end {
            return Err(CodecError::Truncated);
        }
        return Ok((data[1..end].to_vec(), end));
    }
    let len_len = marker - LP_SHORT_MAX;
    if data.len() < 1 + len_len {
        return Err(CodecError::Truncated);
    }
    let mut len: usize = 0;
    for &byte in &data[1..1 + len_len] {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(usize::from(byte)))
            .ok_or(CodecError::IntegerOverflow(len_len))?;
    }
    let end = 1 + len_len + len;
    if data.len() < end {
        return Err(CodecError::Truncated);
    }
    Ok((data[1 + len_len..end].to_vec(), end))
}

/// Minimal big-endian encoding of an unsigned integer; zero is empty.
fn be_bytes_trimmed(v: u64) -> Vec<u8> {
    let full = v.to_be_bytes();
    let start = full.iter().position(|&b| b != 0).unwrap_or(full.len());
    full[start..].to_vec()
}
