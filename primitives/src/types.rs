//! Address type for the scorestore state layer.
//!
//! An address is 21 bytes on the wire: one tag byte (externally-owned
//! account or contract) followed by a 20-byte body. The textual form is the
//! tag as `hx`/`cx` plus the body in lowercase hex.

use std::fmt;

use crate::error::CodecError;

/// Length of the address body in bytes.
pub const ADDRESS_BODY_LEN: usize = 20;

/// Total encoded address length in bytes (tag + body).
pub const ADDRESS_LEN: usize = ADDRESS_BODY_LEN + 1;

const TAG_EOA: u8 = 0x00;
const TAG_CONTRACT: u8 = 0x01;

/// Fixed-width account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
}

impl Address {
    /// Create an externally-owned account address from a 20-byte body.
    pub fn eoa(body: [u8; ADDRESS_BODY_LEN]) -> Self {
        Self::with_tag(TAG_EOA, body)
    }

    /// Create a contract address from a 20-byte body.
    pub fn contract(body: [u8; ADDRESS_BODY_LEN]) -> Self {
        Self::with_tag(TAG_CONTRACT, body)
    }

    fn with_tag(tag: u8, body: [u8; ADDRESS_BODY_LEN]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = tag;
        bytes[1..].copy_from_slice(&body);
        Self { bytes }
    }

    /// Decode an address from its 21-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != ADDRESS_LEN {
            return Err(CodecError::InvalidAddressLength(bytes.len()));
        }
        if bytes[0] != TAG_EOA && bytes[0] != TAG_CONTRACT {
            return Err(CodecError::InvalidAddressTag(bytes[0]));
        }
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(bytes);
        Ok(Self { bytes: out })
    }

    /// The 21-byte wire form.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.bytes
    }

    /// The wire form as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns true if this is a contract address.
    pub fn is_contract(&self) -> bool {
        self.bytes[0] == TAG_CONTRACT
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_contract() { "cx" } else { "hx" };
        f.write_str(prefix)?;
        for byte in &self.bytes[1..] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
