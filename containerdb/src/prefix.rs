//! Namespace composition: container tags and versioned key prefixes.
//!
//! Every container carves its own sub-namespace out of the contract's root
//! namespace. The prefix identifying that scope is built from a one-byte
//! container tag and the container's encoded declaration key, composed
//! differently per key format:
//!
//! - `Separated` (legacy): components joined with an explicit `|` byte
//! - `Compact`: components concatenated directly, each one made
//!   self-delimiting by the length-prefix scheme

use scorestore_primitives::{codec, rlp_encode_bytes, StorageKey};

/// Separator byte joining key components in the legacy format.
pub const KEY_SEPARATOR: u8 = b'|';

/// Reserved one-byte tag per container family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerId {
    Array,
    Dict,
    Var,
}

impl ContainerId {
    /// The tag byte disambiguating containers under one root namespace.
    pub const fn tag(self) -> &'static [u8] {
        match self {
            ContainerId::Array => &[0x00],
            ContainerId::Dict => &[0x01],
            ContainerId::Var => &[0x02],
        }
    }
}

/// Key-composition strategy, selected once from the effective revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// Legacy format: separator-joined components.
    Separated,
    /// Compact format: separator-free, length-prefixed components.
    Compact,
}

impl KeyFormat {
    pub fn from_is_v2(is_v2: bool) -> Self {
        if is_v2 {
            KeyFormat::Compact
        } else {
            KeyFormat::Separated
        }
    }

    /// Encode a logical key for use inside an already-established scope.
    pub fn encoded_key(self, key: &StorageKey) -> Vec<u8> {
        let raw = codec::encode_key(key);
        match self {
            KeyFormat::Separated => raw,
            KeyFormat::Compact => rlp_encode_bytes(&raw),
        }
    }

    /// Build the prefix identifying a container's scope under the
    /// namespace root.
    pub fn container_prefix(self, id: ContainerId, key: &StorageKey) -> Vec<u8> {
        let encoded = self.encoded_key(key);
        match self {
            KeyFormat::Separated => {
                [id.tag(), &[KEY_SEPARATOR], encoded.as_slice()].concat()
            }
            KeyFormat::Compact => [id.tag(), encoded.as_slice()].concat(),
        }
    }

    /// Build the prefix for a deeper map level.
    ///
    /// The compact format only carries the container tag while the parent
    /// scope is the namespace root; once inside a tagged scope the
    /// length-prefixed key alone stays collision-free. The legacy format
    /// re-carries the tag at every level.
    pub fn nested_prefix(
        self,
        id: ContainerId,
        parent_is_root: bool,
        key: &StorageKey,
    ) -> Vec<u8> {
        match self {
            KeyFormat::Separated => self.container_prefix(id, key),
            KeyFormat::Compact => {
                if parent_is_root {
                    self.container_prefix(id, key)
                } else {
                    self.encoded_key(key)
                }
            }
        }
    }
}
