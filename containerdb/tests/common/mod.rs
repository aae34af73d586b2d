#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use scorestore_containerdb::{
    DatabaseObserver, FixedContext, MemStore, ScoreDatabase, REV_COMPACT_CONTAINER_KEYS,
};
use scorestore_primitives::{Address, ADDRESS_BODY_LEN};

pub const REV_SEPARATED: u64 = REV_COMPACT_CONTAINER_KEYS - 1;
pub const REV_COMPACT: u64 = REV_COMPACT_CONTAINER_KEYS;

pub fn owner() -> Address {
    Address::contract([0xAA; ADDRESS_BODY_LEN])
}

pub fn open(revision: u64) -> (ScoreDatabase, Arc<MemStore>, Arc<FixedContext>) {
    let store = Arc::new(MemStore::new());
    let context = Arc::new(FixedContext::new(owner(), revision));
    let db = ScoreDatabase::new(owner(), store.clone(), context.clone());
    (db, store, context)
}

pub fn hex_decode(s: &str) -> Vec<u8> {
    assert!(s.len() % 2 == 0, "odd-length hex string");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// One callback received by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Get {
        key: Vec<u8>,
        value: Option<Vec<u8>>,
    },
    Put {
        key: Vec<u8>,
        old: Option<Vec<u8>>,
        new: Vec<u8>,
    },
    Delete {
        key: Vec<u8>,
        old: Vec<u8>,
    },
}

/// Observer that records every callback for later inspection.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut self.events.lock())
    }
}

impl DatabaseObserver for RecordingObserver {
    fn on_get(&self, key: &[u8], value: Option<&[u8]>) {
        self.events.lock().push(Event::Get {
            key: key.to_vec(),
            value: value.map(<[u8]>::to_vec),
        });
    }

    fn on_put(&self, key: &[u8], old: Option<&[u8]>, new: &[u8]) {
        self.events.lock().push(Event::Put {
            key: key.to_vec(),
            old: old.map(<[u8]>::to_vec),
            new: new.to_vec(),
        });
    }

    fn on_delete(&self, key: &[u8], old: &[u8]) {
        self.events.lock().push(Event::Delete {
            key: key.to_vec(),
            old: old.to_vec(),
        });
    }
}
