//! Bit-exact physical key layout, checked against recorded vectors.
//!
//! Both key formats must keep producing exactly these byte strings: every
//! deployed network already holds records under them, so any drift here is
//! silent state loss.

mod common;

use common::{hex_decode, open, owner, REV_COMPACT, REV_SEPARATED};
use scorestore_containerdb::{ArrayDb, DictDb, StoreError, VarDb};
use scorestore_primitives::{StorageValue, ValueKind};
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Deserialize)]
struct Vectors {
    address: String,
    separated: FormatVectors,
    compact: FormatVectors,
}

#[derive(Deserialize)]
struct FormatVectors {
    var_slot: String,
    array_element: String,
    array_size: String,
    dict_entry: String,
    nested_dict_entry: String,
}

fn vectors() -> Vectors {
    serde_json::from_str(include_str!("vectors/key_layout.json")).unwrap()
}

/// Run the reference writes and return the physical keys they produced.
fn reference_writes(revision: u64) -> Result<BTreeSet<Vec<u8>>, StoreError> {
    let (db, store, _) = open(revision);

    VarDb::new("balance", &db, ValueKind::Int)?.set(&StorageValue::Int(1))?;
    ArrayDb::new("list", &db, ValueKind::Int)?.push(&StorageValue::Int(2))?;
    DictDb::new("holders", &db, ValueKind::Int, 1)?.set("alice", &StorageValue::Int(3))?;
    DictDb::new("allow", &db, ValueKind::Int, 2)?
        .at("from")?
        .set("to", &StorageValue::Int(4))?;

    Ok(store.keys().into_iter().collect())
}

fn expected(format: &FormatVectors) -> BTreeSet<Vec<u8>> {
    [
        &format.var_slot,
        &format.array_element,
        &format.array_size,
        &format.dict_entry,
        &format.nested_dict_entry,
    ]
    .into_iter()
    .map(|hex| hex_decode(hex))
    .collect()
}

#[test]
fn test_vector_address_matches_fixture() {
    assert_eq!(hex_decode(&vectors().address), owner().to_bytes().to_vec());
}

#[test]
fn test_separated_layout_matches_vectors() {
    let keys = reference_writes(REV_SEPARATED).unwrap();
    assert_eq!(keys, expected(&vectors().separated));
}

#[test]
fn test_compact_layout_matches_vectors() {
    let keys = reference_writes(REV_COMPACT).unwrap();
    assert_eq!(keys, expected(&vectors().compact));
}

/// The compact format never emits the legacy separator structurally; any
/// `|` byte in a compact key can only come from user key material.
#[test]
fn test_compact_keys_free_of_structural_separator() {
    let keys = reference_writes(REV_COMPACT).unwrap();
    for key in keys {
        assert!(!key.contains(&b'|'), "unexpected separator in {key:02x?}");
    }
}
