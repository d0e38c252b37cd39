// tests/unit_trie.rs
//! Unit tests for the PrefixMap.
//!
//! VERIFICATION STRATEGY:
//! 1. Round-trip: insert then lookup returns the most recent value.
//! 2. Absence: never-inserted keys (including prefixes of inserted keys)
//!    return the absent sentinel.
//! 3. Boundaries: out-of-alphabet characters and the node ceiling.

use codesim_core::error::SimError;
use codesim_core::trie::PrefixMap;

#[test]
fn insert_then_lookup() {
    let mut map = PrefixMap::new(1024);
    map.insert("main", 1).unwrap();
    map.insert("helper_2", 7).unwrap();

    assert_eq!(map.lookup("main"), Some(1));
    assert_eq!(map.lookup("helper_2"), Some(7));
}

#[test]
fn overwrite_keeps_latest_value() {
    let mut map = PrefixMap::new(1024);
    map.insert("foo", 1).unwrap();
    map.insert("foo", 9).unwrap();
    assert_eq!(map.lookup("foo"), Some(9));
}

#[test]
fn absent_keys_return_none() {
    let mut map = PrefixMap::new(1024);
    map.insert("function", 3).unwrap();

    assert_eq!(map.lookup("func"), None, "prefix of a key is not a key");
    assert_eq!(map.lookup("functions"), None);
    assert_eq!(map.lookup(""), None, "empty key never inserted");
    assert_eq!(map.lookup("zzz"), None);
    assert!(!map.contains("zzz"));
}

#[test]
fn empty_key_is_storable() {
    // The root node itself can carry a value.
    let mut map = PrefixMap::new(8);
    map.insert("", 5).unwrap();
    assert_eq!(map.lookup(""), Some(5));
}

#[test]
fn full_alphabet_round_trip() {
    let mut map = PrefixMap::new(4096);
    let key = "_09AZaz";
    map.insert(key, 42).unwrap();
    assert_eq!(map.lookup(key), Some(42));
}

#[test]
fn out_of_alphabet_insert_is_rejected() {
    let mut map = PrefixMap::new(1024);
    let err = map.insert("bad-key", 1).unwrap_err();
    assert!(matches!(err, SimError::InvalidKeyChar { ch: '-', .. }));
}

#[test]
fn out_of_alphabet_lookup_is_no_match() {
    let mut map = PrefixMap::new(1024);
    map.insert("badkey", 1).unwrap();
    // Lookup never errors; the key simply cannot exist.
    assert_eq!(map.lookup("bad-key"), None);
}

#[test]
fn node_ceiling_is_enforced() {
    // Root + 3 path nodes fit; the 4th character needs a 5th node.
    let mut map = PrefixMap::new(4);
    map.insert("abc", 1).unwrap();
    assert_eq!(map.node_count(), 4);

    let err = map.insert("abcd", 2).unwrap_err();
    assert!(matches!(
        err,
        SimError::CapacityExceeded {
            what: "prefix map nodes",
            limit: 4
        }
    ));

    // The map stays usable and the original key intact.
    assert_eq!(map.lookup("abc"), Some(1));
}

#[test]
fn shared_prefixes_share_nodes() {
    let mut map = PrefixMap::new(16);
    map.insert("abc", 1).unwrap();
    map.insert("abd", 2).unwrap();
    // a, b shared; c and d distinct: root + 4.
    assert_eq!(map.node_count(), 5);
    assert_eq!(map.lookup("abc"), Some(1));
    assert_eq!(map.lookup("abd"), Some(2));
}
