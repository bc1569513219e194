#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! Dictionaries serialize as maps and sets as sequences, both in ascending
//! key order.

use persistent_dict::persistent::{PersistentDict, PersistentSet};
use rstest::rstest;

// =============================================================================
// PersistentDict Integration Tests
// =============================================================================

#[rstest]
fn test_dict_json_roundtrip() {
    let dict: PersistentDict<String, i32> = (1..=10).map(|key| (format!("key{key:02}"), key)).collect();
    let json = serde_json::to_string(&dict).unwrap();
    let restored: PersistentDict<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(dict, restored);
    assert!(restored.validate().is_ok());
}

#[rstest]
fn test_dict_serializes_in_key_order() {
    let dict = PersistentDict::new()
        .insert("b".to_string(), 2)
        .insert("a".to_string(), 1)
        .insert("c".to_string(), 3);
    assert_eq!(serde_json::to_string(&dict).unwrap(), r#"{"a":1,"b":2,"c":3}"#);
}

#[rstest]
fn test_dict_empty() {
    let dict: PersistentDict<String, i32> = PersistentDict::new();
    let json = serde_json::to_string(&dict).unwrap();
    assert_eq!(json, "{}");
    let restored: PersistentDict<String, i32> = serde_json::from_str(&json).unwrap();
    assert!(restored.is_empty());
}

#[rstest]
fn test_dict_duplicate_keys_last_wins() {
    let restored: PersistentDict<String, i32> = serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.get("a"), Some(&2));
}

#[rstest]
fn test_dict_rejects_sequence() {
    let result: Result<PersistentDict<String, i32>, _> = serde_json::from_str("[1, 2]");
    assert!(result.is_err());
}

#[rstest]
fn test_nested_dict() {
    let inner = PersistentDict::singleton("x".to_string(), 1);
    let outer = PersistentDict::singleton("inner".to_string(), inner);
    let json = serde_json::to_string(&outer).unwrap();
    assert_eq!(json, r#"{"inner":{"x":1}}"#);
    let restored: PersistentDict<String, PersistentDict<String, i32>> =
        serde_json::from_str(&json).unwrap();
    assert_eq!(outer, restored);
}

// =============================================================================
// PersistentSet Integration Tests
// =============================================================================

#[rstest]
fn test_set_json_roundtrip() {
    let set: PersistentSet<i32> = [5, 3, 9, 1].into_iter().collect();
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, "[1,3,5,9]");
    let restored: PersistentSet<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(set, restored);
}

#[rstest]
fn test_set_deduplicates_on_deserialize() {
    let restored: PersistentSet<i32> = serde_json::from_str("[3, 1, 3, 2, 1]").unwrap();
    assert_eq!(restored.to_list(), vec![1, 2, 3]);
}
