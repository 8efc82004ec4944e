use crate::Payload;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

#[test]
fn test_collections_are_empty_when_they_have_no_entries() {
    assert!(Vec::<u8>::new().is_empty_payload());
    assert!(!vec![1].is_empty_payload());
    assert!(VecDeque::<u8>::new().is_empty_payload());
    assert!(HashMap::<u8, u8>::new().is_empty_payload());
    assert!(BTreeMap::<u8, u8>::new().is_empty_payload());
    assert!(HashSet::<u8>::new().is_empty_payload());
    assert!(!BTreeSet::from([1]).is_empty_payload());
}

#[test]
fn test_strings() {
    assert!(String::new().is_empty_payload());
    assert!("".is_empty_payload());
    assert!(!"x".is_empty_payload());
}

#[test]
fn test_scalars_are_never_empty() {
    assert!(!0u32.is_empty_payload());
    assert!(!0.0f64.is_empty_payload());
    assert!(!false.is_empty_payload());
    assert!(!'\0'.is_empty_payload());
}

#[test]
fn test_unit_and_wrappers() {
    assert!(().is_empty_payload());
    assert!(None::<u32>.is_empty_payload());
    assert!(Some(String::new()).is_empty_payload());
    assert!(!Some(0).is_empty_payload());
    assert!(Box::new(Vec::<u8>::new()).is_empty_payload());
    assert!(!Arc::new(vec![1]).is_empty_payload());
}

#[cfg(feature = "serde")]
#[test]
fn test_json_values() {
    use serde_json::json;

    assert!(json!(null).is_empty_payload());
    assert!(json!({}).is_empty_payload());
    assert!(json!([]).is_empty_payload());
    assert!(json!("").is_empty_payload());
    assert!(!json!(0).is_empty_payload());
    assert!(!json!(false).is_empty_payload());
    assert!(!json!({"a": 1}).is_empty_payload());
}
