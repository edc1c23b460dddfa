//! Property-based tests for the object runtime.
//!
//! These tests validate crash resistance and model conformance with
//! arbitrary inputs, providing fuzzing-like coverage without requiring
//! cargo-fuzz infrastructure.

mod common;

use common::{sample, sample_value};
use radkit_core::runtime::{is_registered, type_from_name, ObjectHashTable, ObjectList};
use std::collections::HashMap;

#[test]
fn test_table_accepts_arbitrary_keys() {
    let keys = [
        "",                      // empty
        "DBZH",                  // normal quantity
        "how/task",              // grouped
        "how/nested/deep/path",  // many separators
        "key with spaces",       // spaces
        "key\twith\ttabs",       // control characters
        "nyckel_åäö",            // non-ASCII
        "量",                    // unicode
        "key🚀rocket",           // emoji
        "a",                     // single char
    ];

    let obj = sample(1);
    let mut table = ObjectHashTable::new();

    for key in keys {
        // Should behave as a plain map for any UTF-8 key
        assert!(!table.put(key, &obj));
        assert!(table.exists(key));
        assert!(table.get(key).is_some());
    }
    assert_eq!(table.size(), keys.len());

    for key in keys {
        assert!(table.remove(key).is_some());
    }
    assert!(table.is_empty());
    assert_eq!(obj.refcount(), 1);
}

#[test]
fn test_very_long_key() {
    let long_key = "k".repeat(1 << 16);
    let obj = sample(1);
    let mut table = ObjectHashTable::new();

    table.put(&long_key, &obj);
    assert!(table.exists(&long_key));
    assert!(table.remove(&long_key).is_some());
}

#[test]
fn test_registry_lookup_with_arbitrary_names() {
    let names = [
        "",
        "NoSuchType",
        "type with spaces",
        "类型",
        "🚀",
        "\0embedded\0nuls",
    ];

    for name in names {
        // Unknown names are misses, never crashes
        assert!(type_from_name(name).is_none());
        assert!(!is_registered(name));
    }
}

/// Small deterministic generator (xorshift) for the model test below.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

#[test]
fn test_list_conforms_to_vec_model() {
    let mut rng = Rng(0x1234_5678_9abc_def0);
    let mut list = ObjectList::new();
    let mut model: Vec<i64> = Vec::new();

    for step in 0i64..5_000 {
        match rng.next() % 5 {
            0 | 1 => {
                let obj = sample(step);
                list.add(&obj);
                model.push(step);
            }
            2 => {
                // Out-of-range inserts append, the model mirrors that.
                let index = (rng.next() % 32) as usize;
                let obj = sample(-step);
                list.insert(index, &obj);
                if index > model.len() {
                    model.push(-step);
                } else {
                    model.insert(index, -step);
                }
            }
            3 => {
                let index = (rng.next() % 32) as usize;
                let removed = list.remove(index);
                if index < model.len() {
                    assert_eq!(sample_value(&removed.unwrap()), model.remove(index));
                } else {
                    assert!(removed.is_none());
                }
            }
            _ => {
                let index = (rng.next() % 32) as usize;
                match (list.get(index), model.get(index)) {
                    (Some(obj), Some(expected)) => {
                        assert_eq!(sample_value(&obj), *expected);
                    }
                    (None, None) => {}
                    (got, want) => {
                        panic!("index {index}: list {got:?} vs model {want:?}")
                    }
                }
            }
        }
        assert_eq!(list.size(), model.len());
    }
}

#[test]
fn test_table_conforms_to_map_model() {
    let mut rng = Rng(0xdead_beef_cafe_f00d);
    let mut table = ObjectHashTable::new();
    let mut model: HashMap<String, i64> = HashMap::new();

    for step in 0i64..5_000 {
        let key = format!("key_{}", rng.next() % 64);
        match rng.next() % 4 {
            0 | 1 => {
                let obj = sample(step);
                let replaced = table.put(&key, &obj);
                assert_eq!(replaced, model.insert(key, step).is_some());
            }
            2 => {
                let removed = table.remove(&key).map(|obj| sample_value(&obj));
                assert_eq!(removed, model.remove(&key));
            }
            _ => {
                let got = table.get(&key).map(|obj| sample_value(&obj));
                assert_eq!(got, model.get(&key).copied());
                assert_eq!(table.exists(&key), model.contains_key(&key));
            }
        }
        assert_eq!(table.size(), model.len());
    }
}
