//! Stress tests for the object runtime.
//!
//! These tests validate behavior under heavy load:
//! - Concurrent retain/release storms
//! - Racing bind attempts
//! - Concurrent registry access
//! - Large container populations
//!
//! Run with: `cargo test --test stress_test -- --nocapture`

mod common;

use common::{sample, sample_value, tracked, Opaque, OPAQUE_TYPE};
use radkit_core::runtime::{
    is_registered, register_type, ObjectHashTable, ObjectList, ObjectRef, Peer,
};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_retain_release_storm() {
    let drops = Arc::new(AtomicUsize::new(0));
    let obj = tracked(&drops);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let local = obj.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..10_000 {
                let alias = local.clone();
                drop(alias);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(obj.refcount(), 1);
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    drop(obj);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_releases_destroy_exactly_once() {
    let drops = Arc::new(AtomicUsize::new(0));

    for _ in 0..100 {
        let obj = tracked(&drops);
        let aliases: Vec<ObjectRef> = (0..8).map(|_| obj.clone()).collect();
        drop(obj);

        let handles: Vec<_> = aliases
            .into_iter()
            .map(|alias| thread::spawn(move || drop(alias)))
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    assert_eq!(drops.load(Ordering::SeqCst), 100);
}

#[test]
fn test_racing_bind_attempts_have_one_winner() {
    for _ in 0..50 {
        let obj = sample(0);
        let successes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let local = obj.clone();
                let successes = Arc::clone(&successes);
                thread::spawn(move || {
                    let peer = Peer::from_addr(NonZeroUsize::new(i * 0x1000).unwrap());
                    if local.bind(peer).is_ok() {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert!(obj.is_bound());
    }
}

#[test]
fn test_concurrent_registry_registration_and_lookup() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..1000 {
                    // Same descriptor from every thread: the no-op
                    // re-registration path must be race-free.
                    register_type(&OPAQUE_TYPE).unwrap();
                    assert!(is_registered("Opaque"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let obj = radkit_core::runtime::new_object("Opaque").unwrap();
    assert!(obj.downcast_ref::<Opaque>().is_some());
}

#[test]
fn test_large_list_population() {
    let mut list = ObjectList::new();
    let mut originals = Vec::new();

    for v in 0..10_000 {
        let obj = sample(v);
        list.add(&obj);
        originals.push(obj);
    }

    assert_eq!(list.size(), 10_000);
    assert_eq!(sample_value(&list.get(9_999).unwrap()), 9_999);

    // Drain from the front; every transfer must balance.
    while list.remove(0).is_some() {}
    assert!(list.is_empty());

    for obj in &originals {
        assert_eq!(obj.refcount(), 1);
    }
}

#[test]
fn test_large_table_population() {
    let mut table = ObjectHashTable::new();

    for v in 0..10_000 {
        let obj = sample(v);
        table.put(&format!("key_{v}"), &obj);
    }
    assert_eq!(table.size(), 10_000);

    for v in (0..10_000).step_by(997) {
        let fetched = table.get(&format!("key_{v}")).unwrap();
        assert_eq!(sample_value(&fetched), v);
    }

    table.clear();
    assert!(table.is_empty());
}

#[test]
fn test_shared_table_read_from_many_threads() {
    let mut table = ObjectHashTable::new();
    for v in 0..100 {
        let obj = sample(v);
        table.put(&format!("key_{v}"), &obj);
    }
    let table = Arc::new(table);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for v in 0..100 {
                    let fetched = table.get(&format!("key_{v}")).unwrap();
                    assert_eq!(sample_value(&fetched), v);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
