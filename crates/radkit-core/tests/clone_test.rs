//! Integration tests for the explicit deep-clone capability.

mod common;

use common::{
    calibration, sample, sample_value, Calibration, Sample, CALIBRATION_TYPE, OPAQUE_TYPE,
    SAMPLE_TYPE,
};
use radkit_core::error::Error;
use radkit_core::runtime::{ObjectHashTable, ObjectList, ObjectRef, Peer};
use std::num::NonZeroUsize;

#[test]
fn test_deep_clone_is_independent() {
    let original = sample(10);
    let copy = original.try_clone().unwrap();

    assert_ne!(copy, original);
    assert_eq!(sample_value(&copy), 10);

    // Mutating one side never shows on the other.
    original.downcast_ref::<Sample>().unwrap().set_value(11);
    assert_eq!(sample_value(&copy), 10);
    assert_eq!(sample_value(&original), 11);
}

#[test]
fn test_clone_starts_fresh() {
    let original = sample(1);
    let _alias = original.clone();
    original
        .bind(Peer::from_addr(NonZeroUsize::new(0x1000).unwrap()))
        .unwrap();

    let copy = original.try_clone().unwrap();

    // Refcount 1, no peer: the clone's life is its own.
    assert_eq!(copy.refcount(), 1);
    assert!(copy.binding().is_none());
    assert_eq!(original.refcount(), 2);
}

#[test]
fn test_clone_without_capability_is_rejected() {
    let obj = ObjectRef::create(&OPAQUE_TYPE).unwrap();

    assert_eq!(
        obj.try_clone().unwrap_err(),
        Error::CloneUnsupported {
            type_name: "Opaque"
        }
    );
    assert_eq!(obj.refcount(), 1);
}

#[test]
fn test_shared_field_aliases_between_source_and_clone() {
    let table = sample(100);
    let original = calibration(&table);
    assert_eq!(table.refcount(), 2);

    let copy = original.try_clone().unwrap();
    assert!(copy.is_type(&CALIBRATION_TYPE));

    // The clone retained the same table rather than duplicating it.
    let copy_table = &copy.downcast_ref::<Calibration>().unwrap().table;
    assert_eq!(*copy_table, table);
    assert_eq!(table.refcount(), 3);

    // Mutation through the shared table is visible on both sides.
    table.downcast_ref::<Sample>().unwrap().set_value(200);
    assert_eq!(sample_value(copy_table), 200);

    // The table outlives the source: longest lifetime wins.
    drop(original);
    drop(table);
    assert_eq!(
        sample_value(&copy.downcast_ref::<Calibration>().unwrap().table),
        200
    );
}

#[test]
fn test_container_clone_is_element_wise() {
    let mut list = ObjectList::new();
    for v in 0..10 {
        let obj = sample(v);
        list.add(&obj);
    }

    let cloned = list.try_clone().unwrap();
    assert_eq!(cloned.size(), 10);

    for i in 0..10 {
        let original = list.get(i).unwrap();
        let copy = cloned.get(i).unwrap();
        assert_ne!(copy, original);
        assert_eq!(sample_value(&copy), sample_value(&original));
    }
}

#[test]
fn test_container_clone_failure_releases_partial_clones() {
    let good = sample(1);
    let bad = ObjectRef::create(&OPAQUE_TYPE).unwrap();

    let mut table = ObjectHashTable::new();
    table.put("good", &good);
    table.put("bad", &bad);

    assert!(matches!(
        table.try_clone().unwrap_err(),
        Error::CloneUnsupported { .. }
    ));

    // No stray references from the aborted clone.
    assert_eq!(good.refcount(), 2); // caller + table
    assert_eq!(bad.refcount(), 2);
}

#[test]
fn test_clone_of_clone() {
    let a = sample(5);
    let b = a.try_clone().unwrap();
    let c = b.try_clone().unwrap();

    assert_ne!(a, c);
    assert_ne!(b, c);
    assert_eq!(sample_value(&c), 5);
    assert!(c.is_type(&SAMPLE_TYPE));
}
