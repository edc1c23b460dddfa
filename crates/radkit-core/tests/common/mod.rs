// Common test utilities for integration tests
//
// This module provides shared fixture types and helper functions
// for use across all integration tests.

#![allow(dead_code)]

use radkit_core::error::Result;
use radkit_core::runtime::{CoreObject, ObjectRef, TypeDescriptor};
use std::any::Any;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Clonable fixture carrying a mutable integer value.
pub struct Sample {
    value: AtomicI64,
}

/// Descriptor for [`Sample`]; clonable.
pub static SAMPLE_TYPE: TypeDescriptor = TypeDescriptor::new("Sample", || {
    Ok(Box::new(Sample {
        value: AtomicI64::new(0),
    }))
})
.clonable();

impl CoreObject for Sample {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &SAMPLE_TYPE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        Ok(Box::new(Sample {
            value: AtomicI64::new(self.value.load(Ordering::SeqCst)),
        }))
    }
}

impl Sample {
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    pub fn set_value(&self, value: i64) {
        self.value.store(value, Ordering::SeqCst);
    }
}

/// Creates a Sample instance holding `value`.
pub fn sample(value: i64) -> ObjectRef {
    ObjectRef::from_instance(Box::new(Sample {
        value: AtomicI64::new(value),
    }))
}

/// Reads the value out of a Sample instance.
pub fn sample_value(obj: &ObjectRef) -> i64 {
    obj.downcast_ref::<Sample>()
        .expect("fixture object is not a Sample")
        .value()
}

/// Fixture without the clone capability.
pub struct Opaque;

/// Descriptor for [`Opaque`]; deliberately not clonable.
pub static OPAQUE_TYPE: TypeDescriptor =
    TypeDescriptor::new("Opaque", || Ok(Box::new(Opaque)));

impl CoreObject for Opaque {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &OPAQUE_TYPE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Fixture that counts its own destructions through a shared counter.
pub struct Tracked {
    drops: Arc<AtomicUsize>,
}

/// Descriptor for [`Tracked`]; descriptor construction gets a counter
/// nobody observes, instances for tests are made with [`tracked`].
pub static TRACKED_TYPE: TypeDescriptor = TypeDescriptor::new("Tracked", || {
    Ok(Box::new(Tracked {
        drops: Arc::new(AtomicUsize::new(0)),
    }))
});

impl CoreObject for Tracked {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &TRACKED_TYPE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Creates a Tracked instance reporting destruction into `drops`.
pub fn tracked(drops: &Arc<AtomicUsize>) -> ObjectRef {
    ObjectRef::from_instance(Box::new(Tracked {
        drops: Arc::clone(drops),
    }))
}

/// Clonable fixture that deliberately shares its lookup table between
/// source and clone: deep_clone retains the table instead of
/// duplicating it.
pub struct Calibration {
    pub table: ObjectRef,
}

/// Descriptor for [`Calibration`]; clonable with a shared field.
pub static CALIBRATION_TYPE: TypeDescriptor = TypeDescriptor::new("Calibration", || {
    Ok(Box::new(Calibration { table: sample(0) }))
})
.clonable();

impl CoreObject for Calibration {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &CALIBRATION_TYPE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        // The table is shared on purpose: longest-lifetime-wins.
        Ok(Box::new(Calibration {
            table: self.table.clone(),
        }))
    }
}

/// Creates a Calibration instance sharing the given table.
pub fn calibration(table: &ObjectRef) -> ObjectRef {
    ObjectRef::from_instance(Box::new(Calibration {
        table: table.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_fixture() {
        let obj = sample(42);
        assert_eq!(sample_value(&obj), 42);
        assert!(obj.is_type(&SAMPLE_TYPE));
    }

    #[test]
    fn test_tracked_fixture() {
        let drops = Arc::new(AtomicUsize::new(0));
        let obj = tracked(&drops);
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        drop(obj);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}
