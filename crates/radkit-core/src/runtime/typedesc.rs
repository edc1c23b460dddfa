//! Type descriptors for the radkit object runtime.
//!
//! Every concrete object type declares exactly one [`TypeDescriptor`]: an
//! immutable piece of per-type metadata shared by all of the type's
//! instances. Descriptors are declared as plain `static` items, so they are
//! never mutated after creation and their addresses are stable for the whole
//! program.
//!
//! # Identity
//!
//! The `&'static` address of a descriptor IS the type identity: two handles
//! refer to the same concrete type exactly when their descriptors are the
//! same static. [`TypeDescriptor::same_type`] compares by pointer, which
//! makes downcast checks a single comparison with no string hashing.
//!
//! # Capabilities
//!
//! Cloning is an explicit capability. A type that supports deep cloning
//! declares it with [`TypeDescriptor::clonable`] and implements
//! `CoreObject::deep_clone`; everything else is rejected with
//! `CloneUnsupported`. There is no implicit fallback copy.

use crate::error::Result;
use crate::runtime::object::CoreObject;
use std::fmt;

/// Constructor callback: builds a fresh default instance of the type.
///
/// A constructor either returns a fully initialized instance or an error;
/// a failing constructor must leave nothing behind, which in Rust falls out
/// of drop semantics (partially built fields are dropped on the error path).
pub type Constructor = fn() -> Result<Box<dyn CoreObject>>;

/// Immutable per-type metadata shared by all instances of a concrete type.
///
/// # Declaring a type
///
/// ```
/// use radkit_core::runtime::{CoreObject, TypeDescriptor};
/// use radkit_core::Result;
/// use std::any::Any;
///
/// #[derive(Default)]
/// struct Marker;
///
/// static MARKER_TYPE: TypeDescriptor =
///     TypeDescriptor::new("Marker", || Ok(Box::new(Marker)));
///
/// impl CoreObject for Marker {
///     fn type_descriptor(&self) -> &'static TypeDescriptor {
///         &MARKER_TYPE
///     }
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// assert_eq!(MARKER_TYPE.name(), "Marker");
/// assert!(!MARKER_TYPE.is_clonable());
/// ```
pub struct TypeDescriptor {
    /// Type name (e.g., "Area", "Cartesian"). Unique within a process.
    name: &'static str,
    /// Builds a fresh default instance.
    constructor: Constructor,
    /// Whether the type declares the deep-clone capability.
    clonable: bool,
}

impl TypeDescriptor {
    /// Creates a descriptor for a non-clonable type.
    #[must_use]
    pub const fn new(name: &'static str, constructor: Constructor) -> Self {
        Self {
            name,
            constructor,
            clonable: false,
        }
    }

    /// Declares the deep-clone capability.
    ///
    /// The type must also override `CoreObject::deep_clone`; the flag only
    /// advertises the capability to callers and gates `ObjectRef::try_clone`.
    #[must_use]
    pub const fn clonable(mut self) -> Self {
        self.clonable = true;
        self
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the type declares the deep-clone capability.
    #[must_use]
    pub const fn is_clonable(&self) -> bool {
        self.clonable
    }

    /// Invokes the type's constructor, producing a fresh default instance.
    pub(crate) fn construct(&self) -> Result<Box<dyn CoreObject>> {
        (self.constructor)()
    }

    /// Compares two descriptors for identity.
    ///
    /// Descriptors are statics, so pointer equality is exact type equality.
    #[must_use]
    pub fn same_type(a: &'static TypeDescriptor, b: &'static TypeDescriptor) -> bool {
        std::ptr::eq(a, b)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("clonable", &self.clonable)
            .finish()
    }
}
