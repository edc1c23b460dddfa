//! Object lifecycle management for the radkit runtime.
//!
//! This module implements the object system with:
//! - Reference counting with atomic operations
//! - Automatic memory management (`Clone` retains, `Drop` releases)
//! - Descriptor-driven construction and explicit deep cloning
//! - A binding slot for foreign-peer identity (see `runtime::binding`)
//!
//! # Architecture
//!
//! Objects are heap-allocated with manual memory management:
//! - Each object carries a header (descriptor, atomic refcount, binding
//!   slot) followed by its payload, a boxed [`CoreObject`] trait object
//! - Objects are deallocated when the refcount reaches 0; the payload's
//!   `Drop` is the type's destructor and runs exactly once
//! - Thread-safe via atomic operations (AcqRel ordering)
//!
//! # Ownership contract
//!
//! There is no public `retain`/`release` pair to misuse: retaining is
//! `Clone` and releasing is `Drop`, so a double release or a use after
//! destruction cannot be expressed in safe code. The refcount is still
//! observable through [`ObjectRef::refcount`] for tests and diagnostics.
//!
//! # Thread Safety
//!
//! Handles are `Send + Sync`: multiple threads can hold references to the
//! same object and retain/release concurrently. Mutable payload state must
//! use interior mutability (the domain types guard theirs with `RwLock`).

use crate::error::{Error, Result};
use crate::runtime::typedesc::TypeDescriptor;
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// The polymorphic interface every radkit object type implements.
///
/// Implementations provide their static descriptor, an `Any` view for
/// downcasting, and optionally the deep-clone capability.
///
/// # Cloning
///
/// `deep_clone` must duplicate every owned field so the clone and the
/// source share no mutable state. Fields with shared, longest-lifetime-wins
/// semantics may instead be retained (handle copied); a type that does so
/// deliberately exposes aliasing between source and clone for that field
/// and should say so in its documentation. Types that do not override
/// `deep_clone` do not clone at all.
pub trait CoreObject: Send + Sync + 'static {
    /// Returns the static descriptor of this type.
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    /// Returns an `Any` view of self for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Produces an independent duplicate of this instance.
    ///
    /// The default rejects the operation; a type opts in by overriding this
    /// AND declaring [`TypeDescriptor::clonable`] on its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CloneUnsupported`] unless overridden; overrides
    /// return [`Error::ConstructorFailure`] when duplication fails.
    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        Err(Error::CloneUnsupported {
            type_name: self.type_descriptor().name(),
        })
    }
}

/// Raw object representation allocated on the heap.
///
/// The header (descriptor, refcount, binding slot) is embedded in front of
/// the payload; the whole allocation lives and dies with the refcount.
pub(crate) struct RawObject {
    /// Descriptor of the payload's concrete type.
    /// Constant for the object's life; identity key for downcasting.
    pub(crate) ty: &'static TypeDescriptor,
    /// Reference count (starts at 1, deallocated when it reaches 0).
    /// Atomic for thread-safe retain/release.
    pub(crate) refcount: AtomicU32,
    /// Foreign-peer binding slot; 0 means unbound.
    /// Holds the peer's address with no ownership in either direction.
    pub(crate) binding: AtomicUsize,
    /// The domain payload. Its `Drop` is the type's destructor.
    pub(crate) data: Box<dyn CoreObject>,
}

/// Shared-ownership handle to a runtime object.
///
/// An `ObjectRef` is the only way to reach a live instance. Cloning the
/// handle retains the instance; dropping it releases. When the last handle
/// is dropped the payload's destructor runs exactly once and the storage
/// is reclaimed.
///
/// # Example
///
/// ```
/// use radkit_core::runtime::{CoreObject, ObjectRef, TypeDescriptor};
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
/// let obj = ObjectRef::create(&MARKER_TYPE).unwrap();
/// assert_eq!(obj.refcount(), 1);
///
/// let alias = obj.clone();
/// assert_eq!(obj.refcount(), 2);
/// assert_eq!(obj, alias);
/// ```
pub struct ObjectRef {
    /// Pointer to object data on heap.
    /// Never null, valid while refcount > 0.
    pub(crate) ptr: NonNull<RawObject>,
}

impl ObjectRef {
    /// Creates a fresh instance of the given type.
    ///
    /// Runs the descriptor's constructor; the new instance starts with
    /// refcount 1 and no peer bound. If the constructor fails, nothing is
    /// allocated and no instance exists — partially built constructor
    /// state is reclaimed by drop on the error path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructorFailure`] if the type's constructor
    /// rejects the operation.
    pub fn create(ty: &'static TypeDescriptor) -> Result<Self> {
        let data = ty.construct()?;
        debug_assert!(
            TypeDescriptor::same_type(data.type_descriptor(), ty),
            "constructor for '{}' produced a payload of type '{}'",
            ty.name(),
            data.type_descriptor().name()
        );

        radkit_log::trace!("created instance of {}", ty.name());
        Ok(Self::alloc(ty, data))
    }

    /// Wraps an already-built payload in a fresh handle.
    ///
    /// Used by domain convenience constructors that validate their inputs
    /// before the instance exists. The instance starts with refcount 1 and
    /// no peer bound.
    #[must_use]
    pub fn from_instance(data: Box<dyn CoreObject>) -> Self {
        let ty = data.type_descriptor();
        Self::alloc(ty, data)
    }

    /// Allocates the header + payload and hands out the first reference.
    fn alloc(ty: &'static TypeDescriptor, data: Box<dyn CoreObject>) -> Self {
        let raw = RawObject {
            ty,
            refcount: AtomicU32::new(1),
            binding: AtomicUsize::new(0),
            data,
        };

        // Allocate on the heap; ownership is transferred to the handle.
        let ptr = Box::into_raw(Box::new(raw));

        // SAFETY: ptr is not null (Box::new always succeeds)
        ObjectRef {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
        }
    }

    /// Increments the reference count.
    ///
    /// # Panics
    ///
    /// Panics if the refcount overflows (`u32::MAX`).
    fn retain(&self) {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        let raw = unsafe { &*self.ptr.as_ptr() };

        let old = raw.refcount.fetch_add(1, Ordering::AcqRel);

        if old == u32::MAX {
            panic!("Reference count overflow in ObjectRef::retain");
        }
    }

    /// Decrements the reference count, destroying the instance at zero.
    fn release(&self) {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        let raw = unsafe { &*self.ptr.as_ptr() };

        let old = raw.refcount.fetch_sub(1, Ordering::AcqRel);

        if old == 1 {
            radkit_log::trace!("destroying instance of {}", raw.ty.name());
            // Refcount reached 0: reclaim ownership and run the payload's
            // destructor exactly once.
            // SAFETY: ptr was created with Box::into_raw and this was the
            // last outstanding reference.
            unsafe {
                drop(Box::from_raw(self.ptr.as_ptr()));
            }
        }
    }

    /// Returns the current reference count (for testing/diagnostics).
    ///
    /// The count can change asynchronously under concurrent retains and
    /// releases from other threads.
    #[must_use]
    pub fn refcount(&self) -> u32 {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        let raw = unsafe { &*self.ptr.as_ptr() };

        raw.refcount.load(Ordering::Acquire)
    }

    /// Returns the instance's type descriptor.
    #[must_use]
    pub fn type_descriptor(&self) -> &'static TypeDescriptor {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        unsafe { (*self.ptr.as_ptr()).ty }
    }

    /// Returns the instance's type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_descriptor().name()
    }

    /// Returns true if the instance is of the given type.
    ///
    /// Descriptor identity comparison: a single pointer equality check.
    #[must_use]
    pub fn is_type(&self, ty: &'static TypeDescriptor) -> bool {
        TypeDescriptor::same_type(self.type_descriptor(), ty)
    }

    /// Returns a shared view of the payload.
    #[must_use]
    pub fn data(&self) -> &dyn CoreObject {
        // SAFETY: self.ptr points to a valid RawObject while a handle exists
        unsafe { (*self.ptr.as_ptr()).data.as_ref() }
    }

    /// Downcasts the payload to a concrete type.
    ///
    /// Returns `None` if the instance is of a different type.
    ///
    /// # Example
    ///
    /// ```
    /// # use radkit_core::runtime::{CoreObject, ObjectRef, TypeDescriptor};
    /// # use std::any::Any;
    /// # #[derive(Default)]
    /// # struct Marker;
    /// # static MARKER_TYPE: TypeDescriptor =
    /// #     TypeDescriptor::new("Marker", || Ok(Box::new(Marker)));
    /// # impl CoreObject for Marker {
    /// #     fn type_descriptor(&self) -> &'static TypeDescriptor { &MARKER_TYPE }
    /// #     fn as_any(&self) -> &dyn Any { self }
    /// # }
    /// let obj = ObjectRef::create(&MARKER_TYPE).unwrap();
    /// assert!(obj.downcast_ref::<Marker>().is_some());
    /// ```
    #[must_use]
    pub fn downcast_ref<T: CoreObject>(&self) -> Option<&T> {
        self.data().as_any().downcast_ref::<T>()
    }

    /// Produces an independent instance of the same type.
    ///
    /// Dispatches the type's `deep_clone`; the clone starts Live with
    /// refcount 1 and no peer bound. Cloning is an explicit capability:
    /// types that do not declare it are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CloneUnsupported`] if the type does not declare
    /// the clone capability, or [`Error::ConstructorFailure`] if the
    /// type's deep-clone rejects the duplication.
    pub fn try_clone(&self) -> Result<ObjectRef> {
        let ty = self.type_descriptor();
        if !ty.is_clonable() {
            return Err(Error::CloneUnsupported {
                type_name: ty.name(),
            });
        }

        let data = self.data().deep_clone()?;
        radkit_log::trace!("cloned instance of {}", ty.name());
        Ok(Self::alloc(ty, data))
    }
}

// SAFETY: ObjectRef is Send because:
// - RawObject is heap-allocated with Box and freed only when the atomic
//   refcount reaches zero
// - The payload is constrained to Send + Sync by the CoreObject supertraits
// - The descriptor is a 'static immutable static
unsafe impl Send for ObjectRef {}

// SAFETY: ObjectRef is Sync because:
// - All header accesses go through atomics
// - Shared payload access hands out &dyn CoreObject only, and the payload
//   is Sync
unsafe impl Sync for ObjectRef {}

impl Clone for ObjectRef {
    /// Retains the instance and returns a second handle to it.
    fn clone(&self) -> Self {
        self.retain();

        // SAFETY: ptr is still valid (we just incremented the refcount)
        ObjectRef { ptr: self.ptr }
    }
}

impl Drop for ObjectRef {
    /// Releases the instance; the last release destroys it.
    fn drop(&mut self) {
        self.release();
    }
}

impl Deref for ObjectRef {
    type Target = dyn CoreObject;

    fn deref(&self) -> &Self::Target {
        self.data()
    }
}

impl PartialEq for ObjectRef {
    /// Pointer identity: two handles are equal when they refer to the
    /// same live instance.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ptr.as_ptr(), other.ptr.as_ptr())
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type", &self.type_name())
            .field("refcount", &self.refcount())
            .finish()
    }
}
