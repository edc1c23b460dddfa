//! Owning ordered list of runtime objects.
//!
//! [`ObjectList`] holds retained references to its elements: adding
//! retains, removing transfers the retained reference to the caller, and
//! destruction releases every element exactly once. Duplicates of the same
//! underlying instance are permitted; each slot holds its own reference.
//!
//! The ownership bookkeeping is `ObjectRef`'s `Clone`/`Drop`, so the
//! retain-per-slot invariant cannot be violated by hand.
//!
//! # Thread Safety
//!
//! Structural mutation takes `&mut self`; exclusive access is enforced by
//! the borrow checker. Concurrent reads of a shared list are safe.

use crate::error::Result;
use crate::runtime::object::ObjectRef;

/// Index-addressable ordered sequence of owned object references.
///
/// # Example
///
/// ```
/// # use radkit_core::runtime::{CoreObject, ObjectList, ObjectRef, TypeDescriptor};
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
///
/// let mut list = ObjectList::new();
/// list.add(&obj);
/// assert_eq!(obj.refcount(), 2); // caller + list
///
/// let removed = list.remove(0).unwrap();
/// assert_eq!(removed, obj);
/// assert_eq!(obj.refcount(), 2); // caller + transferred reference
/// ```
#[derive(Debug, Default)]
pub struct ObjectList {
    items: Vec<ObjectRef>,
}

impl ObjectList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends an object, retaining it.
    pub fn add(&mut self, value: &ObjectRef) {
        self.items.push(value.clone());
    }

    /// Inserts an object at the given index, retaining it.
    ///
    /// An out-of-range index appends at the end; insertion never errors.
    pub fn insert(&mut self, index: usize, value: &ObjectRef) {
        if index > self.items.len() {
            self.items.push(value.clone());
        } else {
            self.items.insert(index, value.clone());
        }
    }

    /// Returns a freshly retained reference to the object at `index`.
    ///
    /// `None` if the index is out of bounds. The list keeps its own
    /// reference; the caller releases the returned one by dropping it.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ObjectRef> {
        self.items.get(index).cloned()
    }

    /// Removes the object at `index`, transferring the list's reference
    /// to the caller.
    ///
    /// The returned handle is the one the list held — not an additional
    /// retain. `None` if the index is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<ObjectRef> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Returns a freshly retained reference to the last object.
    ///
    /// The list keeps its own reference. `None` if the list is empty.
    #[must_use]
    pub fn get_last(&self) -> Option<ObjectRef> {
        self.items.last().cloned()
    }

    /// Removes the last object, transferring the list's reference.
    pub fn remove_last(&mut self) -> Option<ObjectRef> {
        self.items.pop()
    }

    /// Returns the number of objects in the list.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Releases every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the stored references without retaining them.
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectRef> {
        self.items.iter()
    }

    /// Deep-clones the list: every element is cloned via its own type's
    /// clone capability and the clones are collected in a new list.
    ///
    /// # Errors
    ///
    /// Fails with the first element error (`CloneUnsupported` or
    /// `ConstructorFailure`); in that case no new list is produced and
    /// already-produced clones are released.
    pub fn try_clone(&self) -> Result<ObjectList> {
        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            items.push(item.try_clone()?);
        }
        Ok(ObjectList { items })
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a ObjectRef;
    type IntoIter = std::slice::Iter<'a, ObjectRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
