//! Owning string-keyed hash table of runtime objects.
//!
//! [`ObjectHashTable`] is the aggregate-composition workhorse of the
//! toolkit: a grid holds its named parameters in one, every object holds
//! its attribute map in one. Every stored value is retained by the table;
//! replacing or removing a key releases exactly the reference the table
//! held, and destruction releases every stored value exactly once.
//!
//! Built on `hashbrown::HashMap` with `FxBuildHasher` — short
//! quantity-style keys ("DBZH", "how/nodes") hash fastest with fxhash.
//!
//! # Ordering
//!
//! Key order is unspecified: [`ObjectHashTable::keys`] reflects hash
//! order, and callers that need stability sort the returned list.
//!
//! # Thread Safety
//!
//! Structural mutation takes `&mut self`; exclusive access is enforced by
//! the borrow checker. Concurrent reads of a shared table are safe.

use crate::error::Result;
use crate::runtime::list::ObjectList;
use crate::runtime::object::ObjectRef;
use crate::runtime::plain::PlainList;
use fxhash::FxBuildHasher;
use hashbrown::HashMap;

/// String-keyed map of owned object references.
///
/// # Example
///
/// ```
/// # use radkit_core::runtime::{CoreObject, ObjectHashTable, ObjectRef, TypeDescriptor};
/// # use std::any::Any;
/// # #[derive(Default)]
/// # struct Marker;
/// # static MARKER_TYPE: TypeDescriptor =
/// #     TypeDescriptor::new("Marker", || Ok(Box::new(Marker)));
/// # impl CoreObject for Marker {
/// #     fn type_descriptor(&self) -> &'static TypeDescriptor { &MARKER_TYPE }
/// #     fn as_any(&self) -> &dyn Any { self }
/// # }
/// let param = ObjectRef::create(&MARKER_TYPE).unwrap();
///
/// let mut table = ObjectHashTable::new();
/// table.put("DBZH", &param);
///
/// assert!(table.exists("DBZH"));
/// assert_eq!(table.get("DBZH").unwrap(), param);
/// assert_eq!(table.size(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ObjectHashTable {
    entries: HashMap<String, ObjectRef, FxBuildHasher>,
}

impl ObjectHashTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }

    /// Stores an object under `key`, retaining it.
    ///
    /// If the key already exists, the previously stored value is released
    /// first. Returns true if the key was already present.
    pub fn put(&mut self, key: &str, value: &ObjectRef) -> bool {
        // The evicted handle's drop is the release of the table's prior
        // reference.
        self.entries
            .insert(key.to_string(), value.clone())
            .is_some()
    }

    /// Returns a freshly retained reference to the value under `key`.
    ///
    /// The table keeps its own reference; the caller releases the
    /// returned one by dropping it. `None` if the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ObjectRef> {
        self.entries.get(key).cloned()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entry under `key`, transferring the table's reference
    /// to the caller.
    ///
    /// The returned handle is the one the table held — not an additional
    /// retain. `None` if the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<ObjectRef> {
        self.entries.remove(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the key names as a non-owning list.
    ///
    /// Order is unspecified.
    #[must_use]
    pub fn keys(&self) -> PlainList<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the stored values as an owning list, each freshly retained.
    #[must_use]
    pub fn values(&self) -> ObjectList {
        let mut list = ObjectList::new();
        for value in self.entries.values() {
            list.add(value);
        }
        list
    }

    /// Releases every stored value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over `(key, value)` pairs without retaining the values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectRef)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deep-clones the table: every value is cloned via its own type's
    /// clone capability under the same key.
    ///
    /// # Errors
    ///
    /// Fails with the first value error (`CloneUnsupported` or
    /// `ConstructorFailure`); already-produced clones are released.
    pub fn try_clone(&self) -> Result<ObjectHashTable> {
        let mut entries: HashMap<String, ObjectRef, FxBuildHasher> =
            HashMap::with_capacity_and_hasher(self.entries.len(), FxBuildHasher::default());
        for (key, value) in &self.entries {
            entries.insert(key.clone(), value.try_clone()?);
        }
        Ok(ObjectHashTable { entries })
    }
}
