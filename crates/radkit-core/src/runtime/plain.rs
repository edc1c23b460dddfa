//! Non-owning ordered list.
//!
//! [`PlainList`] is a plain sequence with no lifecycle responsibility for
//! its elements: it never retains or releases anything, it just moves
//! values in and out. It exists for call sites that hold collections of
//! values whose ownership is managed elsewhere — key names returned from
//! the hash table, registered type names — and that must not be
//! double-owned by an owning container.
//!
//! Sorting uses a caller-supplied three-way comparator; stability is not
//! guaranteed.

use std::cmp::Ordering;

/// Ordered sequence of caller-managed values.
///
/// # Example
///
/// ```
/// use radkit_core::runtime::PlainList;
///
/// let mut names = PlainList::new();
/// names.add("DBZH");
/// names.add("TH");
/// names.insert(0, "VRAD");
///
/// assert_eq!(names.size(), 3);
/// assert_eq!(names.get(0), Some(&"VRAD"));
///
/// names.sort(|a, b| a.cmp(b));
/// assert_eq!(names.get(0), Some(&"DBZH"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlainList<T> {
    items: Vec<T>,
}

impl<T> PlainList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a value to the end of the list.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts a value at the given index.
    ///
    /// An out-of-range index appends at the end; insertion never errors.
    pub fn insert(&mut self, index: usize, item: T) {
        if index > self.items.len() {
            self.items.push(item);
        } else {
            self.items.insert(index, item);
        }
    }

    /// Returns the value at the given index, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes and returns the value at the given index.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Returns the last value, or `None` if the list is empty.
    #[must_use]
    pub fn get_last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Removes and returns the last value.
    pub fn remove_last(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Removes the first value equal to `item`.
    ///
    /// Returns true if a value was removed.
    pub fn remove_object(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        if let Some(pos) = self.items.iter().position(|x| x == item) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }

    /// Returns the first value matching the predicate.
    #[must_use]
    pub fn find<F>(&self, predicate: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().find(|x| predicate(x))
    }

    /// Sorts the list with a three-way comparator.
    ///
    /// The sort is not stable.
    pub fn sort<F>(&mut self, comparator: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_unstable_by(comparator);
    }

    /// Returns the number of values in the list.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a PlainList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for PlainList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> FromIterator<T> for PlainList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
