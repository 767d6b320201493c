use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;

use crate::Rank;
use crate::error::Error;
use crate::raw::{Handle, RawSkipList};

mod cursor;
mod snapshot;

pub use cursor::Cursor;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};

/// An ordered list backed by a skip list.
///
/// Elements are kept in non-decreasing order at all times; duplicates are
/// allowed. Membership, insertion and removal run in O(log n) on average
/// thanks to the probabilistic level structure, while rank-based access walks
/// the bottom chain and is O(n) by design.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the [`Ord`]
/// trait, changes while it is in the list. The behavior resulting from such
/// a logic error is not specified, but will not result in undefined behavior.
///
/// The list is single-threaded: it contains no locking, and callers that
/// share one across threads must serialize access externally. Within one
/// thread, [`iter`](SkipList::iter) borrows the list and is statically safe,
/// while a detached [`Cursor`] detects interleaved mutation dynamically and
/// reports [`Error::ConcurrentModification`].
///
/// # Examples
///
/// ```
/// use strata_list::SkipList;
///
/// let mut queue = SkipList::new();
///
/// // Add some priorities, in no particular order.
/// queue.add(41);
/// queue.add(1);
/// queue.add(25);
/// queue.add(25);
///
/// // Traversal is always sorted, duplicates included.
/// assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [1, 25, 25, 41]);
///
/// // Remove one of the duplicates.
/// assert!(queue.remove(&25));
/// assert_eq!(queue.len(), 3);
/// assert!(queue.contains(&25));
/// ```
pub struct SkipList<T> {
    raw: RawSkipList<T>,
}

impl<T> SkipList<T> {
    /// Creates an empty list with an entropy-seeded level generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list: SkipList<i32> = SkipList::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: RawSkipList::new(),
        }
    }

    /// Creates an empty list whose level generator is seeded with `seed`.
    ///
    /// Two lists built from the same seed and the same insertion sequence
    /// have identical internal shapes, which makes randomized behavior
    /// reproducible in tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list: SkipList<i32> = SkipList::with_seed(42);
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            raw: RawSkipList::seeded(seed),
        }
    }

    /// Returns the number of elements in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.add(7);
    /// list.add(7);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the list contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes all elements.
    ///
    /// The highest active level drops back to 1, but the level ceiling keeps
    /// any capacity earned by earlier growth. Clearing an empty list is a
    /// valid no-op on the elements (though it still counts as a mutation for
    /// outstanding cursors).
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.add(1);
    /// list.clear();
    /// assert!(list.is_empty());
    /// list.clear(); // idempotent
    /// assert!(list.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the highest level currently in use.
    ///
    /// This is an introspection extension, mostly useful for tests and
    /// diagnostics.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn level(&self) -> usize {
        self.raw.level()
    }

    /// Returns the level ceiling: the current upper bound on any node's
    /// height. It starts at 1 and grows with the element count, never
    /// shrinking.
    ///
    /// This is an introspection extension, mostly useful for tests and
    /// diagnostics.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn level_ceiling(&self) -> usize {
        self.raw.ceiling()
    }

    /// Returns a borrowing iterator over the elements in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([3, 1, 2]);
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: &self.raw,
            next: self.raw.first(),
            remaining: self.raw.len(),
        }
    }

    pub(crate) const fn raw(&self) -> &RawSkipList<T> {
        &self.raw
    }
}

impl<T: Ord> SkipList<T> {
    /// Adds `value` to the list, keeping sorted order.
    ///
    /// Duplicates are allowed. A new element lands immediately before the
    /// first existing element not less than it, so among equal values the
    /// newest insertion comes first in traversal order.
    ///
    /// # Complexity
    ///
    /// O(log n) on average.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.add(2);
    /// list.add(1);
    /// list.add(2);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 2]);
    /// ```
    pub fn add(&mut self, value: T) {
        self.raw.insert(value);
    }

    /// Adds `value` when it is `Some`, and deliberately does nothing when it
    /// is `None`.
    ///
    /// Absent values are skipped rather than rejected; the element count does
    /// not change and no error is raised.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.add_optional(Some(5));
    /// list.add_optional(None);
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn add_optional(&mut self, value: Option<T>) {
        if let Some(value) = value {
            self.add(value);
        }
    }

    /// Removes one element comparing equal to `value`, returning whether an
    /// element was removed.
    ///
    /// When several elements compare equal, the one removed is the first of
    /// them in traversal order (which, per the insertion tie-break, is the
    /// most recently added). Absent values are a silent no-op.
    ///
    /// # Complexity
    ///
    /// O(log n) on average.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let mut list = SkipList::from([1, 2, 2]);
    /// assert!(list.remove(&2));
    /// assert!(list.contains(&2));
    /// assert!(!list.remove(&9));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value).is_some()
    }

    /// Removes the element at `rank` and returns it.
    ///
    /// This walks to the rank's value and then removes *by value*, so when
    /// the rank lands inside a run of equal elements, the element actually
    /// unlinked is the first of that run.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `rank >= len`.
    ///
    /// # Complexity
    ///
    /// O(n) for the walk, then O(log n) on average for the removal.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let mut list = SkipList::from([30, 10, 20]);
    /// assert_eq!(list.remove_at(0), Ok(10));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [20, 30]);
    /// assert!(list.remove_at(5).is_err());
    /// ```
    pub fn remove_at(&mut self, rank: usize) -> Result<T, Error>
    where
        T: Clone,
    {
        let value = self.get(rank)?.clone();
        let removed = self.remove(&value);
        debug_assert!(removed);
        Ok(value)
    }

    /// Returns `true` if the list contains an element equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n) on average.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([1, 2, 3]);
    /// assert!(list.contains(&2));
    /// assert!(!list.contains(&4));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }

    /// Returns the rank of the first element equal to `value`, or `None` if
    /// the value is absent.
    ///
    /// # Complexity
    ///
    /// O(n): rank queries walk the bottom chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([10, 20, 20, 30]);
    /// assert_eq!(list.index_of(&20), Some(1));
    /// assert_eq!(list.index_of(&15), None);
    /// ```
    #[must_use]
    pub fn index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(value)
    }

    /// Returns a reference to the element at `rank` in sorted order.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `rank >= len`.
    ///
    /// # Complexity
    ///
    /// O(n): the walk takes `rank + 1` steps along the bottom chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([3, 1, 2]);
    /// assert_eq!(list.get(1), Ok(&2));
    /// assert!(list.get(3).is_err());
    /// ```
    pub fn get(&self, rank: usize) -> Result<&T, Error> {
        self.raw.get_by_rank(rank).ok_or(Error::OutOfRange {
            rank,
            len: self.raw.len(),
        })
    }

    /// Always fails: the list maintains sorted order and does not accept a
    /// caller-chosen position. The list is unchanged and `value` is dropped.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`], unconditionally.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::{Error, SkipList};
    ///
    /// let mut list = SkipList::from([1, 3]);
    /// assert_eq!(list.insert_at(1, 2), Err(Error::Unsupported));
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn insert_at(&mut self, rank: usize, value: T) -> Result<(), Error> {
        let _ = (rank, value);
        Err(Error::Unsupported)
    }

    /// Always fails: overwriting the element at a rank would break sorted
    /// order. The list is unchanged and `value` is dropped.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`], unconditionally.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::{Error, SkipList};
    ///
    /// let mut list = SkipList::from([1, 3]);
    /// assert_eq!(list.set(0, 9), Err(Error::Unsupported));
    /// assert_eq!(list.get(0), Ok(&1));
    /// ```
    pub fn set(&mut self, rank: usize, value: T) -> Result<(), Error> {
        let _ = (rank, value);
        Err(Error::Unsupported)
    }

    /// Copies every element, in sorted order, into `destination` starting at
    /// `offset`. Slots outside `offset..offset + len` are left untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `offset` is past the end of the
    ///   destination.
    /// - [`Error::CapacityExceeded`] if fewer than `len` slots remain from
    ///   `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([2, 1]);
    /// let mut buffer = [0; 4];
    /// list.copy_to(&mut buffer, 1).unwrap();
    /// assert_eq!(buffer, [0, 1, 2, 0]);
    ///
    /// assert!(list.copy_to(&mut buffer[..2], 1).is_err());
    /// ```
    pub fn copy_to(&self, destination: &mut [T], offset: usize) -> Result<(), Error>
    where
        T: Clone,
    {
        if offset > destination.len() {
            return Err(Error::InvalidArgument("`offset` is past the end of the destination"));
        }
        let available = destination.len() - offset;
        if available < self.len() {
            return Err(Error::CapacityExceeded {
                needed: self.len(),
                available,
            });
        }
        for (slot, value) in destination[offset..].iter_mut().zip(self.iter()) {
            *slot = value.clone();
        }
        Ok(())
    }
}

/// Indexes into the list by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds; use [`SkipList::get`] for the fallible
/// form. There is no `IndexMut` counterpart: writing through a rank would
/// break sorted order.
///
/// # Examples
///
/// ```
/// use strata_list::{Rank, SkipList};
///
/// let list = SkipList::from([30, 10, 20]);
/// assert_eq!(list[Rank(2)], 30);
/// ```
impl<T: Ord> Index<Rank> for SkipList<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get(rank.0).expect("index out of bounds")
    }
}

impl<T> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SkipList<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SkipList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SkipList<T> {}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SkipList<T> {
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([3, 1, 2]);
    /// assert_eq!(list.len(), 3);
    /// ```
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// A borrowing iterator over a [`SkipList`] in sorted order.
///
/// Created by [`SkipList::iter`]. Forward-only: the underlying chain is
/// singly linked.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    raw: &'a RawSkipList<T>,
    next: Handle,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.raw.head() {
            return None;
        }
        let value = self.raw.value(self.next);
        self.next = self.raw.next(self.next);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over a [`SkipList`] in ascending order.
///
/// Created by the [`IntoIterator`] implementation. The list is drained along
/// its bottom chain in one O(n) pass up front.
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<T> IntoIterator for SkipList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([2, 3, 1]);
    /// let values: Vec<_> = list.into_iter().collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}
