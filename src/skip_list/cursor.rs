use std::marker::PhantomData;

use super::SkipList;
use crate::error::Error;
use crate::raw::Handle;

impl<T> SkipList<T> {
    /// Creates a detached cursor positioned before the first element.
    ///
    /// Unlike [`iter`](SkipList::iter), a cursor does not borrow the list
    /// between steps, so the list can be mutated while a cursor is
    /// outstanding. The cursor captures the list's mutation counter at
    /// creation and re-checks it on every [`advance`](Cursor::advance); the
    /// first step after any structural mutation fails instead of yielding.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([2, 1]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.advance(&list), Ok(Some(&1)));
    /// assert_eq!(cursor.advance(&list), Ok(Some(&2)));
    /// assert_eq!(cursor.advance(&list), Ok(None));
    /// ```
    #[must_use]
    pub fn cursor(&self) -> Cursor<T> {
        Cursor {
            expected: self.raw().mutations(),
            next: self.raw().first(),
            _list: PhantomData,
        }
    }
}

/// A forward-only cursor over a [`SkipList`] that survives between borrows.
///
/// Each traversal starts independently from [`SkipList::cursor`]; a cursor
/// cannot be restarted mid-stream. A cursor must only be passed back to the
/// list that created it — the pairing is checked via the mutation counter,
/// and mismatched use is a logic error that may fail or panic, but is always
/// memory-safe.
#[must_use = "cursors are lazy and do nothing unless advanced"]
pub struct Cursor<T> {
    /// Mutation counter observed at creation.
    expected: u64,
    /// Handle of the next element to yield; the head handle once exhausted.
    next: Handle,
    _list: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    /// Yields the next element in sorted order, or `Ok(None)` once the walk
    /// has come back around to the head sentinel.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if the list has been structurally
    /// mutated (add, remove or clear) since the cursor was created. The check
    /// happens before anything is yielded, the cursor stays dead from then
    /// on, and the list itself remains fully usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::{Error, SkipList};
    ///
    /// let mut list = SkipList::from([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.advance(&list), Ok(Some(&1)));
    ///
    /// list.add(4);
    /// assert_eq!(cursor.advance(&list), Err(Error::ConcurrentModification));
    ///
    /// // The list is still valid; a fresh cursor sees the new element.
    /// let mut fresh = list.cursor();
    /// assert_eq!(fresh.advance(&list), Ok(Some(&1)));
    /// ```
    pub fn advance<'a>(&mut self, list: &'a SkipList<T>) -> Result<Option<&'a T>, Error> {
        if list.raw().mutations() != self.expected {
            return Err(Error::ConcurrentModification);
        }
        if self.next == list.raw().head() {
            return Ok(None);
        }
        let value = list.raw().value(self.next);
        self.next = list.raw().next(self.next);
        Ok(Some(value))
    }
}
