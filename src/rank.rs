/// A zero-based rank into the sorted order of a skip list.
///
/// Wrapping the rank in a newtype keeps positional access visually distinct
/// from access by value.
///
/// # Examples
///
/// ```
/// use strata_list::{Rank, SkipList};
///
/// let mut list = SkipList::new();
/// list.add(30);
/// list.add(10);
/// list.add(20);
///
/// assert_eq!(list[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
