use super::SkipList;
use crate::error::Error;

/// Format version written into every exported [`Snapshot`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// A linear snapshot of a [`SkipList`]: the element count plus the values in
/// sorted order, and nothing else.
///
/// The probabilistic level structure is deliberately not captured; importing
/// replays the values through [`SkipList::add`] and draws fresh levels.
/// The payload is `None` for an empty list, mirroring a serialized form that
/// omits the array entirely when there is nothing to write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot<T> {
    /// Version of the snapshot layout, [`SNAPSHOT_VERSION`] on export.
    pub format_version: u32,
    /// Number of elements the payload must carry.
    pub len: usize,
    /// The values in sorted order; `None` when `len` is 0.
    pub values: Option<Vec<T>>,
}

impl<T: Ord> SkipList<T> {
    /// Exports a linear snapshot of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([2, 1]);
    /// let snapshot = list.snapshot();
    /// assert_eq!(snapshot.len, 2);
    /// assert_eq!(snapshot.values, Some(vec![1, 2]));
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot {
            format_version: SNAPSHOT_VERSION,
            len: self.len(),
            values: if self.is_empty() {
                None
            } else {
                Some(self.iter().cloned().collect())
            },
        }
    }

    /// Builds a list by replaying a snapshot's values, in order, through
    /// [`add`](SkipList::add). An empty snapshot produces an empty list.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the format version is unknown.
    /// - [`Error::MissingData`] if `len > 0` but the payload is absent or
    ///   shorter than declared.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_list::SkipList;
    ///
    /// let list = SkipList::from([3, 1, 2]);
    /// let restored = SkipList::from_snapshot(list.snapshot()).unwrap();
    /// assert_eq!(restored, list);
    /// ```
    pub fn from_snapshot(snapshot: Snapshot<T>) -> Result<Self, Error> {
        if snapshot.format_version != SNAPSHOT_VERSION {
            return Err(Error::InvalidArgument("unknown snapshot format version"));
        }

        let mut list = Self::new();
        if snapshot.len == 0 {
            return Ok(list);
        }

        let values = snapshot.values.ok_or(Error::MissingData)?;
        if values.len() != snapshot.len {
            return Err(Error::MissingData);
        }
        for value in values {
            list.add(value);
        }
        Ok(list)
    }
}
