use smallvec::SmallVec;
use smallvec::smallvec;

use super::handle::Handle;

/// Inline capacity for a node's forward links. With promotion probability
/// 1/2, heights above four occur for roughly one node in sixteen, so most
/// nodes avoid a heap allocation for their link array.
const INLINE_LINKS: usize = 4;

/// A single skip-list node: one value plus one forward link per level the
/// node participates in.
///
/// Links are arena handles. A link equal to the head's handle means "no
/// successor at this level"; the chains are closed rings through the head
/// sentinel, never `None`.
pub(crate) struct Node<T> {
    /// `None` only for the head sentinel.
    value: Option<T>,
    forward: SmallVec<[Handle; INLINE_LINKS]>,
}

impl<T> Node<T> {
    /// Creates the head sentinel with `ceiling` link slots, all pointing at
    /// `head` (its own handle).
    pub(crate) fn head(ceiling: usize, head: Handle) -> Self {
        Self {
            value: None,
            forward: smallvec![head; ceiling],
        }
    }

    /// Creates an element node of the given height with every link closed
    /// onto `head`; the splice loop redirects them afterwards.
    ///
    /// Height is fixed for the node's lifetime.
    pub(crate) fn element(value: T, height: usize, head: Handle) -> Self {
        assert!(height >= 1, "`Node::element()` - `height` must be at least 1!");
        Self {
            value: Some(value),
            forward: smallvec![head; height],
        }
    }

    /// Number of levels this node participates in.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub(crate) fn forward(&self, level: usize) -> Handle {
        self.forward[level]
    }

    #[inline]
    pub(crate) fn set_forward(&mut self, level: usize, next: Handle) {
        self.forward[level] = next;
    }

    /// Returns the value, panicking on the head sentinel.
    #[inline]
    pub(crate) fn value(&self) -> &T {
        self.value.as_ref().expect("`Node::value()` - the head sentinel holds no value!")
    }

    /// Consumes the node, panicking on the head sentinel.
    pub(crate) fn into_value(self) -> T {
        self.value.expect("`Node::into_value()` - the head sentinel holds no value!")
    }

    /// Appends link slots up to `target` levels, each pointing at `fill`.
    /// Only ever called on the head sentinel; element heights are immutable.
    pub(crate) fn grow(&mut self, target: usize, fill: Handle) {
        debug_assert!(self.value.is_none(), "`Node::grow()` - element heights are immutable!");
        while self.forward.len() < target {
            self.forward.push(fill);
        }
    }
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            forward: self.forward.clone(),
        }
    }
}
