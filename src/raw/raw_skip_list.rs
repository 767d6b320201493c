use std::borrow::Borrow;
use std::cmp::Ordering;

use smallvec::SmallVec;
use smallvec::smallvec;

use super::arena::Arena;
use super::handle::Handle;
use super::level::LevelGenerator;
use super::node::Node;

/// Promotion probability for the level oracle.
pub(crate) const P: f64 = 0.5;

/// Level ceiling of a freshly created list. The capacity controller raises it
/// as the list grows; it never comes back down.
pub(crate) const INITIAL_CEILING: usize = 1;

/// Per-level predecessor set produced by a search: `preds[i]` is the last
/// node strictly before the target at level `i`.
type Predecessors = SmallVec<[Handle; 12]>;

/// The core skip-list implementation backing `SkipList`.
///
/// All nodes live in an arena and link to each other by handle; each level's
/// chain is a closed ring through the head sentinel. Searches run top-down,
/// mutations splice, and a monotonic mutation counter lets detached cursors
/// detect structural changes.
#[derive(Clone)]
pub(crate) struct RawSkipList<T> {
    /// Arena owning the head sentinel and every element node.
    nodes: Arena<Node<T>>,
    /// Handle of the head sentinel (always the arena's first slot).
    head: Handle,
    /// Number of element nodes.
    len: usize,
    /// Highest level currently in active use, `>= 1`.
    level: usize,
    /// Capacity of the head's link array; upper bound on any node height.
    ceiling: usize,
    /// Bumped on every structural mutation; gates cursor validity.
    mutations: u64,
    /// Randomized height selection, per-list state.
    levels: LevelGenerator,
}

impl<T> RawSkipList<T> {
    pub(crate) fn new() -> Self {
        Self::with_levels(LevelGenerator::new(P))
    }

    pub(crate) fn seeded(seed: u64) -> Self {
        Self::with_levels(LevelGenerator::seeded(P, seed))
    }

    fn with_levels(levels: LevelGenerator) -> Self {
        let mut nodes = Arena::new();
        // The head is always the arena's first allocation, so its handle is
        // known before the node exists and its links can close onto itself.
        let head = Handle::from_index(0);
        let allocated = nodes.alloc(Node::head(INITIAL_CEILING, head));
        debug_assert_eq!(allocated, head);
        Self {
            nodes,
            head,
            len: 0,
            level: 1,
            ceiling: INITIAL_CEILING,
            mutations: 0,
            levels,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Highest level in active use.
    pub(crate) const fn level(&self) -> usize {
        self.level
    }

    /// Current capacity of the head's link array.
    pub(crate) const fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Current value of the mutation counter.
    pub(crate) const fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Handle of the head sentinel; iteration terminates when it comes back
    /// around to this handle.
    pub(crate) const fn head(&self) -> Handle {
        self.head
    }

    /// First element handle in level-0 order, or the head when empty.
    pub(crate) fn first(&self) -> Handle {
        self.nodes.get(self.head).forward(0)
    }

    /// Level-0 successor of an element handle.
    pub(crate) fn next(&self, handle: Handle) -> Handle {
        self.nodes.get(handle).forward(0)
    }

    /// Value of an element handle.
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.nodes.get(handle).value()
    }

    /// Removes every element. The active level drops back to 1; the ceiling
    /// keeps whatever capacity growth has earned.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        let head = self.head;
        let allocated = self.nodes.alloc(Node::head(self.ceiling, head));
        debug_assert_eq!(allocated, head);
        self.len = 0;
        self.level = 1;
        self.mutations += 1;
    }

    /// Drains all values in level-0 order by walking the chain; the structure
    /// is left empty. O(n), no per-element searching.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut current = self.first();
        while current != self.head {
            let node = self.nodes.take(current);
            current = node.forward(0);
            values.push(node.into_value());
        }
        self.clear();
        values
    }
}

impl<T: Ord> RawSkipList<T> {
    /// Top-down search for `target`, recording the last strictly-smaller node
    /// at every active level.
    ///
    /// The walk starts at the head on the highest active level, advances
    /// while the next node compares strictly less, then drops a level from
    /// the same position; it never resets to the head. The node after
    /// `preds[0]` at level 0 is the candidate: the first node not less than
    /// the target.
    fn find_predecessors<Q>(&self, target: &Q) -> Predecessors
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut preds: Predecessors = smallvec![self.head; self.level];
        let mut current = self.head;
        for level in (0..self.level).rev() {
            loop {
                let next = self.nodes.get(current).forward(level);
                if next == self.head || self.nodes.get(next).value().borrow() >= target {
                    break;
                }
                current = next;
            }
            preds[level] = current;
        }
        preds
    }

    /// The node after the level-0 predecessor: the first node whose value is
    /// not less than the target, or the head when every value is smaller.
    fn candidate(&self, preds: &Predecessors) -> Handle {
        self.nodes.get(preds[0]).forward(0)
    }

    pub(crate) fn contains<Q>(&self, target: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let preds = self.find_predecessors(target);
        let candidate = self.candidate(&preds);
        candidate != self.head && self.nodes.get(candidate).value().borrow() == target
    }

    /// Inserts `value`, keeping duplicates and placing the new node
    /// immediately before the first existing node not less than it; among
    /// equals, the newest insertion comes first in traversal order.
    pub(crate) fn insert(&mut self, value: T) {
        let preds = self.find_predecessors(&value);

        // The height is drawn (and clamped) before any link slot exists, and
        // splicing starts only once both the predecessor set and the height
        // are final.
        let height = self.levels.height(self.level, self.ceiling);
        let node = self.nodes.alloc(Node::element(value, height, self.head));

        for level in 0..height {
            // A node opening a level above the active ones hangs directly
            // off the head there.
            let pred = if level < self.level { preds[level] } else { self.head };
            let next = self.nodes.get(pred).forward(level);
            self.nodes.get_mut(node).set_forward(level, next);
            self.nodes.get_mut(pred).set_forward(level, node);
        }

        self.level = self.level.max(height);
        self.len += 1;
        self.mutations += 1;
        self.grow_ceiling();
    }

    /// Removes the first node comparing equal to `target` and returns its
    /// value, or `None` (and no structural change) when absent.
    pub(crate) fn remove<Q>(&mut self, target: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let preds = self.find_predecessors(target);
        let candidate = self.candidate(&preds);
        if candidate == self.head || self.nodes.get(candidate).value().borrow() != target {
            return None;
        }

        let height = self.nodes.get(candidate).height();
        for level in 0..height {
            // Only redirect predecessors that actually link to the victim.
            if self.nodes.get(preds[level]).forward(level) == candidate {
                let next = self.nodes.get(candidate).forward(level);
                self.nodes.get_mut(preds[level]).set_forward(level, next);
            }
        }

        self.len -= 1;
        self.mutations += 1;
        // Unlinked at every level above; only now is the node reclaimed.
        Some(self.nodes.take(candidate).into_value())
    }

    /// Value at the given rank, by walking `rank + 1` steps along level 0.
    ///
    /// O(n) by design: the list keeps no per-node width bookkeeping, trading
    /// indexed-access speed for leaner nodes.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        if rank >= self.len {
            return None;
        }
        let mut current = self.head;
        for _ in 0..=rank {
            current = self.nodes.get(current).forward(0);
        }
        Some(self.nodes.get(current).value())
    }

    /// Rank of the first element comparing equal to `target`, or `None`.
    /// Linear, like all rank operations here.
    pub(crate) fn rank_of<Q>(&self, target: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.first();
        let mut rank = 0;
        while current != self.head {
            match self.nodes.get(current).value().borrow().cmp(target) {
                Ordering::Less => {
                    current = self.nodes.get(current).forward(0);
                    rank += 1;
                }
                Ordering::Equal => return Some(rank),
                // Sorted order: once past the target it cannot appear later.
                Ordering::Greater => return None,
            }
        }
        None
    }

    /// Raises the ceiling to `floor(log10(len + 1)) + 1` (the decimal digit
    /// count of `len + 1`) when the list has outgrown it. New head slots
    /// start as closed rings; existing node heights are untouched, so the
    /// extra levels only open up to future inserts.
    fn grow_ceiling(&mut self) {
        let desired = digits(self.len + 1);
        if desired > self.ceiling {
            let head = self.head;
            self.nodes.get_mut(head).grow(desired, head);
            self.ceiling = desired;
        }
    }
}

/// Number of decimal digits of `n` (`n >= 1`).
fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
