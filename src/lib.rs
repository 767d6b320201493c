//! An ordered list backed by a skip list.
//!
//! This crate provides [`SkipList`], an ordered container that keeps its
//! elements in non-decreasing order (duplicates allowed) with:
//!
//! - [`add`](SkipList::add) / [`remove`](SkipList::remove) /
//!   [`contains`](SkipList::contains) - O(log n) on average
//! - [`get`](SkipList::get) / [`index_of`](SkipList::index_of) /
//!   indexing by [`Rank`] - rank-based access along the bottom chain, O(n)
//! - sorted iteration, plus a detached [`Cursor`] that detects mutation
//!   between steps
//! - a linear [`Snapshot`] export/import for persistence collaborators
//!
//! # Example
//!
//! ```
//! use strata_list::{Rank, SkipList};
//!
//! let mut scores = SkipList::new();
//! scores.add(100);
//! scores.add(85);
//! scores.add(92);
//!
//! // Always sorted.
//! assert_eq!(scores.iter().copied().collect::<Vec<_>>(), [85, 92, 100]);
//!
//! // Membership and rank queries.
//! assert!(scores.contains(&92));
//! assert_eq!(scores.index_of(&100), Some(2));
//! assert_eq!(scores[Rank(0)], 85);
//!
//! // Duplicates are kept.
//! scores.add(92);
//! assert_eq!(scores.len(), 4);
//! ```
//!
//! # Implementation
//!
//! The list is a classic skip list: every element lives on the bottom chain,
//! and each is promoted to higher levels with probability 1/2 per level, so a
//! search can skim across the sparse upper chains before dropping down. All
//! nodes live in an index-addressed arena; forward links are handles and "no
//! successor" is the head sentinel's own handle, which keeps every chain a
//! closed ring and the whole structure free of reference cycles.
//!
//! The level ceiling starts at 1 and grows with `floor(log10(len + 1)) + 1`,
//! so a list only pays for tall head slots once it is large enough to use
//! them. Rank access deliberately carries no per-node width bookkeeping:
//! nodes stay small and indexed reads are linear.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

mod error;
mod rank;
mod raw;

pub mod skip_list;

pub use error::Error;
pub use rank::Rank;
pub use skip_list::{Cursor, SNAPSHOT_VERSION, SkipList, Snapshot};
