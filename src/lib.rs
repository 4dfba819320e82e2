//! Binary search tree indexes that count their comparisons.
//!
//! [`AvlTree`] is a self-balancing tree keyed by a caller-supplied total
//! order over opaque records. Every insert, search and removal hands back an
//! [`Outcome`] carrying how many times the order was consulted and which
//! rotations ran, so callers can measure the structure instead of timing it.
//! [`UnbalancedTree`] is the same tree with rebalancing switched off, and
//! [`AvlMap`] is a key/value facade over the balanced one.
//!
//! ```
//! use avl_index::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [1, 2, 3, 4, 5] {
//!     tree.insert(k);
//! }
//! assert_eq!(tree.height(), 3);
//!
//! let hit = tree.search(&4);
//! assert!(hit.value);
//! assert_eq!(hit.comparisons(), 2);
//! ```

pub mod avl_map;
pub mod tree_base;

pub use crate::{
    avl_map::AvlMap,
    tree_base::{
        AvlTree, InvariantViolation, KeyComparator, OpStats, OrdComparator, Outcome, Reversed,
        RotationCases, SearchTree, TreeStats, UnbalancedTree,
    },
};
