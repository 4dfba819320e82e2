pub mod balance;
pub mod error;
pub mod iter;
pub mod node;
pub mod outcome;
pub mod tree;
pub mod tree_stats;
pub mod tree_traits;

pub use self::{
    balance::{Avl, Unbalanced},
    error::InvariantViolation,
    iter::Iter,
    node::Node,
    outcome::{OpStats, Outcome, RotationCases},
    tree::SearchTree,
    tree_stats::TreeStats,
    tree_traits::{BalancePolicy, KeyComparator, OrdComparator, Reversed},
};

/// Self-balancing index: heights stay within one of each other at every node.
pub type AvlTree<R, C = OrdComparator<R>> = SearchTree<R, C, Avl>;

/// The unbalanced counterpart, kept for comparing search costs against.
pub type UnbalancedTree<R, C = OrdComparator<R>> = SearchTree<R, C, Unbalanced>;
