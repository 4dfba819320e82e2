use std::cmp::Ordering;

use super::{
    node::{rotate_left, rotate_right, Node},
    outcome::{OpStats, RotationCases},
    tree_traits::BalancePolicy,
};

/// Height-balanced: every node keeps `|bf| <= 1` after each operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

/// Plain binary search tree. Heights are still cached so the tree can report
/// how deep it has grown, but nothing is ever rotated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Avl {
    fn apply<R>(mut node: Box<Node<R>>, case: RotationCases, stats: &mut OpStats) -> Box<Node<R>> {
        log::debug!(
            "AvlTree::rebalance {:?} at height {} balance {}",
            case,
            node.height,
            node.balance_factor()
        );
        stats.rebalanced(case);

        if case == RotationCases::LeftLeft {
            rotate_right(node)
        } else if case == RotationCases::RightRight {
            rotate_left(node)
        } else if case == RotationCases::LeftRight {
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        } else {
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
    }

    fn child_balance<R>(child: &Option<Box<Node<R>>>) -> isize {
        child.as_ref().map_or(0, |c| c.balance_factor())
    }
}

impl BalancePolicy for Avl {
    const NAME: &'static str = "AvlTree";
    const KEEPS_BALANCE: bool = true;

    /// A single insert leaves an imbalance of exactly two, on the side the
    /// descent took. Which grandchild grew is the direction the insert went
    /// at that child, so the case falls out of `toward` without comparing
    /// again. The child's lean gives the same answer when no direction is
    /// known.
    fn after_insert<R>(
        node: Box<Node<R>>,
        toward: Option<Ordering>,
        stats: &mut OpStats,
    ) -> Box<Node<R>> {
        let bf = node.balance_factor();
        if bf > 1 {
            let toward = toward.unwrap_or(if Self::child_balance(&node.left) >= 0 {
                Ordering::Less
            } else {
                Ordering::Greater
            });
            let case = if toward == Ordering::Greater {
                RotationCases::LeftRight
            } else {
                RotationCases::LeftLeft
            };
            return Self::apply(node, case, stats);
        }
        if bf < -1 {
            let toward = toward.unwrap_or(if Self::child_balance(&node.right) > 0 {
                Ordering::Less
            } else {
                Ordering::Greater
            });
            let case = if toward == Ordering::Less {
                RotationCases::RightLeft
            } else {
                RotationCases::RightRight
            };
            return Self::apply(node, case, stats);
        }
        node
    }

    /// After a removal the shorter side may be either child's doing, so the
    /// case is read from the heavy child's own balance factor.
    fn after_remove<R>(node: Box<Node<R>>, stats: &mut OpStats) -> Box<Node<R>> {
        let bf = node.balance_factor();
        if bf > 1 {
            let case = if Self::child_balance(&node.left) >= 0 {
                RotationCases::LeftLeft
            } else {
                RotationCases::LeftRight
            };
            return Self::apply(node, case, stats);
        }
        if bf < -1 {
            let case = if Self::child_balance(&node.right) <= 0 {
                RotationCases::RightRight
            } else {
                RotationCases::RightLeft
            };
            return Self::apply(node, case, stats);
        }
        node
    }
}

impl BalancePolicy for Unbalanced {
    const NAME: &'static str = "UnbalancedTree";
    const KEEPS_BALANCE: bool = false;

    #[inline]
    fn after_insert<R>(
        node: Box<Node<R>>,
        _toward: Option<Ordering>,
        _stats: &mut OpStats,
    ) -> Box<Node<R>> {
        node
    }

    #[inline]
    fn after_remove<R>(node: Box<Node<R>>, _stats: &mut OpStats) -> Box<Node<R>> {
        node
    }
}
