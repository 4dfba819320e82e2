use std::{cmp::Ordering, fmt::Debug, marker::PhantomData};

use super::{node::Node, outcome::OpStats};

// Traits bound
pub trait KeyComparator<R> {
    fn compare(&self, lhs: &R, rhs: &R) -> Ordering;
}

impl<R, F> KeyComparator<R> for F
where
    F: Fn(&R, &R) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &R, rhs: &R) -> Ordering {
        self(lhs, rhs)
    }
}

/// Orders records by their `Ord` implementation.
#[derive(Clone, Debug)]
pub struct OrdComparator<R> {
    _r: PhantomData<fn(&R)>,
}

impl<R> OrdComparator<R> {
    pub fn new() -> Self {
        Self { _r: PhantomData }
    }
}

impl<R> Default for OrdComparator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Ord> KeyComparator<R> for OrdComparator<R> {
    #[inline]
    fn compare(&self, lhs: &R, rhs: &R) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Flips any comparator, turning an ascending index into a descending one.
#[derive(Clone, Debug, Default)]
pub struct Reversed<C>(pub C);

impl<R, C: KeyComparator<R>> KeyComparator<R> for Reversed<C> {
    #[inline]
    fn compare(&self, lhs: &R, rhs: &R) -> Ordering {
        self.0.compare(rhs, lhs)
    }
}

/// The one seam between the balanced and the unbalanced tree: what happens to
/// a node on the way back up from an insert or a removal.
pub trait BalancePolicy: Debug {
    const NAME: &'static str;
    /// Whether `verify()` holds this tree to the AVL balance bound.
    const KEEPS_BALANCE: bool;

    /// `toward` is the direction the insert took at the child on the path,
    /// when the descent went through one.
    fn after_insert<R>(
        node: Box<Node<R>>,
        toward: Option<Ordering>,
        stats: &mut OpStats,
    ) -> Box<Node<R>>;

    fn after_remove<R>(node: Box<Node<R>>, stats: &mut OpStats) -> Box<Node<R>>;
}
