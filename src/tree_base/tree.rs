use std::{cmp::Ordering, fmt, marker::PhantomData, mem};

use super::{
    error::InvariantViolation,
    iter::{drain_in_order, Iter},
    node::{height, release_subtree, Link, Node},
    outcome::{OpStats, Outcome},
    tree_stats::TreeStats,
    tree_traits::{BalancePolicy, KeyComparator, OrdComparator},
};

/// A binary search tree over opaque records ordered by an injected comparator.
///
/// Every operation reports the number of comparator invocations it performed.
/// The balance policy `B` decides whether nodes are rotated on the way back up
/// (see [`super::AvlTree`] and [`super::UnbalancedTree`]).
pub struct SearchTree<R, C, B> {
    root: Link<R>,
    stats: TreeStats,
    key_comp: C,
    self_verify: bool,
    _policy: PhantomData<B>,
}

/// Where a keyed descent ended: the turn taken at every node passed on the
/// way, and whether the last node visited compared equal.
struct Path {
    turns: Vec<Ordering>,
    found: bool,
}

impl<R: Ord, B: BalancePolicy> SearchTree<R, OrdComparator<R>, B> {
    pub fn new() -> Self {
        Self::with_comparator(OrdComparator::new())
    }
}

impl<R: Ord, B: BalancePolicy> Default for SearchTree<R, OrdComparator<R>, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Construction and access functions
impl<R, C: KeyComparator<R>, B: BalancePolicy> SearchTree<R, C, B> {
    pub fn with_comparator(key_comp: C) -> Self {
        Self {
            root: None,
            stats: TreeStats::new(),
            key_comp,
            self_verify: false,
            _policy: PhantomData,
        }
    }

    pub fn key_comp(&self) -> &C {
        &self.key_comp
    }

    /// Re-check every invariant after each mutation (debug builds only).
    pub fn set_self_verify(&mut self, on: bool) {
        self.self_verify = on;
    }

    pub fn len(&self) -> usize {
        self.stats.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree; 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    pub fn root(&self) -> Option<&R> {
        self.root.as_ref().map(|n| &n.record)
    }

    pub fn root_node(&self) -> Option<&Node<R>> {
        self.root.as_deref()
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    pub fn clear(&mut self) {
        let released = release_subtree(self.root.take());
        log::debug!("{}::clear released {} nodes", B::NAME, released);
        self.stats.size = 0;
    }

    fn after_mutation(&mut self, stats: &OpStats) {
        self.stats.absorb(stats);
        if self.self_verify {
            debug_assert_eq!(self.verify(), Ok(()));
        }
    }
}

/// Insertion
impl<R, C: KeyComparator<R>, B: BalancePolicy> SearchTree<R, C, B> {
    /// Insert `record` unless a record comparing equal is already present, in
    /// which case the tree is left untouched. Returns whether it was inserted.
    pub fn insert(&mut self, record: R) -> Outcome<bool> {
        let mut stats = OpStats::new();
        let key_comp = &self.key_comp;
        let path = self.trace(|r| key_comp.compare(&record, r), &mut stats);

        let inserted = !path.found;
        if inserted {
            self.graft(&path.turns, record, &mut stats);
            self.stats.size += 1;
        } else {
            log::debug!(
                "{}::insert duplicate suppressed at depth {}",
                B::NAME,
                path.turns.len()
            );
        }
        self.stats.inserts += 1;
        self.after_mutation(&stats);

        Outcome::new(inserted, stats)
    }

    /// Hang `record` as a leaf at the end of `turns`, then fix heights and
    /// balance from the bottom up. Each ancestor is told which way the descent
    /// went at its child on the path; the new leaf's parent is told nothing.
    fn graft(&mut self, turns: &[Ordering], record: R, stats: &mut OpStats) {
        let (spine, _) = self.unzip(turns);
        let mut below = Node::new_leaf(record);
        let mut toward = None;

        for (mut node, &side) in spine.into_iter().zip(turns).rev() {
            Self::attach(&mut node, side, Some(below));
            node.update_height();
            below = B::after_insert(node, toward, stats);
            toward = Some(side);
        }

        self.root = Some(below);
    }
}

/// Descent
impl<R, C, B: BalancePolicy> SearchTree<R, C, B> {
    /// Walk down steered by `locate`, one counted comparison per node, without
    /// touching the tree. All caller code an operation runs happens here, so a
    /// panicking comparator leaves every node where it was.
    fn trace<F>(&self, mut locate: F, stats: &mut OpStats) -> Path
    where
        F: FnMut(&R) -> Ordering,
    {
        let mut turns = Vec::new();
        let mut link = &self.root;

        while let Some(n) = link {
            stats.compared();
            let ord = locate(&n.record);
            match ord {
                Ordering::Equal => return Path { turns, found: true },
                Ordering::Less => link = &n.left,
                Ordering::Greater => link = &n.right,
            }
            turns.push(ord);
        }

        Path {
            turns,
            found: false,
        }
    }

    /// Detach the nodes along `turns`, each with its child on the path taken
    /// out, root first. Also returns whatever hung below the last of them.
    fn unzip(&mut self, turns: &[Ordering]) -> (Vec<Box<Node<R>>>, Link<R>) {
        let mut spine = Vec::with_capacity(turns.len());
        let mut link = self.root.take();

        for &side in turns {
            let Some(mut n) = link.take() else {
                break;
            };
            link = if side == Ordering::Less {
                n.left.take()
            } else {
                n.right.take()
            };
            spine.push(n);
        }

        (spine, link)
    }

    #[inline]
    fn attach(node: &mut Node<R>, side: Ordering, child: Link<R>) {
        if side == Ordering::Less {
            node.left = child;
        } else {
            node.right = child;
        }
    }
}

/// Lookup
impl<R, C: KeyComparator<R>, B: BalancePolicy> SearchTree<R, C, B> {
    pub fn search(&self, probe: &R) -> Outcome<bool> {
        self.get(probe).map(|r| r.is_some())
    }

    pub fn get(&self, probe: &R) -> Outcome<Option<&R>> {
        let key_comp = &self.key_comp;
        self.get_with(|r| key_comp.compare(probe, r))
    }

    pub fn search_with<F>(&self, locate: F) -> Outcome<bool>
    where
        F: FnMut(&R) -> Ordering,
    {
        self.get_with(locate).map(|r| r.is_some())
    }

    /// Walk down steered by `locate`, which answers how the sought key orders
    /// against the record at hand. Each call counts as one comparison.
    pub fn get_with<F>(&self, mut locate: F) -> Outcome<Option<&R>>
    where
        F: FnMut(&R) -> Ordering,
    {
        let mut stats = OpStats::new();
        let mut link = &self.root;

        while let Some(n) = link {
            stats.compared();
            match locate(&n.record) {
                Ordering::Equal => return Outcome::new(Some(&n.record), stats),
                Ordering::Less => link = &n.left,
                Ordering::Greater => link = &n.right,
            }
        }

        Outcome::new(None, stats)
    }
}

/// Removal
impl<R, C: KeyComparator<R>, B: BalancePolicy> SearchTree<R, C, B> {
    /// Remove the record comparing equal to `probe` and hand it back.
    pub fn remove(&mut self, probe: &R) -> Outcome<Option<R>> {
        let key_comp = &self.key_comp;
        let mut stats = OpStats::new();
        let path = self.trace(|r| key_comp.compare(probe, r), &mut stats);
        self.finish_remove(path, stats)
    }

    pub fn remove_with<F>(&mut self, locate: F) -> Outcome<Option<R>>
    where
        F: FnMut(&R) -> Ordering,
    {
        let mut stats = OpStats::new();
        let path = self.trace(locate, &mut stats);
        self.finish_remove(path, stats)
    }

    fn finish_remove(&mut self, path: Path, mut stats: OpStats) -> Outcome<Option<R>> {
        let removed = if path.found {
            self.unlink(&path.turns, &mut stats)
        } else {
            None
        };
        if removed.is_some() {
            self.stats.size -= 1;
        }
        self.stats.removals += 1;
        self.after_mutation(&stats);

        Outcome::new(removed, stats)
    }

    /// Take out the node at the end of `turns` and rebalance every ancestor on
    /// the way back up.
    fn unlink(&mut self, turns: &[Ordering], stats: &mut OpStats) -> Option<R> {
        let (spine, target) = self.unzip(turns);
        let (mut below, removed) = match target {
            Some(node) => {
                let (rest, record) = Self::splice_out(node, stats);
                (rest, Some(record))
            }
            None => (None, None),
        };

        for (mut node, &side) in spine.into_iter().zip(turns).rev() {
            Self::attach(&mut node, side, below);
            node.update_height();
            below = Some(B::after_remove(node, stats));
        }

        self.root = below;
        removed
    }

    /// Replace `node` by what should stand in its place: nothing, its sole
    /// child, or itself carrying its in-order successor's record.
    fn splice_out(mut node: Box<Node<R>>, stats: &mut OpStats) -> (Link<R>, R) {
        match (node.left.take(), node.right.take()) {
            (None, None) => {
                let Node { record, .. } = *node;
                (None, record)
            }
            (Some(child), None) | (None, Some(child)) => {
                let Node { record, .. } = *node;
                (Some(child), record)
            }
            (Some(left), Some(right)) => {
                let (right, successor) = Self::take_min(right, stats);
                log::debug!(
                    "{}::splice_out taking successor at height {}",
                    B::NAME,
                    node.height
                );
                node.left = Some(left);
                node.right = right;
                let record = mem::replace(&mut node.record, successor);
                node.update_height();
                (Some(B::after_remove(node, stats)), record)
            }
        }
    }

    /// Detach the leftmost record of a subtree. Each node on the way costs
    /// one comparison, as a keyed removal of that record would.
    fn take_min(node: Box<Node<R>>, stats: &mut OpStats) -> (Link<R>, R) {
        let mut spine = Vec::new();
        let mut cur = node;
        loop {
            stats.compared();
            match cur.left.take() {
                Some(left) => {
                    spine.push(cur);
                    cur = left;
                }
                None => break,
            }
        }

        let Node { record, right, .. } = *cur;
        let mut below = right;
        while let Some(mut parent) = spine.pop() {
            parent.left = below;
            parent.update_height();
            below = Some(B::after_remove(parent, stats));
        }

        (below, record)
    }
}

/// In-order traversal
impl<R, C, B> SearchTree<R, C, B> {
    pub fn iter(&self) -> Iter<'_, R> {
        Iter::new(&self.root, self.stats.size)
    }

    pub fn in_order(&self) -> Vec<&R> {
        self.iter().collect()
    }

    /// Consume the tree, yielding its records in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<R> {
        let mut out = Vec::with_capacity(self.stats.size);
        drain_in_order(self.root.take(), &mut out);
        self.stats.size = 0;
        out
    }
}

impl<'a, R, C, B> IntoIterator for &'a SearchTree<R, C, B> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Verification
impl<R, C: KeyComparator<R>, B: BalancePolicy> SearchTree<R, C, B> {
    /// Check ordering, cached heights, balance (when the policy keeps it) and
    /// the recorded size. Comparisons made here are not counted anywhere.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let counted = Self::verify_nodes(&self.root)?;
        if counted != self.stats.size {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.stats.size,
                counted,
            });
        }

        let mut prev: Option<&R> = None;
        for (position, r) in self.iter().enumerate() {
            if let Some(p) = prev {
                if self.key_comp.compare(p, r) != Ordering::Less {
                    return Err(InvariantViolation::OutOfOrder { position });
                }
            }
            prev = Some(r);
        }

        Ok(())
    }

    fn verify_nodes(root: &Link<R>) -> Result<usize, InvariantViolation> {
        let mut counted = 0;
        let mut pending: Vec<(&Node<R>, usize)> = root.as_deref().map(|n| (n, 0)).into_iter().collect();

        while let Some((n, depth)) = pending.pop() {
            counted += 1;

            let actual = 1 + height(&n.left).max(height(&n.right));
            if n.height != actual {
                return Err(InvariantViolation::HeightMismatch {
                    depth,
                    cached: n.height,
                    actual,
                });
            }

            let balance = n.balance_factor();
            if B::KEEPS_BALANCE && !(-1..=1).contains(&balance) {
                return Err(InvariantViolation::Unbalanced { depth, balance });
            }

            for child in [n.left.as_deref(), n.right.as_deref()].into_iter().flatten() {
                pending.push((child, depth + 1));
            }
        }

        Ok(counted)
    }
}

impl<R, C, B> Drop for SearchTree<R, C, B> {
    fn drop(&mut self) {
        let released = release_subtree(self.root.take());
        if !std::thread::panicking() {
            debug_assert!(released == self.stats.size);
        }
    }
}

/// Debug
impl<R: fmt::Debug, C, B: BalancePolicy> SearchTree<R, C, B> {
    fn print_nodes(f: &mut fmt::Formatter<'_>, root: &Link<R>) -> fmt::Result {
        let mut pending: Vec<(&Node<R>, usize)> = root.as_deref().map(|n| (n, 0)).into_iter().collect();

        while let Some((n, depth)) = pending.pop() {
            for _ in 0..depth {
                write!(f, "  ")?;
            }
            writeln!(
                f,
                "{:?} height {} balance {}",
                n.record,
                n.height,
                n.balance_factor()
            )?;

            if let Some(r) = n.right.as_deref() {
                pending.push((r, depth + 1));
            }
            if let Some(l) = n.left.as_deref() {
                pending.push((l, depth + 1));
            }
        }

        Ok(())
    }
}

impl<R: fmt::Debug, C, B: BalancePolicy> fmt::Debug for SearchTree<R, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} size {}", B::NAME, self.stats.size)?;
        Self::print_nodes(f, &self.root)
    }
}
