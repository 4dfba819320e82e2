use super::outcome::OpStats;

/// Running totals over the lifetime of a tree. Only mutating operations are
/// folded in; searches borrow the tree immutably and report per call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    pub inserts: u64,
    pub removals: u64,
    pub comparisons: u64,
    pub rotations: u64,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn absorb(&mut self, op: &OpStats) {
        self.comparisons += op.comparisons;
        self.rotations += op.rotations as u64;
    }

    pub fn mutations(&self) -> u64 {
        self.inserts + self.removals
    }

    pub fn avg_comparisons(&self) -> f64 {
        if self.mutations() == 0 {
            return 0.0;
        }
        self.comparisons as f64 / self.mutations() as f64
    }
}

#[cfg(test)]
#[test]
fn test_tree_stats_average() {
    let mut stats = TreeStats::new();
    assert_eq!(stats.avg_comparisons(), 0.0);

    let mut op = OpStats::new();
    op.comparisons = 6;
    stats.absorb(&op);
    stats.inserts += 2;
    stats.removals += 1;

    assert_eq!(stats.mutations(), 3);
    assert_eq!(stats.avg_comparisons(), 2.0);
}
