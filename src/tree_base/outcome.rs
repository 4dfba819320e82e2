use std::ops;

use bitmask_enum::bitmask;

/// Which of the four rebalancing cases fired during one operation.
#[bitmask(u8)]
pub enum RotationCases {
    Untouched = 0,
    LeftLeft = 1,
    RightRight = 2,
    LeftRight = 4,
    RightLeft = 8,
}

/// Counters accumulated over a single call. Nothing here is global: every
/// operation starts from zero and hands its totals back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpStats {
    pub comparisons: u64,
    pub rotations: u32,
    pub cases: RotationCases,
}

impl OpStats {
    pub fn new() -> Self {
        Self {
            comparisons: 0,
            rotations: 0,
            cases: RotationCases::Untouched,
        }
    }

    #[inline]
    pub(crate) fn compared(&mut self) {
        self.comparisons += 1;
    }

    /// Record one rebalancing case. Double rotations count as two.
    pub(crate) fn rebalanced(&mut self, case: RotationCases) {
        self.cases = self.cases | case;
        self.rotations += if case.intersects(RotationCases::LeftRight | RotationCases::RightLeft) {
            2
        } else {
            1
        };
    }

    pub fn has(&self, case: RotationCases) -> bool {
        self.cases.contains(case)
    }
}

impl Default for OpStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ops::AddAssign<OpStats> for OpStats {
    fn add_assign(&mut self, rhs: OpStats) {
        self.comparisons += rhs.comparisons;
        self.rotations += rhs.rotations;
        self.cases = self.cases | rhs.cases;
    }
}

/// The result of one tree operation together with what it cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub stats: OpStats,
}

impl<T> Outcome<T> {
    pub fn new(value: T, stats: OpStats) -> Self {
        Self { value, stats }
    }

    #[inline]
    pub fn comparisons(&self) -> u64 {
        self.stats.comparisons
    }

    #[inline]
    pub fn rotations(&self) -> u32 {
        self.stats.rotations
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            stats: self.stats,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
