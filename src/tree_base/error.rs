use thiserror::Error;

/// A broken structural invariant, as reported by `verify()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("records out of order at in-order position {position}")]
    OutOfOrder { position: usize },
    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced { depth: usize, balance: isize },
    #[error("node at depth {depth} caches height {cached} but measures {actual}")]
    HeightMismatch {
        depth: usize,
        cached: usize,
        actual: usize,
    },
    #[error("tree records size {recorded} but holds {counted} nodes")]
    SizeMismatch { recorded: usize, counted: usize },
}
