//! Error types for costreg

use thiserror::Error;

use crate::{StateId, Symbol};

/// Main error type for costreg operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostRegError {
    /// A `(state, symbol)` pair has more than one destination where exactly one was required
    #[error("Non-deterministic transition: state {state} has several successors on symbol {symbol}")]
    NonDeterministic { state: StateId, symbol: Symbol },

    /// Counter and automaton dimensions disagree
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The hard interval is empty
    #[error("Infeasible bounds: min {min} exceeds max {max}")]
    InfeasibleBounds { min: i32, max: i32 },

    /// Bound parameters violate the soft/hard ordering
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Operation not available on this counter layout
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The intersection ran out of marker ids
    #[error("Marker pool exhausted: ceiling {ceiling}, capacity {capacity}")]
    MarkerPoolExhausted { ceiling: Symbol, capacity: u32 },

    /// Invalid operation for the current automaton state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for costreg operations
pub type Result<T> = std::result::Result<T, CostRegError>;
