//! costreg Core - penalty algebra and soft bounds for weighted automata
//!
//! This crate provides the leaf abstractions shared by every costreg crate:
//! - [`PenaltyFunction`]: monotone `value -> cost` shapes with fast-path predicates
//! - [`SoftBounds`]: hard and preferred limits on an accumulated counter value
//! - [`CostRegError`]: the error type returned by every fallible operation

pub mod bounds;
pub mod error;
pub mod penalty;

pub use bounds::SoftBounds;
pub use error::{CostRegError, Result};
pub use penalty::{Penalty, PenaltyFunction, INFINITE_PENALTY};

/// A letter of an automaton alphabet.
///
/// Real symbols are small dense integers; the top of the range is reserved
/// for the transient marker ids issued during intersection.
pub type Symbol = u32;

/// A dense automaton state identifier in `0..nb_states`.
pub type StateId = usize;

/// An integer weight attached to a `(layer, symbol[, state])` triple.
pub type Weight = i32;
