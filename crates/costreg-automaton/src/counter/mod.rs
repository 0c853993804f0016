//! Counters: integer weights accumulated along the words of an automaton.
//!
//! # Architecture
//!
//! - [`Counter`]: the shared contract, used as `Box<dyn Counter>`
//! - [`LayerMajorCounter`]: `[layer][symbol][state]` storage, always
//!   state-dependent, supports weight replacement
//! - [`StateMajorCounter`]: `[state][layer][symbol]` storage, state-dependent
//!   only with more than one state, read-only weights
//! - [`NamedCounter`]: a counter with a display name and objective coefficient
//! - [`WeightTable`] and the `*_table` builders for dense weight grids

mod layer_major;
mod named;
mod state_major;
mod table;


use std::fmt;

use costreg_core::{CostRegError, Result, SoftBounds, StateId, Symbol, Weight};

pub use layer_major::LayerMajorCounter;
pub use named::NamedCounter;
pub use state_major::StateMajorCounter;
pub use table::{continuous_table, global_table, layers_table, periodic_table, WeightTable};

/// Weights on `(layer, symbol[, state])` triples plus the bounds judging
/// their sum along a word.
///
/// Both layouts are interchangeable through this trait. Coordinates outside
/// the counter's shape read as weight 0.
///
/// # Implementation Notes
///
/// - `weight(layer, symbol)` is the weight seen from state 0
/// - A counter that is not state-dependent answers every state alike
/// - `set_weights` may be refused with `UnsupportedOperation`
pub trait Counter: fmt::Debug + Send + Sync {
    fn bounds(&self) -> &SoftBounds;

    /// Weight of `symbol` read at `layer`, ignoring the origin state.
    fn weight(&self, layer: usize, symbol: Symbol) -> Weight;

    /// Weight of `symbol` read at `layer` from `state`.
    fn weight_at_state(&self, layer: usize, symbol: Symbol, state: StateId) -> Weight;

    fn nb_layers(&self) -> usize;

    fn nb_symbols(&self) -> usize;

    fn nb_states(&self) -> usize;

    /// Whether the weight depends on the origin state.
    fn is_state_dependent(&self) -> bool;

    /// Replaces every weight with `table`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for layouts that cannot be rewritten.
    fn set_weights(&mut self, table: WeightTable) -> Result<()>;

    /// Adds `other`'s weights elementwise.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless layers and symbols agree and, when `other` is
    /// state-dependent, the state counts agree too.
    fn add_weights(&mut self, other: &dyn Counter) -> Result<()>;

    /// Deep copy behind a fresh box.
    fn boxed_clone(&self) -> Box<dyn Counter>;
}

impl Clone for Box<dyn Counter> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Shape check shared by the `add_weights` implementations.
pub(crate) fn check_addable(target: &dyn Counter, other: &dyn Counter) -> Result<()> {
    let states_agree = !other.is_state_dependent() || other.nb_states() == target.nb_states();
    if other.nb_layers() == target.nb_layers()
        && other.nb_symbols() == target.nb_symbols()
        && states_agree
    {
        Ok(())
    } else {
        Err(CostRegError::ShapeMismatch(format!(
            "cannot add a {}x{}x{} counter to a {}x{}x{} counter",
            other.nb_layers(),
            other.nb_symbols(),
            other.nb_states(),
            target.nb_layers(),
            target.nb_symbols(),
            target.nb_states()
        )))
    }
}
