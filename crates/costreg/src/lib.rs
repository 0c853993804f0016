//! costreg - weighted automata and soft bounds for scheduling rules
//!
//! Each rule of an employee contract is written as a small automaton whose
//! counters weigh the symbols of a fixed-length word. The rules are then
//! intersected into a single automaton that keeps every counter exact.
//!
//! # Example
//!
//! ```rust
//! use costreg::prelude::*;
//!
//! // at most one night shift (symbol 1) over two days
//! let mut days = Automaton::with_states(3);
//! days.set_initial_state(0).unwrap();
//! days.set_final(2).unwrap();
//! days.add_transitions(0, 1, &[0, 1]).unwrap();
//! days.add_transitions(1, 2, &[0, 1]).unwrap();
//!
//! let nights = NamedCounter::global_shift(2, 2, &[1], 1, SoftBounds::hard(0, 1).unwrap(), 1).unwrap();
//! let rule = CostAutomaton::with_counters(days, vec![Box::new(nights)]).unwrap();
//!
//! assert_eq!(rule.counters()[0].bounds().penalty(2), INFINITE_PENALTY);
//! ```

pub mod console;

// Penalty algebra and bounds
pub use costreg_core::{
    CostRegError, Penalty, PenaltyFunction, Result, SoftBounds, StateId, Symbol, Weight,
    INFINITE_PENALTY,
};

// Automata, counters and intersection
pub use costreg_automaton::{
    intersect_cost_automata, Automaton, CostAutomaton, CostAutomatonIntersector, Counter,
    LayerMajorCounter, NamedCounter, StateMajorCounter, Transition, WeightTable,
};
pub use costreg_automaton::counter::{continuous_table, global_table, layers_table, periodic_table};

// Configuration
pub use costreg_config::{ConfigError, CostRegConfig, IntersectionConfig};

/// Builds an intersector from the `intersection` section of `config`.
pub fn intersector(config: &CostRegConfig) -> CostAutomatonIntersector {
    CostAutomatonIntersector::with_config(config.intersection)
}

pub mod prelude {
    pub use super::{
        intersect_cost_automata, Automaton, CostAutomaton, CostAutomatonIntersector, Counter,
        LayerMajorCounter, NamedCounter, StateMajorCounter, WeightTable,
    };
    pub use super::{Penalty, PenaltyFunction, SoftBounds, INFINITE_PENALTY};
    pub use super::{CostRegConfig, IntersectionConfig};
}
