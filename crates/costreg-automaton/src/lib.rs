//! costreg Automaton - weighted finite automata for scheduling rules
//!
//! Each scheduling rule is authored as its own small automaton over a
//! fixed-length word (one symbol per layer). Soft rules carry one or more
//! [`Counter`]s assigning an integer weight to every `(layer, symbol[, state])`
//! triple; the accumulated weight of an accepted word is judged by the
//! counter's [`SoftBounds`](costreg_core::SoftBounds).
//!
//! - [`Automaton`]: the deterministic labeled transition system
//! - [`Counter`], [`LayerMajorCounter`], [`StateMajorCounter`], [`NamedCounter`]
//! - [`CostAutomaton`]: an automaton plus its ordered counters
//! - [`CostAutomatonIntersector`]: folds several cost automata into one,
//!   re-expressing state-dependent weights over the product states

pub mod automaton;
pub mod cost_automaton;
pub mod counter;
pub mod intersect;

pub use automaton::{Automaton, Transition};
pub use cost_automaton::CostAutomaton;
pub use counter::{Counter, LayerMajorCounter, NamedCounter, StateMajorCounter, WeightTable};
pub use intersect::{intersect_cost_automata, CostAutomatonIntersector};
