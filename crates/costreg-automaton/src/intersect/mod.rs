//! Intersection of cost automata with counter-preserving relabeling.
//!
//! Transitions carrying state-dependent weight are relabeled with unique
//! marker symbols before the product is built, so that after folding all
//! factors each marker still names the factor, real symbol and factor state
//! its weight came from. Unmarking then restores the real symbol and copies
//! the weights onto the product states.

mod intersector;
mod marker;


pub use intersector::CostAutomatonIntersector;
pub use marker::{Marker, MarkerPool};

use costreg_core::Result;

use crate::cost_automaton::CostAutomaton;

/// Intersects `original` with every automaton of `others` using the
/// default [`IntersectionConfig`](costreg_config::IntersectionConfig).
///
/// See [`CostAutomatonIntersector::intersect`].
pub fn intersect_cost_automata(
    original: CostAutomaton,
    others: Vec<CostAutomaton>,
) -> Result<CostAutomaton> {
    CostAutomatonIntersector::new().intersect(original, others)
}
