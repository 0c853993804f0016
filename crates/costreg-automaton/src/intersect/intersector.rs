//! Product construction over marked factors.

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use tracing::{debug, info};

use costreg_config::IntersectionConfig;
use costreg_core::{CostRegError, Result, StateId};

use super::marker::MarkerPool;
use crate::automaton::Automaton;
use crate::cost_automaton::CostAutomaton;
use crate::counter::{Counter, LayerMajorCounter};

/// Folds several cost automata into one whose words are the words accepted
/// by every factor, keeping every counter of every factor.
///
/// State-independent counters carry over untouched. State-dependent
/// counters are rewritten over the product states: the weight of a product
/// transition is the weight its factor gave the same symbol from the factor
/// state the transition came from.
///
/// # Examples
///
/// ```
/// use costreg_automaton::{Automaton, CostAutomaton, CostAutomatonIntersector};
///
/// // words of length 2 over {0, 1}
/// let mut any = Automaton::with_states(3);
/// any.set_initial_state(0).unwrap();
/// any.set_final(2).unwrap();
/// any.add_transitions(0, 1, &[0, 1]).unwrap();
/// any.add_transitions(1, 2, &[0, 1]).unwrap();
///
/// // words starting with 1
/// let mut starts_with_one = Automaton::with_states(2);
/// starts_with_one.set_initial_state(0).unwrap();
/// starts_with_one.set_final(1).unwrap();
/// starts_with_one.add_transition(0, 1, 1).unwrap();
/// starts_with_one.add_transitions(1, 1, &[0, 1]).unwrap();
///
/// let counted = CostAutomaton::single_dimension(any, vec![vec![0, 1]; 2], 0, 2).unwrap();
/// let product = CostAutomatonIntersector::new()
///     .intersect(counted, vec![CostAutomaton::new(starts_with_one)])
///     .unwrap();
///
/// assert!(product.automaton().accepts(&[1, 0]));
/// assert!(!product.automaton().accepts(&[0, 1]));
/// assert_eq!(product.nb_dimensions(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CostAutomatonIntersector {
    config: IntersectionConfig,
}

/// Factor graphs and counters once marking is done.
struct Factors {
    automata: Vec<Automaton>,
    counters: Vec<Vec<Box<dyn Counter>>>,
}

impl CostAutomatonIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IntersectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntersectionConfig {
        &self.config
    }

    /// Intersects `original` with every automaton of `others`, in order.
    ///
    /// Returns `original` unchanged when `others` is empty. The counters of
    /// the result are those of `original` followed by those of each other
    /// factor.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if a factor has no initial state
    /// - `NonDeterministic` if a factor is not deterministic
    /// - `MarkerPoolExhausted` if the configured marker range runs out
    /// - `UnsupportedOperation` if a state-dependent counter cannot take
    ///   its rewritten weights
    /// - `ShapeMismatch` if the factors' counters disagree on layers
    pub fn intersect(
        &self,
        original: CostAutomaton,
        others: Vec<CostAutomaton>,
    ) -> Result<CostAutomaton> {
        if others.is_empty() {
            return Ok(original);
        }
        let start = Instant::now();
        let mut factors: Vec<CostAutomaton> = Vec::with_capacity(others.len() + 1);
        factors.push(original);
        factors.extend(others);

        info!(
            event = "intersection_start",
            factors = factors.len(),
            counters = factors.iter().map(CostAutomaton::nb_dimensions).sum::<usize>(),
        );

        for factor in &factors {
            factor.automaton().check_deterministic()?;
        }

        let mut pool = MarkerPool::new(self.config.marker_ceiling, self.config.marker_capacity);
        for factor in &factors {
            if let Some(&highest) = factor.automaton().alphabet().last() {
                pool.reserve(highest);
            }
        }

        let Factors { automata, mut counters } = mark_factors(factors, &mut pool)?;

        let mut automata = automata.into_iter();
        let mut product = automata
            .next()
            .ok_or_else(|| CostRegError::InvalidState("no factor to intersect".to_string()))?;
        for (index, factor) in automata.enumerate() {
            product = self.fold(&product, &factor, &pool, index + 1)?;
        }

        let placeholders = unmark(&mut product, &pool, &counters)?;
        for (factor_counters, factor_placeholders) in counters.iter_mut().zip(placeholders) {
            for (counter, placeholder) in factor_counters.iter_mut().zip(factor_placeholders) {
                if let Some(placeholder) = placeholder {
                    counter.set_weights(placeholder.into_table())?;
                }
            }
        }

        let result = CostAutomaton::with_counters(product, counters.into_iter().flatten().collect())?;
        info!(
            event = "intersection_end",
            duration_ms = start.elapsed().as_millis() as u64,
            markers = pool.len(),
            states = result.automaton().nb_states(),
            transitions = result.automaton().nb_transitions(),
            counters = result.nb_dimensions(),
        );
        Ok(result)
    }

    /// Product of the running automaton `left` with the next factor `right`.
    ///
    /// Product state `(l, r)` has id `l * |right| + r` before minimization.
    fn fold(
        &self,
        left: &Automaton,
        right: &Automaton,
        pool: &MarkerPool,
        factor: usize,
    ) -> Result<Automaton> {
        let left_initial = initial_state(left, "running product")?;
        let right_initial = initial_state(right, "factor")?;
        let width = right.nb_states();

        let mut product = Automaton::with_states(left.nb_states() * width);
        for l in 0..left.nb_states() {
            for r in 0..width {
                if left.is_final(l) && right.is_final(r) {
                    product.set_final(l * width + r)?;
                }
            }
        }
        product.set_initial_state(left_initial * width + right_initial)?;

        let mut destinations = BTreeSet::new();
        let mut labels = BTreeSet::new();
        for l in 0..left.nb_states() {
            let left_symbols = left.out_symbols(l);
            for r in 0..width {
                let origin = l * width + r;
                for symbol in right.out_symbols(r) {
                    let Some(right_destination) = right.delta(r, symbol)? else {
                        continue;
                    };
                    destinations.clear();
                    labels.clear();
                    left.delta_into(l, symbol, &mut destinations);
                    for &left_symbol in &left_symbols {
                        if pool.have_common_label(left_symbol, symbol) {
                            left.delta_into(l, left_symbol, &mut destinations);
                            labels.insert(left_symbol);
                        }
                    }
                    for &left_destination in &destinations {
                        let destination = left_destination * width + right_destination;
                        product.add_transition(origin, destination, symbol)?;
                        for &label in &labels {
                            product.add_transition(origin, destination, label)?;
                        }
                    }
                }
            }
        }

        let naive_states = product.nb_states();
        if self.config.minimize_each_fold {
            product.minimize();
        } else {
            product.trim();
        }
        debug!(
            event = "fold",
            factor,
            naive_states,
            states = product.nb_states(),
            transitions = product.nb_transitions(),
            minimized = self.config.minimize_each_fold,
        );
        Ok(product)
    }
}

/// Relabels every transition carrying state-dependent weight with a fresh
/// marker, then splits each factor into its graph and counters.
fn mark_factors(factors: Vec<CostAutomaton>, pool: &mut MarkerPool) -> Result<Factors> {
    let mut automata = Vec::with_capacity(factors.len());
    let mut counters = Vec::with_capacity(factors.len());
    for (index, mut factor) in factors.into_iter().enumerate() {
        if factor.has_state_dependent_counter() {
            let mut marked = 0usize;
            for transition in factor.automaton().transitions() {
                if !factor.has_state_dependent_weight_transition(transition.symbol, transition.origin)
                {
                    continue;
                }
                let id = pool.issue(index, transition.symbol, transition.origin)?;
                let automaton = factor.automaton_mut();
                automaton.delete_transition(transition.origin, transition.destination, transition.symbol);
                automaton.add_transition(transition.origin, transition.destination, id)?;
                marked += 1;
            }
            debug!(event = "factor_marked", factor = index, marked);
        }
        let (automaton, factor_counters) = factor.into_parts();
        automata.push(automaton);
        counters.push(factor_counters);
    }
    Ok(Factors { automata, counters })
}

/// Replaces every marker transition of `product` by its real symbol and
/// collects the rewritten weights of the state-dependent counters.
///
/// The returned placeholders mirror `counters`: `None` for counters that
/// are not state-dependent.
fn unmark(
    product: &mut Automaton,
    pool: &MarkerPool,
    counters: &[Vec<Box<dyn Counter>>],
) -> Result<Vec<Vec<Option<LayerMajorCounter>>>> {
    let nb_states = product.nb_states();
    let mut placeholders: Vec<Vec<Option<LayerMajorCounter>>> = counters
        .iter()
        .map(|factor_counters| {
            factor_counters
                .iter()
                .map(|counter| {
                    counter
                        .is_state_dependent()
                        .then(|| LayerMajorCounter::placeholder(counter.as_ref(), nb_states))
                })
                .collect()
        })
        .collect();

    for origin in 0..nb_states {
        let mut installed: HashSet<usize> = HashSet::new();
        for transition in product.transitions_from(origin) {
            let Some(&marker) = pool.get(transition.symbol) else {
                continue;
            };
            product.delete_transition(origin, transition.destination, transition.symbol);
            let key = marker.label as usize * nb_states + transition.destination;
            if installed.insert(key) {
                product.add_transition(origin, transition.destination, marker.label)?;
            }
            for (counter, placeholder) in counters[marker.factor]
                .iter()
                .zip(placeholders[marker.factor].iter_mut())
            {
                if let Some(placeholder) = placeholder {
                    placeholder.copy_layer_weights(
                        marker.label,
                        origin,
                        counter.as_ref(),
                        marker.label,
                        marker.state,
                    )?;
                }
            }
        }
    }
    product.restrict_alphabet(|symbol| !pool.is_marker(symbol));
    Ok(placeholders)
}

fn initial_state(automaton: &Automaton, role: &str) -> Result<StateId> {
    automaton
        .initial_state()
        .ok_or_else(|| CostRegError::InvalidState(format!("{} has no initial state", role)))
}
