//! An automaton together with its ordered counters.


use std::fmt;

use costreg_core::{CostRegError, Result, SoftBounds, StateId, Symbol, Weight};

use crate::automaton::Automaton;
use crate::counter::{Counter, LayerMajorCounter, StateMajorCounter, WeightTable};

/// A deterministic automaton whose words are weighted by counters.
///
/// Counter 0 is the primary counter. Every attached counter shares the
/// layer count of the first one, covers every symbol of the alphabet and,
/// when state-dependent, has exactly one weight column per state.
///
/// # Examples
///
/// ```
/// use costreg_automaton::{Automaton, CostAutomaton};
///
/// // any word over {0, 1} of length 2, counting the 1s
/// let mut automaton = Automaton::with_states(3);
/// automaton.set_initial_state(0).unwrap();
/// automaton.set_final(2).unwrap();
/// automaton.add_transitions(0, 1, &[0, 1]).unwrap();
/// automaton.add_transitions(1, 2, &[0, 1]).unwrap();
///
/// let weights = vec![vec![0, 1], vec![0, 1]];
/// let cost = CostAutomaton::single_dimension(automaton, weights, 0, 1).unwrap();
///
/// assert_eq!(cost.nb_dimensions(), 1);
/// assert_eq!(cost.nb_layers(), 2);
/// assert_eq!(cost.weight(1, 1), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CostAutomaton {
    automaton: Automaton,
    counters: Vec<Box<dyn Counter>>,
}

impl CostAutomaton {
    /// Wraps `automaton` without counters.
    pub fn new(automaton: Automaton) -> Self {
        Self {
            automaton,
            counters: Vec::new(),
        }
    }

    /// Wraps `automaton` and attaches `counters` in order.
    pub fn with_counters(automaton: Automaton, counters: Vec<Box<dyn Counter>>) -> Result<Self> {
        let mut cost = Self::new(automaton);
        for counter in counters {
            cost.add_counter(counter)?;
        }
        Ok(cost)
    }

    /// Single-counter automaton over `weights[layer][symbol]`.
    pub fn single_dimension(
        automaton: Automaton,
        weights: Vec<Vec<Weight>>,
        min: i32,
        max: i32,
    ) -> Result<Self> {
        let counter = StateMajorCounter::from_layer_symbol(weights, SoftBounds::hard(min, max)?)?;
        Self::with_counters(automaton, vec![Box::new(counter)])
    }

    /// Single-counter automaton over `weights[layer][symbol][state]`.
    pub fn single_dimension_by_state(
        automaton: Automaton,
        weights: Vec<Vec<Vec<Weight>>>,
        min: i32,
        max: i32,
    ) -> Result<Self> {
        let counter = LayerMajorCounter::hard(WeightTable::from_nested(weights)?, min, max)?;
        Self::with_counters(automaton, vec![Box::new(counter)])
    }

    /// One state-independent counter per dimension, from
    /// `weights[layer][symbol][dimension]`.
    pub fn multi_dimension(
        automaton: Automaton,
        weights: &[Vec<Vec<Weight>>],
        mins: &[i32],
        maxs: &[i32],
    ) -> Result<Self> {
        let nb_dimensions = check_dimensions(mins, maxs)?;
        let mut counters: Vec<Box<dyn Counter>> = Vec::with_capacity(nb_dimensions);
        for dimension in 0..nb_dimensions {
            let mut by_layer = Vec::with_capacity(weights.len());
            for row in weights {
                let mut by_symbol = Vec::with_capacity(row.len());
                for cell in row {
                    by_symbol.push(dimension_weight(cell, dimension)?);
                }
                by_layer.push(by_symbol);
            }
            let bounds = SoftBounds::hard(mins[dimension], maxs[dimension])?;
            counters.push(Box::new(StateMajorCounter::from_layer_symbol(by_layer, bounds)?));
        }
        Self::with_counters(automaton, counters)
    }

    /// One state-dependent counter per dimension, from
    /// `weights[layer][symbol][dimension][state]`.
    pub fn multi_dimension_by_state(
        automaton: Automaton,
        weights: &[Vec<Vec<Vec<Weight>>>],
        mins: &[i32],
        maxs: &[i32],
    ) -> Result<Self> {
        let nb_dimensions = check_dimensions(mins, maxs)?;
        let mut counters: Vec<Box<dyn Counter>> = Vec::with_capacity(nb_dimensions);
        for dimension in 0..nb_dimensions {
            let mut by_layer = Vec::with_capacity(weights.len());
            for row in weights {
                let mut by_symbol = Vec::with_capacity(row.len());
                for cell in row {
                    let states = cell.get(dimension).ok_or_else(|| missing_dimension(dimension))?;
                    by_symbol.push(states.clone());
                }
                by_layer.push(by_symbol);
            }
            let table = WeightTable::from_nested(by_layer)?;
            counters.push(Box::new(LayerMajorCounter::hard(
                table,
                mins[dimension],
                maxs[dimension],
            )?));
        }
        Self::with_counters(automaton, counters)
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Mutable access to the graph. Changes are not re-validated against
    /// the attached counters.
    pub fn automaton_mut(&mut self) -> &mut Automaton {
        &mut self.automaton
    }

    pub fn counters(&self) -> &[Box<dyn Counter>] {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut [Box<dyn Counter>] {
        &mut self.counters
    }

    pub fn into_parts(self) -> (Automaton, Vec<Box<dyn Counter>>) {
        (self.automaton, self.counters)
    }

    pub fn nb_dimensions(&self) -> usize {
        self.counters.len()
    }

    /// Layer count of the primary counter, 0 without counters.
    pub fn nb_layers(&self) -> usize {
        self.counters.first().map_or(0, |c| c.nb_layers())
    }

    /// Checks that `counter` fits this automaton.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the layer count differs from the attached
    /// counters, a symbol of the alphabet has no weight column, or a
    /// state-dependent counter has the wrong number of states.
    pub fn check_counter(&self, counter: &dyn Counter) -> Result<()> {
        if !self.counters.is_empty() && counter.nb_layers() != self.nb_layers() {
            return Err(CostRegError::ShapeMismatch(format!(
                "counter has {} layers, automaton has {}",
                counter.nb_layers(),
                self.nb_layers()
            )));
        }
        if let Some(&symbol) = self.automaton.alphabet().last() {
            if symbol as usize >= counter.nb_symbols() {
                return Err(CostRegError::ShapeMismatch(format!(
                    "counter has {} symbols, alphabet uses symbol {}",
                    counter.nb_symbols(),
                    symbol
                )));
            }
        }
        if counter.is_state_dependent() && counter.nb_states() != self.automaton.nb_states() {
            return Err(CostRegError::ShapeMismatch(format!(
                "counter has {} states, automaton has {}",
                counter.nb_states(),
                self.automaton.nb_states()
            )));
        }
        Ok(())
    }

    pub fn add_counter(&mut self, counter: Box<dyn Counter>) -> Result<()> {
        self.check_counter(counter.as_ref())?;
        self.counters.push(counter);
        Ok(())
    }

    /// Attaches `counter` at index 0, shifting the others.
    pub fn add_primary_counter(&mut self, counter: Box<dyn Counter>) -> Result<()> {
        self.check_counter(counter.as_ref())?;
        self.counters.insert(0, counter);
        Ok(())
    }

    pub fn has_state_dependent_counter(&self) -> bool {
        self.counters.iter().any(|c| c.is_state_dependent())
    }

    /// True if some state-dependent counter weighs `symbol` read from
    /// `state` at some layer.
    pub fn has_state_dependent_weight_transition(&self, symbol: Symbol, state: StateId) -> bool {
        self.counters
            .iter()
            .filter(|c| c.is_state_dependent())
            .any(|c| (0..c.nb_layers()).any(|layer| c.weight_at_state(layer, symbol, state) != 0))
    }

    /// Weight on the primary counter.
    pub fn weight(&self, layer: usize, symbol: Symbol) -> Option<Weight> {
        self.weight_at_dimension(layer, symbol, 0)
    }

    pub fn weight_at_state(&self, layer: usize, symbol: Symbol, state: StateId) -> Option<Weight> {
        self.weight_at_dimension_and_state(layer, symbol, 0, state)
    }

    pub fn weight_at_dimension(&self, layer: usize, symbol: Symbol, dimension: usize) -> Option<Weight> {
        self.counters
            .get(dimension)
            .map(|c| c.weight(layer, symbol))
    }

    pub fn weight_at_dimension_and_state(
        &self,
        layer: usize,
        symbol: Symbol,
        dimension: usize,
        state: StateId,
    ) -> Option<Weight> {
        self.counters
            .get(dimension)
            .map(|c| c.weight_at_state(layer, symbol, state))
    }
}

impl fmt::Display for CostAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {} counters", self.automaton, self.counters.len())
    }
}

fn check_dimensions(mins: &[i32], maxs: &[i32]) -> Result<usize> {
    if mins.len() == maxs.len() {
        Ok(mins.len())
    } else {
        Err(CostRegError::ShapeMismatch(format!(
            "{} lower bounds for {} upper bounds",
            mins.len(),
            maxs.len()
        )))
    }
}

fn dimension_weight(cell: &[Weight], dimension: usize) -> Result<Weight> {
    cell.get(dimension)
        .copied()
        .ok_or_else(|| missing_dimension(dimension))
}

fn missing_dimension(dimension: usize) -> CostRegError {
    CostRegError::ShapeMismatch(format!("weight cell has no dimension {}", dimension))
}
