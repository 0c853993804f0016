//! Counters carrying a display name and an objective coefficient.

use std::fmt;

use costreg_core::{CostRegError, Penalty, Result, SoftBounds, StateId, Symbol, Weight};

use super::{continuous_table, global_table, periodic_table, Counter, StateMajorCounter, WeightTable};

/// A counter with a name and the coefficient its penalty carries in the
/// objective.
///
/// Names built by the shift constructors follow `<prefix><set><suffix>`:
/// the set is `S` for every symbol but the last, `_k` for the single symbol
/// `k` and `O` otherwise. Prefixes are `G` (global), `TC` (continuous
/// window, suffix `_<layerMin>-<size>`) and `TP` (periodic, suffix
/// `_<layer>/<period>`).
#[derive(Debug, Clone)]
pub struct NamedCounter {
    counter: Box<dyn Counter>,
    name: String,
    objective_coefficient: i32,
}

impl NamedCounter {
    pub fn new(counter: Box<dyn Counter>, name: impl Into<String>, objective_coefficient: i32) -> Self {
        Self {
            counter,
            name: name.into(),
            objective_coefficient,
        }
    }

    /// Counts `weight` per occurrence of `symbols` anywhere in the word.
    pub fn global_shift(
        nb_layers: usize,
        nb_symbols: usize,
        symbols: &[Symbol],
        weight: Weight,
        bounds: SoftBounds,
        objective_coefficient: i32,
    ) -> Result<Self> {
        let table = global_table(nb_layers, nb_symbols, symbols, weight)?;
        Ok(Self::new(
            Box::new(StateMajorCounter::new(&table, bounds)),
            Self::make_name(symbols, nb_symbols, "G", ""),
            objective_coefficient,
        ))
    }

    /// Counts `symbols` over the `size` layers starting at `layer_min`.
    #[allow(clippy::too_many_arguments)]
    pub fn continuous_shift(
        nb_layers: usize,
        nb_symbols: usize,
        layer_min: usize,
        size: usize,
        symbols: &[Symbol],
        weight: Weight,
        bounds: SoftBounds,
        objective_coefficient: i32,
    ) -> Result<Self> {
        if size == 0 {
            return Err(CostRegError::ShapeMismatch(
                "continuous window must not be empty".to_string(),
            ));
        }
        let layer_max = layer_min + size - 1;
        let table = continuous_table(nb_layers, nb_symbols, layer_min, layer_max, symbols, weight)?;
        Ok(Self::new(
            Box::new(StateMajorCounter::new(&table, bounds)),
            Self::make_name(symbols, nb_symbols, "TC", &format!("_{}-{}", layer_min, size)),
            objective_coefficient,
        ))
    }

    /// Counts `symbols` at `layer`, `layer + period`, ...
    #[allow(clippy::too_many_arguments)]
    pub fn periodic_shift(
        nb_layers: usize,
        nb_symbols: usize,
        layer: usize,
        period: usize,
        symbols: &[Symbol],
        weight: Weight,
        bounds: SoftBounds,
        objective_coefficient: i32,
    ) -> Result<Self> {
        let table = periodic_table(nb_layers, nb_symbols, layer, period, symbols, weight)?;
        Ok(Self::new(
            Box::new(StateMajorCounter::new(&table, bounds)),
            Self::make_name(symbols, nb_symbols, "TP", &format!("_{}/{}", layer, period)),
            objective_coefficient,
        ))
    }

    pub fn make_name(symbols: &[Symbol], nb_symbols: usize, prefix: &str, suffix: &str) -> String {
        let all_but_last = nb_symbols >= 2
            && symbols.len() == nb_symbols - 1
            && symbols.last().is_some_and(|&s| s as usize == nb_symbols - 2);
        let set = match symbols {
            _ if all_but_last => "S".to_string(),
            [single] => format!("_{}", single),
            _ => "O".to_string(),
        };
        format!("{}{}{}", prefix, set, suffix)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objective_coefficient(&self) -> i32 {
        self.objective_coefficient
    }

    pub fn set_objective_coefficient(&mut self, coefficient: i32) {
        self.objective_coefficient = coefficient;
    }

    pub fn inner(&self) -> &dyn Counter {
        self.counter.as_ref()
    }

    /// True for the global counter over every symbol but the last.
    pub fn is_global_shift_counter(&self) -> bool {
        self.name == "GS"
    }

    pub fn min(&self) -> i32 {
        self.bounds().min()
    }

    pub fn max(&self) -> i32 {
        self.bounds().max()
    }

    pub fn max_penalty(&self) -> Penalty {
        self.bounds().max_penalty()
    }

    pub fn is_cost_equal_to_counter(&self) -> bool {
        self.bounds().is_identity()
    }

    pub fn is_cost_linear_in_counter(&self) -> bool {
        self.bounds().is_linear()
    }

    pub fn penalty_relation_table(&self) -> Vec<(i32, Penalty)> {
        self.bounds().make_soft_relation_table()
    }
}

impl Counter for NamedCounter {
    fn bounds(&self) -> &SoftBounds {
        self.counter.bounds()
    }

    fn weight(&self, layer: usize, symbol: Symbol) -> Weight {
        self.counter.weight(layer, symbol)
    }

    fn weight_at_state(&self, layer: usize, symbol: Symbol, state: StateId) -> Weight {
        self.counter.weight_at_state(layer, symbol, state)
    }

    fn nb_layers(&self) -> usize {
        self.counter.nb_layers()
    }

    fn nb_symbols(&self) -> usize {
        self.counter.nb_symbols()
    }

    fn nb_states(&self) -> usize {
        self.counter.nb_states()
    }

    fn is_state_dependent(&self) -> bool {
        self.counter.is_state_dependent()
    }

    fn set_weights(&mut self, table: WeightTable) -> Result<()> {
        self.counter.set_weights(table)
    }

    fn add_weights(&mut self, other: &dyn Counter) -> Result<()> {
        self.counter.add_weights(other)
    }

    fn boxed_clone(&self) -> Box<dyn Counter> {
        Box::new(self.clone())
    }
}

impl fmt::Display for NamedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} x{}", self.name, self.bounds(), self.objective_coefficient)
    }
}
