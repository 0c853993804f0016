//! Counter stored `[state][layer][symbol]`.

use costreg_core::{CostRegError, Result, SoftBounds, StateId, Symbol, Weight};

use super::{check_addable, Counter, WeightTable};

/// State-dependent only when built over more than one state. Its weights
/// cannot be replaced after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMajorCounter {
    nb_states: usize,
    nb_layers: usize,
    nb_symbols: usize,
    /// `[state][layer][symbol]`, flattened.
    weights: Vec<Weight>,
    bounds: SoftBounds,
}

impl StateMajorCounter {
    /// Transposes `table` into state-major storage.
    pub fn new(table: &WeightTable, bounds: SoftBounds) -> Self {
        let (nb_layers, nb_symbols, nb_states) =
            (table.nb_layers(), table.nb_symbols(), table.nb_states());
        let mut weights = Vec::with_capacity(nb_states * nb_layers * nb_symbols);
        for state in 0..nb_states {
            for layer in 0..nb_layers {
                for symbol in 0..nb_symbols as Symbol {
                    weights.push(table.get(layer, symbol, state));
                }
            }
        }
        Self {
            nb_states,
            nb_layers,
            nb_symbols,
            weights,
            bounds,
        }
    }

    /// State-independent counter over `weights[layer][symbol]`.
    pub fn from_layer_symbol(weights: Vec<Vec<Weight>>, bounds: SoftBounds) -> Result<Self> {
        Ok(Self::new(&WeightTable::from_layer_symbol(weights)?, bounds))
    }

    /// Counter with hard bounds `[min, max]`.
    pub fn hard(table: &WeightTable, min: i32, max: i32) -> Result<Self> {
        Ok(Self::new(table, SoftBounds::hard(min, max)?))
    }

    #[inline]
    fn get(&self, state: StateId, layer: usize, symbol: Symbol) -> Weight {
        let symbol = symbol as usize;
        if state < self.nb_states && layer < self.nb_layers && symbol < self.nb_symbols {
            self.weights[(state * self.nb_layers + layer) * self.nb_symbols + symbol]
        } else {
            0
        }
    }
}

impl Counter for StateMajorCounter {
    fn bounds(&self) -> &SoftBounds {
        &self.bounds
    }

    fn weight(&self, layer: usize, symbol: Symbol) -> Weight {
        self.get(0, layer, symbol)
    }

    fn weight_at_state(&self, layer: usize, symbol: Symbol, state: StateId) -> Weight {
        if self.is_state_dependent() {
            self.get(state, layer, symbol)
        } else {
            self.weight(layer, symbol)
        }
    }

    fn nb_layers(&self) -> usize {
        self.nb_layers
    }

    fn nb_symbols(&self) -> usize {
        self.nb_symbols
    }

    fn nb_states(&self) -> usize {
        self.nb_states
    }

    fn is_state_dependent(&self) -> bool {
        self.nb_states > 1
    }

    fn set_weights(&mut self, _table: WeightTable) -> Result<()> {
        Err(CostRegError::UnsupportedOperation(
            "state-major counters cannot replace their weights".to_string(),
        ))
    }

    fn add_weights(&mut self, other: &dyn Counter) -> Result<()> {
        check_addable(&*self, other)?;
        let mut index = 0;
        for state in 0..self.nb_states {
            for layer in 0..self.nb_layers {
                for symbol in 0..self.nb_symbols as Symbol {
                    let weight = &mut self.weights[index];
                    *weight = weight.saturating_add(other.weight_at_state(layer, symbol, state));
                    index += 1;
                }
            }
        }
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Counter> {
        Box::new(self.clone())
    }
}
