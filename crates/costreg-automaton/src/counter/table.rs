//! Dense weight grids and the layer×symbol builders used by shift counters.

use costreg_core::{CostRegError, Result, StateId, Symbol, Weight};

use super::Counter;

/// A dense `layers × symbols × states` grid of weights.
///
/// Storage is layer-major: the states of one `(layer, symbol)` cell are
/// contiguous. Reads outside the shape return 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    nb_layers: usize,
    nb_symbols: usize,
    nb_states: usize,
    data: Vec<Weight>,
}

impl WeightTable {
    pub fn zeros(nb_layers: usize, nb_symbols: usize, nb_states: usize) -> Self {
        Self {
            nb_layers,
            nb_symbols,
            nb_states,
            data: vec![0; nb_layers * nb_symbols * nb_states],
        }
    }

    /// Builds a table from `weights[layer][symbol][state]`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the nested vectors are ragged.
    pub fn from_nested(weights: Vec<Vec<Vec<Weight>>>) -> Result<Self> {
        let nb_layers = weights.len();
        let nb_symbols = weights.first().map_or(0, Vec::len);
        let nb_states = weights
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, Vec::len);

        let mut data = Vec::with_capacity(nb_layers * nb_symbols * nb_states);
        for (layer, row) in weights.into_iter().enumerate() {
            if row.len() != nb_symbols {
                return Err(CostRegError::ShapeMismatch(format!(
                    "layer {} has {} symbols, expected {}",
                    layer,
                    row.len(),
                    nb_symbols
                )));
            }
            for (symbol, cell) in row.into_iter().enumerate() {
                if cell.len() != nb_states {
                    return Err(CostRegError::ShapeMismatch(format!(
                        "cell ({}, {}) has {} states, expected {}",
                        layer,
                        symbol,
                        cell.len(),
                        nb_states
                    )));
                }
                data.extend(cell);
            }
        }
        Ok(Self {
            nb_layers,
            nb_symbols,
            nb_states,
            data,
        })
    }

    /// Builds a single-state table from `weights[layer][symbol]`.
    pub fn from_layer_symbol(weights: Vec<Vec<Weight>>) -> Result<Self> {
        Self::from_nested(
            weights
                .into_iter()
                .map(|row| row.into_iter().map(|w| vec![w]).collect())
                .collect(),
        )
    }

    #[inline]
    pub fn nb_layers(&self) -> usize {
        self.nb_layers
    }

    #[inline]
    pub fn nb_symbols(&self) -> usize {
        self.nb_symbols
    }

    #[inline]
    pub fn nb_states(&self) -> usize {
        self.nb_states
    }

    #[inline]
    fn index(&self, layer: usize, symbol: Symbol, state: StateId) -> Option<usize> {
        let symbol = symbol as usize;
        (layer < self.nb_layers && symbol < self.nb_symbols && state < self.nb_states)
            .then(|| (layer * self.nb_symbols + symbol) * self.nb_states + state)
    }

    pub fn get(&self, layer: usize, symbol: Symbol, state: StateId) -> Weight {
        self.index(layer, symbol, state)
            .map_or(0, |index| self.data[index])
    }

    /// Writes one cell.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the coordinates are outside the table.
    pub fn set(&mut self, layer: usize, symbol: Symbol, state: StateId, weight: Weight) -> Result<()> {
        let index = self.checked_index(layer, symbol, state)?;
        self.data[index] = weight;
        Ok(())
    }

    /// Adds `other` elementwise. A single-state `other` is broadcast over
    /// every state.
    pub fn add(&mut self, other: &WeightTable) -> Result<()> {
        let broadcast = other.nb_states == 1;
        if other.nb_layers != self.nb_layers
            || other.nb_symbols != self.nb_symbols
            || !(broadcast || other.nb_states == self.nb_states)
        {
            return Err(CostRegError::ShapeMismatch(format!(
                "cannot add a {}x{}x{} table to a {}x{}x{} table",
                other.nb_layers,
                other.nb_symbols,
                other.nb_states,
                self.nb_layers,
                self.nb_symbols,
                self.nb_states
            )));
        }
        for (index, weight) in self.data.iter_mut().enumerate() {
            let source = if broadcast {
                index / self.nb_states
            } else {
                index
            };
            *weight = weight.saturating_add(other.data[source]);
        }
        Ok(())
    }

    /// Copies, for every layer, `from`'s weight at `(symbol_from, state_from)`
    /// into this table at `(symbol_to, state_to)`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the layer counts differ or the target cell is
    /// outside the table.
    pub fn copy_layer_weights(
        &mut self,
        symbol_to: Symbol,
        state_to: StateId,
        from: &dyn Counter,
        symbol_from: Symbol,
        state_from: StateId,
    ) -> Result<()> {
        if from.nb_layers() != self.nb_layers {
            return Err(CostRegError::ShapeMismatch(format!(
                "cannot copy {} layers into {} layers",
                from.nb_layers(),
                self.nb_layers
            )));
        }
        for layer in 0..self.nb_layers {
            let index = self.checked_index(layer, symbol_to, state_to)?;
            self.data[index] = from.weight_at_state(layer, symbol_from, state_from);
        }
        Ok(())
    }

    fn checked_index(&self, layer: usize, symbol: Symbol, state: StateId) -> Result<usize> {
        self.index(layer, symbol, state).ok_or_else(|| {
            CostRegError::ShapeMismatch(format!(
                "cell ({}, {}, {}) outside a {}x{}x{} table",
                layer, symbol, state, self.nb_layers, self.nb_symbols, self.nb_states
            ))
        })
    }
}

// ============================================================================
// Layer x symbol builders
// ============================================================================

/// Single-state table holding `weight` at every `(layer, symbol)` of the
/// cross product `layers × symbols`, 0 elsewhere.
pub fn layers_table(
    nb_layers: usize,
    nb_symbols: usize,
    layers: &[usize],
    symbols: &[Symbol],
    weight: Weight,
) -> Result<WeightTable> {
    let mut table = WeightTable::zeros(nb_layers, nb_symbols, 1);
    for &layer in layers {
        for &symbol in symbols {
            table.set(layer, symbol, 0, weight)?;
        }
    }
    Ok(table)
}

/// `weight` on `symbols` at every layer of `layer_min..=layer_max`.
pub fn continuous_table(
    nb_layers: usize,
    nb_symbols: usize,
    layer_min: usize,
    layer_max: usize,
    symbols: &[Symbol],
    weight: Weight,
) -> Result<WeightTable> {
    stepped_table(nb_layers, nb_symbols, layer_min, layer_max, 1, symbols, weight)
}

/// `weight` on `symbols` at `layer`, `layer + period`, ... up to the last
/// layer.
pub fn periodic_table(
    nb_layers: usize,
    nb_symbols: usize,
    layer: usize,
    period: usize,
    symbols: &[Symbol],
    weight: Weight,
) -> Result<WeightTable> {
    let last = nb_layers.checked_sub(1).ok_or_else(|| {
        CostRegError::ShapeMismatch("periodic table needs at least one layer".to_string())
    })?;
    stepped_table(nb_layers, nb_symbols, layer, last, period, symbols, weight)
}

/// `weight` on `symbols` at every layer.
pub fn global_table(
    nb_layers: usize,
    nb_symbols: usize,
    symbols: &[Symbol],
    weight: Weight,
) -> Result<WeightTable> {
    match nb_layers.checked_sub(1) {
        Some(last) => continuous_table(nb_layers, nb_symbols, 0, last, symbols, weight),
        None => Ok(WeightTable::zeros(0, nb_symbols, 1)),
    }
}

fn stepped_table(
    nb_layers: usize,
    nb_symbols: usize,
    layer_min: usize,
    layer_max: usize,
    period: usize,
    symbols: &[Symbol],
    weight: Weight,
) -> Result<WeightTable> {
    if period == 0 {
        return Err(CostRegError::ShapeMismatch("period must be positive".to_string()));
    }
    if layer_min > layer_max {
        return Err(CostRegError::ShapeMismatch(format!(
            "empty layer range {}..={}",
            layer_min, layer_max
        )));
    }
    let layers: Vec<usize> = (layer_min..=layer_max).step_by(period).collect();
    layers_table(nb_layers, nb_symbols, &layers, symbols, weight)
}
