//! Counter stored `[layer][symbol][state]`.

use costreg_core::{CostRegError, Result, SoftBounds, StateId, Symbol, Weight};

use super::{check_addable, Counter, WeightTable};

/// Always state-dependent; the layout the intersection writes into.
///
/// # Examples
///
/// ```
/// use costreg_automaton::{Counter, LayerMajorCounter, WeightTable};
/// use costreg_core::SoftBounds;
///
/// // one layer, two symbols, two states
/// let table = WeightTable::from_nested(vec![vec![vec![1, 2], vec![0, 5]]]).unwrap();
/// let counter = LayerMajorCounter::new(table, SoftBounds::hard(0, 10).unwrap());
///
/// assert_eq!(counter.weight_at_state(0, 1, 1), 5);
/// assert_eq!(counter.weight(0, 0), 1);
/// assert!(counter.is_state_dependent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerMajorCounter {
    table: WeightTable,
    bounds: SoftBounds,
}

impl LayerMajorCounter {
    pub fn new(table: WeightTable, bounds: SoftBounds) -> Self {
        Self { table, bounds }
    }

    /// Counter with hard bounds `[min, max]`.
    pub fn hard(table: WeightTable, min: i32, max: i32) -> Result<Self> {
        Ok(Self::new(table, SoftBounds::hard(min, max)?))
    }

    /// A zero-filled counter shaped like `source` over `nb_states` states,
    /// sharing its bounds.
    pub fn placeholder(source: &dyn Counter, nb_states: usize) -> Self {
        Self::new(
            WeightTable::zeros(source.nb_layers(), source.nb_symbols(), nb_states),
            *source.bounds(),
        )
    }

    pub fn table(&self) -> &WeightTable {
        &self.table
    }

    pub fn into_table(self) -> WeightTable {
        self.table
    }

    /// See [`WeightTable::copy_layer_weights`].
    pub fn copy_layer_weights(
        &mut self,
        symbol_to: Symbol,
        state_to: StateId,
        from: &dyn Counter,
        symbol_from: Symbol,
        state_from: StateId,
    ) -> Result<()> {
        self.table
            .copy_layer_weights(symbol_to, state_to, from, symbol_from, state_from)
    }
}

impl Counter for LayerMajorCounter {
    fn bounds(&self) -> &SoftBounds {
        &self.bounds
    }

    fn weight(&self, layer: usize, symbol: Symbol) -> Weight {
        self.table.get(layer, symbol, 0)
    }

    fn weight_at_state(&self, layer: usize, symbol: Symbol, state: StateId) -> Weight {
        self.table.get(layer, symbol, state)
    }

    fn nb_layers(&self) -> usize {
        self.table.nb_layers()
    }

    fn nb_symbols(&self) -> usize {
        self.table.nb_symbols()
    }

    fn nb_states(&self) -> usize {
        self.table.nb_states()
    }

    fn is_state_dependent(&self) -> bool {
        true
    }

    fn set_weights(&mut self, table: WeightTable) -> Result<()> {
        if table.nb_layers() != self.table.nb_layers() || table.nb_symbols() != self.table.nb_symbols()
        {
            return Err(CostRegError::ShapeMismatch(format!(
                "replacement table is {}x{}, counter is {}x{}",
                table.nb_layers(),
                table.nb_symbols(),
                self.table.nb_layers(),
                self.table.nb_symbols()
            )));
        }
        self.table = table;
        Ok(())
    }

    fn add_weights(&mut self, other: &dyn Counter) -> Result<()> {
        check_addable(&*self, other)?;
        let mut addend = WeightTable::zeros(self.nb_layers(), self.nb_symbols(), self.nb_states());
        for layer in 0..self.nb_layers() {
            for symbol in 0..self.nb_symbols() as Symbol {
                for state in 0..self.nb_states() {
                    addend.set(layer, symbol, state, other.weight_at_state(layer, symbol, state))?;
                }
            }
        }
        self.table.add(&addend)
    }

    fn boxed_clone(&self) -> Box<dyn Counter> {
        Box::new(self.clone())
    }
}
