//! Marker symbols standing for state-dependent transitions.

use std::collections::HashMap;

use tracing::trace;

use costreg_core::{CostRegError, Result, StateId, Symbol};

/// A transition of factor `factor` reading `label` from `state`, relabeled
/// as `id` for the duration of an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub id: Symbol,
    pub factor: usize,
    pub label: Symbol,
    pub state: StateId,
}

/// Issues marker ids downward from a ceiling and resolves them back.
///
/// Real symbols are every symbol that is not a marker; two symbols share a
/// label when they resolve to the same real symbol.
#[derive(Debug, Clone)]
pub struct MarkerPool {
    ceiling: Symbol,
    capacity: u32,
    /// Highest real symbol of any input; markers must stay above it.
    highest_real: Option<Symbol>,
    markers: HashMap<Symbol, Marker>,
}

impl MarkerPool {
    pub fn new(ceiling: Symbol, capacity: u32) -> Self {
        Self {
            ceiling,
            capacity,
            highest_real: None,
            markers: HashMap::new(),
        }
    }

    /// Records `symbol` as a real symbol no marker may reuse.
    pub fn reserve(&mut self, symbol: Symbol) {
        self.highest_real = Some(self.highest_real.map_or(symbol, |h| h.max(symbol)));
    }

    /// Issues the next marker.
    ///
    /// # Errors
    ///
    /// `MarkerPoolExhausted` once `capacity` markers have been issued or the
    /// next id would reach a reserved real symbol.
    pub fn issue(&mut self, factor: usize, label: Symbol, state: StateId) -> Result<Symbol> {
        let issued = self.markers.len() as u32;
        let id = (issued < self.capacity)
            .then(|| self.ceiling.checked_sub(issued))
            .flatten()
            .filter(|&id| self.highest_real.map_or(true, |h| id > h))
            .ok_or(CostRegError::MarkerPoolExhausted {
                ceiling: self.ceiling,
                capacity: self.capacity,
            })?;

        self.markers.insert(
            id,
            Marker {
                id,
                factor,
                label,
                state,
            },
        );
        trace!(event = "marker_issued", marker = id, factor, label, state);
        Ok(id)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Marker> {
        self.markers.get(&symbol)
    }

    pub fn is_marker(&self, symbol: Symbol) -> bool {
        self.markers.contains_key(&symbol)
    }

    /// The real symbol behind `symbol`.
    pub fn label(&self, symbol: Symbol) -> Symbol {
        self.get(symbol).map_or(symbol, |m| m.label)
    }

    pub fn have_common_label(&self, first: Symbol, second: Symbol) -> bool {
        self.label(first) == self.label(second)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
