//! Labeled transition systems over dense integer states and symbols.
//!
//! An [`Automaton`] is normally deterministic: for a fixed `(origin, symbol)`
//! there is at most one destination, and [`Automaton::delta`] reports a
//! violation as [`CostRegError::NonDeterministic`]. The graph itself does not
//! forbid parallel destinations, since the intersection temporarily builds
//! products whose factors are only deterministic on the real alphabet.

mod minimize;
mod ops;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use costreg_core::{CostRegError, Result, StateId, Symbol};

/// A transition `origin --symbol--> destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition {
    pub origin: StateId,
    pub destination: StateId,
    pub symbol: Symbol,
}

impl Transition {
    pub const fn new(origin: StateId, destination: StateId, symbol: Symbol) -> Self {
        Self {
            origin,
            destination,
            symbol,
        }
    }
}

/// A finite automaton with states `0..n`, one initial state and a set of
/// final states.
///
/// # Examples
///
/// ```
/// use costreg_automaton::Automaton;
///
/// // a* b over {a = 0, b = 1}
/// let mut automaton = Automaton::new();
/// let q0 = automaton.add_state();
/// let q1 = automaton.add_state();
/// automaton.set_initial_state(q0).unwrap();
/// automaton.set_final(q1).unwrap();
/// automaton.add_transition(q0, q0, 0).unwrap();
/// automaton.add_transition(q0, q1, 1).unwrap();
///
/// assert!(automaton.accepts(&[0, 0, 1]));
/// assert!(!automaton.accepts(&[1, 0]));
/// assert_eq!(automaton.delta(q0, 1).unwrap(), Some(q1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    initial: Option<StateId>,
    finals: Vec<bool>,
    /// Outgoing arcs per state: symbol -> destinations.
    out: Vec<BTreeMap<Symbol, BTreeSet<StateId>>>,
    alphabet: BTreeSet<Symbol>,
}

impl Automaton {
    /// Creates an automaton without states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an automaton with `nb_states` non-final states and no
    /// transitions.
    pub fn with_states(nb_states: usize) -> Self {
        Self {
            initial: None,
            finals: vec![false; nb_states],
            out: vec![BTreeMap::new(); nb_states],
            alphabet: BTreeSet::new(),
        }
    }

    /// Adds a non-final state and returns its id.
    pub fn add_state(&mut self) -> StateId {
        self.finals.push(false);
        self.out.push(BTreeMap::new());
        self.out.len() - 1
    }

    #[inline]
    pub fn nb_states(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn initial_state(&self) -> Option<StateId> {
        self.initial
    }

    pub fn set_initial_state(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.initial = Some(state);
        Ok(())
    }

    pub fn set_final(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.finals[state] = true;
        Ok(())
    }

    pub fn set_non_final(&mut self, state: StateId) -> Result<()> {
        self.check_state(state)?;
        self.finals[state] = false;
        Ok(())
    }

    /// Returns true if `state` exists and is final.
    #[inline]
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.get(state).copied().unwrap_or(false)
    }

    /// Iterates over the final states in increasing order.
    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.finals
            .iter()
            .enumerate()
            .filter_map(|(state, &is_final)| is_final.then_some(state))
    }

    /// Adds `origin --symbol--> destination`, registering the symbol in the
    /// alphabet. Adding an existing transition is a no-op.
    pub fn add_transition(
        &mut self,
        origin: StateId,
        destination: StateId,
        symbol: Symbol,
    ) -> Result<()> {
        self.check_state(origin)?;
        self.check_state(destination)?;
        self.out[origin]
            .entry(symbol)
            .or_default()
            .insert(destination);
        self.alphabet.insert(symbol);
        Ok(())
    }

    /// Adds one transition per symbol between the same two states.
    pub fn add_transitions(
        &mut self,
        origin: StateId,
        destination: StateId,
        symbols: &[Symbol],
    ) -> Result<()> {
        for &symbol in symbols {
            self.add_transition(origin, destination, symbol)?;
        }
        Ok(())
    }

    /// Removes a transition, returning whether it existed.
    ///
    /// The symbol stays in the alphabet.
    pub fn delete_transition(
        &mut self,
        origin: StateId,
        destination: StateId,
        symbol: Symbol,
    ) -> bool {
        let Some(arcs) = self.out.get_mut(origin) else {
            return false;
        };
        let Some(destinations) = arcs.get_mut(&symbol) else {
            return false;
        };
        let removed = destinations.remove(&destination);
        if destinations.is_empty() {
            arcs.remove(&symbol);
        }
        removed
    }

    /// The unique successor of `state` on `symbol`, if any.
    ///
    /// # Errors
    ///
    /// `NonDeterministic` if the pair has several destinations.
    pub fn delta(&self, state: StateId, symbol: Symbol) -> Result<Option<StateId>> {
        let Some(destinations) = self.out.get(state).and_then(|arcs| arcs.get(&symbol)) else {
            return Ok(None);
        };
        let mut iter = destinations.iter();
        match (iter.next(), iter.next()) {
            (Some(&destination), None) => Ok(Some(destination)),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(CostRegError::NonDeterministic { state, symbol }),
        }
    }

    /// Accumulates every successor of `state` on `symbol` into `into`.
    pub fn delta_into(&self, state: StateId, symbol: Symbol, into: &mut BTreeSet<StateId>) {
        if let Some(destinations) = self.out.get(state).and_then(|arcs| arcs.get(&symbol)) {
            into.extend(destinations.iter().copied());
        }
    }

    /// Symbols labeling at least one transition out of `state`, ascending.
    pub fn out_symbols(&self, state: StateId) -> Vec<Symbol> {
        self.out
            .get(state)
            .map(|arcs| arcs.keys().copied().collect())
            .unwrap_or_default()
    }

    /// All transitions, ordered by origin, then symbol, then destination.
    pub fn transitions(&self) -> Vec<Transition> {
        (0..self.nb_states())
            .flat_map(|state| self.transitions_from(state))
            .collect()
    }

    /// Transitions leaving `state`, ordered by symbol then destination.
    pub fn transitions_from(&self, state: StateId) -> Vec<Transition> {
        let Some(arcs) = self.out.get(state) else {
            return Vec::new();
        };
        arcs.iter()
            .flat_map(|(&symbol, destinations)| {
                destinations
                    .iter()
                    .map(move |&destination| Transition::new(state, destination, symbol))
            })
            .collect()
    }

    pub fn nb_transitions(&self) -> usize {
        self.out
            .iter()
            .flat_map(|arcs| arcs.values())
            .map(BTreeSet::len)
            .sum()
    }

    /// Declares a symbol without adding a transition for it.
    pub fn add_to_alphabet(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    /// Declared symbols: every symbol ever added, transitions or not.
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Drops declared symbols failing `keep`. Transitions are untouched.
    pub fn restrict_alphabet<F>(&mut self, keep: F)
    where
        F: Fn(Symbol) -> bool,
    {
        self.alphabet.retain(|&symbol| keep(symbol));
    }

    /// True iff no `(state, symbol)` pair has two destinations.
    pub fn is_deterministic(&self) -> bool {
        self.out
            .iter()
            .all(|arcs| arcs.values().all(|destinations| destinations.len() <= 1))
    }

    /// Like [`is_deterministic`](Self::is_deterministic), reporting the
    /// first ambiguous pair.
    ///
    /// # Errors
    ///
    /// `NonDeterministic` for the lowest state, then lowest symbol, with
    /// several destinations.
    pub fn check_deterministic(&self) -> Result<()> {
        for (state, arcs) in self.out.iter().enumerate() {
            if let Some((&symbol, _)) = arcs.iter().find(|(_, destinations)| destinations.len() > 1) {
                return Err(CostRegError::NonDeterministic { state, symbol });
            }
        }
        Ok(())
    }

    /// Runs `word` from the initial state, following every branch.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let Some(initial) = self.initial else {
            return false;
        };
        let mut current = BTreeSet::from([initial]);
        for &symbol in word {
            let mut next = BTreeSet::new();
            for &state in &current {
                self.delta_into(state, symbol, &mut next);
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.iter().any(|&state| self.is_final(state))
    }

    fn check_state(&self, state: StateId) -> Result<()> {
        if state < self.nb_states() {
            Ok(())
        } else {
            Err(CostRegError::InvalidState(format!(
                "state {} out of range 0..{}",
                state,
                self.nb_states()
            )))
        }
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Automaton({} states, {} transitions, {} symbols)",
            self.nb_states(),
            self.nb_transitions(),
            self.alphabet.len()
        )
    }
}
