//! Boolean operations over deterministic automata.
//!
//! Both operations complete their inputs with an implicit sink state over
//! the declared alphabet, so a missing transition behaves as a move to a
//! non-final trap.

use std::collections::{HashMap, VecDeque};

use costreg_core::{Result, StateId};

use super::Automaton;

impl Automaton {
    /// Deterministic automaton accepting the words of `self` or `other`.
    ///
    /// The result is built over the union of both alphabets; only pairs
    /// reachable from the initial pair are created. It is not minimized.
    ///
    /// # Errors
    ///
    /// `NonDeterministic` if either input is not deterministic.
    pub fn union(&self, other: &Automaton) -> Result<Automaton> {
        let mut result = Automaton::new();
        result.alphabet = self.alphabet.union(&other.alphabet).copied().collect();

        // `None` is the implicit sink of the corresponding factor.
        type Pair = (Option<StateId>, Option<StateId>);
        let start: Pair = (self.initial, other.initial);
        let mut ids: HashMap<Pair, StateId> = HashMap::new();
        let mut queue: VecDeque<Pair> = VecDeque::new();

        let first = result.add_state();
        result.initial = Some(first);
        ids.insert(start, first);
        queue.push_back(start);

        let symbols: Vec<_> = result.alphabet.iter().copied().collect();
        while let Some(pair) = queue.pop_front() {
            let state = ids[&pair];
            let accepting = pair.0.is_some_and(|s| self.is_final(s))
                || pair.1.is_some_and(|s| other.is_final(s));
            if accepting {
                result.set_final(state)?;
            }
            for &symbol in &symbols {
                let next: Pair = (
                    match pair.0 {
                        Some(s) => self.delta(s, symbol)?,
                        None => None,
                    },
                    match pair.1 {
                        Some(s) => other.delta(s, symbol)?,
                        None => None,
                    },
                );
                if next == (None, None) {
                    continue;
                }
                let destination = match ids.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = result.add_state();
                        ids.insert(next, id);
                        queue.push_back(next);
                        id
                    }
                };
                result.add_transition(state, destination, symbol)?;
            }
        }
        Ok(result)
    }

    /// Deterministic automaton accepting every word over the declared
    /// alphabet that `self` rejects.
    ///
    /// # Errors
    ///
    /// `NonDeterministic` if `self` is not deterministic.
    pub fn complement(&self) -> Result<Automaton> {
        let n = self.nb_states();
        let mut result = Automaton::with_states(n + 1);
        result.alphabet = self.alphabet.clone();
        let sink = n;
        result.set_initial_state(self.initial.unwrap_or(sink))?;

        for state in 0..=n {
            if !(state < n && self.is_final(state)) {
                result.set_final(state)?;
            }
            for &symbol in &self.alphabet {
                let destination = if state < n {
                    self.delta(state, symbol)?.unwrap_or(sink)
                } else {
                    sink
                };
                result.add_transition(state, destination, symbol)?;
            }
        }
        Ok(result)
    }
}
