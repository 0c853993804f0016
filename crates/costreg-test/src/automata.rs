//! Small automata used across the test suites.

use costreg_automaton::Automaton;
use costreg_core::{StateId, Symbol};

pub const A: Symbol = 0;
pub const B: Symbol = 1;

/// Builds an automaton from a transition list `(origin, destination, symbol)`.
///
/// # Panics
///
/// Panics if a state is out of range.
pub fn automaton_from(
    nb_states: usize,
    initial: StateId,
    finals: &[StateId],
    transitions: &[(StateId, StateId, Symbol)],
) -> Automaton {
    let mut automaton = Automaton::with_states(nb_states);
    automaton.set_initial_state(initial).expect("initial state");
    for &state in finals {
        automaton.set_final(state).expect("final state");
    }
    for &(origin, destination, symbol) in transitions {
        automaton
            .add_transition(origin, destination, symbol)
            .expect("transition");
    }
    automaton
}

/// `a* b`
pub fn a_star_b() -> Automaton {
    automaton_from(2, 0, &[1], &[(0, 0, A), (0, 1, B)])
}

/// `a b*`
pub fn a_b_star() -> Automaton {
    automaton_from(2, 0, &[1], &[(0, 1, A), (1, 1, B)])
}

/// Every word of exactly `nb_layers` symbols over `symbols`: a chain of
/// `nb_layers + 1` states.
pub fn layered(nb_layers: usize, symbols: &[Symbol]) -> Automaton {
    let mut automaton = Automaton::with_states(nb_layers + 1);
    automaton.set_initial_state(0).expect("initial state");
    automaton.set_final(nb_layers).expect("final state");
    for layer in 0..nb_layers {
        automaton
            .add_transitions(layer, layer + 1, symbols)
            .expect("layer transitions");
    }
    automaton
}
