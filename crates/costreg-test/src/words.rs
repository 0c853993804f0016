//! Word enumeration and counter evaluation along runs.

use costreg_automaton::{CostAutomaton, Counter};
use costreg_core::Symbol;

/// Every word of exactly `len` symbols over `alphabet`, in lexicographic
/// order of positions.
pub fn words_of_length(alphabet: &[Symbol], len: usize) -> Vec<Vec<Symbol>> {
    let mut words = vec![Vec::new()];
    for _ in 0..len {
        words = words
            .into_iter()
            .flat_map(|word: Vec<Symbol>| {
                alphabet.iter().map(move |&symbol| {
                    let mut longer = word.clone();
                    longer.push(symbol);
                    longer
                })
            })
            .collect();
    }
    words
}

/// Words of length `len` accepted by `cost`'s automaton.
pub fn accepted_words(cost: &CostAutomaton, alphabet: &[Symbol], len: usize) -> Vec<Vec<Symbol>> {
    words_of_length(alphabet, len)
        .into_iter()
        .filter(|word| cost.automaton().accepts(word))
        .collect()
}

/// Sum of counter `dimension`'s weights along the run of `word`, reading
/// symbol `i` at layer `i` from the state the run is in.
///
/// `None` if the run blocks, is not deterministic, or the counter does not
/// exist.
pub fn counter_value(cost: &CostAutomaton, dimension: usize, word: &[Symbol]) -> Option<i32> {
    let counter: &dyn Counter = cost.counters().get(dimension)?.as_ref();
    let automaton = cost.automaton();
    let mut state = automaton.initial_state()?;
    let mut total = 0;
    for (layer, &symbol) in word.iter().enumerate() {
        total += counter.weight_at_state(layer, symbol, state);
        state = automaton.delta(state, symbol).ok()??;
    }
    Some(total)
}
