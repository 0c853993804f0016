//! End-to-end intersection tests: languages and counter values of the
//! product against those of the factors.

use costreg_automaton::{
    intersect_cost_automata, Automaton, CostAutomaton, CostAutomatonIntersector, Counter,
    LayerMajorCounter, NamedCounter, StateMajorCounter, WeightTable,
};
use costreg_config::IntersectionConfig;
use costreg_core::{SoftBounds, Symbol};
use costreg_test::{accepted_words, automaton_from, counter_value, layered, words_of_length};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SYMBOLS: [Symbol; 3] = [0, 1, 2];

/// Words with no two consecutive 2s. State 1: the last symbol was 2.
fn no_double_two() -> Automaton {
    automaton_from(
        2,
        0,
        &[0, 1],
        &[(0, 0, 0), (0, 0, 1), (0, 1, 2), (1, 0, 0), (1, 0, 1)],
    )
}

/// Words containing a 0. State 1: a 0 was seen.
fn contains_zero() -> Automaton {
    automaton_from(
        2,
        0,
        &[1],
        &[(0, 1, 0), (0, 0, 1), (0, 0, 2), (1, 1, 0), (1, 1, 1), (1, 1, 2)],
    )
}

fn random_table(
    rng: &mut ChaCha8Rng,
    nb_layers: usize,
    nb_symbols: usize,
    nb_states: usize,
) -> WeightTable {
    let nested = (0..nb_layers)
        .map(|_| {
            (0..nb_symbols)
                .map(|_| {
                    (0..nb_states)
                        .map(|_| {
                            // leave about half the cells empty so some transitions stay unmarked
                            if rng.random_bool(0.5) {
                                0
                            } else {
                                rng.random_range(-3..=3)
                            }
                        })
                        .collect()
                })
                .collect()
        })
        .collect();
    WeightTable::from_nested(nested).unwrap()
}

fn with_counter(automaton: Automaton, counter: impl Counter + 'static) -> CostAutomaton {
    CostAutomaton::with_counters(automaton, vec![Box::new(counter)]).unwrap()
}

fn loose() -> SoftBounds {
    SoftBounds::hard(-100, 100).unwrap()
}

/// Asserts that the product accepts exactly the words every factor accepts
/// and that counter `d` of the product is counter 0 of factor `d` on them.
fn assert_preserves(factors: &[CostAutomaton], product: &CostAutomaton, len: usize) {
    for word in words_of_length(&SYMBOLS, len) {
        let expected = factors.iter().all(|f| f.automaton().accepts(&word));
        assert_eq!(product.automaton().accepts(&word), expected, "{:?}", word);
        if !expected {
            continue;
        }
        for (dimension, factor) in factors.iter().enumerate() {
            assert_eq!(
                counter_value(product, dimension, &word),
                counter_value(factor, 0, &word),
                "counter {} on {:?}",
                dimension,
                word
            );
        }
    }
}

// ============================================================================
// Weight Preservation Tests
// ============================================================================

mod weights {
    use super::*;

    #[test]
    fn test_state_dependent_weight_moves_to_product_state() {
        // weight 7 on symbol 1 at layer 1, only when read from state 1
        let mut table = WeightTable::zeros(2, 2, 3);
        table.set(1, 1, 1, 7).unwrap();
        let counted = with_counter(layered(2, &[0, 1]), LayerMajorCounter::new(table, loose()));
        let starts_with_one = automaton_from(2, 0, &[1], &[(0, 1, 1), (1, 1, 0), (1, 1, 1)]);

        let product =
            intersect_cost_automata(counted, vec![CostAutomaton::new(starts_with_one)]).unwrap();

        assert_eq!(product.automaton().nb_states(), 3);
        assert_eq!(counter_value(&product, 0, &[1, 1]), Some(7));
        assert_eq!(counter_value(&product, 0, &[1, 0]), Some(0));
        assert!(!product.automaton().accepts(&[0, 1]));

        // the weight sits on the product state reached after reading 1
        let automaton = product.automaton();
        let initial = automaton.initial_state().unwrap();
        let middle = automaton.delta(initial, 1).unwrap().unwrap();
        assert_eq!(product.weight_at_state(1, 1, middle), Some(7));
        assert_eq!(product.weight_at_state(1, 1, initial), Some(0));
        assert_eq!(product.counters()[0].nb_states(), automaton.nb_states());
    }

    #[test]
    fn test_weight_from_initial_state_survives_pass_through() {
        // weight 7 on symbol 0 at layer 0, only when read from state 0
        let mut table = WeightTable::zeros(2, 2, 3);
        table.set(0, 0, 0, 7).unwrap();
        let counted = with_counter(layered(2, &[0, 1]), LayerMajorCounter::new(table, loose()));
        let pass_through = CostAutomaton::new(layered(2, &[0, 1]));

        let product = intersect_cost_automata(counted, vec![pass_through]).unwrap();
        let automaton = product.automaton();
        let initial = automaton.initial_state().unwrap();
        assert_eq!(accepted_words(&product, &[0, 1], 2).len(), 4);

        let counter = &product.counters()[0];
        assert!(counter.is_state_dependent());
        assert_eq!(counter.nb_states(), automaton.nb_states());
        for layer in 0..counter.nb_layers() {
            for symbol in 0..counter.nb_symbols() as Symbol {
                for state in 0..counter.nb_states() {
                    let expected = if (layer, symbol, state) == (0, 0, initial) { 7 } else { 0 };
                    assert_eq!(
                        counter.weight_at_state(layer, symbol, state),
                        expected,
                        "layer {} symbol {} state {}",
                        layer,
                        symbol,
                        state
                    );
                }
            }
        }
        assert_eq!(counter_value(&product, 0, &[0, 1]), Some(7));
        assert_eq!(counter_value(&product, 0, &[1, 0]), Some(0));
    }

    #[test]
    fn test_state_independent_counters_are_kept() {
        let global = NamedCounter::global_shift(3, 3, &[2], 1, loose(), 1).unwrap();
        let counted = with_counter(layered(3, &SYMBOLS), global);
        let other = CostAutomaton::new(no_double_two());

        let product = intersect_cost_automata(counted, vec![other]).unwrap();
        assert!(!product.has_state_dependent_counter());
        assert_eq!(counter_value(&product, 0, &[2, 1, 2]), Some(2));
        assert_eq!(accepted_words(&product, &SYMBOLS, 3).len(), 27 - 5);
    }

    #[test]
    fn test_shared_labels_across_three_factors() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let first = with_counter(
            layered(3, &SYMBOLS),
            LayerMajorCounter::new(random_table(&mut rng, 3, 3, 4), loose()),
        );
        let second = with_counter(
            no_double_two(),
            LayerMajorCounter::new(random_table(&mut rng, 3, 3, 2), loose()),
        );
        let third = with_counter(
            contains_zero(),
            LayerMajorCounter::new(random_table(&mut rng, 3, 3, 2), loose()),
        );
        let factors = vec![first, second, third];

        let product = intersect_cost_automata(factors[0].clone(), factors[1..].to_vec()).unwrap();
        assert_eq!(product.nb_dimensions(), 3);
        assert!(product.automaton().is_deterministic());
        assert_preserves(&factors, &product, 3);
    }

    #[test]
    fn test_random_factors_preserve_counters() {
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut factors = vec![with_counter(
                layered(4, &SYMBOLS),
                LayerMajorCounter::new(random_table(&mut rng, 4, 3, 5), loose()),
            )];
            let patterns = [no_double_two(), contains_zero()];
            for pattern in patterns {
                let factor = if rng.random_bool(0.5) {
                    let table = random_table(&mut rng, 4, 3, pattern.nb_states());
                    with_counter(pattern, LayerMajorCounter::new(table, loose()))
                } else {
                    let table = random_table(&mut rng, 4, 3, 1);
                    with_counter(pattern, StateMajorCounter::new(&table, loose()))
                };
                factors.push(factor);
            }

            let product =
                intersect_cost_automata(factors[0].clone(), factors[1..].to_vec()).unwrap();
            assert_preserves(&factors, &product, 4);
        }
    }

    #[test]
    fn test_placeholders_keep_bounds() {
        let bounds = SoftBounds::identity(0, 6).unwrap();
        let mut table = WeightTable::zeros(2, 2, 3);
        table.set(0, 0, 0, 2).unwrap();
        let counted = with_counter(layered(2, &[0, 1]), LayerMajorCounter::new(table, bounds));
        let product =
            intersect_cost_automata(counted, vec![CostAutomaton::new(layered(2, &[0, 1]))]).unwrap();
        assert_eq!(product.counters()[0].bounds(), &bounds);
        assert_eq!(counter_value(&product, 0, &[0, 0]), Some(2));
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_without_minimization() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let factors = vec![
            with_counter(
                layered(3, &SYMBOLS),
                LayerMajorCounter::new(random_table(&mut rng, 3, 3, 4), loose()),
            ),
            with_counter(
                contains_zero(),
                LayerMajorCounter::new(random_table(&mut rng, 3, 3, 2), loose()),
            ),
        ];
        let config = IntersectionConfig::new().with_minimize_each_fold(false);
        let trimmed = CostAutomatonIntersector::with_config(config)
            .intersect(factors[0].clone(), factors[1..].to_vec())
            .unwrap();
        let minimized = CostAutomatonIntersector::new()
            .intersect(factors[0].clone(), factors[1..].to_vec())
            .unwrap();

        assert_preserves(&factors, &trimmed, 3);
        assert!(trimmed.automaton().nb_states() >= minimized.automaton().nb_states());
    }

    #[test]
    fn test_low_marker_ceiling() {
        let mut table = WeightTable::zeros(2, 2, 3);
        table.set(1, 1, 1, 7).unwrap();
        let counted = with_counter(layered(2, &[0, 1]), LayerMajorCounter::new(table, loose()));
        let config = IntersectionConfig::new()
            .with_marker_ceiling(1000)
            .with_marker_capacity(10);

        let product = CostAutomatonIntersector::with_config(config)
            .intersect(counted, vec![CostAutomaton::new(layered(2, &[0, 1]))])
            .unwrap();
        assert_eq!(counter_value(&product, 0, &[0, 1]), Some(7));
        assert!(product.automaton().alphabet().iter().all(|&s| s < 2));
    }
}
