//! Facade tests: prelude, configuration-driven intersection and logging.

use costreg::prelude::*;
use costreg::{console, intersector, periodic_table};
use costreg_test::{accepted_words, counter_value, layered};

// ============================================================================
// Contract Rules
// ============================================================================

/// Two weeks of day (0), night (1) or rest (2): at most one night over days
/// 5 and 12, and a linear penalty beyond 3 rests.
fn fortnight_rules() -> (CostAutomaton, CostAutomaton) {
    let weekend_nights = periodic_table(14, 3, 5, 7, &[1], 1).unwrap();
    let weekends = CostAutomaton::with_counters(
        layered(14, &[0, 1, 2]),
        vec![Box::new(StateMajorCounter::new(
            &weekend_nights,
            SoftBounds::hard(0, 1).unwrap(),
        ))],
    )
    .unwrap();

    let rests = NamedCounter::global_shift(
        14,
        3,
        &[2],
        1,
        SoftBounds::min_hard_max_linear(0, 14, 3, 2, 0).unwrap(),
        1,
    )
    .unwrap();
    let rest_rule =
        CostAutomaton::with_counters(layered(14, &[0, 1, 2]), vec![Box::new(rests)]).unwrap();
    (weekends, rest_rule)
}

#[test]
fn test_prelude_intersection() {
    let (weekends, rests) = fortnight_rules();
    let product = intersect_cost_automata(weekends, vec![rests]).unwrap();

    assert_eq!(product.nb_dimensions(), 2);
    assert_eq!(product.automaton().nb_states(), 15);

    let mut word = vec![0; 14];
    word[5] = 1;
    word[12] = 1;
    word[0] = 2;
    assert_eq!(counter_value(&product, 0, &word), Some(2));
    assert_eq!(counter_value(&product, 1, &word), Some(1));
    assert_eq!(product.counters()[1].bounds().penalty(5), 4);
}

#[test]
fn test_config_driven_intersection() {
    let config = CostRegConfig::from_toml_str(
        r#"
        log_filter = "costreg_automaton=debug"

        [intersection]
        minimize_each_fold = false
        marker_ceiling = 5000
        marker_capacity = 100
        "#,
    )
    .unwrap();
    assert!(!config.intersection.minimize_each_fold);

    let mut table = WeightTable::zeros(2, 2, 3);
    table.set(1, 0, 1, 3).unwrap();
    let rule = CostAutomaton::with_counters(
        layered(2, &[0, 1]),
        vec![Box::new(LayerMajorCounter::new(table, SoftBounds::hard(0, 3).unwrap()))],
    )
    .unwrap();

    let product = intersector(&config)
        .intersect(rule, vec![CostAutomaton::new(layered(2, &[0, 1]))])
        .unwrap();
    assert_eq!(accepted_words(&product, &[0, 1], 2).len(), 4);
    assert_eq!(counter_value(&product, 0, &[1, 0]), Some(3));
    assert_eq!(counter_value(&product, 0, &[1, 1]), Some(0));
}

#[test]
fn test_console_init_is_idempotent() {
    console::init();
    console::init();
    console::init_with_filter("costreg_automaton=trace, not a directive");
    assert!(console::is_initialized());
}
