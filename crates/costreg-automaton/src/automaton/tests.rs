//! Tests for the automaton graph and its operations.

use super::*;

const A: Symbol = 0;
const B: Symbol = 1;

/// a* b
fn a_star_b() -> Automaton {
    let mut automaton = Automaton::with_states(2);
    automaton.set_initial_state(0).unwrap();
    automaton.set_final(1).unwrap();
    automaton.add_transition(0, 0, A).unwrap();
    automaton.add_transition(0, 1, B).unwrap();
    automaton
}

/// a b*
fn a_b_star() -> Automaton {
    let mut automaton = Automaton::with_states(2);
    automaton.set_initial_state(0).unwrap();
    automaton.set_final(1).unwrap();
    automaton.add_transition(0, 1, A).unwrap();
    automaton.add_transition(1, 1, B).unwrap();
    automaton
}

fn words(alphabet: &[Symbol], max_len: usize) -> Vec<Vec<Symbol>> {
    let mut all = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for &symbol in alphabet {
                let mut longer: Vec<Symbol> = word.clone();
                longer.push(symbol);
                next.push(longer);
            }
        }
        all.extend(next.iter().cloned());
        frontier = next;
    }
    all
}

fn same_language(a: &Automaton, b: &Automaton, alphabet: &[Symbol], max_len: usize) -> bool {
    words(alphabet, max_len)
        .iter()
        .all(|word| a.accepts(word) == b.accepts(word))
}

// ============================================================================
// Graph Tests
// ============================================================================

mod graph {
    use super::*;

    #[test]
    fn test_states_and_finals() {
        let mut automaton = Automaton::new();
        assert_eq!(automaton.add_state(), 0);
        assert_eq!(automaton.add_state(), 1);
        automaton.set_final(1).unwrap();

        assert_eq!(automaton.nb_states(), 2);
        assert!(!automaton.is_final(0));
        assert!(automaton.is_final(1));
        assert!(!automaton.is_final(7));
        assert_eq!(automaton.final_states().collect::<Vec<_>>(), vec![1]);

        automaton.set_non_final(1).unwrap();
        assert!(!automaton.is_final(1));
    }

    #[test]
    fn test_out_of_range_state() {
        let mut automaton = Automaton::with_states(1);
        assert!(matches!(
            automaton.add_transition(0, 3, A),
            Err(CostRegError::InvalidState(_))
        ));
        assert!(automaton.set_initial_state(1).is_err());
    }

    #[test]
    fn test_delta() {
        let automaton = a_star_b();
        assert_eq!(automaton.delta(0, A).unwrap(), Some(0));
        assert_eq!(automaton.delta(0, B).unwrap(), Some(1));
        assert_eq!(automaton.delta(1, A).unwrap(), None);
        assert_eq!(automaton.delta(9, A).unwrap(), None);
    }

    #[test]
    fn test_non_deterministic_delta() {
        let mut automaton = a_star_b();
        automaton.add_transition(0, 1, A).unwrap();

        assert_eq!(
            automaton.delta(0, A),
            Err(CostRegError::NonDeterministic {
                state: 0,
                symbol: A
            })
        );
        assert!(!automaton.is_deterministic());
        assert_eq!(
            automaton.check_deterministic(),
            Err(CostRegError::NonDeterministic {
                state: 0,
                symbol: A
            })
        );
        assert_eq!(a_star_b().check_deterministic(), Ok(()));

        let mut into = BTreeSet::new();
        automaton.delta_into(0, A, &mut into);
        automaton.delta_into(0, B, &mut into);
        assert_eq!(into.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_transitions_listing() {
        let automaton = a_star_b();
        assert_eq!(automaton.out_symbols(0), vec![A, B]);
        assert!(automaton.out_symbols(1).is_empty());
        assert_eq!(
            automaton.transitions(),
            vec![Transition::new(0, 0, A), Transition::new(0, 1, B)]
        );
        assert_eq!(automaton.nb_transitions(), 2);
        assert_eq!(automaton.alphabet().len(), 2);
    }

    #[test]
    fn test_duplicate_transition_is_noop() {
        let mut automaton = a_star_b();
        automaton.add_transition(0, 0, A).unwrap();
        assert_eq!(automaton.nb_transitions(), 2);
    }

    #[test]
    fn test_delete_transition() {
        let mut automaton = a_star_b();
        assert!(automaton.delete_transition(0, 0, A));
        assert!(!automaton.delete_transition(0, 0, A));
        assert!(!automaton.delete_transition(5, 0, A));
        assert_eq!(automaton.out_symbols(0), vec![B]);
        assert!(automaton.alphabet().contains(&A));
    }

    #[test]
    fn test_alphabet() {
        let mut automaton = a_star_b();
        automaton.add_to_alphabet(7);
        assert!(automaton.alphabet().contains(&7));
        automaton.restrict_alphabet(|symbol| symbol < 5);
        assert_eq!(automaton.alphabet().iter().copied().collect::<Vec<_>>(), vec![A, B]);
    }

    #[test]
    fn test_accepts() {
        let automaton = a_star_b();
        assert!(automaton.accepts(&[B]));
        assert!(automaton.accepts(&[A, A, B]));
        assert!(!automaton.accepts(&[]));
        assert!(!automaton.accepts(&[B, A]));
        assert!(!Automaton::with_states(1).accepts(&[]));
    }
}

// ============================================================================
// Boolean Operation Tests
// ============================================================================

mod operations {
    use super::*;

    #[test]
    fn test_complement() {
        let complement = a_star_b().complement().unwrap();
        assert!(complement.is_deterministic());
        assert!(complement.accepts(&[]));
        assert!(!complement.accepts(&[A, B]));
        assert!(complement.accepts(&[A, A]));
        assert!(complement.accepts(&[B, A]));
        assert!(complement.accepts(&[B, B]));
        for word in words(&[A, B], 4) {
            assert_ne!(a_star_b().accepts(&word), complement.accepts(&word));
        }
    }

    #[test]
    fn test_complement_rejects_non_determinism() {
        let mut automaton = a_star_b();
        automaton.add_transition(0, 1, A).unwrap();
        assert!(matches!(
            automaton.complement(),
            Err(CostRegError::NonDeterministic { .. })
        ));
    }

    #[test]
    fn test_union() {
        let union = a_star_b().union(&a_b_star()).unwrap();
        assert!(union.is_deterministic());
        for word in words(&[A, B], 4) {
            assert_eq!(
                union.accepts(&word),
                a_star_b().accepts(&word) || a_b_star().accepts(&word),
                "{:?}",
                word
            );
        }
    }

    #[test]
    fn test_double_complement() {
        let mut back = a_star_b().complement().unwrap().complement().unwrap();
        back.minimize();
        assert!(same_language(&back, &a_star_b(), &[A, B], 4));
        assert_eq!(back.nb_states(), 2);
    }
}

// ============================================================================
// Minimization Tests
// ============================================================================

mod minimization {
    use super::*;

    #[test]
    fn test_merges_equivalent_states() {
        // two copies of the `b` continuation
        let mut automaton = Automaton::with_states(4);
        automaton.set_initial_state(0).unwrap();
        automaton.add_transition(0, 1, A).unwrap();
        automaton.add_transition(0, 2, B).unwrap();
        automaton.add_transition(1, 3, B).unwrap();
        automaton.add_transition(2, 3, B).unwrap();
        automaton.set_final(3).unwrap();

        let original = automaton.clone();
        automaton.minimize();
        assert_eq!(automaton.nb_states(), 3);
        assert_eq!(automaton.initial_state(), Some(0));
        assert!(same_language(&automaton, &original, &[A, B], 3));
    }

    #[test]
    fn test_distinct_symbols_are_not_merged() {
        let mut automaton = Automaton::with_states(4);
        automaton.set_initial_state(0).unwrap();
        automaton.add_transition(0, 1, A).unwrap();
        automaton.add_transition(0, 2, B).unwrap();
        automaton.add_transition(1, 3, 100).unwrap();
        automaton.add_transition(2, 3, 101).unwrap();
        automaton.set_final(3).unwrap();

        automaton.minimize();
        assert_eq!(automaton.nb_states(), 4);
    }

    #[test]
    fn test_trim_removes_useless_states() {
        let mut automaton = a_star_b();
        let dead = automaton.add_state();
        let unreachable = automaton.add_state();
        automaton.add_transition(0, dead, 5).unwrap();
        automaton.add_transition(unreachable, 1, A).unwrap();

        automaton.trim();
        assert_eq!(automaton.nb_states(), 2);
        assert!(same_language(&automaton, &a_star_b(), &[A, B, 5], 3));
    }

    #[test]
    fn test_empty_language() {
        let mut automaton = Automaton::with_states(3);
        automaton.set_initial_state(0).unwrap();
        automaton.add_transition(0, 1, A).unwrap();
        automaton.add_transition(1, 2, B).unwrap();

        automaton.minimize();
        assert_eq!(automaton.nb_states(), 1);
        assert_eq!(automaton.initial_state(), Some(0));
        assert!(!automaton.is_final(0));
        assert_eq!(automaton.nb_transitions(), 0);
        assert_eq!(automaton.alphabet().len(), 2);
    }

    #[test]
    fn test_minimize_is_stable() {
        let mut once = a_star_b().union(&a_b_star()).unwrap();
        once.minimize();
        let mut twice = once.clone();
        twice.minimize();
        assert_eq!(once, twice);
    }
}
