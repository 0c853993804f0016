//! Tests for penalty functions.

use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod evaluation {
    use super::*;

    #[test]
    fn test_null_is_zero_everywhere() {
        let f = PenaltyFunction::Null;
        assert_eq!(f.penalty(0), 0);
        assert_eq!(f.penalty(42), 0);
        assert_eq!(f.penalty_max(-3, 100), 0);
    }

    #[test]
    fn test_linear() {
        let f = PenaltyFunction::linear(3, 2);
        assert_eq!(f.penalty(0), 2);
        assert_eq!(f.penalty(5), 17);
    }

    #[test]
    fn test_quadratic() {
        let f = PenaltyFunction::quadratic(1, 0, 0);
        assert_eq!(f.penalty(4), 16);
        assert_eq!(f.penalty_max(1, 3), 9);
    }

    #[test]
    fn test_concave_quadratic_peaks_inside() {
        // -(x-2)² + 4 = -x² + 4x
        let f = PenaltyFunction::quadratic(-1, 4, 0);
        assert_eq!(f.penalty_max(0, 5), 4);
        assert_eq!(f.penalty_max(3, 5), 3);
    }

    #[test]
    fn test_saturates() {
        let f = PenaltyFunction::proportional(i32::MAX);
        assert_eq!(f.penalty(10), INFINITE_PENALTY);
        assert_eq!(add_penalties(INFINITE_PENALTY, 1), INFINITE_PENALTY);
        assert_eq!(add_penalties(3, 4), 7);
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_identity() {
        assert!(PenaltyFunction::Identity.is_identity());
        assert!(PenaltyFunction::Identity.is_linear());
        assert!(PenaltyFunction::linear(1, 0).is_identity());
        assert!(!PenaltyFunction::linear(1, 1).is_identity());
    }

    #[test]
    fn test_null() {
        assert!(PenaltyFunction::Null.is_null());
        assert!(PenaltyFunction::linear(0, 0).is_null());
        assert!(PenaltyFunction::constant(0).is_null());
        assert!(!PenaltyFunction::constant(2).is_null());
        assert!(!PenaltyFunction::Null.is_linear());
    }

    #[test]
    fn test_linear_coefficients() {
        assert_eq!(PenaltyFunction::constant(5).linear_coefficients(), Some((0, 5)));
        assert_eq!(
            PenaltyFunction::quadratic(0, 2, 1).linear_coefficients(),
            Some((2, 1))
        );
        assert_eq!(PenaltyFunction::quadratic(1, 0, 0).linear_coefficients(), None);
    }
}

mod monotonicity {
    use super::*;

    fn monotone_shapes() -> Vec<PenaltyFunction> {
        vec![
            PenaltyFunction::Identity,
            PenaltyFunction::linear(2, 1),
            PenaltyFunction::linear(7, 0),
            PenaltyFunction::constant(4),
        ]
    }

    #[test]
    fn test_penalty_is_non_decreasing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for f in monotone_shapes() {
            for _ in 0..200 {
                let mut v = [
                    rng.random_range(0..1000),
                    rng.random_range(0..1000),
                    rng.random_range(0..1000),
                ];
                v.sort_unstable();
                assert!(f.penalty(v[0]) <= f.penalty(v[1]), "{f} at {v:?}");
                assert!(f.penalty(v[1]) <= f.penalty(v[2]), "{f} at {v:?}");
                assert_eq!(
                    f.penalty_max(v[0], v[2]),
                    f.penalty(v[0]).max(f.penalty(v[2]))
                );
            }
        }
    }

    #[test]
    fn test_penalty_max_is_symmetric() {
        let f = PenaltyFunction::linear(3, 1);
        assert_eq!(f.penalty_max(2, 9), f.penalty_max(9, 2));
    }
}

mod g_hat {
    use super::*;

    #[test]
    fn test_min_max_over_domain() {
        let f = PenaltyFunction::Identity;
        // penalty(v) - 2v = -v
        assert_eq!(f.min_g_hat(2.0, 0..=4), -4.0);
        assert_eq!(f.max_g_hat(2.0, 0..=4), 0.0);
    }

    #[test]
    fn test_empty_domain() {
        let f = PenaltyFunction::Identity;
        assert_eq!(f.min_g_hat(1.0, std::iter::empty()), f64::INFINITY);
        assert_eq!(f.max_g_hat(1.0, std::iter::empty()), f64::NEG_INFINITY);
    }
}
