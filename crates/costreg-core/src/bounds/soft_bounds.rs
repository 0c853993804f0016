//! SoftBounds - hard/soft interval with one penalty function per side

use std::fmt;

use tracing::warn;

use crate::error::{CostRegError, Result};
use crate::penalty::{add_penalties, Penalty, PenaltyFunction, INFINITE_PENALTY};

/// One side of a [`SoftBounds`]: a hard limit, a preferred limit, and the
/// penalty applied to the distance between a value and the preferred limit.
///
/// The function degenerates to [`PenaltyFunction::Null`] whenever the two
/// limits coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Bound {
    hard: i32,
    soft: i32,
    function: PenaltyFunction,
}

impl Bound {
    fn new(hard: i32, soft: i32, function: Option<PenaltyFunction>) -> Self {
        let function = match function {
            Some(f) if hard != soft && !f.is_null() => f,
            _ => PenaltyFunction::Null,
        };
        Self {
            hard,
            soft,
            function,
        }
    }

    /// True iff the bound carries no penalty.
    fn is_hard(&self) -> bool {
        self.function.is_null()
    }
}

/// Which side of the interval a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Min,
    Max,
}

impl Side {
    /// Distance from the preferred limit, positive when violated.
    fn distance(self, bound: &Bound, val: i32) -> i32 {
        match self {
            Side::Min => bound.soft - val,
            Side::Max => val - bound.soft,
        }
    }

    fn beyond_hard(self, bound: &Bound, val: i32) -> bool {
        match self {
            Side::Min => val < bound.hard,
            Side::Max => val > bound.hard,
        }
    }

    fn penalty(self, bound: &Bound, val: i32) -> Penalty {
        if self.beyond_hard(bound, val) {
            INFINITE_PENALTY
        } else if self.distance(bound, val) > 0 {
            bound.function.penalty(self.distance(bound, val))
        } else {
            0
        }
    }

    /// Maximum penalty for values between `from` and the hard limit.
    ///
    /// `from` is clamped into the `[soft, hard]` segment of this side.
    fn max_penalty_from(self, bound: &Bound, from: i32) -> Penalty {
        let (lo, hi) = match self {
            Side::Min => (bound.hard, bound.soft),
            Side::Max => (bound.soft, bound.hard),
        };
        let from = from.clamp(lo.min(hi), lo.max(hi));
        bound.function.penalty_max(
            self.distance(bound, from),
            self.distance(bound, bound.hard),
        )
    }

    fn max_penalty(self, bound: &Bound) -> Penalty {
        self.max_penalty_from(bound, bound.soft)
    }

    /// Tightens the hard limit towards the soft one until its penalty fits
    /// under `ceiling`.
    fn shrink(self, bound: &mut Bound, ceiling: Penalty) {
        let max = self.max_penalty(bound);
        if max == 0 {
            bound.function = PenaltyFunction::Null;
            return;
        }
        if max <= ceiling {
            return;
        }
        let step = match self {
            Side::Min => 1,
            Side::Max => -1,
        };
        while bound.hard != bound.soft && self.penalty(bound, bound.hard) > ceiling {
            bound.hard += step;
        }
        if bound.hard == bound.soft {
            bound.function = PenaltyFunction::Null;
        }
    }
}

/// Hard and preferred bounds on a counter value, with their penalty.
///
/// Invariants: `min_hard <= min_soft`, `max_soft <= max_hard`,
/// `min_hard <= max_hard`.
///
/// # Examples
///
/// ```
/// use costreg_core::{SoftBounds, INFINITE_PENALTY};
///
/// let bounds = SoftBounds::hard(2, 5).unwrap();
/// assert_eq!(bounds.penalty(1), INFINITE_PENALTY);
/// assert_eq!(bounds.penalty(2), 0);
/// assert_eq!(bounds.penalty(5), 0);
/// assert_eq!(bounds.penalty(6), INFINITE_PENALTY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoftBounds {
    min: Bound,
    max: Bound,
}

impl SoftBounds {
    /// Creates bounds from both sides.
    ///
    /// A `None` or null function makes the side hard.
    ///
    /// # Errors
    ///
    /// `InfeasibleBounds` if `min_hard > max_hard`, `InvalidBounds` if a soft
    /// limit lies outside its hard limit.
    pub fn new(
        min_hard: i32,
        min_soft: i32,
        min_function: Option<PenaltyFunction>,
        max_hard: i32,
        max_soft: i32,
        max_function: Option<PenaltyFunction>,
    ) -> Result<Self> {
        if min_hard > max_hard {
            return Err(CostRegError::InfeasibleBounds {
                min: min_hard,
                max: max_hard,
            });
        }
        if min_hard > min_soft {
            return Err(CostRegError::InvalidBounds(format!(
                "min soft {} below min hard {}",
                min_soft, min_hard
            )));
        }
        if max_soft > max_hard {
            return Err(CostRegError::InvalidBounds(format!(
                "max soft {} above max hard {}",
                max_soft, max_hard
            )));
        }
        Ok(Self {
            min: Bound::new(min_hard, min_soft, min_function),
            max: Bound::new(max_hard, max_soft, max_function),
        })
    }

    /// Returns the hard minimum.
    #[inline]
    pub fn min(&self) -> i32 {
        self.min.hard
    }

    /// Returns the hard maximum.
    #[inline]
    pub fn max(&self) -> i32 {
        self.max.hard
    }

    /// Returns the preferred minimum.
    #[inline]
    pub fn soft_min(&self) -> i32 {
        self.min.soft
    }

    /// Returns the preferred maximum.
    #[inline]
    pub fn soft_max(&self) -> i32 {
        self.max.soft
    }

    pub fn min_penalty_function(&self) -> PenaltyFunction {
        self.min.function
    }

    pub fn max_penalty_function(&self) -> PenaltyFunction {
        self.max.function
    }

    /// Penalty of `val`: `+∞` outside the hard interval, else the sum of
    /// both sides.
    pub fn penalty(&self, val: i32) -> Penalty {
        if val < self.min.hard || val > self.max.hard {
            return INFINITE_PENALTY;
        }
        add_penalties(Side::Min.penalty(&self.min, val), Side::Max.penalty(&self.max, val))
    }

    /// Maximum penalty reachable inside `[min_hard, max_hard]`.
    ///
    /// When the preferred limits cross (`min_soft > max_soft`) both sides are
    /// non-zero between them and the sum is evaluated pointwise there.
    pub fn max_penalty(&self) -> Penalty {
        if self.min.soft <= self.max.soft {
            return Side::Min
                .max_penalty(&self.min)
                .max(Side::Max.max_penalty(&self.max));
        }
        let mut m = Side::Min
            .max_penalty_from(&self.min, self.max.soft)
            .max(Side::Max.max_penalty_from(&self.max, self.min.soft));
        let lo = (self.max.soft + 1).max(self.min.hard);
        let hi = self.min.soft.min(self.max.hard);
        for v in lo..=hi {
            m = m.max(self.penalty(v));
        }
        m
    }

    /// Tightens each hard limit to the loosest value whose penalty does not
    /// exceed `ceiling`.
    ///
    /// Returns `Ok(false)` if the hard interval became empty, in which case
    /// the caller drops the rule as infeasible.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` if `ceiling` is negative.
    pub fn shrink_hard_bounds(&mut self, ceiling: Penalty) -> Result<bool> {
        if ceiling < 0 {
            return Err(CostRegError::InvalidBounds(format!(
                "penalty ceiling must be non-negative, got {}",
                ceiling
            )));
        }
        Side::Min.shrink(&mut self.min, ceiling);
        Side::Max.shrink(&mut self.max, ceiling);
        let feasible = self.min.hard <= self.max.hard;
        if !feasible {
            warn!(
                event = "bounds_infeasible",
                ceiling,
                min = self.min.hard,
                max = self.max.hard,
            );
        }
        Ok(feasible)
    }

    /// True iff `penalty(x) = x` on `[0, max_hard]`.
    pub fn is_identity(&self) -> bool {
        self.min.is_hard() && self.max.soft == 0 && self.max.function.is_identity()
    }

    /// True iff `penalty(x) = a * x + b` on `[0, max_hard]`.
    pub fn is_linear(&self) -> bool {
        self.min.is_hard() && self.max.soft == 0 && self.max.function.is_linear()
    }

    /// The factor `a` when [`is_linear`](Self::is_linear).
    pub fn factor(&self) -> Option<i32> {
        self.linear_coefficients().map(|(a, _)| a)
    }

    /// The constant `b` when [`is_linear`](Self::is_linear).
    pub fn constant(&self) -> Option<i32> {
        self.linear_coefficients().map(|(_, b)| b)
    }

    fn linear_coefficients(&self) -> Option<(i32, i32)> {
        if self.is_linear() {
            self.max.function.linear_coefficients()
        } else {
            None
        }
    }

    /// Bounds on `n - x` given bounds on `x`.
    ///
    /// Used to turn a "number of not-X" counter into a "number of X" one.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` if `n < max_hard`.
    pub fn inverse_min_max(&self, n: i32) -> Result<SoftBounds> {
        if n < self.max.hard {
            return Err(CostRegError::InvalidBounds(format!(
                "inverse base {} below max hard {}",
                n, self.max.hard
            )));
        }
        SoftBounds::new(
            n - self.max.hard,
            n - self.max.soft,
            Some(self.max.function),
            n - self.min.hard,
            n - self.min.soft,
            Some(self.min.function),
        )
    }

    /// Lists `(value, penalty(value))` for every value of the hard interval,
    /// in increasing order.
    pub fn make_soft_relation_table(&self) -> Vec<(i32, Penalty)> {
        (self.min.hard..=self.max.hard)
            .map(|v| (v, self.penalty(v)))
            .collect()
    }
}

impl fmt::Display for SoftBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}..{}..{}]",
            self.min.hard, self.min.soft, self.max.soft, self.max.hard
        )
    }
}
