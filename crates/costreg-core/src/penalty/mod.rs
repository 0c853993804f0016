//! Penalty functions mapping a soft-bound violation distance to a cost.
//!
//! Every variant is monotone over the non-negative distances it is evaluated
//! on, which is what lets [`PenaltyFunction::penalty_max`] look at interval
//! ends only. A new variant must either keep that property or extend
//! `penalty_max` with its own extremum search (as `Quadratic` does).

use std::fmt;

/// A penalty value. [`INFINITE_PENALTY`] stands for `+∞`.
pub type Penalty = i32;

/// Penalty of a value outside the hard bounds.
pub const INFINITE_PENALTY: Penalty = i32::MAX;

/// A pure `value -> cost` function.
///
/// # Examples
///
/// ```
/// use costreg_core::PenaltyFunction;
///
/// let f = PenaltyFunction::linear(3, 2);
/// assert_eq!(f.penalty(4), 14);
/// assert_eq!(f.penalty_max(1, 4), 14);
/// assert!(f.is_linear());
/// assert!(!f.is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PenaltyFunction {
    /// Constant zero: the bound is hard.
    #[default]
    Null,
    /// `f(x) = x`
    Identity,
    /// `f(x) = factor * x + constant`
    Linear { factor: i32, constant: i32 },
    /// `f(x) = c`
    Constant(i32),
    /// `f(x) = a * x² + b * x + c`
    Quadratic { a: i32, b: i32, c: i32 },
}

impl PenaltyFunction {
    /// Creates `f(x) = factor * x + constant`.
    pub const fn linear(factor: i32, constant: i32) -> Self {
        PenaltyFunction::Linear { factor, constant }
    }

    /// Creates `f(x) = factor * x`.
    pub const fn proportional(factor: i32) -> Self {
        PenaltyFunction::Linear {
            factor,
            constant: 0,
        }
    }

    /// Creates `f(x) = c`.
    pub const fn constant(c: i32) -> Self {
        PenaltyFunction::Constant(c)
    }

    /// Creates `f(x) = a * x² + b * x + c`.
    pub const fn quadratic(a: i32, b: i32, c: i32) -> Self {
        PenaltyFunction::Quadratic { a, b, c }
    }

    /// Evaluates the function, saturating at [`INFINITE_PENALTY`].
    pub fn penalty(&self, value: i32) -> Penalty {
        let x = value as i64;
        let raw = match *self {
            PenaltyFunction::Null => 0,
            PenaltyFunction::Identity => x,
            PenaltyFunction::Linear { factor, constant } => factor as i64 * x + constant as i64,
            PenaltyFunction::Constant(c) => c as i64,
            PenaltyFunction::Quadratic { a, b, c } => {
                (a as i64)
                    .saturating_mul(x)
                    .saturating_mul(x)
                    .saturating_add(b as i64 * x)
                    .saturating_add(c as i64)
            }
        };
        saturate(raw)
    }

    /// Maximum penalty over the closed interval `[min(v1, v2), max(v1, v2)]`.
    pub fn penalty_max(&self, v1: i32, v2: i32) -> Penalty {
        let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
        let ends = self.penalty(lo).max(self.penalty(hi));
        match *self {
            PenaltyFunction::Quadratic { a, b, .. } if a < 0 => {
                // concave: the vertex may lie strictly inside the interval
                let vertex = -(b as f64) / (2.0 * a as f64);
                let mut best = ends;
                for candidate in [vertex.floor(), vertex.ceil()] {
                    if candidate >= lo as f64 && candidate <= hi as f64 {
                        best = best.max(self.penalty(candidate as i32));
                    }
                }
                best
            }
            _ => ends,
        }
    }

    /// Returns true if the function is constant zero.
    pub fn is_null(&self) -> bool {
        match *self {
            PenaltyFunction::Null => true,
            PenaltyFunction::Identity => false,
            PenaltyFunction::Linear { factor, constant } => factor == 0 && constant == 0,
            PenaltyFunction::Constant(c) => c == 0,
            PenaltyFunction::Quadratic { a, b, c } => a == 0 && b == 0 && c == 0,
        }
    }

    /// Returns true if `f(x) = x`.
    pub fn is_identity(&self) -> bool {
        self.linear_coefficients() == Some((1, 0))
    }

    /// Returns true if `f(x) = a * x + b` for some `a`, `b`.
    pub fn is_linear(&self) -> bool {
        self.linear_coefficients().is_some()
    }

    /// Returns `(factor, constant)` when the function is affine.
    pub fn linear_coefficients(&self) -> Option<(i32, i32)> {
        match *self {
            PenaltyFunction::Null => None,
            PenaltyFunction::Identity => Some((1, 0)),
            PenaltyFunction::Linear { factor, constant } => Some((factor, constant)),
            PenaltyFunction::Constant(c) => Some((0, c)),
            PenaltyFunction::Quadratic { a: 0, b, c } => Some((b, c)),
            PenaltyFunction::Quadratic { .. } => None,
        }
    }

    /// Minimum of `penalty(v) - lambda * v` over `domain`.
    ///
    /// Returns `f64::INFINITY` for an empty domain.
    pub fn min_g_hat<I>(&self, lambda: f64, domain: I) -> f64
    where
        I: IntoIterator<Item = i32>,
    {
        domain
            .into_iter()
            .map(|v| self.penalty(v) as f64 - lambda * v as f64)
            .fold(f64::INFINITY, f64::min)
    }

    /// Maximum of `penalty(v) - lambda * v` over `domain`.
    ///
    /// Returns `f64::NEG_INFINITY` for an empty domain.
    pub fn max_g_hat<I>(&self, lambda: f64, domain: I) -> f64
    where
        I: IntoIterator<Item = i32>,
    {
        domain
            .into_iter()
            .map(|v| self.penalty(v) as f64 - lambda * v as f64)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl fmt::Display for PenaltyFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PenaltyFunction::Null => write!(f, "0"),
            PenaltyFunction::Identity => write!(f, "x"),
            PenaltyFunction::Linear { factor, constant } => write!(f, "{}x+{}", factor, constant),
            PenaltyFunction::Constant(c) => write!(f, "{}", c),
            PenaltyFunction::Quadratic { a, b, c } => write!(f, "{}x²+{}x+{}", a, b, c),
        }
    }
}

/// Clamps a wide intermediate into the penalty range.
pub(crate) fn saturate(raw: i64) -> Penalty {
    raw.clamp(i32::MIN as i64, INFINITE_PENALTY as i64) as Penalty
}

/// Adds two penalties, keeping `+∞` absorbing.
pub(crate) fn add_penalties(p1: Penalty, p2: Penalty) -> Penalty {
    if p1 == INFINITE_PENALTY || p2 == INFINITE_PENALTY {
        INFINITE_PENALTY
    } else {
        saturate(p1 as i64 + p2 as i64)
    }
}

#[cfg(test)]
mod tests;
