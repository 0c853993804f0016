//! Named constructors for the bound shapes used by scheduling rules.

use super::SoftBounds;
use crate::error::Result;
use crate::penalty::{Penalty, PenaltyFunction};

impl SoftBounds {
    /// `f(x) = 0` on `[min, max]`.
    pub fn hard(min: i32, max: i32) -> Result<Self> {
        SoftBounds::new(min, min, None, max, max, None)
    }

    /// `f(x) = g(x)` on `[min_hard, max_hard]`, the max side measuring from 0.
    pub fn relation(min_hard: i32, max_hard: i32, max_function: PenaltyFunction) -> Result<Self> {
        SoftBounds::new(min_hard, min_hard, None, max_hard, 0, Some(max_function))
    }

    /// Both sides given explicitly.
    pub fn tuple(
        min_hard: i32,
        min_soft: i32,
        min_function: PenaltyFunction,
        max_hard: i32,
        max_soft: i32,
        max_function: PenaltyFunction,
    ) -> Result<Self> {
        SoftBounds::new(
            min_hard,
            min_soft,
            Some(min_function),
            max_hard,
            max_soft,
            Some(max_function),
        )
    }

    /// Like [`tuple`](Self::tuple), then shrunk to `ceiling`.
    ///
    /// Returns `Ok(None)` when no value stays under the ceiling.
    #[allow(clippy::too_many_arguments)]
    pub fn shrunk(
        min_hard: i32,
        min_soft: i32,
        min_function: PenaltyFunction,
        max_hard: i32,
        max_soft: i32,
        max_function: PenaltyFunction,
        ceiling: Penalty,
    ) -> Result<Option<Self>> {
        let mut bounds = SoftBounds::tuple(
            min_hard,
            min_soft,
            min_function,
            max_hard,
            max_soft,
            max_function,
        )?;
        Ok(bounds.shrink_hard_bounds(ceiling)?.then_some(bounds))
    }

    /// `f(x) = x` on `[min, max]`.
    pub fn identity(min: i32, max: i32) -> Result<Self> {
        SoftBounds::relation(min, max, PenaltyFunction::Identity)
    }

    /// `f(x) = x` on `[0, max]`.
    pub fn identity_up_to(max: i32) -> Result<Self> {
        SoftBounds::identity(0, max)
    }

    /// `f(x) = factor * x + offset` on `[min, max]`.
    pub fn linear(min: i32, max: i32, factor: i32, offset: i32) -> Result<Self> {
        SoftBounds::relation(min, max, PenaltyFunction::linear(factor, offset))
    }

    /// `f(x) = factor * x` on `[0, max]`.
    pub fn linear_up_to(max: i32, factor: i32) -> Result<Self> {
        SoftBounds::linear(0, max, factor, 0)
    }

    /// `f(x) = a(l - x) + b` below `l`, `c(x - u) + d` above `u`.
    #[allow(clippy::too_many_arguments)]
    pub fn min_linear_max_linear(
        min_hard: i32,
        min_pref: i32,
        min_factor: i32,
        min_offset: i32,
        max_hard: i32,
        max_pref: i32,
        max_factor: i32,
        max_offset: i32,
    ) -> Result<Self> {
        SoftBounds::tuple(
            min_hard,
            min_pref,
            PenaltyFunction::linear(min_factor, min_offset),
            max_hard,
            max_pref,
            PenaltyFunction::linear(max_factor, max_offset),
        )
    }

    /// `f(x) = a(l - x)` below `l`, `c(x - u)` above `u`.
    pub fn min_linear_max_linear_no_offset(
        min_hard: i32,
        min_pref: i32,
        min_factor: i32,
        max_hard: i32,
        max_pref: i32,
        max_factor: i32,
    ) -> Result<Self> {
        SoftBounds::min_linear_max_linear(
            min_hard, min_pref, min_factor, 0, max_hard, max_pref, max_factor, 0,
        )
    }

    /// `f(x) = a|x - pref|` outside `[l, u]`, one factor for both sides.
    pub fn min_linear_max_linear_same_factor(
        min_hard: i32,
        min_pref: i32,
        max_hard: i32,
        max_pref: i32,
        factor: i32,
    ) -> Result<Self> {
        SoftBounds::min_linear_max_linear(
            min_hard, min_pref, factor, 0, max_hard, max_pref, factor, 0,
        )
    }

    /// Linear below `min_pref`, hard above.
    pub fn min_linear_max_hard(
        min_hard: i32,
        min_pref: i32,
        min_factor: i32,
        min_constant: i32,
        max_hard: i32,
    ) -> Result<Self> {
        SoftBounds::new(
            min_hard,
            min_pref,
            Some(PenaltyFunction::linear(min_factor, min_constant)),
            max_hard,
            max_hard,
            None,
        )
    }

    /// Hard below, linear above `max_pref`.
    pub fn min_hard_max_linear(
        min_hard: i32,
        max_hard: i32,
        max_pref: i32,
        max_factor: i32,
        max_constant: i32,
    ) -> Result<Self> {
        SoftBounds::new(
            min_hard,
            min_hard,
            None,
            max_hard,
            max_pref,
            Some(PenaltyFunction::linear(max_factor, max_constant)),
        )
    }
}
