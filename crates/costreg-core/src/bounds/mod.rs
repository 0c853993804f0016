//! Hard and preferred limits on an accumulated counter value.
//!
//! A [`SoftBounds`] value defines hard bounds `L <= U`, preferred bounds
//! `l >= L` and `u <= U`, and one penalty function per side:
//!
//! ```text
//! cost(x) = +∞                          if x < L or x > U
//! cost(x) = fmin(l - x) + fmax(x - u)   otherwise, each side 0 inside [l, u]
//! ```

mod factory;
mod soft_bounds;


pub use soft_bounds::SoftBounds;
