//! Shared test fixtures for costreg crates.
//!
//! - [`automata`] - small hand-built automata over symbols `0, 1, ...`
//! - [`words`] - word enumeration and counter evaluation along runs
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! costreg-test = { workspace = true }
//! ```
//!
//! Only integration tests (`tests/`) should use it: unit tests inside
//! `costreg-automaton` would see a second copy of that crate's types.

pub mod automata;
pub mod words;

pub use automata::{a_b_star, a_star_b, automaton_from, layered, A, B};
pub use words::{accepted_words, counter_value, words_of_length};
