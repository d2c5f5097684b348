//! # polymoment-integers
//!
//! Exact arithmetic for the moment engine.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`), including exact decimal parsing
//! - Combinatorial helpers used by the raw-moment table (factorials, double
//!   factorials, binomial coefficients)
//!
//! No floating point value ever enters these types; `to_f64` exists only for
//! numeric verification of symbolic results.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combinatorics;
pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use combinatorics::{binomial, double_factorial, factorial};
pub use integer::Integer;
pub use rational::{ParseRationalError, Rational};
