//! # polymoment-model
//!
//! Parsing and expansion of polynomial expressions over random variables.
//!
//! The accepted language is deliberately small:
//! - declared identifiers, integer and decimal literals (kept exact)
//! - `+`, `-`, `*`, unary sign, parentheses
//! - `**` (or `^`) with a constant exponent
//! - `/` by a nonzero constant or a single monomial
//!
//! A negative or fractional exponent may only be applied to a single monomial
//! such as `x0**(-1)` or `x0**(1/2)`; it becomes a *generator* whose base
//! exponent is carried through expansion.
//!
//! ## Example
//!
//! ```
//! use polymoment_model::Polynomial;
//!
//! let p = Polynomial::parse("(x0 + 2*x1)**2", ["x0", "x1"]).unwrap();
//! assert_eq!(p.to_string(), "x0**2 + 4*x0*x1 + 4*x1**2");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod lexer;
mod lower;
pub mod parser;
pub mod polynomial;

#[cfg(test)]
mod proptests;

pub use error::ParseError;
pub use polynomial::{Generator, Polynomial, Term};
