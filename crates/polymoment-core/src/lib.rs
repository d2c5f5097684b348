//! # polymoment-core
//!
//! The symbolic kernel behind the moment engine.
//!
//! This crate provides:
//! - Atoms: symbols, π, Γ(·), exp(·), log(·) and q-th roots
//! - Sparse polynomials over atoms with exact rational coefficients
//! - `Expr`, a quotient of two such polynomials kept in canonical form
//! - Substitution of symbols and numeric evaluation for verification
//!
//! ## Canonical Form
//!
//! Every `Expr` is normalized on construction:
//! - numerator and denominator are coprime polynomials in the atoms
//! - a single-term denominator holds no numeric radical
//! - the denominator is `1`, or has coprime integer coefficients and a
//!   positive leading coefficient
//! - radicals are reduced (`sqrt(a)**2 = a`), numeric radicals are merged
//!   and stripped of perfect powers, and exponentials in one monomial merge
//!
//! Atoms are treated as independent indeterminates during cancellation, so
//! two rational functions of symbols, `pi` and opaque functions are equal
//! exactly when they are structurally equal. Relations between radicals and
//! exponentials are known only through the rewrite rules above.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod atom;
mod canonical;
pub mod display;
pub mod error;
pub mod eval;
pub mod expr;
mod gcd;
pub mod monomial;
pub mod poly;
pub mod special;

#[cfg(test)]
mod proptests;

pub use atom::Atom;
pub use error::AlgebraError;
pub use expr::Expr;
pub use monomial::Monomial;
pub use poly::Poly;
