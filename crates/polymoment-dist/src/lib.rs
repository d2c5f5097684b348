//! # polymoment-dist
//!
//! Marginal distributions of the random variables and their closed-form
//! moments.
//!
//! - [`DistributionSpec`]: a validated `{family, symmetry, translation, scale,
//!   beta1, beta2}` record, deserializable from JSON
//! - [`table`]: `E[X^m]` for the standardized member of each family
//! - [`symmetry`]: sign and doubling rules tied to the support of the density
//! - [`translation`]: `E[(t + X)^m]`, including the direct closed forms for
//!   non-integer powers
//!
//! ## Example
//!
//! ```
//! use polymoment_dist::{expectation, DistributionSpec};
//! use polymoment_integers::Rational;
//!
//! let spec: DistributionSpec = serde_json::from_str(
//!     r#"{"distribution": "normal", "type": "symmetrical", "translation": "m0", "scale": "s0"}"#,
//! )
//! .unwrap();
//! let second = expectation("x0", &spec, &Rational::from(2i64)).unwrap();
//! assert_eq!(second.to_string(), "m0**2 + s0**2");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod family;
pub mod param;
pub mod spec;
pub mod symmetry;
pub mod table;
pub mod translation;

#[cfg(test)]
mod proptests;

pub use error::{EvaluationError, ValidationError};
pub use family::{Family, Symmetry};
pub use param::Param;
pub use spec::{DistributionSpec, RawDistributionSpec};
pub use table::{raw_moment, Shape};
pub use translation::expectation;
