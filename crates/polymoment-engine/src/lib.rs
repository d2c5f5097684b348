//! # polymoment-engine
//!
//! Exact moments of polynomials of independent random variables.
//!
//! `E[P^order]` is computed by expanding `P^order`, replacing each monomial
//! by the product of the single-variable expectations of its variables, and
//! summing. Mean, variance, standard deviation, skewness and (non-excess)
//! kurtosis are derived from the raw moments.
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use polymoment_dist::{DistributionSpec, Family, Param, Symmetry};
//! use polymoment_engine::{EngineConfig, MomentEngine};
//!
//! let gamma = DistributionSpec::new(
//!     Family::Gamma,
//!     Symmetry::OneSidedRight,
//!     Param::symbol("m0"),
//!     Param::symbol("s0"),
//!     Some(Param::symbol("b0")),
//!     None,
//! )
//! .unwrap();
//! let distributions = BTreeMap::from([("x0".to_string(), gamma)]);
//! let mut engine = MomentEngine::from_source("x0", distributions, EngineConfig::default()).unwrap();
//! assert_eq!(engine.mean().unwrap().to_string(), "b0*s0 + m0");
//! assert_eq!(engine.kurtosis().unwrap().to_string(), "3 + 6/b0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod request;
pub mod statistic;

#[cfg(test)]
mod proptests;

pub use cache::{CacheStats, MomentCache};
pub use config::EngineConfig;
pub use engine::MomentEngine;
pub use error::MomentError;
pub use request::{compute, compute_batch, compute_expr, compute_expr_with_config, MomentRequest};
pub use statistic::Statistic;
