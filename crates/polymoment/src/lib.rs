//! # polymoment
//!
//! Exact statistical moments of polynomial functions of independent random
//! variables.
//!
//! ## Features
//!
//! - **Exact Arithmetic**: rational coefficients and parameters, no rounding
//! - **Symbolic Parameters**: any distribution parameter may be a symbol
//! - **Closed Forms**: raw moments of twelve parametric families
//! - **Derived Statistics**: mean, variance, standard deviation, skewness and
//!   kurtosis
//!
//! ## Quick Start
//!
//! ```
//! use polymoment::prelude::*;
//!
//! let request = MomentRequest::from_json(
//!     r#"{"poly": "x0",
//!         "dist": {"x0": {"distribution": "uniform", "type": "one_sided_right",
//!                         "translation": "m0", "scale": "s0"}}}"#,
//! )
//! .unwrap();
//! assert_eq!(compute(&request, Statistic::Mean).unwrap(), "m0 + s0/2");
//! assert_eq!(compute(&request, Statistic::Variance).unwrap(), "s0**2/12");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use polymoment_core as core;
pub use polymoment_dist as dist;
pub use polymoment_engine as engine;
pub use polymoment_integers as integers;
pub use polymoment_model as model;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use polymoment_core::{AlgebraError, Expr};
    pub use polymoment_dist::{
        DistributionSpec, EvaluationError, Family, Param, Symmetry, ValidationError,
    };
    pub use polymoment_engine::{
        compute, compute_batch, compute_expr, EngineConfig, MomentEngine, MomentError,
        MomentRequest, Statistic,
    };
    pub use polymoment_integers::{Integer, Rational};
    pub use polymoment_model::{ParseError, Polynomial};
}
