//! The request boundary: JSON in, canonical expression text out.
//!
//! ```
//! use polymoment_engine::{compute, MomentRequest, Statistic};
//!
//! let request = MomentRequest::from_json(
//!     r#"{"poly": "x0",
//!         "dist": {"x0": {"distribution": "laplace", "type": "symmetrical",
//!                         "translation": "m0", "scale": "s0"}}}"#,
//! )
//! .unwrap();
//! assert_eq!(compute(&request, Statistic::Kurtosis).unwrap(), "6");
//! ```

use std::collections::BTreeMap;

use polymoment_core::Expr;
use polymoment_dist::{DistributionSpec, RawDistributionSpec};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::MomentEngine;
use crate::error::MomentError;
use crate::statistic::Statistic;

/// A polynomial, the distributions of its variables and an optional order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MomentRequest {
    /// The polynomial source text.
    pub poly: String,
    /// Distribution of each variable, validated when the request is computed.
    pub dist: BTreeMap<String, RawDistributionSpec>,
    /// Order of the raw moment; only used by [`Statistic::Moment`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<serde_json::Number>,
}

impl MomentRequest {
    /// Creates a request without an order.
    #[must_use]
    pub fn new(poly: impl Into<String>, dist: BTreeMap<String, RawDistributionSpec>) -> Self {
        Self {
            poly: poly.into(),
            dist,
            order: None,
        }
    }

    /// Sets the order.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Parses a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MomentError::MalformedRequest`] for JSON that does not have
    /// the request shape.
    pub fn from_json(json: &str) -> Result<Self, MomentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates every distribution.
    ///
    /// # Errors
    ///
    /// Returns the first [`polymoment_dist::ValidationError`].
    pub fn distributions(&self) -> Result<BTreeMap<String, DistributionSpec>, MomentError> {
        self.dist
            .iter()
            .map(|(name, raw)| -> Result<_, MomentError> {
                Ok((name.clone(), DistributionSpec::try_from(raw.clone())?))
            })
            .collect()
    }

    /// The order as a machine integer.
    ///
    /// # Errors
    ///
    /// Returns [`MomentError::MissingOrder`] when absent and
    /// [`MomentError::InvalidOrder`] unless it is a non-negative integer.
    pub fn order(&self) -> Result<u32, MomentError> {
        let order = self.order.as_ref().ok_or(MomentError::MissingOrder)?;
        order
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| MomentError::InvalidOrder {
                order: order.to_string(),
            })
    }
}

/// Computes a statistic and returns it as an expression.
///
/// # Errors
///
/// Returns the first validation, parse or evaluation error.
pub fn compute_expr(request: &MomentRequest, statistic: Statistic) -> Result<Expr, MomentError> {
    compute_expr_with_config(request, statistic, EngineConfig::default())
}

/// Like [`compute_expr`] with custom limits.
///
/// # Errors
///
/// Returns the first validation, parse or evaluation error.
pub fn compute_expr_with_config(
    request: &MomentRequest,
    statistic: Statistic,
    config: EngineConfig,
) -> Result<Expr, MomentError> {
    // Validate everything before any computation
    let distributions = request.distributions()?;
    let mut engine = MomentEngine::from_source(&request.poly, distributions, config)?;
    debug!(
        %statistic,
        variables = engine.polynomial().variables().len(),
        terms = engine.polynomial().len(),
        "computing statistic"
    );

    match statistic {
        Statistic::Moment => engine.moment(request.order()?),
        Statistic::Mean => engine.mean(),
        Statistic::Variance => engine.variance(),
        Statistic::Std => engine.std(),
        Statistic::Skewness => engine.skewness(),
        Statistic::Kurtosis => engine.kurtosis(),
    }
}

/// Computes a statistic and returns its canonical text.
///
/// # Errors
///
/// Returns the first validation, parse or evaluation error.
pub fn compute(request: &MomentRequest, statistic: Statistic) -> Result<String, MomentError> {
    compute_expr(request, statistic).map(|e| e.to_string())
}

/// Computes independent requests on the rayon pool, one engine per request.
#[must_use]
pub fn compute_batch(requests: &[(MomentRequest, Statistic)]) -> Vec<Result<String, MomentError>> {
    requests
        .par_iter()
        .map(|(request, statistic)| compute(request, *statistic))
        .collect()
}
