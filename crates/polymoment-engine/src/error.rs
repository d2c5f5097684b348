//! Error hierarchy of the moment engine.

use polymoment_core::AlgebraError;
use polymoment_dist::{EvaluationError, ValidationError};
use polymoment_model::ParseError;
use thiserror::Error;

/// Any failure of a moment computation. No partial results are returned.
#[derive(Debug, Error)]
pub enum MomentError {
    /// A distribution specification was rejected.
    #[error("invalid distribution: {0}")]
    Validation(#[from] ValidationError),

    /// The polynomial could not be parsed.
    #[error("invalid polynomial: {0}")]
    Parse(#[from] ParseError),

    /// A single-variable expectation could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// Exact arithmetic failed while combining moments.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    /// The request JSON is malformed.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// The order is not a non-negative integer.
    #[error("moment order must be a non-negative integer, got {order}")]
    InvalidOrder {
        /// The rejected order, printed.
        order: String,
    },

    /// A raw moment was requested without an order.
    #[error("the moment statistic requires an order")]
    MissingOrder,

    /// The order exceeds [`crate::EngineConfig::max_order`].
    #[error("moment order {order} exceeds the limit of {limit}")]
    OrderLimitExceeded {
        /// The requested order.
        order: u32,
        /// The configured limit.
        limit: u32,
    },

    /// The expansion exceeds [`crate::EngineConfig::max_expanded_terms`].
    #[error("expansion exceeds {limit} terms")]
    ExpansionBudgetExceeded {
        /// The configured limit.
        limit: usize,
    },
}
