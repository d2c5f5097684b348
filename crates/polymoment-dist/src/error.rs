//! Errors raised while validating distributions and evaluating moments.

use polymoment_core::AlgebraError;
use thiserror::Error;

use crate::family::Family;

/// A distribution specification was rejected before any computation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The family name is not in the catalogue.
    #[error("unsupported distribution family `{value}`")]
    UnsupportedFamily {
        /// The rejected name.
        value: String,
    },

    /// The symmetry class is not supported.
    #[error("unsupported symmetry type `{value}`")]
    UnsupportedSymmetry {
        /// The rejected name.
        value: String,
    },

    /// A family-specific shape parameter is absent.
    #[error("distribution `{family}` requires parameter `{parameter}`")]
    MissingShapeParameter {
        /// The family requiring the parameter.
        family: Family,
        /// The missing field, `beta1` or `beta2`.
        parameter: &'static str,
    },

    /// A parameter is neither a number nor a symbol name.
    #[error("parameter `{field}` has invalid value `{value}`")]
    InvalidParameter {
        /// The field holding the value.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A variable of the polynomial has no distribution.
    #[error("no distribution given for variable `{variable}`")]
    MissingDistribution {
        /// The variable name.
        variable: String,
    },
}

/// Failure to evaluate `E[V^m]` for a single variable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The family has no closed form for a fractional or negative power.
    #[error("no closed form for E[{variable}^({power})] under this distribution")]
    NonAnalyticMoment {
        /// The variable.
        variable: String,
        /// The requested power.
        power: String,
    },

    /// The moment does not exist (the defining integral diverges).
    #[error("E[{variable}^{power}] diverges")]
    DivergentMoment {
        /// The variable.
        variable: String,
        /// The requested power.
        power: String,
    },

    /// A table entry needed a parameter the distribution does not carry.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Exact arithmetic failed, e.g. a zero denominator in a table entry.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}
