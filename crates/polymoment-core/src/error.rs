//! Errors raised by symbolic arithmetic.

use thiserror::Error;

/// Failures of exact symbolic arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// A denominator evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Γ was evaluated at a non-positive integer.
    #[error("gamma function has a pole at {argument}")]
    GammaPole {
        /// The offending argument, printed.
        argument: String,
    },

    /// `log(0)` was requested.
    #[error("logarithm of zero")]
    LogOfZero,

    /// An exponent does not fit the machine-sized exponents of monomials.
    #[error("exponent {exponent} is too large")]
    ExponentTooLarge {
        /// The offending exponent, printed.
        exponent: String,
    },
}
