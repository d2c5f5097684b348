//! Errors raised while reading a polynomial expression.

use thiserror::Error;

/// A malformed or unsupported polynomial expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character outside the expression language.
    #[error("unexpected character `{ch}` at position {position}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset in the input.
        position: usize,
    },

    /// A numeric literal that could not be read.
    #[error("invalid number `{literal}` at position {position}")]
    InvalidNumber {
        /// The literal as written.
        literal: String,
        /// Byte offset in the input.
        position: usize,
    },

    /// A token that does not fit the grammar at this point.
    #[error("expected {expected} at position {position}, found `{found}`")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: &'static str,
        /// The token found instead.
        found: String,
        /// Byte offset in the input.
        position: usize,
    },

    /// The input ended early.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// An identifier with no distribution attached.
    #[error("undeclared variable `{name}`")]
    UndeclaredVariable {
        /// The identifier.
        name: String,
    },

    /// A function application such as `sin(x0)`.
    #[error("function calls are not supported: `{name}(...)`")]
    UnsupportedFunction {
        /// The function name.
        name: String,
    },

    /// A non-constant exponent, or a fractional or negative exponent on
    /// something other than a single monomial.
    #[error("invalid exponent: {reason}")]
    InvalidExponent {
        /// Human readable explanation.
        reason: String,
    },

    /// Division by the constant zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Division by an expression with more than one term.
    #[error("division is only supported by a constant or a single monomial")]
    NonMonomialDivisor,

    /// Expanding a literal power produced too many terms.
    #[error("expanded expression exceeds {limit} terms")]
    ExpansionTooLarge {
        /// The term limit.
        limit: usize,
    },

    /// A single product in the expansion would need more coefficient
    /// arithmetic than allowed.
    #[error("expanding the expression needs more than {limit} coefficient word operations")]
    ExpansionTooCostly {
        /// The work limit.
        limit: usize,
    },
}
