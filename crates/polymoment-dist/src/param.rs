//! Distribution parameters: exact numbers or symbolic placeholders.

use std::fmt;
use std::str::FromStr;

use num_traits::Zero;
use polymoment_core::Expr;
use polymoment_integers::Rational;
use thiserror::Error;

/// A numeric or symbolic distribution parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    /// An exact number; decimal input is converted without rounding.
    Number(Rational),
    /// A symbol left free in the result.
    Symbol(String),
}

/// Error returned when a string is neither a number nor an identifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{input}` is neither a number nor a symbol name")]
pub struct ParseParamError {
    /// The rejected input.
    pub input: String,
}

impl Param {
    /// Creates a symbolic parameter.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Param::Symbol(name.into())
    }

    /// Returns the value when numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Param::Number(r) => Some(r),
            Param::Symbol(_) => None,
        }
    }

    /// Returns true for the number zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Zero::is_zero)
    }

    /// Converts to an expression.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        match self {
            Param::Number(r) => Expr::from(r.clone()),
            Param::Symbol(name) => Expr::symbol(name.clone()),
        }
    }
}

/// Returns true for names of the form `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Param {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<Rational>() {
            return Ok(Param::Number(value));
        }
        if is_identifier(trimmed) {
            return Ok(Param::Symbol(trimmed.to_string()));
        }
        Err(ParseParamError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Number(r) => write!(f, "{r}"),
            Param::Symbol(name) => f.write_str(name),
        }
    }
}

impl From<Rational> for Param {
    fn from(value: Rational) -> Self {
        Param::Number(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Number(Rational::from(value))
    }
}
