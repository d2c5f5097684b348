//! Arbitrary precision rational numbers.
//!
//! Every coefficient and numeric distribution parameter in the engine is a
//! `Rational`; decimal input such as `"0.25"` is converted exactly.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::integer::forward_binop;
use crate::Integer;

/// Largest power of ten accepted in scientific notation.
const MAX_DECIMAL_EXPONENT: u32 = 4096;

/// An arbitrary precision rational number.
///
/// Always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

/// Error returned when a string is not a rational literal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{input}` is not a rational literal")]
pub struct ParseRationalError {
    input: String,
}

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let negative = denominator.is_negative();
        let value = Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ));
        if negative {
            -value
        } else {
            value
        }
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the (positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(dashu::integer::IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numerator())
    }

    /// Returns the value as a `u32` when it is a non-negative integer that fits.
    #[must_use]
    pub fn to_u32(&self) -> Option<u32> {
        self.to_integer().and_then(|n| n.to_u32())
    }

    /// Returns the value as an `i64` when it is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer().and_then(|n| n.to_i64())
    }

    /// Returns the largest integer not greater than this value.
    #[must_use]
    pub fn floor(&self) -> Integer {
        self.numerator().div_floor(&self.denominator())
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal, or `None` for zero.
    #[must_use]
    pub fn checked_recip(&self) -> Option<Self> {
        (!self.is_zero()).then(|| Self(self.0.clone().inv()))
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        self.checked_recip().expect("cannot take reciprocal of zero")
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Computes self^exp for a signed exponent, or `None` for `0^(-n)`.
    #[must_use]
    pub fn checked_powi(&self, exp: i64) -> Option<Self> {
        let magnitude = u32::try_from(exp.unsigned_abs()).ok()?;
        if exp >= 0 {
            Some(self.pow(magnitude))
        } else {
            self.checked_recip().map(|r| r.pow(magnitude))
        }
    }

    /// Total bit length of numerator and denominator, a measure of
    /// arithmetic cost.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.numerator().bit_len() + self.denominator().bit_len()
    }

    /// Approximates the value as an `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.numerator().to_f64() / self.denominator().to_f64()
    }

    /// Returns a reference to the inner `dashu::RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }

    /// Parses a decimal literal with an optional exponent (`"-0.125"`, `"1e-5"`).
    fn parse_scientific(s: &str) -> Option<Self> {
        let Some((mantissa, exponent)) = s.split_once(['e', 'E']) else {
            return Self::parse_decimal(s);
        };
        let mantissa = Self::parse_decimal(mantissa)?;
        let exponent: i32 = exponent.parse().ok()?;
        if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT {
            return None;
        }
        let scale = Rational::from(Integer::new(10).pow(exponent.unsigned_abs()));
        Some(if exponent < 0 {
            mantissa / scale
        } else {
            mantissa * scale
        })
    }

    /// Parses a plain decimal literal (`"12"`, `"-0.125"`, `"3."`).
    fn parse_decimal(s: &str) -> Option<Self> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let mantissa = format!("{whole}{frac}");
        let numerator = Integer::from_str_radix(&mantissa, 10).ok()?;
        let scale = u32::try_from(frac.len()).ok()?;
        let value = Rational::new(numerator, Integer::new(10).pow(scale));
        Some(if negative { -value } else { value })
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    /// Accepts decimal literals (optionally in scientific notation) and `p/q`
    /// fractions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRationalError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((num, den)) => {
                let num = Self::parse_decimal(num.trim()).ok_or_else(err)?;
                let den = Self::parse_decimal(den.trim()).ok_or_else(err)?;
                if den.is_zero() {
                    return Err(err());
                }
                Ok(num / den)
            }
            None => Self::parse_scientific(trimmed).ok_or_else(err),
        }
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

forward_binop!(Rational, Add, add);
forward_binop!(Rational, Sub, sub);
forward_binop!(Rational, Mul, mul);
forward_binop!(Rational, Div, div);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from(Integer::new(n))
    }
}

impl From<u32> for Rational {
    fn from(n: u32) -> Self {
        Self::from(Integer::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Rational::from_i64(1, 2);
        let b = Rational::from_i64(1, 3);

        assert_eq!(&a + &b, Rational::from_i64(5, 6));
        assert_eq!(&a * &b, Rational::from_i64(1, 6));
        assert_eq!(a / b, Rational::from_i64(3, 2));
    }

    #[test]
    fn test_negative_denominator() {
        let r = Rational::from_i64(3, -6);
        assert_eq!(r.numerator().to_i64(), Some(-1));
        assert_eq!(r.denominator().to_i64(), Some(2));
    }

    #[test]
    fn test_parse() {
        assert_eq!("0.25".parse::<Rational>().unwrap(), Rational::from_i64(1, 4));
        assert_eq!("-1.5".parse::<Rational>().unwrap(), Rational::from_i64(-3, 2));
        assert_eq!("7".parse::<Rational>().unwrap(), Rational::from(7i64));
        assert_eq!("2/6".parse::<Rational>().unwrap(), Rational::from_i64(1, 3));
        assert!("abc".parse::<Rational>().is_err());
        assert!("1/0".parse::<Rational>().is_err());
        assert!(".".parse::<Rational>().is_err());
        assert_eq!("1e-5".parse::<Rational>().unwrap(), Rational::from_i64(1, 100_000));
        assert_eq!("2.5E2".parse::<Rational>().unwrap(), Rational::from(250i64));
        assert!("1e".parse::<Rational>().is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let err = "1/x".parse::<Rational>().unwrap_err();
        assert_eq!(err.to_string(), "`1/x` is not a rational literal");
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(Rational::from(1i64).bit_len(), 2);
        assert_eq!(Rational::from_i64(3, 4).bit_len(), 5);
    }

    #[test]
    fn test_floor_and_powi() {
        assert_eq!(Rational::from_i64(-1, 2).floor().to_i64(), Some(-1));
        assert_eq!(Rational::from_i64(5, 2).floor().to_i64(), Some(2));
        assert_eq!(
            Rational::from_i64(2, 3).checked_powi(-2),
            Some(Rational::from_i64(9, 4))
        );
        assert_eq!(Rational::zero().checked_powi(-1), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_i64(3, 1).to_string(), "3");
        assert_eq!(Rational::from_i64(-2, 3).to_string(), "-2/3");
    }
}
