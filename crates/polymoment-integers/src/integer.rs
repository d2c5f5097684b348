//! Arbitrary precision integers.
//!
//! A thin wrapper over `dashu::IBig` carrying the handful of number-theoretic
//! helpers the symbolic kernel needs (gcd/lcm, perfect power splitting).

use dashu::base::{Abs, BitTest, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Largest prime tried when splitting perfect powers out of an integer.
const TRIAL_DIVISION_LIMIT: u64 = 10_007;

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses an integer written in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
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

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the number of bits needed to represent this integer.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Returns true if this integer is divisible by two.
    #[must_use]
    pub fn is_even(&self) -> bool {
        (self.clone() % Integer::new(2)).is_zero()
    }

    /// Computes the (non-negative) greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Computes the (non-negative) least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Floor division, rounding towards negative infinity.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_floor(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "division by zero");
        let q = self / other;
        let r = self - &(&q * other);
        if !r.is_zero() && (r.is_negative() != other.is_negative()) {
            q - Integer::one()
        } else {
            q
        }
    }

    /// Attempts to convert to an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Attempts to convert to a u32.
    #[must_use]
    pub fn to_u32(&self) -> Option<u32> {
        self.to_i64().and_then(|v| u32::try_from(v).ok())
    }

    /// Approximates the value as an `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Computes self^exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Splits a positive integer `n` into `(outside, inside)` with
    /// `n = outside^degree * inside`, pulling out every prime power found by
    /// trial division.
    ///
    /// Values that are non-positive or do not fit in 64 bits are returned
    /// unchanged as `(1, n)`.
    #[must_use]
    pub fn split_perfect_power(&self, degree: u32) -> (Integer, Integer) {
        let unchanged = (Integer::one(), self.clone());
        if degree < 2 {
            return (self.clone(), Integer::one());
        }
        let Some(value) = self.to_i64().filter(|v| *v > 0) else {
            return unchanged;
        };

        let mut rest = value.unsigned_abs();
        let mut outside: u64 = 1;
        let mut inside: u64 = 1;
        let mut p: u64 = 2;
        while p <= TRIAL_DIVISION_LIMIT && p * p <= rest {
            let mut e = 0u32;
            while rest % p == 0 {
                rest /= p;
                e += 1;
            }
            if e > 0 {
                outside *= p.pow(e / degree);
                inside *= p.pow(e % degree);
            }
            p += if p == 2 { 1 } else { 2 };
        }
        inside *= rest;

        (Integer::from(outside), Integer::from(inside))
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Implements a binary operator for owned and borrowed operands by
/// forwarding to the wrapped `dashu` value.
macro_rules! forward_binop {
    ($ty:ident, $trait:ident, $method:ident) => {
        impl $trait for $ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                $ty(self.0.$method(rhs.0))
            }
        }

        impl $trait<&$ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                $ty(self.0.$method(&rhs.0))
            }
        }

        impl $trait<&$ty> for &$ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                $ty((&self.0).$method(&rhs.0))
            }
        }
    };
}

pub(crate) use forward_binop;

forward_binop!(Integer, Add, add);
forward_binop!(Integer, Sub, sub);
forward_binop!(Integer, Mul, mul);
forward_binop!(Integer, Div, div);
forward_binop!(Integer, Rem, rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}
