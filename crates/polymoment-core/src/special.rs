//! Special functions and radicals.
//!
//! Each constructor evaluates exactly where a closed form is known and falls
//! back to an unevaluated atom otherwise:
//!
//! | function | evaluated at |
//! |---|---|
//! | Γ(x) | positive integers, half-integers |
//! | exp(x) | `0`, `log(y)` |
//! | log(x) | `1`, `exp(y)` |
//! | x^(1/q) | numbers (perfect powers extracted), rational content |

use num_traits::{One, Zero};
use polymoment_integers::{double_factorial, factorial, Integer, Rational};

use crate::atom::Atom;
use crate::error::AlgebraError;
use crate::expr::Expr;
use crate::poly::Poly;

impl Expr {
    /// Returns exp(arg).
    #[must_use]
    pub fn exp(arg: &Expr) -> Expr {
        if arg.is_zero() {
            return Expr::one();
        }
        if let Some(Atom::Log(inner)) = arg.as_atom() {
            return (**inner).clone();
        }
        Expr::atom(Atom::Exp(Box::new(arg.clone())))
    }

    /// Returns the natural logarithm of `arg`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::LogOfZero`] for a zero argument.
    pub fn log(arg: &Expr) -> Result<Expr, AlgebraError> {
        if arg.is_zero() {
            return Err(AlgebraError::LogOfZero);
        }
        if arg.is_one() {
            return Ok(Expr::zero());
        }
        if let Some(Atom::Exp(inner)) = arg.as_atom() {
            return Ok((**inner).clone());
        }
        Ok(Expr::atom(Atom::Log(Box::new(arg.clone()))))
    }

    /// Returns Γ(arg).
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::GammaPole`] at zero and the negative integers.
    pub fn gamma(arg: &Expr) -> Result<Expr, AlgebraError> {
        match arg.as_rational() {
            Some(value) => gamma_rational(&value),
            None => Ok(Expr::atom(Atom::Gamma(Box::new(arg.clone())))),
        }
    }

    /// Returns the principal square root.
    #[must_use]
    pub fn sqrt(&self) -> Expr {
        self.radical(2)
    }

    /// Returns the principal `degree`-th root.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] for degree zero.
    pub fn root(&self, degree: u32) -> Result<Expr, AlgebraError> {
        match degree {
            0 => Err(AlgebraError::DivisionByZero),
            1 => Ok(self.clone()),
            _ => Ok(self.radical(degree)),
        }
    }

    /// Raises to a rational power `p/q`, written as `self^floor * root(self, q)^r`.
    ///
    /// Negative powers are returned as reciprocals, `x^(-1/2) = 1/sqrt(x)`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] for a negative power of zero
    /// and [`AlgebraError::ExponentTooLarge`] when `p/q` does not fit in 32 bits.
    pub fn pow_rational(&self, exp: &Rational) -> Result<Expr, AlgebraError> {
        let too_large = || AlgebraError::ExponentTooLarge {
            exponent: exp.to_string(),
        };
        if let Some(n) = exp.to_i64() {
            return self.powi(n);
        }
        if exp.is_negative() {
            return self.pow_rational(&-exp)?.recip();
        }
        let degree = exp.denominator().to_u32().ok_or_else(too_large)?;
        let floor = exp.floor();
        let remainder = ((exp - &Rational::from(floor.clone())) * Rational::from(degree))
            .to_u32()
            .ok_or_else(too_large)?;
        let whole = self.powi(floor.to_i64().ok_or_else(too_large)?)?;
        Ok(whole * self.radical(degree).pow(remainder))
    }

    /// Root of degree at least two.
    fn radical(&self, degree: u32) -> Expr {
        if let Some(value) = self.as_rational() {
            return numeric_root(&value, degree);
        }

        // Pull positive rational content out of the radicand
        let content = rational_content(&self.num) / rational_content(&self.den);
        let primitive = match content.checked_recip() {
            Some(inv) => self.scale(&inv),
            None => self.clone(),
        };
        let outside = numeric_root(&content, degree);
        outside
            * Expr::atom(Atom::Root {
                base: Box::new(primitive),
                degree,
            })
    }
}

/// Positive rational content `gcd(numerators) / lcm(denominators)`.
fn rational_content(poly: &Poly) -> Rational {
    let gcd = poly.numerator_gcd();
    if gcd.is_zero() {
        return Rational::one();
    }
    Rational::new(gcd, poly.denominator_lcm())
}

/// Exact `degree`-th root of a rational, with perfect powers extracted.
///
/// `root(a/b) = root(a * b^(q-1)) / b`, and the integer radicand is split
/// into `outside^q * inside`.
pub(crate) fn numeric_root(value: &Rational, degree: u32) -> Expr {
    if value.is_zero() || value.is_one() {
        return Expr::from(value.clone());
    }
    if value.is_negative() && degree % 2 == 1 {
        return -numeric_root(&-value, degree);
    }

    let magnitude = value.abs();
    let den = magnitude.denominator();
    let radicand = magnitude.numerator() * den.pow(degree - 1);
    let (outside, inside) = radicand.split_perfect_power(degree);
    let coefficient = Expr::from(Rational::new(outside, den));

    let inside = if value.is_negative() { -inside } else { inside };
    if inside.is_one() {
        return coefficient;
    }
    coefficient
        * Expr::from_canonical_poly(Poly::atom(Atom::Root {
            base: Box::new(Expr::from(inside)),
            degree,
        }))
}

fn gamma_rational(value: &Rational) -> Result<Expr, AlgebraError> {
    let pole = || AlgebraError::GammaPole {
        argument: value.to_string(),
    };
    let unevaluated = || Expr::atom(Atom::Gamma(Box::new(Expr::from(value.clone()))));

    if let Some(n) = value.to_integer() {
        if n <= Integer::zero() {
            return Err(pole());
        }
        return Ok(match (n - Integer::one()).to_u32() {
            Some(k) => Expr::from(factorial(k)),
            None => unevaluated(),
        });
    }

    // Half-integers k + 1/2
    let doubled = value * &Rational::from(2i64);
    let Some(k) = doubled.to_integer().and_then(|_| value.floor().to_i64()) else {
        return Ok(unevaluated());
    };
    let sqrt_pi = Expr::pi().sqrt();
    let coefficient = if k >= 0 {
        // Γ(k + 1/2) = (2k - 1)!! / 2^k * sqrt(pi)
        let Ok(k32) = u32::try_from(k) else {
            return Ok(unevaluated());
        };
        Rational::new(double_factorial(2 * k - 1), Integer::new(2).pow(k32))
    } else {
        // Γ(1/2 - n) = (-2)^n / (2n - 1)!! * sqrt(pi)
        let n = -k;
        let Ok(n32) = u32::try_from(n) else {
            return Ok(unevaluated());
        };
        Rational::new(Integer::new(-2).pow(n32), double_factorial(2 * n - 1))
    };
    Ok(Expr::from(coefficient) * sqrt_pi)
}
