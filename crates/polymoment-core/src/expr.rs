//! Canonical symbolic expressions.
//!
//! An [`Expr`] is a quotient of two coprime sparse polynomials over atoms.
//! All constructors and arithmetic return canonical values (see the crate
//! docs), so `==` decides equality of rational functions in the atoms. Two
//! values that agree only through a radical or exponential identity the
//! rewrite rules do not know can still compare unequal.

use std::collections::BTreeSet;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};
use polymoment_integers::{Integer, Rational};

use crate::atom::Atom;
use crate::canonical::normalize;
use crate::error::AlgebraError;
use crate::monomial::Monomial;
use crate::poly::Poly;

/// A rational function over atoms in canonical form.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Expr {
    pub(crate) num: Poly,
    pub(crate) den: Poly,
}

impl Expr {
    /// Wraps a polynomial known to be canonical as a denominator-free
    /// expression.
    pub(crate) fn from_canonical_poly(num: Poly) -> Self {
        Self { num, den: Poly::one() }
    }

    /// Builds `num / den` and normalizes it.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if `den` is zero.
    pub fn from_parts(num: Poly, den: Poly) -> Result<Self, AlgebraError> {
        if den.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(normalize(num, den))
    }

    /// Builds a polynomial expression.
    #[must_use]
    pub fn from_poly(num: Poly) -> Self {
        normalize(num, Poly::one())
    }

    /// The constant 0.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_canonical_poly(Poly::zero())
    }

    /// The constant 1.
    #[must_use]
    pub fn one() -> Self {
        Self::from_canonical_poly(Poly::one())
    }

    /// A named symbol.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::from_canonical_poly(Poly::atom(Atom::symbol(name)))
    }

    /// The constant π.
    #[must_use]
    pub fn pi() -> Self {
        Self::from_canonical_poly(Poly::atom(Atom::Pi))
    }

    /// Builds an expression from a single atom, normalizing radicals.
    #[must_use]
    pub fn atom(atom: Atom) -> Self {
        Self::from_poly(Poly::atom(atom))
    }

    /// Returns the numerator polynomial.
    #[must_use]
    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    /// Returns the denominator polynomial.
    #[must_use]
    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    /// Returns true if this is 0.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Returns true if this is 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.den.is_one() && self.num.is_one()
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        self.den.is_one()
    }

    /// Returns the value if this expression is a plain number.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        if self.den.is_one() {
            self.num.as_constant()
        } else {
            None
        }
    }

    /// Returns the atom if this expression is exactly one atom.
    #[must_use]
    pub fn as_atom(&self) -> Option<&Atom> {
        if !self.den.is_one() {
            return None;
        }
        match self.num.terms() {
            [(m, c)] if c.is_one() && m.total_degree() == 1 => m.iter().next().map(|(a, _)| a),
            _ => None,
        }
    }

    /// Returns the symbol name if this expression is a bare symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        self.as_atom().and_then(Atom::as_symbol)
    }

    /// Collects the names of all symbols, including those inside functions.
    #[must_use]
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        for poly in [&self.num, &self.den] {
            for (m, _) in poly.terms() {
                for (atom, _) in m.iter() {
                    match atom {
                        Atom::Symbol(name) => {
                            out.insert(name.clone());
                        }
                        Atom::Pi => {}
                        Atom::Gamma(arg) | Atom::Exp(arg) | Atom::Log(arg) => {
                            arg.collect_symbols(out);
                        }
                        Atom::Root { base, .. } => base.collect_symbols(out),
                    }
                }
            }
        }
    }

    /// Adds two expressions.
    #[must_use]
    pub fn add_ref(&self, other: &Self) -> Self {
        if other.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return other.clone();
        }
        if self.den == other.den {
            return normalize(self.num.add(&other.num), self.den.clone());
        }
        // Avoid cross-multiplying when one denominator divides the other
        if let Some(q) = self.den.div_exact(&other.den) {
            return normalize(self.num.add(&other.num.mul(&q)), self.den.clone());
        }
        if let Some(q) = other.den.div_exact(&self.den) {
            return normalize(self.num.mul(&q).add(&other.num), other.den.clone());
        }
        normalize(
            self.num.mul(&other.den).add(&other.num.mul(&self.den)),
            self.den.mul(&other.den),
        )
    }

    /// Subtracts two expressions.
    #[must_use]
    pub fn sub_ref(&self, other: &Self) -> Self {
        self.add_ref(&-other)
    }

    /// Multiplies two expressions.
    #[must_use]
    pub fn mul_ref(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if self.is_one() {
            return other.clone();
        }
        if other.is_one() {
            return self.clone();
        }
        normalize(self.num.mul(&other.num), self.den.mul(&other.den))
    }

    /// Multiplies by a rational constant.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        normalize(self.num.scale(c), self.den.clone())
    }

    /// Divides by another expression.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self, AlgebraError> {
        if other.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(normalize(self.num.mul(&other.den), self.den.mul(&other.num)))
    }

    /// Returns `1 / self`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] if `self` is zero.
    pub fn recip(&self) -> Result<Self, AlgebraError> {
        Self::one().checked_div(self)
    }

    /// Raises to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        match n {
            0 => Self::one(),
            1 => self.clone(),
            _ => normalize(self.num.pow(n), self.den.pow(n)),
        }
    }

    /// Raises to a signed integer power.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] for a negative power of zero
    /// and [`AlgebraError::ExponentTooLarge`] beyond `u32::MAX`.
    pub fn powi(&self, n: i64) -> Result<Self, AlgebraError> {
        let magnitude =
            u32::try_from(n.unsigned_abs()).map_err(|_| AlgebraError::ExponentTooLarge {
                exponent: n.to_string(),
            })?;
        if n >= 0 {
            Ok(self.pow(magnitude))
        } else {
            Ok(self.recip()?.pow(magnitude))
        }
    }

    /// Sums an iterator of expressions.
    pub fn sum<'a>(items: impl IntoIterator<Item = &'a Expr>) -> Self {
        items.into_iter().fold(Self::zero(), |acc, e| acc.add_ref(e))
    }

    /// Multiplies an iterator of expressions.
    pub fn product<'a>(items: impl IntoIterator<Item = &'a Expr>) -> Self {
        items.into_iter().fold(Self::one(), |acc, e| acc.mul_ref(e))
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Self::from_canonical_poly(Poly::constant(value))
    }
}

impl From<Integer> for Expr {
    fn from(value: Integer) -> Self {
        Self::from(Rational::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::from(Rational::from(value))
    }
}

impl From<u32> for Expr {
    fn from(value: u32) -> Self {
        Self::from(Rational::from(value))
    }
}

impl From<Monomial> for Expr {
    fn from(m: Monomial) -> Self {
        Self::from_poly(Poly::monomial(m, Rational::one()))
    }
}

/// Implements a binary operator for owned and borrowed operands by
/// forwarding to the by-reference method.
macro_rules! forward_expr_binop {
    ($trait:ident, $method:ident, $impl_fn:ident) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$impl_fn(&self, &rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::$impl_fn(&self, rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::$impl_fn(self, rhs)
            }
        }
    };
}

forward_expr_binop!(Add, add, add_ref);
forward_expr_binop!(Sub, sub, sub_ref);
forward_expr_binop!(Mul, mul, mul_ref);

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        -&self
    }
}
