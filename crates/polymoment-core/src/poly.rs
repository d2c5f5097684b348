//! Sparse multivariate polynomials over atoms.
//!
//! Coefficients are exact rationals. Terms are kept sorted in descending
//! lexicographic order with like terms combined and zero terms dropped, so
//! two equal polynomials are structurally equal.

use std::collections::BTreeMap;

use num_traits::{One, Zero};
use polymoment_integers::{Integer, Rational};

use crate::atom::Atom;
use crate::monomial::{cmp_lex, Monomial};

/// Upper bound on quotient terms produced by a single exact division attempt.
const MAX_QUOTIENT_TERMS: usize = 4_096;

/// A sparse multivariate polynomial with rational coefficients.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Poly {
    /// Terms in descending lex order, nonzero coefficients, distinct monomials.
    terms: Vec<(Monomial, Rational)>,
}

impl Poly {
    /// Creates a new polynomial from terms.
    ///
    /// Terms are automatically sorted and combined.
    #[must_use]
    pub fn new(terms: Vec<(Monomial, Rational)>) -> Self {
        let mut combined: BTreeMap<Monomial, Rational> = BTreeMap::new();
        for (m, c) in terms {
            let entry = combined.entry(m).or_insert_with(Rational::zero);
            *entry = &*entry + &c;
        }
        let mut terms: Vec<_> = combined.into_iter().filter(|(_, c)| !c.is_zero()).collect();
        terms.sort_by(|a, b| cmp_lex(&b.0, &a.0));
        Self { terms }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(Rational::one())
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        Self::monomial(Monomial::one(), c)
    }

    /// Creates the single term `c * m`.
    #[must_use]
    pub fn monomial(m: Monomial, c: Rational) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            Self { terms: vec![(m, c)] }
        }
    }

    /// Creates the polynomial consisting of one atom.
    #[must_use]
    pub fn atom(atom: Atom) -> Self {
        Self::monomial(Monomial::atom(atom), Rational::one())
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if this is the constant 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, Rational)] {
        &self.terms
    }

    /// Returns the leading term (monomial, coefficient).
    #[must_use]
    pub fn leading_term(&self) -> Option<&(Monomial, Rational)> {
        self.terms.first()
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&Rational> {
        self.terms.first().map(|(_, c)| c)
    }

    /// Returns the value if the polynomial is constant (including zero).
    #[must_use]
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.as_slice() {
            [] => Some(Rational::zero()),
            [(m, c)] if m.is_one() => Some(c.clone()),
            _ => None,
        }
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        if other.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return other.clone();
        }
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Self::new(terms)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook algorithm).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let mut terms = Vec::with_capacity(self.len() * other.len());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                terms.push((m1.mul(m2), c1 * c2));
            }
        }
        Self::new(terms)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|(m, x)| (m.clone(), x * c)).collect(),
        }
    }

    /// Multiplies by the term `c * m`.
    #[must_use]
    pub fn mul_term(&self, m: &Monomial, c: &Rational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter().map(|(m2, c2)| (m.mul(m2), c2 * c)).collect(),
        }
    }

    /// Raises to a non-negative power by repeated squaring.
    #[must_use]
    pub fn pow(&self, mut n: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::one();
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            n >>= 1;
            if n > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Returns true if any term mentions an atom satisfying the predicate.
    pub fn any_atom(&self, mut pred: impl FnMut(&Atom, u32) -> bool) -> bool {
        self.terms.iter().any(|(m, _)| m.any_atom(&mut pred))
    }

    /// Greatest common divisor of all monomials, or `None` for zero.
    #[must_use]
    pub fn monomial_content(&self) -> Option<Monomial> {
        let (first, rest) = self.terms.split_first()?;
        Some(rest.iter().fold(first.0.clone(), |g, (m, _)| g.gcd(m)))
    }

    /// Divides every monomial by `m`, or returns `None` if one is not divisible.
    #[must_use]
    pub fn div_monomial(&self, m: &Monomial) -> Option<Self> {
        self.terms
            .iter()
            .map(|(t, c)| t.div(m).map(|q| (q, c.clone())))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    /// Least common multiple of the coefficient denominators.
    #[must_use]
    pub fn denominator_lcm(&self) -> Integer {
        self.terms
            .iter()
            .fold(Integer::one(), |acc, (_, c)| acc.lcm(&c.denominator()))
    }

    /// Greatest common divisor of the coefficient numerators.
    #[must_use]
    pub fn numerator_gcd(&self) -> Integer {
        self.terms
            .iter()
            .fold(Integer::zero(), |acc, (_, c)| acc.gcd(&c.numerator()))
    }

    /// Exact multivariate division in lex order.
    ///
    /// Returns the quotient when `divisor` divides `self` with zero remainder,
    /// and `None` otherwise (including when the division gives up after a
    /// bounded number of steps).
    #[must_use]
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (lead_m, lead_c) = divisor.leading_term()?;
        let mut remainder = self.clone();
        let mut quotient = Vec::new();

        while let Some((m, c)) = remainder.leading_term() {
            let qm = m.div(lead_m)?;
            let qc = c / lead_c;
            remainder = remainder.sub(&divisor.mul_term(&qm, &qc));
            quotient.push((qm, qc));
            if quotient.len() > MAX_QUOTIENT_TERMS {
                return None;
            }
        }

        Some(Self::new(quotient))
    }
}
