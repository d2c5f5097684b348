//! Lowering of expression trees into sparse polynomials.
//!
//! Monomials are kept as a map from variable to its *net* rational exponent,
//! so `x**2 / x` collapses to `x` and `x**(1/2) * x` to `x**(3/2)`. The
//! split into generators happens once lowering is complete.

use std::collections::BTreeMap;

use num_traits::{One, Zero};
use polymoment_integers::Rational;

use crate::error::ParseError;
use crate::parser::Node;

/// Maximum number of terms produced while lowering.
pub(crate) const MAX_TERMS: usize = 100_000;

/// Cap on machine-word multiplications estimated for a single product.
pub(crate) const MAX_PRODUCT_WORK: usize = 25_000_000;

/// Net exponent of each variable in a monomial; zero exponents are not stored.
pub(crate) type VarPowers = BTreeMap<String, Rational>;

/// A polynomial with rational net exponents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Sparse(BTreeMap<VarPowers, Rational>);

impl Sparse {
    fn constant(c: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(VarPowers::new(), c);
        }
        Self(terms)
    }

    fn variable(name: &str) -> Self {
        let mut powers = VarPowers::new();
        powers.insert(name.to_string(), Rational::one());
        let mut terms = BTreeMap::new();
        terms.insert(powers, Rational::one());
        Self(terms)
    }

    pub(crate) fn into_terms(self) -> BTreeMap<VarPowers, Rational> {
        self.0
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn as_constant(&self) -> Option<Rational> {
        match self.0.len() {
            0 => Some(Rational::zero()),
            1 => self
                .0
                .iter()
                .next()
                .filter(|(m, _)| m.is_empty())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    fn single_term(&self) -> Option<(&VarPowers, &Rational)> {
        if self.0.len() == 1 {
            self.0.iter().next()
        } else {
            None
        }
    }

    fn add(mut self, other: Sparse) -> Self {
        for (m, c) in other.0 {
            accumulate(&mut self.0, m, &c);
        }
        self
    }

    fn neg(self) -> Self {
        Self(self.0.into_iter().map(|(m, c)| (m, -c)).collect())
    }

    /// Words in the widest coefficient.
    fn coefficient_words(&self) -> usize {
        self.0.values().map(Rational::bit_len).max().unwrap_or(0) / 64 + 1
    }

    fn mul(&self, other: &Sparse) -> Result<Self, ParseError> {
        let too_large = ParseError::ExpansionTooLarge { limit: MAX_TERMS };
        // Schoolbook cost: pairs times coefficient words
        let work = self
            .0
            .len()
            .saturating_mul(other.0.len())
            .saturating_mul(self.coefficient_words())
            .saturating_mul(other.coefficient_words());
        if work > MAX_PRODUCT_WORK {
            return Err(ParseError::ExpansionTooCostly {
                limit: MAX_PRODUCT_WORK,
            });
        }
        let mut terms = BTreeMap::new();
        for (m1, c1) in &self.0 {
            for (m2, c2) in &other.0 {
                let mut m = m1.clone();
                for (var, e) in m2 {
                    let entry = m.entry(var.clone()).or_insert_with(Rational::zero);
                    *entry = &*entry + e;
                    if entry.is_zero() {
                        m.remove(var);
                    }
                }
                accumulate(&mut terms, m, &(c1 * c2));
            }
        }
        if terms.len() > MAX_TERMS {
            return Err(too_large);
        }
        Ok(Self(terms))
    }

    fn pow(&self, n: u32) -> Result<Self, ParseError> {
        let mut result = Self::constant(Rational::one());
        let mut base = self.clone();
        let mut k = n;
        while k > 0 {
            if k & 1 == 1 {
                result = result.mul(&base)?;
            }
            k >>= 1;
            if k > 0 {
                base = base.mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Returns `1 / self` for a single nonzero term.
    fn reciprocal(&self) -> Result<Self, ParseError> {
        if self.is_zero() {
            return Err(ParseError::DivisionByZero);
        }
        let (m, c) = self.single_term().ok_or(ParseError::NonMonomialDivisor)?;
        let inverse: VarPowers = m.iter().map(|(v, e)| (v.clone(), -e)).collect();
        let mut terms = BTreeMap::new();
        terms.insert(inverse, c.recip());
        Ok(Self(terms))
    }

    /// Raises to a constant rational power.
    fn pow_rational(&self, e: &Rational) -> Result<Self, ParseError> {
        let invalid = |reason: &str| ParseError::InvalidExponent {
            reason: reason.to_string(),
        };

        if let Some(n) = e.to_u32() {
            return self.pow(n);
        }
        if self.is_zero() {
            return if e.is_negative() {
                Err(ParseError::DivisionByZero)
            } else {
                Ok(Self::default())
            };
        }
        if e.is_integer() {
            let n = e
                .abs()
                .to_u32()
                .ok_or_else(|| invalid("exponent is too large"))?;
            let inverse = self.reciprocal().map_err(|err| match err {
                ParseError::NonMonomialDivisor => {
                    invalid("a negative exponent needs a single monomial base")
                }
                other => other,
            })?;
            return inverse.pow(n);
        }

        // Fractional powers are taken term-wise on a unit monomial
        match self.single_term() {
            Some((m, c)) if c.is_one() => {
                let raised: VarPowers = m.iter().map(|(v, p)| (v.clone(), p * e)).collect();
                let mut terms = BTreeMap::new();
                terms.insert(raised, Rational::one());
                Ok(Self(terms))
            }
            _ => Err(invalid(
                "a fractional exponent needs a single variable or monomial base",
            )),
        }
    }
}

fn accumulate(terms: &mut BTreeMap<VarPowers, Rational>, m: VarPowers, c: &Rational) {
    let entry = terms.entry(m).or_insert_with(Rational::zero);
    *entry = &*entry + c;
    if entry.is_zero() {
        terms.retain(|_, c| !c.is_zero());
    }
}

/// Evaluates an expression tree into a sparse polynomial.
pub(crate) fn lower(node: &Node) -> Result<Sparse, ParseError> {
    match node {
        Node::Number(value) => Ok(Sparse::constant(value.clone())),
        Node::Variable(name) => Ok(Sparse::variable(name)),
        Node::Neg(inner) => Ok(lower(inner)?.neg()),
        Node::Add(a, b) => Ok(lower(a)?.add(lower(b)?)),
        Node::Sub(a, b) => Ok(lower(a)?.add(lower(b)?.neg())),
        Node::Mul(a, b) => lower(a)?.mul(&lower(b)?),
        Node::Div(a, b) => {
            let inverse = lower(b)?.reciprocal()?;
            lower(a)?.mul(&inverse)
        }
        Node::Pow(base, exponent) => {
            let e = lower(exponent)?
                .as_constant()
                .ok_or_else(|| ParseError::InvalidExponent {
                    reason: "the exponent must be a numeric constant".to_string(),
                })?;
            lower(base)?.pow_rational(&e)
        }
    }
}
