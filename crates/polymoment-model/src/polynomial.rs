//! Canonical multivariate polynomials over generators.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use hashbrown::HashSet;
use num_traits::{One, Zero};
use polymoment_integers::{Integer, Rational};
use smallvec::SmallVec;

use crate::error::ParseError;
use crate::lower::{lower, MAX_TERMS};
use crate::parser::Parser;

/// Exponent vector, one entry per generator.
pub type Exponents = SmallVec<[u32; 4]>;

/// A variable raised to a fixed base exponent.
///
/// Ordinary variables have base exponent `1`. Negative or fractional powers
/// written in the input produce generators such as `x0**(-1)` or
/// `x0**(1/2)`, and monomial exponents count multiples of the base.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generator {
    variable: String,
    exponent: Rational,
}

impl Generator {
    /// Creates a generator.
    #[must_use]
    pub fn new(variable: impl Into<String>, exponent: Rational) -> Self {
        Self {
            variable: variable.into(),
            exponent,
        }
    }

    /// Creates the plain generator `variable**1`.
    #[must_use]
    pub fn variable_of(variable: impl Into<String>) -> Self {
        Self::new(variable, Rational::one())
    }

    /// Returns the variable name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the base exponent.
    #[must_use]
    pub fn exponent(&self) -> &Rational {
        &self.exponent
    }

    /// Splits `variable**power` into a canonical generator and multiplicity.
    ///
    /// The base exponent is `±1/q` where `q` is the denominator of `power`:
    /// `x**3 = (x**1)^3`, `x**(-2) = (x**(-1))^2`, `x**(3/2) = (x**(1/2))^3`.
    /// Returns `None` if the multiplicity does not fit in `u32`.
    #[must_use]
    pub fn decompose(variable: &str, power: &Rational) -> Option<(Generator, u32)> {
        let sign = Integer::new(if power.is_negative() { -1 } else { 1 });
        let base = Rational::new(sign, power.denominator());
        let multiplicity = power.numerator().abs().to_u32()?;
        Some((Generator::new(variable, base), multiplicity))
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_power(f, &self.variable, &self.exponent)
    }
}

fn write_power(f: &mut fmt::Formatter<'_>, variable: &str, power: &Rational) -> fmt::Result {
    if power.is_one() {
        write!(f, "{variable}")
    } else if power.is_integer() && !power.is_negative() {
        write!(f, "{variable}**{power}")
    } else {
        write!(f, "{variable}**({power})")
    }
}

/// One term of a [`Polynomial`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    exponents: Exponents,
    coeff: Rational,
}

impl Term {
    /// Exponent of each generator, aligned with [`Polynomial::generators`].
    #[must_use]
    pub fn exponents(&self) -> &[u32] {
        &self.exponents
    }

    /// The exact coefficient.
    #[must_use]
    pub fn coeff(&self) -> &Rational {
        &self.coeff
    }
}

/// A polynomial in canonical form: sorted generators and terms in
/// descending lexicographic order of exponent vectors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polynomial {
    generators: Vec<Generator>,
    terms: Vec<Term>,
}

impl Polynomial {
    /// Parses an expression over the declared variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed input, undeclared identifiers,
    /// unsupported operators, or expansions beyond the parser's term limit.
    pub fn parse<I, S>(input: &str, declared: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let declared: HashSet<String> = declared
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        let node = Parser::from_source(input, &declared)?.parse()?;
        let sparse = lower(&node)?;

        let mut split = Vec::new();
        for (powers, coeff) in sparse.into_terms() {
            let factors = powers
                .iter()
                .map(|(v, p)| Generator::decompose(v, p))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ParseError::InvalidExponent {
                    reason: "exponent is too large".to_string(),
                })?;
            split.push((factors, coeff));
        }

        let generators: Vec<Generator> = split
            .iter()
            .flat_map(|(factors, _)| factors.iter().map(|(g, _)| g.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let terms = split
            .into_iter()
            .map(|(factors, coeff)| {
                let mut exponents: Exponents = SmallVec::from_elem(0, generators.len());
                for (g, k) in factors {
                    if let Ok(i) = generators.binary_search(&g) {
                        exponents[i] = k;
                    }
                }
                (exponents, coeff)
            })
            .collect();

        Ok(Self::from_terms(generators, terms))
    }

    /// Builds a polynomial, combining like terms and sorting.
    fn from_terms(generators: Vec<Generator>, terms: Vec<(Exponents, Rational)>) -> Self {
        let mut combined: BTreeMap<Exponents, Rational> = BTreeMap::new();
        for (e, c) in terms {
            let entry = combined.entry(e).or_insert_with(Rational::zero);
            *entry = &*entry + &c;
        }
        // BTreeMap iterates ascending; terms are stored descending
        let terms = combined
            .into_iter()
            .rev()
            .filter(|(_, c)| !c.is_zero())
            .map(|(exponents, coeff)| Term { exponents, coeff })
            .collect();
        Self { generators, terms }
    }

    /// The constant polynomial `c` over the given generators.
    #[must_use]
    pub fn constant_over(generators: Vec<Generator>, c: Rational) -> Self {
        let zeros = SmallVec::from_elem(0, generators.len());
        Self::from_terms(generators, vec![(zeros, c)])
    }

    /// Returns the sorted generators.
    #[must_use]
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// Returns the terms in descending lexicographic order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
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

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Names of the variables the polynomial depends on.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<&str> {
        self.generators.iter().map(Generator::variable).collect()
    }

    /// Net power of each variable in a term.
    ///
    /// The power of a variable is the sum over its generators of
    /// `base exponent * term exponent`; variables with net power zero are
    /// omitted.
    #[must_use]
    pub fn variable_powers(&self, term: &Term) -> BTreeMap<&str, Rational> {
        let mut powers: BTreeMap<&str, Rational> = BTreeMap::new();
        for (g, &k) in self.generators.iter().zip(term.exponents.iter()) {
            if k == 0 {
                continue;
            }
            let entry = powers.entry(g.variable()).or_insert_with(Rational::zero);
            *entry = &*entry + &(g.exponent() * &Rational::from(k));
        }
        powers.retain(|_, p| !p.is_zero());
        powers
    }

    /// Multiplies two polynomials over the same generators, or returns `None`
    /// once the product exceeds `max_terms`.
    #[must_use]
    pub fn checked_mul(&self, other: &Self, max_terms: usize) -> Option<Self> {
        debug_assert_eq!(self.generators, other.generators);
        let mut product: BTreeMap<Exponents, Rational> = BTreeMap::new();
        for t1 in &self.terms {
            for t2 in &other.terms {
                let e: Exponents = t1
                    .exponents
                    .iter()
                    .zip(t2.exponents.iter())
                    .map(|(a, b)| a.checked_add(*b))
                    .collect::<Option<_>>()?;
                let entry = product.entry(e).or_insert_with(Rational::zero);
                *entry = &*entry + &(&t1.coeff * &t2.coeff);
            }
            if product.len() > max_terms {
                return None;
            }
        }
        Some(Self::from_terms(self.generators.clone(), product.into_iter().collect()))
    }

    /// Raises to a power by repeated squaring, or returns `None` once an
    /// intermediate product exceeds `max_terms`.
    #[must_use]
    pub fn checked_pow(&self, n: u32, max_terms: usize) -> Option<Self> {
        let mut result = Self::constant_over(self.generators.clone(), Rational::one());
        let mut base = self.clone();
        let mut k = n;
        while k > 0 {
            if k & 1 == 1 {
                result = result.checked_mul(&base, max_terms)?;
            }
            k >>= 1;
            if k > 0 {
                base = base.checked_mul(&base, max_terms)?;
            }
        }
        Some(result)
    }

    /// Raises to a power using the parser's default term limit.
    #[must_use]
    pub fn pow(&self, n: u32) -> Option<Self> {
        self.checked_pow(n, MAX_TERMS)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            let negative = term.coeff.is_negative();
            match (i == 0, negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }

            let magnitude = term.coeff.abs();
            let p = magnitude.numerator();
            let q = magnitude.denominator();
            let powers = self.variable_powers(term);

            if powers.is_empty() {
                write!(f, "{magnitude}")?;
                continue;
            }
            if !p.is_one() {
                write!(f, "{p}*")?;
            }
            for (j, (var, power)) in powers.iter().enumerate() {
                if j > 0 {
                    write!(f, "*")?;
                }
                write_power(f, var, power)?;
            }
            if !q.is_one() {
                write!(f, "/{q}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Polynomial {
        Polynomial::parse(input, ["x0", "x1", "x2"]).unwrap()
    }

    #[test]
    fn test_generators_sorted() {
        let p = parse("x1 + x0*x2");
        let names: Vec<_> = p.generators().iter().map(Generator::variable).collect();
        assert_eq!(names, vec!["x0", "x1", "x2"]);
        assert_eq!(p.to_string(), "x0*x2 + x1");
    }

    #[test]
    fn test_expansion_is_exact() {
        let p = parse("(x0 + 0.1)**2");
        assert_eq!(p.to_string(), "x0**2 + x0/5 + 1/100");
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_pow_matches_parse() {
        let base = parse("x0 - 2*x1 + 3");
        let cubed = parse("(x0 - 2*x1 + 3)**3");
        assert_eq!(base.pow(3), Some(cubed));
        assert_eq!(base.pow(0).unwrap().to_string(), "1");
    }

    #[test]
    fn test_budget() {
        let p = parse("x0 + x1 + x2 + 1");
        assert!(p.checked_pow(4, 10).is_none());
        assert_eq!(p.checked_pow(2, 10).map(|q| q.len()), Some(10));
    }

    #[test]
    fn test_negative_and_fractional_generators() {
        let p = parse("x0**(-2) + x0**(3/2) + x0");
        let gens: Vec<String> = p.generators().iter().map(ToString::to_string).collect();
        assert_eq!(gens, vec!["x0**(-1)", "x0**(1/2)", "x0"]);

        let powers: Vec<Rational> = p
            .terms()
            .iter()
            .map(|t| p.variable_powers(t)["x0"].clone())
            .collect();
        assert!(powers.contains(&Rational::from(-2i64)));
        assert!(powers.contains(&Rational::from_i64(3, 2)));
        assert!(powers.contains(&Rational::from(1i64)));
    }

    #[test]
    fn test_powers_aggregate_across_generators() {
        // (x0**(1/2) + 1)**2 = 2*x0**(1/2) + x0 + 1
        let p = parse("(x0**(1/2) + 1)**2");
        assert_eq!(p.len(), 3);
        assert_eq!(p.to_string(), "2*x0**(1/2) + x0 + 1");
    }

    #[test]
    fn test_division_by_monomial() {
        let p = parse("(x0**2 + x1) / (2*x0)");
        assert_eq!(p.to_string(), "x0**(-1)*x1/2 + x0/2");
    }

    #[test]
    fn test_zero_polynomial() {
        let p = parse("x0 - x0");
        assert!(p.is_zero());
        assert!(p.variables().is_empty());
        assert_eq!(p.to_string(), "0");
    }

    #[test]
    fn test_undeclared() {
        assert_eq!(
            Polynomial::parse("x0 + y", ["x0"]),
            Err(ParseError::UndeclaredVariable { name: "y".into() })
        );
    }
}
