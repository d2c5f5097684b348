//! Sparse monomials over atoms.
//!
//! A monomial maps each atom to a positive exponent. Atoms with exponent zero
//! are never stored, so structural equality is mathematical equality.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::atom::Atom;

/// A product of atom powers.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Monomial(BTreeMap<Atom, u32>);

impl Monomial {
    /// Creates the monomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates the monomial `atom^exp`.
    #[must_use]
    pub fn from_power(atom: Atom, exp: u32) -> Self {
        let mut powers = BTreeMap::new();
        if exp > 0 {
            powers.insert(atom, exp);
        }
        Self(powers)
    }

    /// Creates the monomial consisting of a single atom.
    #[must_use]
    pub fn atom(atom: Atom) -> Self {
        Self::from_power(atom, 1)
    }

    /// Builds a monomial from `(atom, exponent)` pairs, merging repeats.
    pub fn from_powers(powers: impl IntoIterator<Item = (Atom, u32)>) -> Self {
        let mut map = BTreeMap::new();
        for (atom, exp) in powers {
            if exp > 0 {
                *map.entry(atom).or_insert(0) += exp;
            }
        }
        Self(map)
    }

    /// Returns true for the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the exponent of an atom (zero if absent).
    #[must_use]
    pub fn exponent(&self, atom: &Atom) -> u32 {
        self.0.get(atom).copied().unwrap_or(0)
    }

    /// Iterates over `(atom, exponent)` in ascending atom order.
    pub fn iter(&self) -> impl Iterator<Item = (&Atom, u32)> {
        self.0.iter().map(|(a, e)| (a, *e))
    }

    /// Number of distinct atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the monomial 1.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// Multiplies two monomials (adds exponents).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut result = self.0.clone();
        for (atom, exp) in &other.0 {
            *result.entry(atom.clone()).or_insert(0) += exp;
        }
        Self(result)
    }

    /// Raises to a power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }
        Self(self.0.iter().map(|(a, e)| (a.clone(), e * n)).collect())
    }

    /// Divides by another monomial if possible.
    ///
    /// Returns `Some(quotient)` if self is divisible by other.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        let mut result = self.0.clone();
        for (atom, exp) in &other.0 {
            let entry = result.get_mut(atom)?;
            match (*entry).cmp(exp) {
                Ordering::Less => return None,
                Ordering::Equal => {
                    result.remove(atom);
                }
                Ordering::Greater => *entry -= exp,
            }
        }
        Some(Self(result))
    }

    /// Returns true if self divides other.
    #[must_use]
    pub fn divides(&self, other: &Self) -> bool {
        self.0.iter().all(|(a, e)| other.exponent(a) >= *e)
    }

    /// Computes the greatest common divisor of two monomials.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .filter_map(|(a, e)| {
                    let m = (*e).min(other.exponent(a));
                    (m > 0).then(|| (a.clone(), m))
                })
                .collect(),
        )
    }

    /// Returns true if any atom satisfies the predicate.
    pub fn any_atom(&self, mut pred: impl FnMut(&Atom, u32) -> bool) -> bool {
        self.0.iter().any(|(a, e)| pred(a, *e))
    }
}

/// Compares two monomials lexicographically.
///
/// Atoms are visited in ascending order, so the smallest atom is the most
/// significant variable.
#[must_use]
pub fn cmp_lex(a: &Monomial, b: &Monomial) -> Ordering {
    let mut left = a.0.iter();
    let mut right = b.0.iter();
    let mut l = left.next();
    let mut r = right.next();
    loop {
        match (l, r) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some((atom_a, exp_a)), Some((atom_b, exp_b))) => match atom_a.cmp(atom_b) {
                // `a` carries an atom that `b` lacks
                Ordering::Less => return Ordering::Greater,
                Ordering::Greater => return Ordering::Less,
                Ordering::Equal => {
                    if exp_a != exp_b {
                        return exp_a.cmp(exp_b);
                    }
                    l = left.next();
                    r = right.next();
                }
            },
        }
    }
}
