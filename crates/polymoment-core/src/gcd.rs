//! Multivariate polynomial GCD over the rationals.
//!
//! A polynomial is viewed as univariate in its most significant atom with
//! coefficients in the remaining atoms. Contents are split off recursively
//! and the primitive parts are reduced with a primitive pseudo-remainder
//! sequence. Atoms are treated as independent indeterminates.

use std::collections::BTreeMap;

use num_traits::One;
use polymoment_integers::Rational;

use crate::atom::Atom;
use crate::monomial::Monomial;
use crate::poly::Poly;

/// Largest intermediate polynomial the remainder sequence may produce.
const MAX_GCD_TERMS: usize = 1_024;

/// Pseudo-division steps allowed for one top-level GCD.
const MAX_GCD_STEPS: usize = 1_024;

/// Computes a monic GCD of `a` and `b`.
///
/// Returns `None` when the computation exceeds its work budget; callers then
/// keep the operands unreduced.
pub(crate) fn poly_gcd(a: &Poly, b: &Poly) -> Option<Poly> {
    let mut steps = MAX_GCD_STEPS;
    gcd_with_budget(a, b, &mut steps)
}

fn gcd_with_budget(a: &Poly, b: &Poly, steps: &mut usize) -> Option<Poly> {
    if a.is_zero() {
        return Some(make_monic(b));
    }
    if b.is_zero() {
        return Some(make_monic(a));
    }
    if a.as_constant().is_some() || b.as_constant().is_some() {
        return Some(Poly::one());
    }
    let Some(var) = main_atom(a, b) else {
        return Some(Poly::one());
    };

    let content_a = content(a, &var, steps)?;
    let content_b = content(b, &var, steps)?;
    let common = gcd_with_budget(&content_a, &content_b, steps)?;

    let mut p = a.div_exact(&content_a)?;
    let mut q = b.div_exact(&content_b)?;
    if degree(&p, &var) < degree(&q, &var) {
        std::mem::swap(&mut p, &mut q);
    }

    while !q.is_zero() {
        if degree(&q, &var) == 0 {
            // A primitive polynomial free of `var` is a unit here
            return Some(make_monic(&common));
        }
        *steps = steps.checked_sub(1)?;
        let r = pseudo_remainder(&p, &q, &var)?;
        p = q;
        q = if r.is_zero() { r } else { primitive_part(&r, &var, steps)? };
    }

    Some(make_monic(&common.mul(&p)))
}

/// Smallest atom of either operand, which is the most significant in lex order.
fn main_atom(a: &Poly, b: &Poly) -> Option<Atom> {
    a.terms()
        .iter()
        .chain(b.terms())
        .filter_map(|(m, _)| m.iter().next().map(|(atom, _)| atom))
        .min()
        .cloned()
}

fn degree(p: &Poly, var: &Atom) -> u32 {
    p.terms().iter().map(|(m, _)| m.exponent(var)).max().unwrap_or(0)
}

/// Splits `p` into coefficients of powers of `var`.
fn coefficients(p: &Poly, var: &Atom) -> BTreeMap<u32, Poly> {
    let mut parts: BTreeMap<u32, Vec<(Monomial, Rational)>> = BTreeMap::new();
    for (m, c) in p.terms() {
        let rest = Monomial::from_powers(
            m.iter()
                .filter(|(a, _)| *a != var)
                .map(|(a, e)| (a.clone(), e)),
        );
        parts.entry(m.exponent(var)).or_default().push((rest, c.clone()));
    }
    parts.into_iter().map(|(k, terms)| (k, Poly::new(terms))).collect()
}

fn leading_coefficient(p: &Poly, var: &Atom) -> Poly {
    coefficients(p, var)
        .into_iter()
        .next_back()
        .map_or_else(Poly::zero, |(_, c)| c)
}

/// GCD of the coefficients of `p` viewed as a polynomial in `var`.
fn content(p: &Poly, var: &Atom, steps: &mut usize) -> Option<Poly> {
    let mut acc = Poly::zero();
    for coefficient in coefficients(p, var).into_values() {
        acc = gcd_with_budget(&acc, &coefficient, steps)?;
        if acc.is_one() {
            break;
        }
    }
    Some(acc)
}

/// Divides out the content in `var` and clears rational content.
fn primitive_part(p: &Poly, var: &Atom, steps: &mut usize) -> Option<Poly> {
    let c = content(p, var, steps)?;
    let q = p.div_exact(&c)?;
    let lcm = q.denominator_lcm();
    let scaled = q.scale(&Rational::from(lcm));
    let gcd = scaled.numerator_gcd();
    Some(scaled.scale(&Rational::from(gcd).recip()))
}

/// Remainder of `lc(b)^k * a` divided by `b` in `var`.
fn pseudo_remainder(a: &Poly, b: &Poly, var: &Atom) -> Option<Poly> {
    let db = degree(b, var);
    let lb = leading_coefficient(b, var);
    let mut r = a.clone();
    while !r.is_zero() {
        let dr = degree(&r, var);
        if dr < db {
            break;
        }
        let lr = leading_coefficient(&r, var);
        let shift = Monomial::from_power(var.clone(), dr - db);
        r = r.mul(&lb).sub(&lr.mul(b).mul_term(&shift, &Rational::one()));
        if r.len() > MAX_GCD_TERMS {
            return None;
        }
    }
    Some(r)
}

fn make_monic(p: &Poly) -> Poly {
    match p.leading_coeff().and_then(Rational::checked_recip) {
        Some(inv) => p.scale(&inv),
        None => p.clone(),
    }
}
