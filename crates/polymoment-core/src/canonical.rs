//! Normalization of `num / den` into canonical form.
//!
//! Three passes run on every construction:
//! 1. A monomial denominator holding numeric radicals is rationalized by
//!    multiplying through with the complementary radical powers.
//! 2. Radical and exponential rewriting, applied term by term when a monomial
//!    holds a reducible power (`sqrt(a)**2`), two numeric radicals of the
//!    same degree, or more than one exponential factor.
//! 3. Cancellation: the common monomial factor and the polynomial GCD are
//!    divided out, and integer content and sign are normalized.

use std::collections::BTreeMap;

use num_traits::One;
use polymoment_integers::Rational;

use crate::atom::Atom;
use crate::expr::Expr;
use crate::gcd::poly_gcd;
use crate::monomial::Monomial;
use crate::poly::Poly;
use crate::special::numeric_root;

/// Normalizes `num / den`. The caller guarantees `den` is nonzero.
pub(crate) fn normalize(num: Poly, den: Poly) -> Expr {
    if num.is_zero() {
        return Expr::zero();
    }
    if let Some(factor) = rationalizing_factor(&den) {
        let one = Rational::one();
        return normalize(num.mul_term(&factor, &one), den.mul_term(&factor, &one));
    }
    if needs_rewrite(&num) || needs_rewrite(&den) {
        let n = rewrite(&num);
        let d = rewrite(&den);
        if d.is_zero() {
            // Denominator collapsed under radical identities; leave unreduced.
            return cancel(num, den);
        }
        return normalize(n.num.mul(&d.den), n.den.mul(&d.num));
    }
    cancel(num, den)
}

/// For a single-term denominator, the product of `root(a)^(q-k)` over its
/// numeric radicals `root(a)^k`.
fn rationalizing_factor(den: &Poly) -> Option<Monomial> {
    let [(m, _)] = den.terms() else {
        return None;
    };
    let factor = Monomial::from_powers(m.iter().filter_map(|(atom, k)| match atom {
        Atom::Root { base, degree } if k < *degree && base.as_rational().is_some() => {
            Some((atom.clone(), degree - k))
        }
        _ => None,
    }));
    (!factor.is_one()).then_some(factor)
}

fn needs_rewrite(poly: &Poly) -> bool {
    poly.terms().iter().any(|(m, _)| monomial_needs_rewrite(m))
}

fn monomial_needs_rewrite(m: &Monomial) -> bool {
    let mut exp_factors = 0;
    let mut numeric_degrees: Vec<u32> = Vec::new();
    for (atom, k) in m.iter() {
        match atom {
            Atom::Root { base, degree } => {
                if k >= *degree {
                    return true;
                }
                if mergeable_radicand(base).is_some() {
                    if k > 1 || numeric_degrees.contains(degree) {
                        return true;
                    }
                    numeric_degrees.push(*degree);
                }
            }
            Atom::Exp(_) => {
                exp_factors += k;
                if exp_factors > 1 {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// Numeric radicands that may be multiplied under one radical.
///
/// `root(a) * root(b) = root(a * b)` only holds for non-negative radicands.
fn mergeable_radicand(base: &Expr) -> Option<Rational> {
    base.as_rational().filter(|v| !v.is_negative())
}

fn rewrite(poly: &Poly) -> Expr {
    let mut acc = Expr::zero();
    for (m, c) in poly.terms() {
        let term = if monomial_needs_rewrite(m) {
            rewrite_monomial(m).scale(c)
        } else {
            Expr::from_canonical_poly(Poly::monomial(m.clone(), c.clone()))
        };
        acc = acc.add_ref(&term);
    }
    acc
}

fn rewrite_monomial(m: &Monomial) -> Expr {
    let mut plain = Vec::new();
    let mut factors = Vec::new();
    let mut numeric: BTreeMap<u32, Rational> = BTreeMap::new();
    let mut exponent = Expr::zero();
    let mut has_exp = false;

    for (atom, k) in m.iter() {
        match atom {
            Atom::Root { base, degree } => {
                if let Some(value) = mergeable_radicand(base) {
                    let entry = numeric.entry(*degree).or_insert_with(Rational::one);
                    *entry = &*entry * &value.pow(k);
                } else {
                    if k >= *degree {
                        factors.push(base.pow(k / degree));
                    }
                    plain.push((atom.clone(), k % degree));
                }
            }
            Atom::Exp(arg) => {
                exponent = exponent.add_ref(&arg.scale(&Rational::from(k)));
                has_exp = true;
            }
            _ => plain.push((atom.clone(), k)),
        }
    }

    factors.push(Expr::from_canonical_poly(Poly::monomial(
        Monomial::from_powers(plain),
        Rational::one(),
    )));
    for (degree, value) in numeric {
        factors.push(numeric_root(&value, degree));
    }
    if has_exp {
        factors.push(Expr::exp(&exponent));
    }
    Expr::product(&factors)
}

/// Cancels common factors of a rewritten quotient.
fn cancel(mut num: Poly, mut den: Poly) -> Expr {
    if let (Some(a), Some(b)) = (num.monomial_content(), den.monomial_content()) {
        let g = a.gcd(&b);
        if !g.is_one() {
            if let (Some(n), Some(d)) = (num.div_monomial(&g), den.div_monomial(&g)) {
                num = n;
                den = d;
            }
        }
    }

    if let Some(q) = num.div_exact(&den) {
        return Expr::from_canonical_poly(q);
    }
    // A single remaining term shares no factor beyond the monomial content
    if num.len() > 1 && den.len() > 1 {
        if let Some(g) = poly_gcd(&num, &den).filter(|g| g.as_constant().is_none()) {
            if let (Some(n), Some(d)) = (num.div_exact(&g), den.div_exact(&g)) {
                num = n;
                den = d;
            }
        }
    }

    if let Some(c) = den.as_constant() {
        if let Some(inv) = c.checked_recip() {
            return Expr::from_canonical_poly(num.scale(&inv));
        }
    }

    // Integer coefficients, coprime across num and den, positive leading den
    let lcm = num.denominator_lcm().lcm(&den.denominator_lcm());
    let scaled_num = num.scale(&Rational::from(lcm.clone()));
    let scaled_den = den.scale(&Rational::from(lcm));
    let gcd = scaled_num.numerator_gcd().gcd(&scaled_den.numerator_gcd());
    let mut factor = Rational::from(gcd).recip();
    if scaled_den.leading_coeff().is_some_and(Rational::is_negative) {
        factor = -factor;
    }

    Expr {
        num: scaled_num.scale(&factor),
        den: scaled_den.scale(&factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqrt_of(e: Expr) -> Expr {
        e.sqrt()
    }

    #[test]
    fn test_root_squared_collapses() {
        let x = Expr::symbol("x");
        let r = sqrt_of(x.clone());
        assert_eq!(r.pow(2), x);
        assert_eq!(r.pow(3), &x * &r);
    }

    #[test]
    fn test_numeric_roots_merge() {
        let two = sqrt_of(Expr::from(2i64));
        let three = sqrt_of(Expr::from(3i64));
        assert_eq!(&two * &three, sqrt_of(Expr::from(6i64)));
        assert_eq!(&two * &two, Expr::from(2i64));
    }

    #[test]
    fn test_exponentials_merge() {
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let product = Expr::exp(&a) * Expr::exp(&b);
        assert_eq!(product, Expr::exp(&(&a + &b)));
        assert_eq!(Expr::exp(&a) * Expr::exp(&-&a), Expr::one());
    }

    #[test]
    fn test_polynomial_gcd_cancels() {
        // (a^2 b + a b^2) / (a + b)^2 = a b / (a + b)
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let sum = &a + &b;
        let num = &(&a.pow(2) * &b) + &(&a * &b.pow(2));
        let e = num.checked_div(&sum.pow(2)).unwrap();
        assert_eq!(e.denominator(), sum.numerator());
        assert_eq!(e.numerator(), (&a * &b).numerator());
    }

    #[test]
    fn test_equal_quotients_are_identical() {
        // 1/(x - 1) - 1/(x + 1) = 2/(x^2 - 1)
        let x = Expr::symbol("x");
        let one = Expr::one();
        let lhs = (&x - &one).recip().unwrap() - (&x + &one).recip().unwrap();
        let rhs = Expr::from(2i64).checked_div(&(&x.pow(2) - &one)).unwrap();
        assert_eq!(lhs, rhs);

        // Beta-style variance: a b / ((a + b)^2 (a + b + 1)) built two ways
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let sum = &a + &b;
        let second = (&a * &(&a + &one)).checked_div(&(&sum * &(&sum + &one))).unwrap();
        let mean = a.checked_div(&sum).unwrap();
        let variance = &second - &mean.pow(2);
        let direct = (&a * &b).checked_div(&(&sum.pow(2) * &(&sum + &one))).unwrap();
        assert_eq!(variance, direct);
    }

    #[test]
    fn test_numeric_radicals_leave_denominator() {
        // 2 / (sqrt(2) * sqrt(pi)) = sqrt(2) / sqrt(pi)
        let two = Expr::from(2i64);
        let den = &sqrt_of(two.clone()) * &sqrt_of(Expr::pi());
        let e = two.checked_div(&den).unwrap();
        assert_eq!(e, sqrt_of(two.clone()).checked_div(&sqrt_of(Expr::pi())).unwrap());
        assert!(!e.denominator().any_atom(|atom, _| matches!(
            atom,
            Atom::Root { base, .. } if base.as_rational().is_some()
        )));

        // 1 / 2^(1/3) = 2^(2/3) / 2
        let cube = two.root(3).unwrap();
        let e = cube.recip().unwrap();
        assert_eq!(e.denominator().as_constant(), Some(Rational::from(2i64)));
        assert_eq!(&e * &cube, Expr::one());
    }

    #[test]
    fn test_content_normalized() {
        // (2x) / (4y) = x / (2y)
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let e = normalize(
            x.numerator().scale(&Rational::from(2i64)),
            y.numerator().scale(&Rational::from(4i64)),
        );
        assert_eq!(e.denominator(), &y.numerator().scale(&Rational::from(2i64)));
        assert_eq!(e.numerator(), x.numerator());
    }

    #[test]
    fn test_rational_coefficients_cleared() {
        // (x/2 + 1/3) / (y + 1) = (3x + 2) / (6y + 6)
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let num = x.scale(&Rational::from_i64(1, 2)) + Expr::from(Rational::from_i64(1, 3));
        let den = &y + &Expr::one();
        let e = num.checked_div(&den).unwrap();
        assert!(e.numerator().terms().iter().all(|(_, c)| c.is_integer()));
        assert!(e.denominator().terms().iter().all(|(_, c)| c.is_integer()));
        assert_eq!(e.denominator().leading_coeff(), Some(&Rational::from(6i64)));
    }
}
