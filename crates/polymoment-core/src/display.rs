//! Conventional infix printing.
//!
//! Output uses `**` for powers, `sqrt(..)` for square roots and puts numeric
//! coefficients first, e.g. `b0*s0 + m0`, `s0**2/12`, `3 + 6/b0`.
//!
//! A denominator that is a single monomial is distributed over the
//! numerator terms; any other denominator is printed as `(num)/(den)`.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use num_traits::One;
use polymoment_integers::Rational;

use crate::atom::Atom;
use crate::expr::Expr;
use crate::monomial::Monomial;
use crate::poly::Poly;

/// One printed term `coeff * numer / denom`.
struct Term {
    coeff: Rational,
    numer: Monomial,
    denom: Monomial,
}

impl Term {
    fn new(m: &Monomial, c: &Rational, dm: &Monomial, dc: &Rational) -> Self {
        let g = m.gcd(dm);
        Self {
            coeff: c / dc,
            numer: m.div(&g).unwrap_or_else(|| m.clone()),
            denom: dm.div(&g).unwrap_or_else(|| dm.clone()),
        }
    }

    fn signed_exponent(&self, atom: &Atom) -> i64 {
        i64::from(self.numer.exponent(atom)) - i64::from(self.denom.exponent(atom))
    }

    fn write(&self, out: &mut String, first: bool) {
        let negative = self.coeff.is_negative();
        match (first, negative) {
            (true, true) => out.push('-'),
            (true, false) => {}
            (false, true) => out.push_str(" - "),
            (false, false) => out.push_str(" + "),
        }

        let magnitude = self.coeff.abs();
        let p = magnitude.numerator();
        let q = magnitude.denominator();

        let factors: Vec<String> = self.numer.iter().map(|(a, k)| power_str(a, k)).collect();
        let head = if factors.is_empty() {
            p.to_string()
        } else if p.is_one() {
            factors.join("*")
        } else {
            format!("{p}*{}", factors.join("*"))
        };

        let mut below = Vec::new();
        if !q.is_one() {
            below.push(q.to_string());
        }
        below.extend(self.denom.iter().map(|(a, k)| power_str(a, k)));

        out.push_str(&head);
        match below.len() {
            0 => {}
            1 => {
                out.push('/');
                out.push_str(&below[0]);
            }
            _ => {
                out.push_str("/(");
                out.push_str(&below.join("*"));
                out.push(')');
            }
        }
    }
}

/// Lexicographic order on signed exponent vectors.
fn cmp_signed(a: &Term, b: &Term) -> Ordering {
    let atoms: BTreeSet<&Atom> = [&a.numer, &a.denom, &b.numer, &b.denom]
        .into_iter()
        .flat_map(|m| m.iter().map(|(atom, _)| atom))
        .collect();
    for atom in atoms {
        match a.signed_exponent(atom).cmp(&b.signed_exponent(atom)) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

fn write_terms(mut terms: Vec<Term>) -> String {
    if terms.is_empty() {
        return "0".to_string();
    }
    terms.sort_by(|a, b| cmp_signed(b, a));
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        term.write(&mut out, i == 0);
    }
    out
}

fn poly_str(poly: &Poly) -> String {
    let one = Monomial::one();
    let unit = Rational::one();
    write_terms(
        poly.terms()
            .iter()
            .map(|(m, c)| Term::new(m, c, &one, &unit))
            .collect(),
    )
}

fn atom_str(atom: &Atom) -> String {
    match atom {
        Atom::Symbol(name) => name.clone(),
        Atom::Pi => "pi".to_string(),
        Atom::Gamma(arg) => format!("gamma({arg})"),
        Atom::Exp(arg) => format!("exp({arg})"),
        Atom::Log(arg) => format!("log({arg})"),
        Atom::Root { base, degree: 2 } => format!("sqrt({base})"),
        Atom::Root { base, degree } => format!("{}**(1/{degree})", operand_str(base)),
    }
}

fn power_str(atom: &Atom, k: u32) -> String {
    match atom {
        Atom::Root { base, degree } if *degree != 2 && k > 1 => {
            let e = Rational::from_i64(i64::from(k), i64::from(*degree));
            format!("{}**({e})", operand_str(base))
        }
        _ if k == 1 => atom_str(atom),
        _ => format!("{}**{k}", atom_str(atom)),
    }
}

/// Prints an expression used as the base of a power.
fn operand_str(expr: &Expr) -> String {
    let bare = expr.as_atom().is_some()
        || expr
            .as_rational()
            .is_some_and(|r| r.is_integer() && !r.is_negative());
    if bare {
        expr.to_string()
    } else {
        format!("({expr})")
    }
}

/// Returns true when a polynomial prints as a single factor.
fn is_single_factor(poly: &Poly) -> bool {
    match poly.terms() {
        [(m, c)] => (c.is_one() && m.len() == 1) || (m.is_one() && !c.is_negative()),
        _ => false,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return f.write_str(&poly_str(&self.num));
        }

        match self.den.terms() {
            [(dm, dc)] if dc.is_one() || self.num.len() == 1 => {
                let terms = self
                    .num
                    .terms()
                    .iter()
                    .map(|(m, c)| Term::new(m, c, dm, dc))
                    .collect();
                f.write_str(&write_terms(terms))
            }
            _ => {
                let num = poly_str(&self.num);
                let den = poly_str(&self.den);
                let num = if self.num.len() > 1 { format!("({num})") } else { num };
                let den = if is_single_factor(&self.den) { den } else { format!("({den})") };
                write!(f, "{num}/{den}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn int(n: i64) -> Expr {
        Expr::from(n)
    }

    fn frac(p: i64, q: i64) -> Expr {
        Expr::from(Rational::from_i64(p, q))
    }

    #[test]
    fn test_polynomials() {
        assert_eq!(Expr::zero().to_string(), "0");
        assert_eq!(int(-3).to_string(), "-3");
        assert_eq!((sym("b0") * sym("s0") + sym("m0")).to_string(), "b0*s0 + m0");
        assert_eq!((sym("s0").pow(2) * int(2)).to_string(), "2*s0**2");
        assert_eq!((sym("m0") - sym("s0") * frac(1, 2)).to_string(), "m0 - s0/2");
        assert_eq!((sym("s0").pow(2) * frac(1, 12)).to_string(), "s0**2/12");
        assert_eq!((sym("x") * frac(-3, 4)).to_string(), "-3*x/4");
    }

    #[test]
    fn test_monomial_denominator() {
        let b = sym("b0");
        let e = int(3) + int(6).checked_div(&b).unwrap();
        assert_eq!(e.to_string(), "3 + 6/b0");

        let e = sym("x").checked_div(&(int(2) * sym("y") * sym("z"))).unwrap();
        assert_eq!(e.to_string(), "x/(2*y*z)");
    }

    #[test]
    fn test_grouped_denominator() {
        let x = sym("x");
        let e = (&x + &int(1)).checked_div(&(&x - &int(1))).unwrap();
        assert_eq!(e.to_string(), "(x + 1)/(x - 1)");

        let e = (&x + &int(1)).checked_div(&(int(2) * sym("y"))).unwrap();
        assert_eq!(e.to_string(), "(x + 1)/(2*y)");
    }

    #[test]
    fn test_functions() {
        let s = sym("s0");
        let e = (s.pow(2) * frac(1, 12)).sqrt();
        assert_eq!(e.to_string(), "sqrt(3)*sqrt(s0**2)/6");

        let g = Expr::gamma(&(int(1) + int(1).checked_div(&sym("b0")).unwrap())).unwrap();
        assert_eq!(g.to_string(), "gamma(1 + 1/b0)");
        assert_eq!(g.pow(2).to_string(), "gamma(1 + 1/b0)**2");

        assert_eq!(Expr::pi().sqrt().to_string(), "sqrt(pi)");
        assert_eq!(int(2).root(3).unwrap().to_string(), "2**(1/3)");
        assert_eq!(sym("x").root(3).unwrap().pow(2).to_string(), "x**(2/3)");
        assert_eq!(Expr::exp(&(sym("x") * int(2))).to_string(), "exp(2*x)");
    }

    #[test]
    fn test_rationalized_denominator() {
        // m0 - 2*s0/(sqrt(2)*sqrt(pi))
        let den = int(2).sqrt() * Expr::pi().sqrt();
        let e = sym("m0") - (int(2) * sym("s0")).checked_div(&den).unwrap();
        assert_eq!(e.to_string(), "m0 - s0*sqrt(2)/sqrt(pi)");

        let e = int(1).checked_div(&int(3).sqrt()).unwrap();
        assert_eq!(e.to_string(), "sqrt(3)/3");
    }

    #[test]
    fn test_cancelled_quotient() {
        // (a**2*b + a*b**2)/(a + b)**2 prints in lowest terms
        let (a, b) = (sym("a"), sym("b"));
        let sum = &a + &b;
        let e = (a.pow(2) * b.clone() + a.clone() * b.pow(2)).checked_div(&sum.pow(2)).unwrap();
        assert_eq!(e.to_string(), "a*b/(a + b)");
    }

    #[test]
    fn test_skewness_shape() {
        // 2*s0 / sqrt(b0*s0**2)
        let s = sym("s0");
        let b = sym("b0");
        let var = &b * &s.pow(2);
        let e = (int(2) * b.clone() * s.pow(3))
            .checked_div(&var.pow_rational(&Rational::from_i64(3, 2)).unwrap())
            .unwrap();
        assert_eq!(e.to_string(), "2*s0/sqrt(b0*s0**2)");
    }
}
