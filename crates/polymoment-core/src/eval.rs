//! Substitution and numeric evaluation.
//!
//! Substitution replaces symbols by expressions and re-simplifies, which is
//! how deferred distribution parameters are bound after the fact. Numeric
//! evaluation to `f64` exists for verification only; it never feeds back into
//! exact results.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::atom::Atom;
use crate::error::AlgebraError;
use crate::expr::Expr;
use crate::poly::Poly;

/// Lanczos approximation parameter.
const LANCZOS_G: f64 = 7.0;

/// Lanczos coefficients for `g = 7`, `n = 9`.
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Γ(x) for real `x` via the Lanczos approximation with reflection.
#[must_use]
pub fn gamma_f64(x: f64) -> f64 {
    if x < 0.5 {
        PI / ((PI * x).sin() * gamma_f64(1.0 - x))
    } else {
        let x = x - 1.0;
        let t = x + LANCZOS_G + 0.5;
        let mut a = LANCZOS_COEFFS[0];
        for (i, c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64;
            a += c / (x + offset);
        }
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
    }
}

impl Expr {
    /// Replaces symbols by expressions and re-normalizes.
    ///
    /// Symbols without a binding are left in place.
    ///
    /// # Errors
    ///
    /// Fails when the substitution makes a denominator vanish, hits a pole of
    /// Γ, or takes `log(0)`.
    pub fn subs(&self, values: &BTreeMap<String, Expr>) -> Result<Expr, AlgebraError> {
        if values.is_empty() {
            return Ok(self.clone());
        }
        let num = subs_poly(&self.num, values)?;
        let den = subs_poly(&self.den, values)?;
        num.checked_div(&den)
    }

    /// Evaluates numerically, or returns `None` if a symbol has no value.
    #[must_use]
    pub fn evaluate(&self, values: &BTreeMap<String, f64>) -> Option<f64> {
        Some(eval_poly(&self.num, values)? / eval_poly(&self.den, values)?)
    }

    /// Evaluates an expression without free symbols.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.evaluate(&BTreeMap::new())
    }
}

fn subs_poly(poly: &Poly, values: &BTreeMap<String, Expr>) -> Result<Expr, AlgebraError> {
    let mut acc = Expr::zero();
    for (m, c) in poly.terms() {
        let mut term = Expr::from(c.clone());
        for (atom, k) in m.iter() {
            term = term * subs_atom(atom, values)?.pow(k);
        }
        acc = acc + term;
    }
    Ok(acc)
}

fn subs_atom(atom: &Atom, values: &BTreeMap<String, Expr>) -> Result<Expr, AlgebraError> {
    Ok(match atom {
        Atom::Symbol(name) => values
            .get(name)
            .cloned()
            .unwrap_or_else(|| Expr::symbol(name.clone())),
        Atom::Pi => Expr::pi(),
        Atom::Gamma(arg) => Expr::gamma(&arg.subs(values)?)?,
        Atom::Exp(arg) => Expr::exp(&arg.subs(values)?),
        Atom::Log(arg) => Expr::log(&arg.subs(values)?)?,
        Atom::Root { base, degree } => base.subs(values)?.root(*degree)?,
    })
}

fn eval_poly(poly: &Poly, values: &BTreeMap<String, f64>) -> Option<f64> {
    let mut acc = 0.0;
    for (m, c) in poly.terms() {
        let mut term = c.to_f64();
        for (atom, k) in m.iter() {
            let exponent = i32::try_from(k).ok()?;
            term *= eval_atom(atom, values)?.powi(exponent);
        }
        acc += term;
    }
    Some(acc)
}

fn eval_atom(atom: &Atom, values: &BTreeMap<String, f64>) -> Option<f64> {
    Some(match atom {
        Atom::Symbol(name) => *values.get(name)?,
        Atom::Pi => PI,
        Atom::Gamma(arg) => gamma_f64(arg.evaluate(values)?),
        Atom::Exp(arg) => arg.evaluate(values)?.exp(),
        Atom::Log(arg) => arg.evaluate(values)?.ln(),
        Atom::Root { base, degree } => {
            let b = base.evaluate(values)?;
            let inv = 1.0 / f64::from(*degree);
            if b < 0.0 && degree % 2 == 1 {
                -(-b).powf(inv)
            } else {
                b.powf(inv)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polymoment_integers::Rational;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn test_gamma_f64() {
        assert!(close(gamma_f64(1.0), 1.0));
        assert!(close(gamma_f64(5.0), 24.0));
        assert!(close(gamma_f64(0.5), PI.sqrt()));
        assert!(close(gamma_f64(-0.5), -2.0 * PI.sqrt()));
    }

    #[test]
    fn test_subs_binds_symbols() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let e = &x * &x + &y;

        let mut values = BTreeMap::new();
        values.insert("x".to_string(), Expr::from(3i64));
        assert_eq!(e.subs(&values), Ok(Expr::from(9i64) + y.clone()));

        values.insert("y".to_string(), Expr::from(Rational::from_i64(1, 2)));
        assert_eq!(e.subs(&values), Ok(Expr::from(Rational::from_i64(19, 2))));
    }

    #[test]
    fn test_subs_resimplifies_functions() {
        let b = Expr::symbol("b");
        let g = Expr::gamma(&(&b + &Expr::one())).unwrap();
        let mut values = BTreeMap::new();
        values.insert("b".to_string(), Expr::from(3i64));
        assert_eq!(g.subs(&values), Ok(Expr::from(6i64)));

        values.insert("b".to_string(), Expr::from(-1i64));
        assert!(matches!(g.subs(&values), Err(AlgebraError::GammaPole { .. })));
    }

    #[test]
    fn test_subs_zero_denominator() {
        let x = Expr::symbol("x");
        let e = x.recip().unwrap();
        let mut values = BTreeMap::new();
        values.insert("x".to_string(), Expr::zero());
        assert_eq!(e.subs(&values), Err(AlgebraError::DivisionByZero));
    }

    #[test]
    fn test_evaluate() {
        let s = Expr::symbol("s");
        let e = (s.pow(2) * Expr::from(Rational::from_i64(1, 12))).sqrt();
        let mut values = BTreeMap::new();
        values.insert("s".to_string(), 2.0);
        assert!(close(e.evaluate(&values).unwrap(), 2.0 / 12f64.sqrt()));
        assert_eq!(s.to_f64(), None);
        assert!(close(Expr::pi().sqrt().to_f64().unwrap(), PI.sqrt()));
    }
}
