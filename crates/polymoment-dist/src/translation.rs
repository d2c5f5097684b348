//! Moments of location-shifted variables.
//!
//! A variable is `V = t + X` with `X` standardized. Non-negative integer
//! powers expand binomially into raw moments of `X`; other powers only have a
//! closed form for the uniform and lognormal families, which are evaluated on
//! `V` directly.

use num_traits::Zero;
use polymoment_core::Expr;
use polymoment_integers::{binomial, Rational};
use tracing::trace;

use crate::error::EvaluationError;
use crate::family::Family;
use crate::spec::DistributionSpec;
use crate::symmetry;
use crate::table::{self, Shape};

/// Computes `E[V^power]` for a variable distributed as `spec`.
///
/// `E[V^0] = 1` for every family.
///
/// Lognormal variables take the closed form `exp(t p + p^2 s^2 / 2)` for
/// every power `p`, integer powers included. They never go through the
/// binomial expansion of the table moments, so their symmetry class has no
/// effect and `t` acts as the log-location rather than an additive shift.
///
/// # Errors
///
/// Returns [`EvaluationError::NonAnalyticMoment`] for a fractional or
/// negative power of a family without a direct closed form, and any error of
/// the underlying table entries.
pub fn expectation(
    variable: &str,
    spec: &DistributionSpec,
    power: &Rational,
) -> Result<Expr, EvaluationError> {
    if power.is_zero() {
        return Ok(Expr::one());
    }
    trace!(variable, %power, family = %spec.family(), "evaluating expectation");
    match (spec.family(), power.to_u32()) {
        (Family::Lognormal, _) => Ok(lognormal(spec, power)),
        (_, Some(m)) => binomial_expansion(variable, spec, m),
        (Family::Uniform, None) => uniform(spec, power),
        (_, None) => Err(EvaluationError::NonAnalyticMoment {
            variable: variable.to_string(),
            power: power.to_string(),
        }),
    }
}

/// `sum_k C(m, k) t^(m-k) E[X^k]`.
fn binomial_expansion(
    variable: &str,
    spec: &DistributionSpec,
    m: u32,
) -> Result<Expr, EvaluationError> {
    let shape = Shape::from_spec(variable, spec);
    let raw = table::strategy(spec.family());
    let t = spec.translation().to_expr();

    // Only the k = m term survives without a shift
    let first = if spec.translation().is_zero() { m } else { 0 };
    let mut total = Expr::zero();
    for k in first..=m {
        let moment = symmetry::adjust(spec.symmetry(), k, || raw(k, &shape))?;
        if moment.is_zero() {
            continue;
        }
        let coefficient = Rational::from(binomial(m, k));
        total = total + t.pow(m - k).scale(&coefficient) * moment;
    }
    Ok(total)
}

/// `exp(t m + m^2 s^2 / 2)`.
fn lognormal(spec: &DistributionSpec, power: &Rational) -> Expr {
    let t = spec.translation().to_expr();
    let s = spec.scale().to_expr();
    let half_square = power * power * Rational::from_i64(1, 2);
    Expr::exp(&(t.scale(power) + s.pow(2).scale(&half_square)))
}

/// Direct moment of the uniform density on `[t - s, t + s]`.
fn uniform(spec: &DistributionSpec, power: &Rational) -> Result<Expr, EvaluationError> {
    let t = spec.translation().to_expr();
    let s = spec.scale().to_expr();
    let upper = &t + &s;
    let lower = &t - &s;
    let two_s = s.scale(&Rational::from(2i64));

    if *power == Rational::from(-1i64) {
        let log = Expr::log(&upper.checked_div(&lower)?)?;
        return Ok(log.checked_div(&two_s)?);
    }
    let next = power + &Rational::from(1i64);
    let difference = upper.pow_rational(&next)? - lower.pow_rational(&next)?;
    Ok(difference.checked_div(&two_s.scale(&next))?)
}
