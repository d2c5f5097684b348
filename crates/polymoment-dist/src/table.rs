//! Raw moments `E[X^m]` of the standardized (zero-location) families.
//!
//! Each family resolves to a pure function through [`strategy`]. The entries
//! assume a half-support normalization: [`crate::symmetry::adjust`] doubles
//! them (or zeroes odd powers) according to the symmetry class.
//!
//! | family | `E[X^m]` |
//! |---|---|
//! | uniform | `s^m / (2(m+1))` |
//! | lognormal | `exp(m^2 s^2 / 2)` |
//! | trapezoidal | `s^m / ((m+1)(m+2)) * (1 - b1^(m+2)) / (1 - b1^2)` |
//! | triangular | `s^m / ((m+1)(m+2))` |
//! | beta | `s^m / 2 * prod_{k<m} (b1+k)/(b1+b2+k)` |
//! | normal | even: `s^m (m-1)!! / 2`, odd: `s^m 2^(m/2-1) ((m-1)/2)! / sqrt(pi)` |
//! | student | `s^m b1^(m/2) Γ((m+1)/2) Γ((b1-m)/2) / (2 sqrt(pi) Γ(b1/2))` |
//! | laplace | `s^m m! / 2` |
//! | gamma | `s^m / 2 * prod_{k<m} (b1+k)` |
//! | weibull | `s^m Γ(m/b1 + 1) / 2` |
//! | rayleigh | `s^m 2^(m/2-1) Γ((2+m)/2)` |
//! | maxwell | even: `s^m (m+1)!!`, odd: `s^m 2^(m/2+1) / sqrt(pi) ((m+1)/2)!` |

use polymoment_core::{AlgebraError, Expr};
use polymoment_integers::{double_factorial, factorial, Rational};

use crate::error::{EvaluationError, ValidationError};
use crate::family::Family;
use crate::param::Param;
use crate::spec::DistributionSpec;

/// Signature shared by every table entry.
pub type RawMomentFn = fn(u32, &Shape<'_>) -> Result<Expr, EvaluationError>;

/// Scale and shape parameters of one variable, as expressions.
#[derive(Clone, Debug)]
pub struct Shape<'a> {
    variable: &'a str,
    family: Family,
    scale: Expr,
    beta1: Option<Expr>,
    beta2: Option<Expr>,
}

impl<'a> Shape<'a> {
    /// Creates a shape with only a scale parameter.
    #[must_use]
    pub fn new(variable: &'a str, family: Family, scale: Expr) -> Self {
        Self {
            variable,
            family,
            scale,
            beta1: None,
            beta2: None,
        }
    }

    /// Extracts the parameters of a distribution.
    #[must_use]
    pub fn from_spec(variable: &'a str, spec: &DistributionSpec) -> Self {
        Self {
            variable,
            family: spec.family(),
            scale: spec.scale().to_expr(),
            beta1: spec.beta1().map(Param::to_expr),
            beta2: spec.beta2().map(Param::to_expr),
        }
    }

    /// Sets the first shape parameter.
    #[must_use]
    pub fn with_beta1(mut self, beta1: Expr) -> Self {
        self.beta1 = Some(beta1);
        self
    }

    /// Sets the second shape parameter.
    #[must_use]
    pub fn with_beta2(mut self, beta2: Expr) -> Self {
        self.beta2 = Some(beta2);
        self
    }

    /// The variable the moments belong to.
    #[must_use]
    pub fn variable(&self) -> &str {
        self.variable
    }

    /// The scale.
    #[must_use]
    pub fn scale(&self) -> &Expr {
        &self.scale
    }

    fn beta1(&self) -> Result<&Expr, EvaluationError> {
        self.beta1.as_ref().ok_or_else(|| self.missing("beta1"))
    }

    fn beta2(&self) -> Result<&Expr, EvaluationError> {
        self.beta2.as_ref().ok_or_else(|| self.missing("beta2"))
    }

    fn missing(&self, parameter: &'static str) -> EvaluationError {
        ValidationError::MissingShapeParameter {
            family: self.family,
            parameter,
        }
        .into()
    }
}

/// Returns the table entry of a family.
#[must_use]
pub fn strategy(family: Family) -> RawMomentFn {
    match family {
        Family::Uniform => uniform,
        Family::Lognormal => lognormal,
        Family::Trapezoidal => trapezoidal,
        Family::Triangular => triangular,
        Family::Beta => beta,
        Family::Normal => normal,
        Family::Student => student,
        Family::Laplace => laplace,
        Family::Gamma => gamma,
        Family::Weibull => weibull,
        Family::Rayleigh => rayleigh,
        Family::Maxwell => maxwell,
    }
}

/// Computes `E[X^m]` for the standardized member of `family`.
///
/// # Errors
///
/// Returns [`EvaluationError::DivergentMoment`] when the moment does not
/// exist, a validation error when a required shape parameter is absent, and
/// an algebra error for zero denominators.
pub fn raw_moment(family: Family, m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    strategy(family)(m, shape)
}

fn ratio(numerator: i64, denominator: i64) -> Rational {
    Rational::from_i64(numerator, denominator)
}

/// `m / 2 + offset`.
fn half(m: u32, offset: i64) -> Rational {
    ratio(i64::from(m), 2) + Rational::from(offset)
}

fn power_of_two(exponent: &Rational) -> Result<Expr, AlgebraError> {
    Expr::from(2i64).pow_rational(exponent)
}

fn sqrt_pi() -> Expr {
    Expr::pi().sqrt()
}

/// `(m + 1)(m + 2) = m^2 + 3m + 2`.
fn quadratic(m: u32) -> i64 {
    let m = i64::from(m);
    (m + 1) * (m + 2)
}

fn uniform(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    Ok(shape.scale.pow(m).scale(&ratio(1, 2 * (i64::from(m) + 1))))
}

fn lognormal(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let m = i64::from(m);
    Ok(Expr::exp(&shape.scale.pow(2).scale(&ratio(m * m, 2))))
}

fn trapezoidal(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let b = shape.beta1()?;
    let one = Expr::one();
    let plateau = (&one - &b.pow(m + 2)).checked_div(&(&one - &b.pow(2)))?;
    Ok(shape.scale.pow(m).scale(&ratio(1, quadratic(m))) * plateau)
}

fn triangular(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    Ok(shape.scale.pow(m).scale(&ratio(1, quadratic(m))))
}

fn beta(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let (a, b) = (shape.beta1()?, shape.beta2()?);
    let total = a + b;
    let mut numerator = Expr::one();
    let mut denominator = Expr::one();
    for k in 0..m {
        let k = Expr::from(k);
        numerator = numerator * (a + &k);
        denominator = denominator * (&total + &k);
    }
    let product = numerator.checked_div(&denominator)?;
    Ok(shape.scale.pow(m).scale(&ratio(1, 2)) * product)
}

fn normal(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let sm = shape.scale.pow(m);
    if m % 2 == 0 {
        let df = double_factorial(i64::from(m) - 1);
        return Ok(sm.scale(&(Rational::from(df) * ratio(1, 2))));
    }
    let coefficient = power_of_two(&half(m, -1))? * Expr::from(factorial((m - 1) / 2));
    Ok((sm * coefficient).checked_div(&sqrt_pi())?)
}

fn student(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let nu = shape.beta1()?;
    if let Some(nu) = nu.as_rational() {
        if Rational::from(m) >= nu {
            return Err(EvaluationError::DivergentMoment {
                variable: shape.variable.to_string(),
                power: m.to_string(),
            });
        }
    }
    let numerator = shape.scale.pow(m)
        * nu.pow_rational(&half(m, 0))?
        * Expr::gamma(&Expr::from(half(m + 1, 0)))?
        * Expr::gamma(&(nu - &Expr::from(m)).scale(&ratio(1, 2)))?;
    let denominator = sqrt_pi().scale(&Rational::from(2i64)) * Expr::gamma(&nu.scale(&ratio(1, 2)))?;
    Ok(numerator.checked_div(&denominator)?)
}

fn laplace(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let coefficient = Rational::from(factorial(m)) * ratio(1, 2);
    Ok(shape.scale.pow(m).scale(&coefficient))
}

fn gamma(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let k = shape.beta1()?;
    let rising = (0..m).fold(Expr::one(), |acc, i| acc * (k + &Expr::from(i)));
    Ok(shape.scale.pow(m).scale(&ratio(1, 2)) * rising)
}

fn weibull(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let k = shape.beta1()?;
    let argument = Expr::from(m).checked_div(k)? + Expr::one();
    Ok(shape.scale.pow(m).scale(&ratio(1, 2)) * Expr::gamma(&argument)?)
}

fn rayleigh(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let coefficient = power_of_two(&half(m, -1))? * Expr::gamma(&Expr::from(half(m, 1)))?;
    Ok(shape.scale.pow(m) * coefficient)
}

fn maxwell(m: u32, shape: &Shape<'_>) -> Result<Expr, EvaluationError> {
    let sm = shape.scale.pow(m);
    if m % 2 == 0 {
        return Ok(sm * Expr::from(double_factorial(i64::from(m) + 1)));
    }
    let coefficient = power_of_two(&half(m, 1))? * Expr::from(factorial((m + 1) / 2));
    Ok((sm * coefficient).checked_div(&sqrt_pi())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn s() -> Expr {
        Expr::symbol("s")
    }

    fn shape(family: Family) -> Shape<'static> {
        Shape::new("x", family, s())
    }

    fn close(value: &Expr, scale: f64, expected: f64) {
        let values = BTreeMap::from([("s".to_string(), scale)]);
        let got = value.evaluate(&values).unwrap();
        assert!((got - expected).abs() < 1e-10, "{value}: {got} != {expected}");
    }

    #[test]
    fn test_zeroth_entries() {
        // Half of the total mass for every half-support entry
        let half = Expr::from(ratio(1, 2));
        for family in [Family::Uniform, Family::Normal, Family::Laplace, Family::Rayleigh] {
            assert_eq!(raw_moment(family, 0, &shape(family)).unwrap(), half, "{family}");
        }
        let g = shape(Family::Gamma).with_beta1(Expr::symbol("k"));
        assert_eq!(raw_moment(Family::Gamma, 0, &g).unwrap(), half);
        assert_eq!(raw_moment(Family::Lognormal, 0, &shape(Family::Lognormal)).unwrap(), Expr::one());
    }

    #[test]
    fn test_uniform_and_triangular() {
        assert_eq!(
            raw_moment(Family::Uniform, 2, &shape(Family::Uniform)).unwrap(),
            s().pow(2).scale(&ratio(1, 6))
        );
        assert_eq!(
            raw_moment(Family::Triangular, 2, &shape(Family::Triangular)).unwrap(),
            s().pow(2).scale(&ratio(1, 12))
        );
    }

    #[test]
    fn test_normal_even_and_odd() {
        assert_eq!(
            raw_moment(Family::Normal, 4, &shape(Family::Normal)).unwrap(),
            s().pow(4).scale(&ratio(3, 2))
        );
        // Half of the half-normal mean s*sqrt(2/pi)
        let odd = raw_moment(Family::Normal, 1, &shape(Family::Normal)).unwrap();
        close(&odd, 1.0, (2.0 / std::f64::consts::PI).sqrt() / 2.0);
        let odd = raw_moment(Family::Normal, 3, &shape(Family::Normal)).unwrap();
        close(&odd, 2.0, 8.0 * 2.0 * (2.0 / std::f64::consts::PI).sqrt() / 2.0);
    }

    #[test]
    fn test_student_finite_and_divergent() {
        let t = shape(Family::Student).with_beta1(Expr::from(5i64));
        assert_eq!(
            raw_moment(Family::Student, 2, &t).unwrap(),
            s().pow(2).scale(&ratio(5, 6))
        );
        assert_eq!(
            raw_moment(Family::Student, 5, &t),
            Err(EvaluationError::DivergentMoment {
                variable: "x".to_string(),
                power: "5".to_string()
            })
        );
    }

    #[test]
    fn test_gamma_rising_factorial() {
        let g = shape(Family::Gamma).with_beta1(Expr::symbol("k"));
        let k = Expr::symbol("k");
        let expected = s().pow(2).scale(&ratio(1, 2)) * (&k * &(&k + &Expr::one()));
        assert_eq!(raw_moment(Family::Gamma, 2, &g).unwrap(), expected);
    }

    #[test]
    fn test_beta_and_weibull_numeric() {
        let b = shape(Family::Beta)
            .with_beta1(Expr::from(2i64))
            .with_beta2(Expr::from(3i64));
        // E[X] = a/(a+b) = 2/5, halved
        assert_eq!(
            raw_moment(Family::Beta, 1, &b).unwrap(),
            s().scale(&ratio(1, 5))
        );

        let w = shape(Family::Weibull).with_beta1(Expr::from(2i64));
        // Γ(2) = 1
        assert_eq!(
            raw_moment(Family::Weibull, 2, &w).unwrap(),
            s().pow(2).scale(&ratio(1, 2))
        );
        let w = shape(Family::Weibull).with_beta1(Expr::symbol("k"));
        assert_eq!(
            raw_moment(Family::Weibull, 1, &w).unwrap().to_string(),
            "s*gamma(1 + 1/k)/2"
        );
    }

    #[test]
    fn test_rayleigh_and_maxwell() {
        // Rayleigh mean s*sqrt(pi/2), halved
        let r = raw_moment(Family::Rayleigh, 1, &shape(Family::Rayleigh)).unwrap();
        close(&r, 1.0, (std::f64::consts::PI / 2.0).sqrt() / 2.0);
        assert_eq!(
            raw_moment(Family::Maxwell, 2, &shape(Family::Maxwell)).unwrap(),
            s().pow(2).scale(&Rational::from(3i64))
        );
        let m = raw_moment(Family::Maxwell, 1, &shape(Family::Maxwell)).unwrap();
        close(&m, 1.0, 2.0 * 2f64.sqrt() / std::f64::consts::PI.sqrt());
    }

    #[test]
    fn test_trapezoidal() {
        let t = shape(Family::Trapezoidal).with_beta1(Expr::from(ratio(1, 2)));
        // (1 - 1/16) / (1 - 1/4) = 5/4, over 12
        assert_eq!(
            raw_moment(Family::Trapezoidal, 2, &t).unwrap(),
            s().pow(2).scale(&ratio(5, 48))
        );
        let unit = shape(Family::Trapezoidal).with_beta1(Expr::one());
        assert_eq!(
            raw_moment(Family::Trapezoidal, 2, &unit),
            Err(EvaluationError::Algebra(AlgebraError::DivisionByZero))
        );
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(
            raw_moment(Family::Gamma, 1, &shape(Family::Gamma)),
            Err(EvaluationError::Validation(ValidationError::MissingShapeParameter {
                family: Family::Gamma,
                parameter: "beta1"
            }))
        );
    }
}
