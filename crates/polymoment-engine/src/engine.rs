//! The moment engine.
//!
//! A [`MomentEngine`] binds a polynomial to the distributions of its
//! variables and computes `E[P^order]` by expanding `P^order` and replacing
//! every monomial by the product of single-variable expectations, which
//! independence makes exact.
//!
//! An engine is created per request and discarded afterwards: its caches are
//! only valid for the distributions it was built with.

use std::collections::BTreeMap;

use polymoment_core::Expr;
use polymoment_dist::{expectation, DistributionSpec, ValidationError};
use polymoment_integers::Rational;
use polymoment_model::{ParseError, Polynomial};
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, MomentCache};
use crate::config::EngineConfig;
use crate::error::MomentError;

/// Computes moments and derived statistics of one polynomial.
#[derive(Clone, Debug)]
pub struct MomentEngine {
    /// The polynomial `P`.
    polynomial: Polynomial,
    /// Distribution of every variable of `P`.
    distributions: BTreeMap<String, DistributionSpec>,
    /// Resource limits.
    config: EngineConfig,
    /// Single-variable expectations.
    cache: MomentCache,
    /// Raw moments of `P` computed so far.
    moments: BTreeMap<u32, Expr>,
}

impl MomentEngine {
    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDistribution`] if a variable of the
    /// polynomial has no distribution.
    pub fn new(
        polynomial: Polynomial,
        distributions: BTreeMap<String, DistributionSpec>,
    ) -> Result<Self, MomentError> {
        Self::with_config(polynomial, distributions, EngineConfig::default())
    }

    /// Creates an engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDistribution`] if a variable of the
    /// polynomial has no distribution.
    pub fn with_config(
        polynomial: Polynomial,
        distributions: BTreeMap<String, DistributionSpec>,
        config: EngineConfig,
    ) -> Result<Self, MomentError> {
        if let Some(missing) = polynomial
            .variables()
            .into_iter()
            .find(|v| !distributions.contains_key(*v))
        {
            return Err(ValidationError::MissingDistribution {
                variable: missing.to_string(),
            }
            .into());
        }
        Ok(Self {
            polynomial,
            distributions,
            config,
            cache: MomentCache::new(),
            moments: BTreeMap::new(),
        })
    }

    /// Parses `source` over the variables that have a distribution.
    ///
    /// An identifier without a distribution is reported as
    /// [`ValidationError::MissingDistribution`].
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed input.
    pub fn from_source(
        source: &str,
        distributions: BTreeMap<String, DistributionSpec>,
        config: EngineConfig,
    ) -> Result<Self, MomentError> {
        let polynomial = Polynomial::parse(source, distributions.keys()).map_err(|e| match e {
            ParseError::UndeclaredVariable { name } => {
                MomentError::from(ValidationError::MissingDistribution { variable: name })
            }
            other => MomentError::from(other),
        })?;
        Self::with_config(polynomial, distributions, config)
    }

    /// The polynomial.
    #[must_use]
    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Hit and miss counters of the expectation cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of distinct single-variable expectations evaluated.
    #[must_use]
    pub fn cached_expectations(&self) -> usize {
        self.cache.len()
    }

    /// Computes the raw moment `E[P^order]`. `moment(0)` is always `1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the order or the expansion exceeds the configured
    /// limits, or if a single-variable expectation cannot be evaluated.
    pub fn moment(&mut self, order: u32) -> Result<Expr, MomentError> {
        if order == 0 {
            return Ok(Expr::one());
        }
        if order > self.config.max_order {
            return Err(MomentError::OrderLimitExceeded {
                order,
                limit: self.config.max_order,
            });
        }
        if let Some(value) = self.moments.get(&order) {
            return Ok(value.clone());
        }

        let limit = self.config.max_expanded_terms;
        let expanded = self
            .polynomial
            .checked_pow(order, limit)
            .ok_or(MomentError::ExpansionBudgetExceeded { limit })?;
        debug!(order, terms = expanded.len(), "expanded polynomial");

        let mut total = Expr::zero();
        for term in expanded.terms() {
            let mut value = Expr::from(term.coeff().clone());
            for (variable, power) in expanded.variable_powers(term) {
                let factor = self.expectation(variable, &power)?;
                value = value * factor;
                if value.is_zero() {
                    break;
                }
            }
            total = total + value;
        }

        debug!(order, moment = %total, "computed moment");
        self.moments.insert(order, total.clone());
        Ok(total)
    }

    /// Like [`MomentEngine::moment`] for an order given as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`MomentError::InvalidOrder`] for negative orders.
    pub fn moment_signed(&mut self, order: i64) -> Result<Expr, MomentError> {
        let order = u32::try_from(order).map_err(|_| MomentError::InvalidOrder {
            order: order.to_string(),
        })?;
        self.moment(order)
    }

    /// `E[P]`.
    ///
    /// # Errors
    ///
    /// See [`MomentEngine::moment`].
    pub fn mean(&mut self) -> Result<Expr, MomentError> {
        self.moment(1)
    }

    /// `E[P^2] - E[P]^2`.
    ///
    /// # Errors
    ///
    /// See [`MomentEngine::moment`].
    pub fn variance(&mut self) -> Result<Expr, MomentError> {
        let m1 = self.moment(1)?;
        let m2 = self.moment(2)?;
        Ok(m2 - m1.pow(2))
    }

    /// Principal square root of the variance.
    ///
    /// # Errors
    ///
    /// See [`MomentEngine::moment`].
    pub fn std(&mut self) -> Result<Expr, MomentError> {
        Ok(self.variance()?.sqrt())
    }

    /// `(E[P^3] - 3 mean var - mean^3) / var^(3/2)`.
    ///
    /// # Errors
    ///
    /// Returns [`MomentError::Algebra`] when the variance is zero.
    pub fn skewness(&mut self) -> Result<Expr, MomentError> {
        let mean = self.mean()?;
        let variance = self.variance()?;
        let m3 = self.moment(3)?;
        let central = m3 - (&mean * &variance).scale(&Rational::from(3i64)) - mean.pow(3);
        let spread = variance.pow_rational(&Rational::from_i64(3, 2))?;
        let skewness = central.checked_div(&spread)?;
        debug!(%skewness, "computed skewness");
        Ok(skewness)
    }

    /// Non-excess kurtosis `E[(P - mean)^4] / var^2`, equal to 3 for a
    /// Gaussian.
    ///
    /// # Errors
    ///
    /// Returns [`MomentError::Algebra`] when the variance is zero.
    pub fn kurtosis(&mut self) -> Result<Expr, MomentError> {
        let m1 = self.moment(1)?;
        let m2 = self.moment(2)?;
        let m3 = self.moment(3)?;
        let m4 = self.moment(4)?;
        let c = |n: i64| Rational::from(n);
        let central = m1.pow(4).scale(&c(-3))
            + (m1.pow(2) * &m2).scale(&c(6))
            + (&m1 * &m3).scale(&c(-4))
            + m4;
        let variance = m2 - m1.pow(2);
        let kurtosis = central.checked_div(&variance.pow(2))?;
        debug!(%kurtosis, "computed kurtosis");
        Ok(kurtosis)
    }

    fn expectation(&mut self, variable: &str, power: &Rational) -> Result<Expr, MomentError> {
        let spec = self.distributions.get(variable).ok_or_else(|| {
            ValidationError::MissingDistribution {
                variable: variable.to_string(),
            }
        })?;
        let key = CacheKey::new(variable, power, spec);
        let value = self
            .cache
            .get_or_try_insert_with(key, || expectation(variable, spec, power))?;
        Ok(value)
    }
}
