//! Memoized single-variable expectations.
//!
//! A [`MomentCache`] belongs to exactly one engine. Keys carry the full
//! distribution specification, so two variables sharing a name under
//! different distributions can never alias.

use polymoment_core::Expr;
use polymoment_dist::DistributionSpec;
use polymoment_integers::Rational;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Identity of a cached expectation `E[variable^power]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    variable: String,
    power: Rational,
    spec: DistributionSpec,
}

impl CacheKey {
    /// Creates a key.
    #[must_use]
    pub fn new(variable: &str, power: &Rational, spec: &DistributionSpec) -> Self {
        Self {
            variable: variable.to_string(),
            power: power.clone(),
            spec: spec.clone(),
        }
    }
}

/// Hit and miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that evaluated the expectation.
    pub misses: usize,
}

/// Cache of `E[variable^power]` for the lifetime of one engine.
#[derive(Clone, Debug, Default)]
pub struct MomentCache {
    entries: FxHashMap<CacheKey, Expr>,
    stats: CacheStats,
}

impl MomentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value, or evaluates and stores it.
    ///
    /// Failed evaluations are not cached.
    ///
    /// # Errors
    ///
    /// Propagates the error of `evaluate`.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: CacheKey, evaluate: F) -> Result<Expr, E>
    where
        F: FnOnce() -> Result<Expr, E>,
    {
        if let Some(value) = self.entries.get(&key) {
            self.stats.hits += 1;
            trace!(variable = %key.variable, power = %key.power, "moment cache hit");
            return Ok(value.clone());
        }
        self.stats.misses += 1;
        trace!(variable = %key.variable, power = %key.power, "moment cache miss");
        let value = evaluate()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Number of cached expectations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit and miss counters since creation.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polymoment_dist::{Family, Param, Symmetry};

    fn spec(scale: &str) -> DistributionSpec {
        DistributionSpec::new(
            Family::Normal,
            Symmetry::Symmetrical,
            Param::from(0i64),
            Param::symbol(scale),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_hit_after_miss() {
        let mut cache = MomentCache::new();
        let two = Rational::from(2i64);
        let key = CacheKey::new("x", &two, &spec("s"));
        let first: Result<Expr, ()> = cache.get_or_try_insert_with(key.clone(), || Ok(Expr::symbol("a")));
        let second: Result<Expr, ()> = cache.get_or_try_insert_with(key, || Ok(Expr::symbol("b")));
        assert_eq!(first.unwrap(), Expr::symbol("a"));
        assert_eq!(second.unwrap(), Expr::symbol("a"));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_same_name_different_spec() {
        let mut cache = MomentCache::new();
        let two = Rational::from(2i64);
        let a: Result<Expr, ()> =
            cache.get_or_try_insert_with(CacheKey::new("x", &two, &spec("s")), || Ok(Expr::symbol("a")));
        let b: Result<Expr, ()> =
            cache.get_or_try_insert_with(CacheKey::new("x", &two, &spec("t")), || Ok(Expr::symbol("b")));
        assert_ne!(a.unwrap(), b.unwrap());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = MomentCache::new();
        let key = CacheKey::new("x", &Rational::from(1i64), &spec("s"));
        assert!(cache.get_or_try_insert_with(key.clone(), || Err("boom")).is_err());
        assert!(cache.is_empty());
        assert!(cache.get_or_try_insert_with::<&str, _>(key, || Ok(Expr::one())).is_ok());
        assert_eq!(cache.len(), 1);
    }
}
