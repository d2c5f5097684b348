//! Named statistics a caller can request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A statistic of the polynomial's distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Statistic {
    /// The raw moment `E[P^order]`; needs an explicit order.
    Moment,
    /// `E[P]`.
    Mean,
    /// `E[P^2] - E[P]^2`.
    Variance,
    /// Principal square root of the variance.
    Std,
    /// Third standardized central moment.
    Skewness,
    /// Fourth standardized central moment (non-excess, 3 for a Gaussian).
    Kurtosis,
}

impl Statistic {
    /// The short name used on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Statistic::Moment => "moment",
            Statistic::Mean => "mean",
            Statistic::Variance => "var",
            Statistic::Std => "std",
            Statistic::Skewness => "skew",
            Statistic::Kurtosis => "kurt",
        }
    }
}

/// Error returned for an unknown statistic name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown statistic `{0}`")]
pub struct UnknownStatistic(pub String);

impl FromStr for Statistic {
    type Err = UnknownStatistic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moment" => Ok(Statistic::Moment),
            "mean" => Ok(Statistic::Mean),
            "var" | "variance" => Ok(Statistic::Variance),
            "std" | "stddev" | "standard_deviation" => Ok(Statistic::Std),
            "skew" | "skewness" => Ok(Statistic::Skewness),
            "kurt" | "kurtosis" => Ok(Statistic::Kurtosis),
            _ => Err(UnknownStatistic(s.to_string())),
        }
    }
}

impl TryFrom<String> for Statistic {
    type Error = UnknownStatistic;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Statistic> for String {
    fn from(statistic: Statistic) -> Self {
        statistic.name().to_string()
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
