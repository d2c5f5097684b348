//! Distribution families and symmetry classes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A parametric family with a closed-form raw-moment entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Uniform on `[t - s, t + s]` (symmetric) or `[t, t + s]` (one-sided).
    Uniform,
    /// `exp(N(t, s^2))`.
    Lognormal,
    /// Trapezoidal with plateau ratio `beta1`.
    Trapezoidal,
    /// Triangular.
    Triangular,
    /// Beta with shapes `beta1`, `beta2`.
    Beta,
    /// Normal.
    Normal,
    /// Student's t with `beta1` degrees of freedom.
    Student,
    /// Laplace.
    Laplace,
    /// Gamma with shape `beta1`.
    Gamma,
    /// Weibull with shape `beta1`.
    Weibull,
    /// Rayleigh.
    Rayleigh,
    /// Maxwell.
    Maxwell,
}

impl Family {
    /// Every family, in catalogue order.
    pub const ALL: [Family; 12] = [
        Family::Uniform,
        Family::Lognormal,
        Family::Trapezoidal,
        Family::Triangular,
        Family::Beta,
        Family::Normal,
        Family::Student,
        Family::Laplace,
        Family::Gamma,
        Family::Weibull,
        Family::Rayleigh,
        Family::Maxwell,
    ];

    /// The canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Family::Uniform => "uniform",
            Family::Lognormal => "lognormal",
            Family::Trapezoidal => "trapezoidal",
            Family::Triangular => "triangular",
            Family::Beta => "beta",
            Family::Normal => "normal",
            Family::Student => "student",
            Family::Laplace => "laplace",
            Family::Gamma => "gamma",
            Family::Weibull => "weibull",
            Family::Rayleigh => "rayleigh",
            Family::Maxwell => "maxwell",
        }
    }

    /// Shape parameters that must be present.
    #[must_use]
    pub fn required_parameters(self) -> &'static [&'static str] {
        match self {
            Family::Trapezoidal | Family::Student | Family::Gamma | Family::Weibull => &["beta1"],
            Family::Beta => &["beta1", "beta2"],
            _ => &[],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = ValidationError;

    /// Case-insensitive; the three-letter abbreviations are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let family = match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "uni" => Family::Uniform,
            "lognormal" | "logn" => Family::Lognormal,
            "trapezoidal" | "tra" => Family::Trapezoidal,
            "triangular" | "tri" => Family::Triangular,
            "beta" | "bet" => Family::Beta,
            "normal" | "nor" => Family::Normal,
            "student" | "stu" => Family::Student,
            "laplace" | "lap" => Family::Laplace,
            "gamma" | "gam" => Family::Gamma,
            "weibull" | "wei" => Family::Weibull,
            "rayleigh" | "ray" => Family::Rayleigh,
            "maxwell" | "max" => Family::Maxwell,
            _ => {
                return Err(ValidationError::UnsupportedFamily {
                    value: s.to_string(),
                })
            }
        };
        Ok(family)
    }
}

/// How the standardized density sits relative to the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symmetry {
    /// Symmetric about the origin.
    Symmetrical,
    /// Supported on the non-negative half-line.
    OneSidedRight,
    /// Supported on the non-positive half-line.
    OneSidedLeft,
}

impl Symmetry {
    /// The canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Symmetry::Symmetrical => "symmetrical",
            Symmetry::OneSidedRight => "one_sided_right",
            Symmetry::OneSidedLeft => "one_sided_left",
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symmetry {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symmetrical" => Ok(Symmetry::Symmetrical),
            "one_sided_right" => Ok(Symmetry::OneSidedRight),
            "one_sided_left" => Ok(Symmetry::OneSidedLeft),
            _ => Err(ValidationError::UnsupportedSymmetry {
                value: s.to_string(),
            }),
        }
    }
}
