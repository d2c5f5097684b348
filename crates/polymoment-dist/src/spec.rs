//! Validated distribution specifications.
//!
//! A [`DistributionSpec`] is the only way a marginal distribution enters the
//! engine; once constructed it is known to name a supported family and
//! symmetry and to carry every shape parameter its family needs.
//!
//! The serde form mirrors the JSON accepted from callers:
//!
//! ```json
//! {"distribution": "gamma", "type": "one_sided_right",
//!  "translation": "m0", "scale": 0.5, "beta1": "b0"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::family::{Family, Symmetry};
use crate::param::Param;

/// A marginal distribution: family, symmetry class and parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDistributionSpec", into = "RawDistributionSpec")]
pub struct DistributionSpec {
    family: Family,
    symmetry: Symmetry,
    translation: Param,
    scale: Param,
    beta1: Option<Param>,
    beta2: Option<Param>,
}

impl DistributionSpec {
    /// Creates a specification, checking the family's shape parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingShapeParameter`] when `beta1` or
    /// `beta2` is required by the family but absent.
    pub fn new(
        family: Family,
        symmetry: Symmetry,
        translation: Param,
        scale: Param,
        beta1: Option<Param>,
        beta2: Option<Param>,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            family,
            symmetry,
            translation,
            scale,
            beta1,
            beta2,
        };
        for &parameter in family.required_parameters() {
            if spec.parameter(parameter).is_none() {
                return Err(ValidationError::MissingShapeParameter { family, parameter });
            }
        }
        Ok(spec)
    }

    /// The family.
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// The symmetry class.
    #[must_use]
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// The location shift `t` in `V = t + X`.
    #[must_use]
    pub fn translation(&self) -> &Param {
        &self.translation
    }

    /// The scale.
    #[must_use]
    pub fn scale(&self) -> &Param {
        &self.scale
    }

    /// The first shape parameter.
    #[must_use]
    pub fn beta1(&self) -> Option<&Param> {
        self.beta1.as_ref()
    }

    /// The second shape parameter.
    #[must_use]
    pub fn beta2(&self) -> Option<&Param> {
        self.beta2.as_ref()
    }

    fn parameter(&self, name: &str) -> Option<&Param> {
        match name {
            "beta1" => self.beta1(),
            "beta2" => self.beta2(),
            _ => None,
        }
    }
}

/// A parameter as written in JSON: a string or a bare number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    /// A number or symbol name written as a string.
    Text(String),
    /// A JSON number.
    Number(serde_json::Number),
}

impl RawParam {
    fn into_param(self, field: &'static str) -> Result<Param, ValidationError> {
        let text = match self {
            RawParam::Text(text) => text,
            RawParam::Number(number) => number.to_string(),
        };
        text.parse()
            .map_err(|_| ValidationError::InvalidParameter { field, value: text })
    }
}

/// The unvalidated wire form of a [`DistributionSpec`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDistributionSpec {
    /// Family name, case-insensitive.
    pub distribution: String,
    /// Symmetry class, case-insensitive.
    #[serde(rename = "type")]
    pub symmetry: String,
    /// Location shift.
    pub translation: RawParam,
    /// Scale.
    pub scale: RawParam,
    /// First shape parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta1: Option<RawParam>,
    /// Second shape parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta2: Option<RawParam>,
}

impl TryFrom<RawDistributionSpec> for DistributionSpec {
    type Error = ValidationError;

    fn try_from(raw: RawDistributionSpec) -> Result<Self, Self::Error> {
        DistributionSpec::new(
            raw.distribution.parse()?,
            raw.symmetry.parse()?,
            raw.translation.into_param("translation")?,
            raw.scale.into_param("scale")?,
            raw.beta1.map(|p| p.into_param("beta1")).transpose()?,
            raw.beta2.map(|p| p.into_param("beta2")).transpose()?,
        )
    }
}

impl From<DistributionSpec> for RawDistributionSpec {
    fn from(spec: DistributionSpec) -> Self {
        let text = |p: Param| RawParam::Text(p.to_string());
        Self {
            distribution: spec.family.name().to_string(),
            symmetry: spec.symmetry.name().to_string(),
            translation: text(spec.translation),
            scale: text(spec.scale),
            beta1: spec.beta1.map(text),
            beta2: spec.beta2.map(text),
        }
    }
}
