//! Front-end configuration — initial field values and stepper sizes.
//!
//! Stored as TOML. Every key is optional; missing keys fall back to the
//! calculator defaults (all fields start at zero, male selected; weight and
//! volume step by 0.1, creatinine by 0.01).
//!
//! ```toml
//! [defaults]
//! body_weight_kg = 60.0
//! sex = "female"
//!
//! [steps]
//! creatinine_mg_dl = 0.05
//! ```
//!
//! The population covariates used by the sub-models are not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PredictionInput, Sex};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Values the form starts with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub body_weight_kg: f64,
    pub creatinine_mg_dl: f64,
    pub non_excised_kidney_volume_ml: f64,
    pub sex: Sex,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            body_weight_kg: 0.0,
            creatinine_mg_dl: 0.0,
            non_excised_kidney_volume_ml: 0.0,
            sex: Sex::Male,
        }
    }
}

impl FieldDefaults {
    pub fn to_input(&self) -> PredictionInput {
        PredictionInput::new(
            self.body_weight_kg,
            self.creatinine_mg_dl,
            self.non_excised_kidney_volume_ml,
            self.sex,
        )
    }
}

/// Increment applied by one stepper press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSizes {
    pub body_weight_kg: f64,
    pub creatinine_mg_dl: f64,
    pub non_excised_kidney_volume_ml: f64,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            body_weight_kg: 0.1,
            creatinine_mg_dl: 0.01,
            non_excised_kidney_volume_ml: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub defaults: FieldDefaults,
    pub steps: StepSizes,
}

impl CalculatorConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CalculatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let steps = [
            ("steps.body_weight_kg", self.steps.body_weight_kg),
            ("steps.creatinine_mg_dl", self.steps.creatinine_mg_dl),
            (
                "steps.non_excised_kidney_volume_ml",
                self.steps.non_excised_kidney_volume_ml,
            ),
        ];
        for (key, step) in steps {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a positive number (got {step})"
                )));
            }
        }

        let defaults = [
            ("defaults.body_weight_kg", self.defaults.body_weight_kg),
            ("defaults.creatinine_mg_dl", self.defaults.creatinine_mg_dl),
            (
                "defaults.non_excised_kidney_volume_ml",
                self.defaults.non_excised_kidney_volume_ml,
            ),
        ];
        for (key, value) in defaults {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be zero or greater (got {value})"
                )));
            }
        }
        Ok(())
    }
}
