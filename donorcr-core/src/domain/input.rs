//! PredictionInput — the four donor measurements a prediction is made from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Donor sex as used by the regression models (male = 1.0, female = 0.0).
///
/// Serialized as `male` / `female`; deserialized through [`FromStr`], so every
/// spelling the CLI accepts (any case, `m`/`f`, `1`/`0`) works in files too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Indicator value entering the formulas.
    pub fn indicator(self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 0.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sex '{0}' (expected male/female, m/f or 1/0)")]
pub struct ParseSexError(String);

impl FromStr for Sex {
    type Err = ParseSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "1" => Ok(Sex::Male),
            "female" | "f" | "0" => Ok(Sex::Female),
            _ => Err(ParseSexError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Sex {
    type Error = ParseSexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Numeric input fields, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    BodyWeight,
    Creatinine,
    KidneyVolume,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::BodyWeight => "body weight",
            Field::Creatinine => "creatinine",
            Field::KidneyVolume => "non-excised kidney volume",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected prediction input. The only failure the predictor has.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("{field} must be a finite number (got {value})")]
    NonFinite { field: Field, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: Field, value: f64 },
    /// Body weight divides kidney volume in one of the sub-models.
    #[error("{field} must be greater than zero")]
    Zero { field: Field },
}

impl InvalidInputError {
    pub fn field(&self) -> Field {
        match *self {
            InvalidInputError::NonFinite { field, .. }
            | InvalidInputError::Negative { field, .. }
            | InvalidInputError::Zero { field } => field,
        }
    }
}

/// Donor measurements for one prediction.
///
/// Built fresh per request and never mutated by the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Donor body weight (kg).
    pub body_weight_kg: f64,
    /// Preoperative serum creatinine (mg/dL).
    pub creatinine_mg_dl: f64,
    /// Volume of the kidney left in place, measured by CT (mL).
    pub non_excised_kidney_volume_ml: f64,
    pub sex: Sex,
}

impl PredictionInput {
    pub fn new(
        body_weight_kg: f64,
        creatinine_mg_dl: f64,
        non_excised_kidney_volume_ml: f64,
        sex: Sex,
    ) -> Self {
        Self {
            body_weight_kg,
            creatinine_mg_dl,
            non_excised_kidney_volume_ml,
            sex,
        }
    }

    /// Check every numeric field, reporting the first offending one.
    ///
    /// Fields are checked in form order: weight, creatinine, kidney volume.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let fields = [
            (Field::BodyWeight, self.body_weight_kg),
            (Field::Creatinine, self.creatinine_mg_dl),
            (Field::KidneyVolume, self.non_excised_kidney_volume_ml),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(InvalidInputError::Negative { field, value });
            }
        }
        if self.body_weight_kg == 0.0 {
            return Err(InvalidInputError::Zero {
                field: Field::BodyWeight,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> PredictionInput {
        PredictionInput::new(60.0, 0.8, 120.0, Sex::Male)
    }

    #[test]
    fn valid_input_passes() {
        assert!(sample_input().validate().is_ok());
    }

    #[test]
    fn zero_creatinine_and_volume_are_allowed() {
        let input = PredictionInput::new(60.0, 0.0, 0.0, Sex::Female);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn zero_weight_rejected() {
        let mut input = sample_input();
        input.body_weight_kg = 0.0;
        assert_eq!(
            input.validate(),
            Err(InvalidInputError::Zero {
                field: Field::BodyWeight
            })
        );
    }

    #[test]
    fn negative_zero_weight_rejected() {
        let mut input = sample_input();
        input.body_weight_kg = -0.0;
        assert!(matches!(
            input.validate(),
            Err(InvalidInputError::Zero { .. })
        ));
    }

    #[test]
    fn negative_creatinine_rejected() {
        let mut input = sample_input();
        input.creatinine_mg_dl = -1.0;
        let err = input.validate().unwrap_err();
        assert_eq!(err.field(), Field::Creatinine);
        assert!(matches!(err, InvalidInputError::Negative { .. }));
    }

    #[test]
    fn nan_and_infinity_rejected() {
        let mut input = sample_input();
        input.non_excised_kidney_volume_ml = f64::NAN;
        let err = input.validate().unwrap_err();
        assert_eq!(err.field(), Field::KidneyVolume);
        assert!(matches!(err, InvalidInputError::NonFinite { .. }));

        let mut input = sample_input();
        input.body_weight_kg = f64::INFINITY;
        assert!(matches!(
            input.validate(),
            Err(InvalidInputError::NonFinite {
                field: Field::BodyWeight,
                ..
            })
        ));
    }

    #[test]
    fn first_offending_field_reported() {
        let input = PredictionInput::new(-5.0, -1.0, -2.0, Sex::Male);
        assert_eq!(input.validate().unwrap_err().field(), Field::BodyWeight);
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = InvalidInputError::Negative {
            field: Field::Creatinine,
            value: -1.0,
        };
        assert_eq!(err.to_string(), "creatinine must not be negative (got -1)");
        let err = InvalidInputError::Zero {
            field: Field::BodyWeight,
        };
        assert_eq!(err.to_string(), "body weight must be greater than zero");
    }

    #[test]
    fn sex_indicator_and_parsing() {
        assert_eq!(Sex::Male.indicator(), 1.0);
        assert_eq!(Sex::Female.indicator(), 0.0);
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" f ".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("1".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("0".parse::<Sex>().unwrap(), Sex::Female);
        assert!("x".parse::<Sex>().is_err());
        assert_eq!(Sex::Male.toggled(), Sex::Female);
        assert_eq!("MALE".parse::<Sex>().unwrap(), Sex::Male);
    }

    #[test]
    fn input_serialization_roundtrip() {
        let input = sample_input();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"sex\":\"male\""));
        let deser: PredictionInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, deser);
    }

    #[test]
    fn sex_deserializes_from_numeric_code() {
        let deser: PredictionInput = serde_json::from_str(
            r#"{"body_weight_kg":50,"creatinine_mg_dl":0.6,"non_excised_kidney_volume_ml":100,"sex":"0"}"#,
        )
        .unwrap();
        assert_eq!(deser.sex, Sex::Female);
    }

    #[test]
    fn sex_deserialization_ignores_case() {
        for (text, expected) in [
            ("\"MALE\"", Sex::Male),
            ("\"Female\"", Sex::Female),
            ("\"M\"", Sex::Male),
        ] {
            let sex: Sex = serde_json::from_str(text).unwrap();
            assert_eq!(sex, expected);
        }
        assert!(serde_json::from_str::<Sex>("\"unknown\"").is_err());
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
    }
}
