//! Display text shared by the CLI and the TUI.
//!
//! Results are always shown with two decimals and the `mg/dL` unit label.

use crate::domain::{Field, PredictionResult};

pub const UNIT: &str = "mg/dL";

pub const TITLE: &str = "Predicted Cr values 1 year after donor kidney donation";

pub const SUMMARY: &str = "Calculates the serum creatinine value 1 year after donation \
from body weight, creatinine value, non-excised kidney volume and sex.";

pub const DISCLAIMER: &str = "This result is calculated from data of patients who \
actually donated a kidney at the Department of Urology, Tokyo Women's Medical University. \
Actual measured values may differ.";

/// Label, unit and help text for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

pub const BODY_WEIGHT: FieldSpec = FieldSpec {
    label: "Body Weight (Bw)",
    unit: "kg",
    description: "Donor weight in kg",
};

pub const CREATININE: FieldSpec = FieldSpec {
    label: "Creatinine (Cre)",
    unit: "mg/dL",
    description: "Preoperative blood creatinine level",
};

pub const KIDNEY_VOLUME: FieldSpec = FieldSpec {
    label: "Non-Excised Kidney Volume",
    unit: "mL",
    description: "Volume of the non-excised kidney measured by CT",
};

pub const SEX: FieldSpec = FieldSpec {
    label: "Sex",
    unit: "",
    description: "Donor sex (Male: 1, Female: 0)",
};

pub fn field_spec(field: Field) -> FieldSpec {
    match field {
        Field::BodyWeight => BODY_WEIGHT,
        Field::Creatinine => CREATININE,
        Field::KidneyVolume => KIDNEY_VOLUME,
    }
}

/// `value` with two decimals, no unit.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// `"1.28 mg/dL"`.
pub fn format_result(result: &PredictionResult) -> String {
    format!("{} {UNIT}", format_value(result.predicted_creatinine_mg_dl))
}

pub fn success_message(result: &PredictionResult) -> String {
    format!(
        "Your predicted creatinine value after 1 year of kidney donation is as follows \
         (in {UNIT}): {}",
        format_value(result.predicted_creatinine_mg_dl)
    )
}

pub fn error_message(err: &impl std::fmt::Display) -> String {
    format!("An error occurred: {err}")
}
