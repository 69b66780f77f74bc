//! The nine regression sub-models.
//!
//! Each variant is one fitted formula. Coefficients are the published fitted
//! values and must not be rounded or re-derived; any change alters clinical
//! output. Table order (1..=9) is part of the breakdown format.

use serde::Serialize;

use crate::covariates::Covariates;
use crate::domain::PredictionInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubModel {
    /// Weight, square-root creatinine, sex and kidney volume.
    SqrtCreatinine,
    /// BUN, weight, creatinine and a BUN² × volume interaction.
    BunSquaredVolume,
    /// As `BunSquaredVolume` with age and sex added.
    AgeBunSquaredVolume,
    /// Creatinine, CVD, HbA1c, sex and kidney volume.
    Metabolic,
    /// BUN, weight and a BUN⁴ × volume interaction. Independent of creatinine.
    BunQuarticVolume,
    /// Creatinine, sex and a reciprocal volume-per-weight term.
    VolumePerWeight,
    /// BUN, weight, creatinine, sex and a BUN × volume interaction.
    BunVolume,
    /// Weight, creatinine, kidney volume and a reciprocal of CVD + HbA1c + sex.
    InverseRiskSum,
    /// Age × BUN, weight, creatinine and a BUN³ × volume³ interaction.
    CubicVolume,
}

impl SubModel {
    pub const COUNT: usize = 9;

    pub const ALL: [SubModel; SubModel::COUNT] = [
        SubModel::SqrtCreatinine,
        SubModel::BunSquaredVolume,
        SubModel::AgeBunSquaredVolume,
        SubModel::Metabolic,
        SubModel::BunQuarticVolume,
        SubModel::VolumePerWeight,
        SubModel::BunVolume,
        SubModel::InverseRiskSum,
        SubModel::CubicVolume,
    ];

    /// 1-based position in the table.
    pub fn index(self) -> usize {
        match self {
            SubModel::SqrtCreatinine => 1,
            SubModel::BunSquaredVolume => 2,
            SubModel::AgeBunSquaredVolume => 3,
            SubModel::Metabolic => 4,
            SubModel::BunQuarticVolume => 5,
            SubModel::VolumePerWeight => 6,
            SubModel::BunVolume => 7,
            SubModel::InverseRiskSum => 8,
            SubModel::CubicVolume => 9,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        i.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            SubModel::SqrtCreatinine => "sqrt_creatinine",
            SubModel::BunSquaredVolume => "bun_squared_volume",
            SubModel::AgeBunSquaredVolume => "age_bun_squared_volume",
            SubModel::Metabolic => "metabolic",
            SubModel::BunQuarticVolume => "bun_quartic_volume",
            SubModel::VolumePerWeight => "volume_per_weight",
            SubModel::BunVolume => "bun_volume",
            SubModel::InverseRiskSum => "inverse_risk_sum",
            SubModel::CubicVolume => "cubic_volume",
        }
    }

    /// Whether the formula divides by body weight.
    pub fn divides_by_weight(self) -> bool {
        self == SubModel::VolumePerWeight
    }

    /// Evaluate the formula.
    ///
    /// No validation happens here: callers go through the predictor, which
    /// rejects negative, non-finite and zero-weight inputs first.
    #[allow(clippy::excessive_precision)]
    pub fn evaluate(self, input: &PredictionInput, c: &Covariates) -> f64 {
        let bw = input.body_weight_kg;
        let cre = input.creatinine_mg_dl;
        let vol = input.non_excised_kidney_volume_ml;
        let male = input.sex.indicator();

        match self {
            SubModel::SqrtCreatinine => {
                -0.09903755662234529 + 0.006502924180113298 * bw + 1.3625035862329375 * cre.sqrt()
                    + 0.1139767991517405 * male
                    - 0.0027455075816872963 * vol
            }
            SubModel::BunSquaredVolume => {
                -0.3901364879414445 + 0.04471756216946074 * c.bun + 0.006715659519617908 * bw
                    + 1.0352518798689898 * cre
                    - 0.000009604315179117748 * c.bun.powi(2) * vol
            }
            SubModel::AgeBunSquaredVolume => {
                -0.38478682583687274 + 0.002081547696286225 * c.age + 0.04399956263153849 * c.bun
                    + 0.005628920758504391 * bw
                    + 0.9320131800396743 * cre
                    + 0.06722065750493375 * male
                    - 0.000009867424180159245 * c.bun.powi(2) * vol
            }
            SubModel::Metabolic => {
                0.049617816124754036 + 0.9225151798784034 * cre + 0.18320900637720863 * c.cvd
                    + 0.10349178758374927 * c.hba1c
                    + 0.13985579153513217 * male
                    - 0.0019323076033121343 * vol
            }
            SubModel::BunQuarticVolume => {
                -0.18899026587394271 + 0.024398835894397737 * c.bun + 0.0032842131730298754 * bw
                    + 1.142965718977502e-9 * c.bun.powi(4) * vol
            }
            SubModel::VolumePerWeight => {
                -0.006961262066861628 + 0.8126766126098913 * cre + 0.11057326356803435 * male
                    + 1.4573284728625062 / (0.7326765340341233 + vol / bw)
            }
            SubModel::BunVolume => {
                0.005082859737290714 + 0.03531000856642338 * c.bun + 0.00699894215253158 * bw
                    + 0.7899600124990199 * cre
                    + 0.10910119812549417 * male
                    - 0.0002167791209982864 * c.bun * vol
            }
            SubModel::InverseRiskSum => {
                1.2549512514779957 + 0.005164327440285673 * bw + 0.8188362941962077 * cre
                    - 4.127069601506772 / (c.cvd + c.hba1c + male)
                    - 0.0026704663767301066 * vol
            }
            SubModel::CubicVolume => {
                -0.15903717053578167 + 0.00025977004836070643 * c.age * c.bun
                    + 0.005291867117086743 * bw
                    + 1.0913423662894317 * cre
                    - 6.322735119054266e-12 * c.bun.powi(3) * vol.powi(3)
            }
        }
    }
}
