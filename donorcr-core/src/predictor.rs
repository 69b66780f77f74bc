//! Predictor — validate, evaluate all sub-models, take the median.

use tracing::{debug, warn};

use crate::covariates::Covariates;
use crate::domain::{InvalidInputError, PredictionBreakdown, PredictionInput, PredictionResult};
use crate::median::median;
use crate::models::SubModel;

/// Stateless predictor. Every call is independent and touches no shared state,
/// so one value can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Predictor;

impl Predictor {
    pub fn new() -> Self {
        Self
    }

    /// Predicted creatinine one year after donation.
    pub fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, InvalidInputError> {
        self.predict_breakdown(input).map(|b| b.result())
    }

    /// All nine sub-model outputs and their median.
    pub fn predict_breakdown(
        &self,
        input: &PredictionInput,
    ) -> Result<PredictionBreakdown, InvalidInputError> {
        if let Err(e) = input.validate() {
            warn!(error = %e, "rejected prediction input");
            return Err(e);
        }

        let covariates = Covariates::FIXED;
        let mut values = [0.0; SubModel::COUNT];
        for (slot, model) in values.iter_mut().zip(SubModel::ALL) {
            *slot = model.evaluate(input, &covariates);
        }

        // Nine values, never empty.
        let median = median(&values).unwrap_or(f64::NAN);

        debug!(
            body_weight_kg = input.body_weight_kg,
            creatinine_mg_dl = input.creatinine_mg_dl,
            kidney_volume_ml = input.non_excised_kidney_volume_ml,
            sex = %input.sex,
            predicted = median,
            "prediction computed"
        );

        Ok(PredictionBreakdown { values, median })
    }
}

/// Shorthand for `Predictor::new().predict(input)`.
pub fn predict(input: &PredictionInput) -> Result<PredictionResult, InvalidInputError> {
    Predictor::new().predict(input)
}

/// Shorthand for `Predictor::new().predict_breakdown(input)`.
pub fn predict_breakdown(
    input: &PredictionInput,
) -> Result<PredictionBreakdown, InvalidInputError> {
    Predictor::new().predict_breakdown(input)
}
