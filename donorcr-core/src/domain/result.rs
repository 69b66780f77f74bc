//! Prediction outputs.

use serde::{Deserialize, Serialize};

use crate::models::SubModel;

/// Predicted serum creatinine one year after donation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_creatinine_mg_dl: f64,
}

/// Every sub-model output of one prediction, in table order, plus their median.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionBreakdown {
    pub values: [f64; SubModel::COUNT],
    pub median: f64,
}

impl PredictionBreakdown {
    pub fn result(&self) -> PredictionResult {
        PredictionResult {
            predicted_creatinine_mg_dl: self.median,
        }
    }

    /// `(sub-model, output)` pairs in table order.
    pub fn entries(&self) -> impl Iterator<Item = (SubModel, f64)> + '_ {
        SubModel::ALL.iter().copied().zip(self.values.iter().copied())
    }

    pub fn value(&self, model: SubModel) -> f64 {
        self.values[model.index() - 1]
    }

    /// Sub-models whose output equals the median (usually exactly one).
    pub fn median_models(&self) -> Vec<SubModel> {
        self.entries()
            .filter(|(_, v)| *v == self.median)
            .map(|(m, _)| m)
            .collect()
    }
}
