//! Domain types for the donor creatinine predictor.

pub mod input;
pub mod result;

pub use input::{Field, InvalidInputError, ParseSexError, PredictionInput, Sex};
pub use result::{PredictionBreakdown, PredictionResult};
