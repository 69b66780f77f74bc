//! DonorCr Core — one-year post-donation creatinine prediction for living kidney donors.
//!
//! This crate contains the whole computation:
//! - Domain types (donor inputs, sex, prediction result and per-model breakdown)
//! - Input validation (`InvalidInputError`)
//! - The fixed table of nine regression sub-models and their population covariates
//! - Median combination of the sub-model outputs
//! - Result formatting shared by the CLI and TUI
//! - CSV batch prediction
//! - Front-end configuration (field defaults and stepper sizes)

pub mod batch;
pub mod config;
pub mod covariates;
pub mod domain;
pub mod median;
pub mod models;
pub mod predictor;
pub mod report;

pub use config::{CalculatorConfig, ConfigError};
pub use covariates::Covariates;
pub use domain::{
    Field, InvalidInputError, PredictionBreakdown, PredictionInput, PredictionResult, Sex,
};
pub use models::SubModel;
pub use predictor::{predict, predict_breakdown, Predictor};
