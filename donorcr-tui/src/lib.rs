//! DonorCr TUI - terminal calculator for post-donation creatinine
//!
//! Provides an interactive form with:
//! - Stepper fields for body weight, creatinine and kidney volume
//! - Sex selector and a Calculate action
//! - Per-sub-model breakdown of the last prediction
//! - Error history and persisted form values

pub mod app;
pub mod form;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::{AppState, Panel};
pub use input::handle_key;
