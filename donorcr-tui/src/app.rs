//! Application state — single-owner, main-thread only.
//!
//! The predictor is synchronous and cheap, so calculations run inline on key
//! press; there is no worker thread.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use donorcr_core::report;
use donorcr_core::{CalculatorConfig, PredictionBreakdown, PredictionInput, Predictor};

use crate::form::{FormError, FormState};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Calculator,
    Breakdown,
    Help,
}

impl Panel {
    const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Panel::Calculator => 0,
            Panel::Breakdown => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Calculator),
            1 => Some(Panel::Breakdown),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Calculator => "Calculator",
            Panel::Breakdown => "Breakdown",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        match self {
            Panel::Calculator => Panel::Breakdown,
            Panel::Breakdown => Panel::Help,
            Panel::Help => Panel::Calculator,
        }
    }

    pub fn prev(self) -> Panel {
        match (self.index() + Self::COUNT - 1) % Self::COUNT {
            0 => Panel::Calculator,
            1 => Panel::Breakdown,
            _ => Panel::Help,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub context: String,
}

/// Outcome of the most recent Calculate action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    None,
    Success {
        input: PredictionInput,
        breakdown: PredictionBreakdown,
    },
    Failure(String),
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

const ERROR_HISTORY_CAP: usize = 50;

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Calculator
    pub config: CalculatorConfig,
    pub form: FormState,
    pub outcome: Outcome,
    /// Last successful calculation, kept for the breakdown panel after a later failure.
    pub last_success: Option<(PredictionInput, PredictionBreakdown)>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            active_panel: Panel::Calculator,
            running: true,
            form: FormState::from_config(&config),
            config,
            outcome: Outcome::None,
            last_success: None,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// The Calculate action: read the form, predict, record the outcome.
    pub fn calculate(&mut self) {
        match self.run_prediction() {
            Ok((input, breakdown)) => {
                let result = breakdown.result();
                self.set_status(format!(
                    "Predicted creatinine: {}",
                    report::format_result(&result)
                ));
                self.last_success = Some((input, breakdown));
                self.outcome = Outcome::Success { input, breakdown };
            }
            Err(e) => {
                let message = report::error_message(&e);
                self.push_error(message.clone(), "calculate".into());
                self.outcome = Outcome::Failure(message);
            }
        }
    }

    fn run_prediction(&self) -> Result<(PredictionInput, PredictionBreakdown), FormError> {
        let input = self.form.to_input()?;
        let breakdown = Predictor::new().predict_breakdown(&input)?;
        Ok((input, breakdown))
    }

    /// Restore the form to the configured defaults.
    pub fn reset_form(&mut self) {
        self.form = FormState::from_config(&self.config);
        self.outcome = Outcome::None;
        self.set_status("Form reset to defaults");
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
