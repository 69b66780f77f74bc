//! Calculator form — stepper fields, sex selector, and conversion to a prediction input.

use thiserror::Error;

use donorcr_core::config::StepSizes;
use donorcr_core::{CalculatorConfig, Field, InvalidInputError, PredictionInput, Sex};

/// Rows of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BodyWeight,
    Creatinine,
    KidneyVolume,
    Sex,
    Calculate,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::BodyWeight,
        FormField::Creatinine,
        FormField::KidneyVolume,
        FormField::Sex,
        FormField::Calculate,
    ];

    pub fn index(self) -> usize {
        match self {
            FormField::BodyWeight => 0,
            FormField::Creatinine => 1,
            FormField::KidneyVolume => 2,
            FormField::Sex => 3,
            FormField::Calculate => 4,
        }
    }

    /// Next row down; stays on the last row.
    pub fn next(self) -> FormField {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next row up; stays on the first row.
    pub fn prev(self) -> FormField {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn numeric(self) -> Option<Field> {
        match self {
            FormField::BodyWeight => Some(Field::BodyWeight),
            FormField::Creatinine => Some(Field::Creatinine),
            FormField::KidneyVolume => Some(Field::KidneyVolume),
            FormField::Sex | FormField::Calculate => None,
        }
    }
}

/// Why the form could not produce a prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is empty")]
    Empty(Field),
    #[error("{field} is not a number: '{text}'")]
    NotANumber { field: Field, text: String },
    #[error(transparent)]
    Invalid(#[from] InvalidInputError),
}

/// Numeric stepper: an editable text buffer plus a step size.
///
/// Stepping never goes below zero. After a step or a focus change the next
/// typed character replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    pub text: String,
    pub step: f64,
    replace_on_type: bool,
}

impl NumericField {
    /// Field showing `value` at full precision, with at least the step's decimals.
    pub fn new(value: f64, step: f64) -> Self {
        Self {
            text: format_exact(value, step),
            step,
            replace_on_type: true,
        }
    }

    pub fn parse(&self) -> Option<f64> {
        self.text.trim().parse().ok()
    }

    pub fn set(&mut self, value: f64) {
        self.text = format_for_step(value, self.step);
        self.replace_on_type = true;
    }

    /// Add `direction` steps (negative to decrease), clamped at zero.
    pub fn step_by(&mut self, direction: i32) {
        let current = self.parse().unwrap_or(0.0);
        let next = (current + self.step * f64::from(direction)).max(0.0);
        self.set(next);
    }

    /// Accept a digit or a single decimal point. Returns false if ignored.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '.') {
            return false;
        }
        if self.replace_on_type {
            self.text.clear();
            self.replace_on_type = false;
        }
        if c == '.' && self.text.contains('.') {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn pop_char(&mut self) {
        self.replace_on_type = false;
        self.text.pop();
    }

    pub fn focus(&mut self) {
        self.replace_on_type = true;
    }
}

/// Number of decimals a step size needs (0.1 → 1, 0.01 → 2), capped at 6.
pub fn decimals_for_step(step: f64) -> usize {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

fn format_for_step(value: f64, step: f64) -> String {
    format!("{:.*}", decimals_for_step(step).max(1), value)
}

/// Like `format_for_step`, but never drops digits the value actually has.
fn format_exact(value: f64, step: f64) -> String {
    let shortest = value.to_string();
    let own_decimals = shortest.split_once('.').map_or(0, |(_, frac)| frac.len());
    format!(
        "{:.*}",
        own_decimals.max(decimals_for_step(step)).max(1),
        value
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub body_weight: NumericField,
    pub creatinine: NumericField,
    pub kidney_volume: NumericField,
    pub sex: Sex,
    pub cursor: FormField,
}

impl FormState {
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::from_input(&config.defaults.to_input(), &config.steps)
    }

    pub fn from_input(input: &PredictionInput, steps: &StepSizes) -> Self {
        Self {
            body_weight: NumericField::new(input.body_weight_kg, steps.body_weight_kg),
            creatinine: NumericField::new(input.creatinine_mg_dl, steps.creatinine_mg_dl),
            kidney_volume: NumericField::new(
                input.non_excised_kidney_volume_ml,
                steps.non_excised_kidney_volume_ml,
            ),
            sex: input.sex,
            cursor: FormField::BodyWeight,
        }
    }

    pub fn field(&self, field: Field) -> &NumericField {
        match field {
            Field::BodyWeight => &self.body_weight,
            Field::Creatinine => &self.creatinine,
            Field::KidneyVolume => &self.kidney_volume,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut NumericField {
        match field {
            Field::BodyWeight => &mut self.body_weight,
            Field::Creatinine => &mut self.creatinine,
            Field::KidneyVolume => &mut self.kidney_volume,
        }
    }

    /// The numeric field under the cursor, if any.
    pub fn focused_mut(&mut self) -> Option<&mut NumericField> {
        let field = self.cursor.numeric()?;
        Some(self.field_mut(field))
    }

    pub fn move_cursor(&mut self, down: bool) {
        self.cursor = if down {
            self.cursor.next()
        } else {
            self.cursor.prev()
        };
        if let Some(field) = self.focused_mut() {
            field.focus();
        }
    }

    fn parse_field(&self, field: Field) -> Result<f64, FormError> {
        let f = self.field(field);
        if f.text.trim().is_empty() {
            return Err(FormError::Empty(field));
        }
        f.parse().ok_or_else(|| FormError::NotANumber {
            field,
            text: f.text.clone(),
        })
    }

    /// Current field values as a prediction input. Only parses; range
    /// validation is left to the predictor.
    pub fn to_input(&self) -> Result<PredictionInput, FormError> {
        Ok(PredictionInput::new(
            self.parse_field(Field::BodyWeight)?,
            self.parse_field(Field::Creatinine)?,
            self.parse_field(Field::KidneyVolume)?,
            self.sex,
        ))
    }
}
