//! App state persistence — JSON save/load across restarts.
//!
//! Only the last form values and UI preferences are kept; no results.

use std::path::Path;

use serde::{Deserialize, Serialize};

use donorcr_core::{PredictionInput, Sex};

use crate::app::{AppState, Overlay, Panel};
use crate::form::FormState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Last form values. `None` means start from the config defaults.
    pub last_input: Option<PredictionInput>,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            last_input: None,
            active_panel: Panel::Calculator,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
///
/// Form values that do not parse are not saved; the previous state is lost
/// in that case and the next start uses the config defaults.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_input: app.form.to_input().ok(),
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(input) = state.last_input.filter(is_restorable) {
        app.form = FormState::from_input(&input, &app.config.steps);
    }
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}

/// Saved values must still be usable as stepper values (finite, non-negative).
fn is_restorable(input: &PredictionInput) -> bool {
    [
        input.body_weight_kg,
        input.creatinine_mg_dl,
        input.non_excised_kidney_volume_ml,
    ]
    .iter()
    .all(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use donorcr_core::CalculatorConfig;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("donorcr").join("state.json");

        let state = PersistedState {
            last_input: Some(PredictionInput::new(60.0, 0.8, 120.0, Sex::Female)),
            active_panel: Panel::Breakdown,
            welcome_dismissed: true,
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.last_input, state.last_input);
        assert_eq!(loaded.active_panel, Panel::Breakdown);
        assert!(loaded.welcome_dismissed);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert!(loaded.last_input.is_none());
        assert!(!loaded.welcome_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.last_input.is_none());
        assert_eq!(loaded.active_panel, Panel::Calculator);
    }

    #[test]
    fn apply_restores_form_and_shows_welcome_once() {
        let mut app = AppState::new(CalculatorConfig::default());
        apply(
            &mut app,
            PersistedState {
                last_input: Some(PredictionInput::new(72.5, 1.05, 140.0, Sex::Female)),
                active_panel: Panel::Help,
                welcome_dismissed: false,
            },
        );
        assert_eq!(app.form.body_weight.text, "72.5");
        assert_eq!(app.form.creatinine.text, "1.05");
        assert_eq!(app.form.sex, Sex::Female);
        assert_eq!(app.active_panel, Panel::Help);
        assert_eq!(app.overlay, Overlay::Welcome);

        app.overlay = Overlay::None;
        assert!(extract(&app).welcome_dismissed);
    }

    #[test]
    fn restored_values_are_not_rounded_to_step() {
        let mut app = AppState::new(CalculatorConfig::default());
        app.form.body_weight.text = "60".into();
        app.form.creatinine.text = "0.805".into();
        app.form.kidney_volume.text = "120.25".into();
        let saved = extract(&app);

        let mut restored = AppState::new(CalculatorConfig::default());
        apply(&mut restored, saved);
        assert_eq!(restored.form.creatinine.text, "0.805");
        assert_eq!(restored.form.kidney_volume.text, "120.25");
        assert_eq!(restored.form.to_input().unwrap(), app.form.to_input().unwrap());
    }

    #[test]
    fn negative_saved_values_ignored() {
        let mut app = AppState::new(CalculatorConfig::default());
        apply(
            &mut app,
            PersistedState {
                last_input: Some(PredictionInput::new(-1.0, 0.8, 120.0, Sex::Male)),
                ..PersistedState::default()
            },
        );
        assert_eq!(app.form.body_weight.text, "0.0");
    }

    #[test]
    fn unparsable_form_not_saved() {
        let mut app = AppState::new(CalculatorConfig::default());
        app.form.body_weight.text = "abc".into();
        assert!(extract(&app).last_input.is_none());
    }
}
