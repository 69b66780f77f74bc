//! Panel 3 — Help: keyboard shortcuts and the fixed model covariates.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use donorcr_core::Covariates;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "F1 / F2 / F3", "Switch to Calculator / Breakdown / Help");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Calculator");
    key(&mut lines, "j / k", "Move between fields");
    key(
        &mut lines,
        "h / l",
        &format!(
            "Step value (Bw {} kg, Cre {} mg/dL, volume {} mL) or toggle sex",
            app.config.steps.body_weight_kg,
            app.config.steps.creatinine_mg_dl,
            app.config.steps.non_excised_kidney_volume_ml
        ),
    );
    key(&mut lines, "0-9 .", "Type a value (replaces the focused value)");
    key(&mut lines, "Backspace", "Delete last character");
    key(&mut lines, "Space / m / f", "Toggle sex / set Male / set Female");
    key(&mut lines, "r", "Reset form to configured defaults");
    key(&mut lines, "Enter", "Calculate");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Breakdown");
    key(&mut lines, "Enter", "Recalculate from the current form");
    lines.push(Line::from(""));

    let c = Covariates::FIXED;
    section(&mut lines, "Fixed Covariates");
    key(&mut lines, "CVD", &c.cvd.to_string());
    key(&mut lines, "HbA1c", &c.hba1c.to_string());
    key(&mut lines, "BUN", &c.bun.to_string());
    key(&mut lines, "Age", &c.age.to_string());
    key(&mut lines, "", "The prediction is the median of nine regression sub-models.");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
