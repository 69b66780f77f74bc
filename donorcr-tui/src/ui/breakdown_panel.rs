//! Panel 2 — Breakdown: the nine sub-model outputs of the last calculation.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use donorcr_core::report::{self, format_value};
use donorcr_core::PredictionBreakdown;

use crate::app::AppState;
use crate::theme;

const BAR_WIDTH: usize = 30;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    let Some((input, breakdown)) = &app.last_success else {
        lines.push(Line::from(Span::styled(
            "No calculation yet. Fill in the Calculator panel and press Enter.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    lines.push(Line::from(vec![
        Span::styled("Input: ", theme::muted()),
        Span::styled(
            format!(
                "Bw {} kg | Cre {} mg/dL | Volume {} mL | {}",
                input.body_weight_kg,
                input.creatinine_mg_dl,
                input.non_excised_kidney_volume_ml,
                input.sex
            ),
            theme::text(),
        ),
    ]));
    lines.push(Line::from(""));

    let max = breakdown
        .values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let median_models = breakdown.median_models();

    for (model, value) in breakdown.entries() {
        let is_median = median_models.contains(&model);
        let style = if is_median {
            theme::positive().add_modifier(Modifier::BOLD)
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {}. {:<24}", model.index(), model.name()), style),
            Span::styled(format!("{:>8} ", format_value(value)), style),
            Span::styled(render_bar(value, max, BAR_WIDTH), theme::muted()),
            Span::styled(if is_median { "  median" } else { "" }, theme::positive()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(summary_line(breakdown));

    f.render_widget(Paragraph::new(lines), area);
}

fn summary_line(breakdown: &PredictionBreakdown) -> Line<'static> {
    Line::from(vec![
        Span::styled("Median of 9 sub-models: ", theme::muted()),
        Span::styled(
            report::format_result(&breakdown.result()),
            theme::result_value(),
        ),
    ])
}

/// Horizontal bar proportional to `value / max`; empty for non-positive values.
fn render_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return format!("[{}]", " ".repeat(width));
    }
    let frac = (value / max).clamp(0.0, 1.0);
    let filled = (frac * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}
