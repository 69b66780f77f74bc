//! Top-level UI layout — one panel at a time with a status bar.

pub mod breakdown_panel;
pub mod calculator_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [F{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Calculator => calculator_panel::render(f, inner, app),
        Panel::Breakdown => breakdown_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use donorcr_core::CalculatorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(app: &AppState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 40, area);
        assert!(r.x >= area.x && r.right() <= area.right());
        assert!(r.y >= area.y && r.bottom() <= area.bottom());
        assert_eq!(r.width, 60);
    }

    #[test]
    fn every_panel_renders() {
        let mut app = AppState::new(CalculatorConfig::default());
        for panel in [Panel::Calculator, Panel::Breakdown, Panel::Help] {
            app.active_panel = panel;
            let screen = render_to_string(&app);
            assert!(screen.contains(panel.label()), "{screen}");
        }
    }

    #[test]
    fn calculated_result_shown_with_unit() {
        let mut app = AppState::new(CalculatorConfig::default());
        app.form.body_weight.text = "60".into();
        app.form.creatinine.text = "0.8".into();
        app.form.kidney_volume.text = "120".into();
        app.calculate();
        let screen = render_to_string(&app);
        assert!(screen.contains("1.28 mg/dL"), "{screen}");
    }

    #[test]
    fn validation_error_shown() {
        let mut app = AppState::new(CalculatorConfig::default());
        app.calculate();
        let screen = render_to_string(&app);
        assert!(screen.contains("body weight must be greater than zero"), "{screen}");
    }

    #[test]
    fn overlays_render() {
        let mut app = AppState::new(CalculatorConfig::default());
        app.overlay = Overlay::Welcome;
        assert!(render_to_string(&app).contains("Welcome"));
        app.overlay = Overlay::ErrorHistory;
        assert!(render_to_string(&app).contains("Error History"));
    }
}
