//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Outcome, Overlay, Panel};
use crate::form::FormField;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::F(1) => { app.active_panel = Panel::Calculator; return; }
        KeyCode::F(2) => { app.active_panel = Panel::Breakdown; return; }
        KeyCode::F(3) => { app.active_panel = Panel::Help; return; }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Calculator => handle_calculator_key(app, key),
        Panel::Breakdown => handle_breakdown_key(app, key),
        Panel::Help => {} // display only
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_calculator_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.form.move_cursor(true),
        KeyCode::Char('k') | KeyCode::Up => app.form.move_cursor(false),
        KeyCode::Char('h') | KeyCode::Left => adjust_field(app, -1),
        KeyCode::Char('l') | KeyCode::Right => adjust_field(app, 1),
        KeyCode::Char(' ') if app.form.cursor == FormField::Sex => {
            app.form.sex = app.form.sex.toggled();
        }
        KeyCode::Char('m') => app.form.sex = donorcr_core::Sex::Male,
        KeyCode::Char('f') => app.form.sex = donorcr_core::Sex::Female,
        KeyCode::Char('r') => app.reset_form(),
        KeyCode::Enter => app.calculate(),
        KeyCode::Backspace => {
            if let Some(field) = app.form.focused_mut() {
                field.pop_char();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            if let Some(field) = app.form.focused_mut() {
                field.push_char(c);
            }
        }
        _ => {}
    }
}

/// Step the focused numeric field, or toggle the sex selector.
fn adjust_field(app: &mut AppState, direction: i32) {
    match app.form.cursor {
        FormField::Sex => app.form.sex = app.form.sex.toggled(),
        FormField::Calculate => {}
        _ => {
            if let Some(field) = app.form.focused_mut() {
                field.step_by(direction);
            }
        }
    }
}

fn handle_breakdown_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.calculate();
        if let Outcome::Failure(_) = app.outcome {
            app.set_warning("Fix the form in the Calculator panel, then recalculate");
        }
    }
}
