//! Panel 1 — Calculator: four input fields, the Calculate action and the result.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use donorcr_core::report::{self, FieldSpec};
use donorcr_core::Sex;

use crate::app::{AppState, Outcome};
use crate::form::FormField;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(report::TITLE, theme::accent_bold())));
    lines.push(Line::from(Span::styled(report::SUMMARY, theme::muted())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k]field [h/l]step [0-9 .]type [Space/m/f]sex [r]reset [Enter]calculate",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    for row in FormField::ALL {
        let Some(field) = row.numeric() else {
            continue;
        };
        lines.push(field_line(
            &report::field_spec(field),
            format!("< {} >", form.field(field).text),
            form.cursor == row,
        ));
    }

    let sex_value = match form.sex {
        Sex::Male => "< Male (1) >",
        Sex::Female => "< Female (0) >",
    };
    lines.push(field_line(
        &report::SEX,
        sex_value.to_string(),
        form.cursor == FormField::Sex,
    ));
    lines.push(Line::from(""));

    let button_style = if form.cursor == FormField::Calculate {
        theme::focused()
    } else {
        theme::accent_bold()
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[ Calculate ]", button_style),
    ]));
    lines.push(Line::from(""));

    match &app.outcome {
        Outcome::None => {}
        Outcome::Success { breakdown, .. } => {
            let result = breakdown.result();
            lines.push(Line::from(vec![
                Span::styled("Predicted creatinine after 1 year: ", theme::text()),
                Span::styled(report::format_result(&result), theme::result_value()),
            ]));
            lines.push(Line::from(Span::styled(
                report::success_message(&result),
                theme::positive(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(report::DISCLAIMER, theme::neutral())));
        }
        Outcome::Failure(message) => {
            lines.push(Line::from(Span::styled(message.as_str(), theme::negative())));
        }
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn field_line(spec: &FieldSpec, value: String, focused: bool) -> Line<'static> {
    let label_style = if focused { theme::focused() } else { theme::neutral() };
    let value_style = if focused { theme::accent() } else { theme::text() };
    let unit = if spec.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", spec.unit)
    };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:>26}: ", spec.label), label_style),
        Span::styled(value, value_style),
        Span::styled(unit, theme::muted()),
        Span::styled(format!("   {}", spec.description), theme::muted()),
    ])
}
