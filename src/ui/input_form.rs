use crate::app::{AppState, DeadlineForm, FormField};
use crate::domain::ALERT_PRESETS;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style, type_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add/edit deadline form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.form {
        let modal_area = create_modal_area(area, 24);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.is_editing() {
            " Edit Deadline "
        } else {
            " Add Deadline "
        };

        let paragraph = Paragraph::new(form_lines(form))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

fn field_value(form: &DeadlineForm, field: FormField) -> Vec<Span<'static>> {
    match field {
        FormField::CaseTitle => vec![Span::raw(form.case_title.clone())],
        FormField::CaseNumber => vec![Span::raw(form.case_number.clone())],
        FormField::Date => vec![Span::raw(form.date.clone())],
        FormField::Time => vec![Span::raw(form.time.clone())],
        FormField::AssignedTo => vec![Span::raw(form.assigned_to.clone())],
        FormField::Notes => vec![Span::raw(form.notes.clone())],
        FormField::Kind => vec![
            Span::raw("◀ "),
            Span::styled(form.kind.label().to_string(), type_style(form.kind)),
            Span::raw(" ▶"),
        ],
        FormField::Alerts => ALERT_PRESETS
            .iter()
            .enumerate()
            .map(|(i, preset)| {
                let mark = if form.alert_offsets.contains(&preset.minutes) { "x" } else { " " };
                Span::raw(format!("{}[{}] {}  ", i + 1, mark, preset.label))
            })
            .collect(),
    }
}

pub fn form_lines(form: &DeadlineForm) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];

    for &field in FormField::all() {
        let active = field == form.field;
        let label = if active {
            format!("{}: (editing)", field.label())
        } else {
            format!("{}:", field.label())
        };
        lines.push(Line::raw(label));

        let mut value = vec![Span::raw("> ")];
        value.extend(field_value(form, field));
        if active && field.is_text() {
            value.push(Span::styled("█", modal_title_style())); // Cursor
        }
        lines.push(Line::from(value));
    }
    lines.push(Line::raw(""));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), error_style())));
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(Span::styled(
        "Tab/Shift+Tab fields  ·  ←/→ type  ·  1-4 alerts  ·  Enter save  ·  Esc cancel",
        hint_style(),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_form_lines_mark_active_field_and_alerts() {
        let mut form = DeadlineForm::blank("2030-01-15", "09:00");
        form.case_title = "Estate".to_string();
        form.toggle_alert(2);

        let rendered = text(&form_lines(&form));
        assert!(rendered.contains("Case title: (editing)"));
        assert!(rendered.contains("> Estate█"));
        assert!(rendered.contains("3[x] 24 hours before"));
        assert!(rendered.contains("1[ ] 30 days before"));
        assert!(rendered.contains("◀ Hearing ▶"));
    }

    #[test]
    fn test_form_lines_show_error() {
        let mut form = DeadlineForm::blank("bad", "09:00");
        form.error = Some("invalid date `bad` (expected YYYY-MM-DD)".to_string());
        let rendered = text(&form_lines(&form));
        assert!(rendered.contains("invalid date `bad`"));
    }
}
