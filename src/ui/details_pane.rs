use crate::app::AppState;
use crate::domain::{decompose, offset_label, resolve_alerts, Deadline};
use crate::ui::styles::{
    border_style, default_style, label_style, past_style, title_style, type_style, urgency_style,
};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected deadline
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(deadline) = app.selected_deadline() else {
        let empty = Paragraph::new("No deadline selected. Press a to add one.").block(block);
        f.render_widget(empty, area);
        return;
    };

    let paragraph = Paragraph::new(detail_lines(deadline, app.now))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style()),
        Span::raw(value),
    ])
}

fn format_local(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%a %d %b %Y %H:%M").to_string()
}

pub fn detail_lines(deadline: &Deadline, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let parts = decompose(deadline.target_date, now);
    let countdown_style = if parts.is_past {
        past_style()
    } else {
        urgency_style(parts.urgency())
    };

    let mut lines = vec![
        Line::from(Span::styled(deadline.case_title.clone(), title_style())),
        Line::raw(""),
        field("Case #", deadline.case_number.clone()),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Type"), label_style()),
            Span::styled(deadline.kind.label().to_string(), type_style(deadline.kind)),
        ]),
        field("When", format_local(deadline.target_date)),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Countdown"), label_style()),
            Span::styled(parts.describe(), countdown_style),
        ]),
        field(
            "Assigned",
            deadline.assigned_to.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];

    if let Some(created_at) = deadline.created_at {
        lines.push(field("Created", format_local(created_at)));
    }
    lines.push(Line::raw(""));

    let alerts = resolve_alerts(deadline.target_date, &deadline.alert_offsets);
    if alerts.is_empty() {
        lines.push(Line::from(Span::styled("Alerts: none", default_style())));
    } else {
        lines.push(Line::from(Span::styled("Alerts:", label_style())));
        for alert in alerts {
            let style = if alert.is_elapsed(now) { past_style() } else { default_style() };
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} before → {}",
                    offset_label(alert.offset_minutes),
                    format_local(alert.due_at)
                ),
                style,
            )));
        }
    }
    lines.push(Line::raw(""));

    match &deadline.notes {
        Some(notes) => {
            lines.push(Line::from(Span::styled("Notes:", label_style())));
            for note_line in notes.lines() {
                lines.push(Line::raw(format!("  {}", note_line)));
            }
        }
        None => lines.push(Line::from(Span::styled("Notes: (empty)", default_style()))),
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewDeadline;
    use chrono::{Duration, TimeZone};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_detail_lines_list_alerts_earliest_first() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let deadline = Deadline::from_new(
            "id".to_string(),
            NewDeadline::new("Estate", "E-1", now + Duration::days(3))
                .with_alerts([60, 10_080])
                .with_notes("first\nsecond"),
        );

        let rendered = text(&detail_lines(&deadline, now));
        let week = rendered.find("7d before").unwrap();
        let hour = rendered.find("1h before").unwrap();
        assert!(week < hour);
        assert!(rendered.contains("3d 0m left"));
        assert!(rendered.contains("  second"));
        assert!(rendered.contains("Assigned  -"));
    }

    #[test]
    fn test_detail_lines_without_alerts() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let deadline = Deadline::from_new("id".to_string(), NewDeadline::new("A", "1", now));
        let rendered = text(&detail_lines(&deadline, now));
        assert!(rendered.contains("Alerts: none"));
        assert!(rendered.contains("Notes: (empty)"));
    }
}
