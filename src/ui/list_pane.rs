use crate::app::AppState;
use crate::domain::{decompose, partition, Bucket, Deadline};
use crate::ui::styles::{
    border_style, default_style, past_style, selected_style, title_style, type_style, urgency_style,
};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render both buckets as one list: appointments, then filings
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let (appointments, filings) = partition(&app.deadlines);

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_line = None;
    let mut row_index = 0;

    for (bucket, deadlines) in [(Bucket::Appointment, appointments), (Bucket::Filing, filings)] {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} ({})", bucket.title(), deadlines.len()),
            title_style().add_modifier(Modifier::UNDERLINED),
        ))));

        if deadlines.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled("  (none)", past_style()))));
        }

        for deadline in deadlines {
            let style = if row_index == app.selected_index {
                selected_line = Some(items.len());
                selected_style()
            } else {
                default_style()
            };
            items.push(ListItem::new(create_deadline_line(deadline, app.now)).style(style));
            row_index += 1;
        }
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Deadlines ", title_style())),
    );

    // Only used for scrolling; the selected row is styled above
    let mut state = ListState::default().with_selected(selected_line);
    f.render_stateful_widget(list, area, &mut state);
}

/// One list row: type badge, title, case number, local date, countdown
pub fn create_deadline_line(deadline: &Deadline, now: DateTime<Utc>) -> Line<'static> {
    let parts = decompose(deadline.target_date, now);
    let countdown_style = if parts.is_past {
        past_style()
    } else {
        urgency_style(parts.urgency())
    };
    let local = deadline.target_date.with_timezone(&Local);

    let mut spans = vec![
        Span::styled(format!("[{}] ", deadline.kind.label()), type_style(deadline.kind)),
        Span::raw(deadline.case_title.clone()),
        Span::raw(format!("  #{}", deadline.case_number)),
        Span::raw(format!("  {}  ", local.format("%d %b %H:%M"))),
        Span::styled(parts.describe(), countdown_style),
    ];

    if let Some(assignee) = &deadline.assigned_to {
        spans.push(Span::raw(format!("  ({})", assignee)));
    }

    Line::from(spans)
}
