use crate::app::AppState;
use crate::domain::decompose;
use crate::ui::list_pane::create_deadline_line;
use crate::ui::styles::{border_style, label_style, past_style, title_style, urgency_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the summary counts bar
pub fn render_summary_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let summary = app.summary();

    let line = Line::from(vec![
        Span::styled(" Total ", label_style()),
        Span::raw(summary.total.to_string()),
        Span::styled("   Upcoming ", label_style()),
        Span::raw(summary.upcoming.to_string()),
        Span::styled("   Past ", label_style()),
        Span::styled(summary.past.to_string(), past_style()),
        Span::styled("   Appointments ", label_style()),
        Span::raw(summary.appointments.to_string()),
        Span::styled("   Filings ", label_style()),
        Span::raw(summary.filings.to_string()),
    ]);

    let title = format!(" Docket ({}) ", app.now.with_timezone(&Local).format("%a %d %b %H:%M"));
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );
    f.render_widget(paragraph, area);
}

/// Render the nearest upcoming deadlines
pub fn render_critical_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let critical = app.critical();

    let lines: Vec<Line> = if critical.is_empty() {
        vec![Line::from(Span::styled("Nothing upcoming", past_style()))]
    } else {
        critical
            .into_iter()
            .map(|deadline| {
                let urgency = decompose(deadline.target_date, app.now).urgency();
                let mut line = create_deadline_line(deadline, app.now);
                let marker = if urgency.is_urgent() { "! " } else { "  " };
                line.spans.insert(0, Span::styled(marker, urgency_style(urgency)));
                line
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Critical ", title_style())),
    );
    f.render_widget(paragraph, area);
}
