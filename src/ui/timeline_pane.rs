use crate::app::AppState;
use crate::domain::{Deadline, TimelineBar};
use crate::ui::styles::{
    border_style, hint_style, now_marker_style, past_style, title_style, type_style,
};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const LABEL_WIDTH: usize = 18;

/// Render the Gantt-style timeline of every deadline
pub fn render_timeline_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Timeline ", title_style()));

    if app.deadlines.is_empty() {
        f.render_widget(Paragraph::new("No deadlines").block(block), area);
        return;
    }

    let timeline = app.timeline();
    let inner_width = area.width.saturating_sub(2) as usize;
    let track_width = inner_width.saturating_sub(LABEL_WIDTH + 1).max(1);
    let now_col = column(timeline.now_pct, track_width);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<width$} ", "", width = LABEL_WIDTH), hint_style()),
        Span::styled(axis_line(track_width, now_col), now_marker_style()),
    ])];

    for bar in &timeline.bars {
        let Some(deadline) = app.deadlines.iter().find(|d| d.id == bar.id) else {
            continue;
        };
        let style = if bar.is_past { past_style() } else { type_style(deadline.kind) };
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", bar_label(deadline))),
            Span::styled(bar_cells(bar, now_col, track_width), style),
        ]));
    }

    let date = |t: DateTime<Utc>| t.with_timezone(&Local).format("%d %b").to_string();
    lines.push(Line::from(Span::styled(
        format!(
            "{:<width$} {} · {} · {}",
            "",
            date(timeline.axis.min),
            date(timeline.axis.midpoint()),
            date(timeline.axis.max),
            width = LABEL_WIDTH
        ),
        hint_style(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Column for a percentage on a track `width` cells wide
fn column(pct: f64, width: usize) -> usize {
    let col = (pct / 100.0 * width as f64).floor() as usize;
    col.min(width.saturating_sub(1))
}

fn bar_label(deadline: &Deadline) -> String {
    let title: String = deadline.case_title.chars().take(LABEL_WIDTH).collect();
    format!("{title:<width$}", width = LABEL_WIDTH)
}

/// Ruler with a marker where "now" falls
fn axis_line(width: usize, now_col: usize) -> String {
    (0..width).map(|i| if i == now_col { '▼' } else { '─' }).collect()
}

/// One bar row: filled from start to end, with the "now" column marked
pub fn bar_cells(bar: &TimelineBar, now_col: usize, width: usize) -> String {
    let start = column(bar.start_pct, width);
    // Every bar covers at least one cell
    let end = column(bar.end_pct, width).max(start);

    (0..width)
        .map(|i| {
            if i >= start && i <= end {
                '█'
            } else if i == now_col {
                '│'
            } else {
                '·'
            }
        })
        .collect()
}
