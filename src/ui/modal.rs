use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the delete confirmation modal
pub fn render_confirm_delete_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode == UiMode::ConfirmDelete {
        let modal_area = create_modal_area(area, 8);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let title = app.pending_delete_title().unwrap_or("this deadline");
        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  Delete \"{}\"?", title)),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" Delete  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" Keep"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Delete Deadline ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render an error or notice that must be dismissed
pub fn render_message_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(message) = &app.message {
        let modal_area = create_modal_area(area, 9);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(format!("  {}", message), error_style())),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [Enter]", modal_title_style()),
                Span::raw(" Dismiss"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Notice ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
