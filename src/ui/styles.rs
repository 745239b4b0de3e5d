use crate::domain::{DeadlineType, Urgency};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Accent color for each deadline type
pub fn type_color(kind: DeadlineType) -> Color {
    match kind {
        DeadlineType::Hearing => Color::Cyan,
        DeadlineType::Filing => Color::Yellow,
        DeadlineType::Limitation => Color::Red,
        DeadlineType::Meeting => Color::Green,
    }
}

/// Type badge style
pub fn type_style(kind: DeadlineType) -> Style {
    Style::default().fg(type_color(kind))
}

/// Countdown style by urgency tier
pub fn urgency_style(urgency: Urgency) -> Style {
    match urgency {
        Urgency::VeryUrgent => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Urgency::Urgent => Style::default().fg(Color::LightRed),
        Urgency::Normal => Style::default().fg(Color::Green),
    }
}

/// Deadlines that have already passed
pub fn past_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Field label style in details and forms
pub fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// "Now" marker on the timeline
pub fn now_marker_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}
