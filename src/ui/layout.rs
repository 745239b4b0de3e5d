use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub summary_area: Rect,
    pub critical_area: Rect,
    pub list_area: Rect,
    /// Details pane, or the timeline when it is toggled on
    pub side_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Summary counts (3 rows)
/// - Critical pane (one row per critical deadline plus borders)
/// - Main area split horizontally
///   - Details shown: List (60%) | Details (40%)
///   - Timeline shown: List (40%) | Timeline (60%)
pub fn create_layout(area: Rect, critical_rows: u16, show_timeline: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                 // Keybindings bar
            Constraint::Length(3),                 // Summary
            Constraint::Length(critical_rows + 2), // Critical pane
            Constraint::Min(0),                    // Main content
        ])
        .split(area);

    let (list_pct, side_pct) = if show_timeline { (40, 60) } else { (60, 40) };
    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(list_pct), Constraint::Percentage(side_pct)])
        .split(main_chunks[3]);

    MainLayout {
        keybindings_area: main_chunks[0],
        summary_area: main_chunks[1],
        critical_area: main_chunks[2],
        list_area: horizontal_split[0],
        side_area: horizontal_split[1],
    }
}

/// Create a centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
