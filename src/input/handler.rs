use crate::app::AppState;
use crate::domain::UiMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a key press. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Form => handle_form_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
        UiMode::Message => handle_message_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add(),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => app.start_edit(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.request_delete(),

        // Swap the details pane for the timeline
        KeyCode::Char('g') | KeyCode::Char('G') => app.toggle_timeline(),

        // Re-read the store, e.g. after another instance wrote to it
        KeyCode::Char('r') | KeyCode::Char('R') => app.reload(),

        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

/// Handle keys while the add/edit form is open
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),
        KeyCode::Left => app.form_cycle_kind(false),
        KeyCode::Right => app.form_cycle_kind(true),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_add_char(c),
        _ => {}
    }
    false
}

fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    false
}

/// Any of Enter, Esc or Space dismisses the message
fn handle_message_mode(app: &mut AppState, key: KeyEvent) -> bool {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_message();
    }
    false
}
