pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod summary_pane;
pub mod timeline_pane;

use crate::app::AppState;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_delete_modal, render_message_modal};
use ratatui::Frame;
use summary_pane::{render_critical_pane, render_summary_pane};
use timeline_pane::render_timeline_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let critical_rows = app.settings.critical_count.clamp(1, 10) as u16;
    let layout = create_layout(size, critical_rows, app.show_timeline);

    render_keybindings(f, layout.keybindings_area);
    render_summary_pane(f, app, layout.summary_area);
    render_critical_pane(f, app, layout.critical_area);
    render_list_pane(f, app, layout.list_area);

    if app.show_timeline {
        render_timeline_pane(f, app, layout.side_area);
    } else {
        render_details_pane(f, app, layout.side_area);
    }

    // Form sits under any message raised while submitting it
    if app.form.is_some() {
        render_input_form(f, app, size);
    }

    render_confirm_delete_modal(f, app, size);
    render_message_modal(f, app, size);
}
