use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::AppState;

pub mod components;

use components::{activity, conversation, footer, header, help_overlay, input_bar};

/// Main view.
/// Header, conversation beside the activity timeline, input box, footer.
/// Overlays help if active.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    render_main(frame, state, area);

    if state.ui.show_help {
        help_overlay::render_help_overlay(frame);
    }
}

/// Screen regions of the main view.
struct MainLayout {
    header: Rect,
    conversation: Rect,
    activity: Rect,
    input: Rect,
    footer: Rect,
}

fn main_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    MainLayout {
        header: rows[0],
        conversation: body[0],
        activity: body[1],
        input: rows[2],
        footer: rows[3],
    }
}

/// Render the main screen into `area`.
pub fn render_main(frame: &mut Frame, state: &AppState, area: Rect) {
    let layout = main_layout(area);

    header::render_header(frame, layout.header, state);
    conversation::render_conversation(frame, layout.conversation, state);
    activity::render_activity(frame, layout.activity, state);
    input_bar::render_input_bar(frame, layout.input, state);
    footer::render_footer(frame, layout.footer, state);
}

/// How far the conversation can scroll back on a screen of size `area`.
pub fn conversation_scroll_limit(state: &AppState, area: Rect) -> usize {
    conversation::scroll_limit(state, main_layout(area).conversation)
}
