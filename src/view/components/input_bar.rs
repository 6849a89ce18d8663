use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::model::Theme;

/// Render the input box. Disabled look while a turn is in flight.
pub fn render_input_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let in_flight = state.session.in_flight();

    let title = if in_flight {
        " Researching - Esc to cancel ".to_string()
    } else {
        format!(" Ask ({} effort, {}) ", state.ui.effort, state.model())
    };

    let paragraph = Paragraph::new(build_input_line(state))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if in_flight {
                    Theme::PANEL_BORDER
                } else {
                    Theme::ACTIVE_BORDER
                }))
                .title(title),
        )
        .style(Style::default().fg(Theme::TEXT));

    frame.render_widget(paragraph, area);

    if !in_flight && !state.ui.show_help {
        // Cursor right after the draft; clamp inside the box
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + state.ui.draft.chars().count() as u16).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn build_input_line(state: &AppState) -> Line<'static> {
    if state.ui.draft.is_empty() {
        return Line::from(Span::styled(
            "Who won the Euro 2024 and scored the most goals?",
            Style::default().fg(Theme::MUTED_TEXT),
        ));
    }
    Line::from(state.ui.draft.clone())
}
