use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::AppState;
use crate::model::Theme;

use super::format::truncate;

/// Render footer status bar with keybinding hints and the latest error.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = build_footer_text(state, area.width as usize);

    let footer = Paragraph::new(footer_text).style(
        Style::default()
            .fg(Theme::TEXT)
            .bg(Theme::FOOTER_BG)
            .add_modifier(Modifier::DIM),
    );

    frame.render_widget(footer, area);
}

/// Pure function: build footer text based on current state.
fn build_footer_text(state: &AppState, width: usize) -> Line<'static> {
    if let Some(error) = state.meta.errors.back() {
        return Line::from(Span::styled(
            truncate(&format!("error: {}", error), width),
            Style::default().fg(Theme::ERROR),
        ));
    }

    let hints: &[(&str, &str)] = if state.session.in_flight() {
        &[("Esc", "cancel "), ("PgUp/PgDn", "scroll "), ("Ctrl+Q", "quit")]
    } else {
        &[
            ("Enter", "send "),
            ("Tab", "effort "),
            ("Ctrl+T", "model "),
            ("Ctrl+P/N", "past research "),
            ("Esc", "new "),
            ("?", "help "),
            ("Ctrl+Q", "quit"),
        ]
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Theme::INFO)));
        spans.push(Span::raw(format!(":{}", action)));
    }
    Line::from(spans)
}
