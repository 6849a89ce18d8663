use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::model::{Message, Role, Theme};

/// Render the conversation pane, bottom-anchored, honoring the scroll offset.
pub fn render_conversation(frame: &mut Frame, area: Rect, state: &AppState) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let lines = build_conversation_lines(state, inner_width);
    let scrolled_back = state
        .ui
        .conversation_scroll
        .min(max_scroll_back(lines.len(), inner_height));
    let offset = scroll_offset(lines.len(), inner_height, scrolled_back);

    let title = if scrolled_back > 0 {
        "Conversation [scrolled]"
    } else {
        "Conversation"
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::PANEL_BORDER))
                .title(title),
        )
        .style(Style::default().fg(Theme::TEXT))
        .scroll((offset.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(paragraph, area);
}

/// How far back the pane at `area` can scroll before the first line is at the top.
pub fn scroll_limit(state: &AppState, area: Rect) -> usize {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    max_scroll_back(build_conversation_lines(state, inner_width).len(), inner_height)
}

fn max_scroll_back(total: usize, height: usize) -> usize {
    total.saturating_sub(height)
}

/// Top line to show so that the bottom stays in view unless scrolled back.
fn scroll_offset(total: usize, height: usize, scrolled_back: usize) -> usize {
    total.saturating_sub(height).saturating_sub(scrolled_back)
}

/// Pure function: build wrapped conversation lines from state.
fn build_conversation_lines(state: &AppState, width: usize) -> Vec<Line<'static>> {
    let messages = &state.session.messages;
    if messages.is_empty() {
        return welcome_lines();
    }

    let mut lines = Vec::new();
    for (idx, message) in messages.iter().enumerate() {
        let selected = state.ui.selected_message == Some(idx);
        lines.push(role_line(message, selected));

        for text_line in wrap(&message.content, width.saturating_sub(2)) {
            lines.push(Line::from(format!("  {}", text_line)));
        }

        if let Some(id) = message.id.as_ref().filter(|_| message.is_assistant()) {
            let steps = state.session.timeline.lookup(id).len();
            if steps > 0 {
                lines.push(Line::from(Span::styled(
                    format!("  ▸ {} research steps", steps),
                    Style::default().fg(Theme::MUTED_TEXT),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    let awaiting_answer = messages.last().map(|m| m.role == Role::Human).unwrap_or(false);
    if state.session.in_flight() && awaiting_answer {
        lines.push(Line::from(Span::styled(
            "Assistant",
            Style::default()
                .fg(Theme::ASSISTANT_LABEL)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "  researching…",
            Style::default().fg(Theme::ACCENT_WARM),
        )));
    }

    lines
}

fn role_line(message: &Message, selected: bool) -> Line<'static> {
    let (label, color) = match message.role {
        Role::Human => ("You", Theme::HUMAN_LABEL),
        Role::Assistant => ("Assistant", Theme::ASSISTANT_LABEL),
        Role::Other => ("Agent", Theme::MUTED_TEXT),
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if selected {
        style = style.bg(Theme::SELECTION_BG);
    }
    Line::from(Span::styled(label, style))
}

fn welcome_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Welcome.",
            Style::default()
                .fg(Theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  How can I help you today?",
            Style::default().fg(Theme::MUTED_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Type a question and press Enter. Tab changes effort, ? shows help.",
            Style::default().fg(Theme::MUTED_TEXT),
        )),
    ]
}

/// Hard-wrap text to `width` characters, keeping explicit line breaks.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for raw in text.lines() {
        let chars: Vec<char> = raw.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimelineEntry;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_conversation_shows_welcome() {
        let state = AppState::new();
        let lines = text(&build_conversation_lines(&state, 60));
        assert!(lines.iter().any(|l| l.contains("How can I help you today?")));
    }

    #[test]
    fn archived_answer_shows_step_count() {
        let mut state = AppState::new();
        state.session.timeline.append(TimelineEntry::new("A", "1"));
        state.session.timeline.append(TimelineEntry::new("B", "2"));
        state.session.timeline.archive("m1".into());
        state.session.messages = vec![
            Message::human("q"),
            Message::assistant(Some("m1".into()), "answer"),
        ];

        let lines = text(&build_conversation_lines(&state, 60));
        assert!(lines.iter().any(|l| l == "  ▸ 2 research steps"));
    }

    #[test]
    fn pending_answer_placeholder_while_in_flight() {
        let mut state = AppState::new();
        state.session.messages = vec![Message::human("q")];
        state.session.loading = true;

        let lines = text(&build_conversation_lines(&state, 60));
        assert_eq!(lines.last().unwrap(), "  researching…");
    }

    #[test]
    fn wrap_splits_long_lines_and_keeps_breaks() {
        assert_eq!(wrap("abcdef\n\nxy", 4), vec!["abcd", "ef", "", "xy"]);
    }

    #[test]
    fn scroll_limit_is_zero_when_everything_fits() {
        let mut state = AppState::new();
        state.session.messages.push(Message::human("short"));
        assert_eq!(scroll_limit(&state, Rect::new(0, 0, 80, 20)), 0);
    }

    #[test]
    fn scroll_limit_counts_overflowing_lines() {
        let mut state = AppState::new();
        for i in 0..30 {
            state.session.messages.push(Message::human(format!("question {}", i)));
        }
        let area = Rect::new(0, 0, 80, 12);
        let total = build_conversation_lines(&state, 78).len();
        assert!(total > 10);
        assert_eq!(scroll_limit(&state, area), total - 10);
    }

    #[test]
    fn scroll_offset_anchors_bottom() {
        assert_eq!(scroll_offset(50, 10, 0), 40);
        assert_eq!(scroll_offset(50, 10, 15), 25);
        assert_eq!(scroll_offset(50, 10, 100), 0);
        assert_eq!(scroll_offset(5, 10, 0), 0);
    }
}
