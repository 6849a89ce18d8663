use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{ActivitySource, AppState};
use crate::model::{TimelineEntry, Theme};

/// Render the research activity timeline: live while a turn runs, otherwise
/// the archive of the selected (or latest) answer.
pub fn render_activity(frame: &mut Frame, area: Rect, state: &AppState) {
    let source = state.activity_source();
    let entries = state.activity_entries();

    let title = match source {
        ActivitySource::Live if state.session.in_flight() => "Research [live]".to_string(),
        ActivitySource::Live => "Research".to_string(),
        ActivitySource::Archived(_) if state.ui.selected_message.is_some() => {
            "Research [selected answer]".to_string()
        }
        ActivitySource::Archived(_) => "Research [last answer]".to_string(),
    };

    let border = if state.session.in_flight() {
        Theme::ACTIVE_BORDER
    } else {
        Theme::PANEL_BORDER
    };

    let paragraph = Paragraph::new(build_activity_lines(entries, state.session.in_flight()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .style(Style::default().fg(Theme::TEXT))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Pure function: one title line plus one data line per entry.
fn build_activity_lines(entries: &[TimelineEntry], in_flight: bool) -> Vec<Line<'static>> {
    if entries.is_empty() {
        let hint = if in_flight { "Searching..." } else { "No research activity" };
        return vec![Line::from(Span::styled(
            hint,
            Style::default().fg(Theme::MUTED_TEXT),
        ))];
    }

    let mut lines = Vec::with_capacity(entries.len() * 2 + 1);
    for entry in entries {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(Theme::entry_color(entry))),
            Span::styled(
                entry.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.data),
            Style::default().fg(Theme::MUTED_TEXT),
        )));
    }

    if in_flight {
        lines.push(Line::from(Span::styled(
            "  …",
            Style::default().fg(Theme::ACCENT_WARM),
        )));
    }

    lines
}
