use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, TurnPhase};
use crate::model::Theme;

use super::format::turn_elapsed;

/// Render the one-line header: title, settings, turn status.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let header = Paragraph::new(build_header_line(state))
        .style(Style::default().fg(Theme::TEXT).bg(Theme::HEADER_BG));
    frame.render_widget(header, area);
}

fn build_header_line(state: &AppState) -> Line<'static> {
    let config = state.ui.effort.config();
    let (status, color) = phase_label(state);

    let mut spans = vec![
        Span::styled(
            " research ",
            Style::default()
                .fg(Theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Theme::MUTED_TEXT)),
        Span::raw(format!(
            "effort {} ({}q/{}l) ",
            state.ui.effort, config.query_count, config.loop_count
        )),
        Span::styled("│ ", Style::default().fg(Theme::MUTED_TEXT)),
        Span::raw(format!("{} ", state.model())),
        Span::styled("│ ", Style::default().fg(Theme::MUTED_TEXT)),
        Span::styled(status.to_string(), Style::default().fg(color)),
    ];

    if state.session.in_flight() {
        if let Some(started_at) = state.session.turn_started_at {
            spans.push(Span::styled(
                format!(" {}", turn_elapsed(started_at, state.meta.now)),
                Style::default().fg(Theme::MUTED_TEXT),
            ));
        }
    }

    Line::from(spans)
}

fn phase_label(state: &AppState) -> (&'static str, ratatui::style::Color) {
    match (state.session.phase, state.session.in_flight()) {
        (TurnPhase::Streaming, true) => ("researching", Theme::ACCENT_WARM),
        (TurnPhase::FinalizePending, true) => ("finalizing", Theme::ACCENT_WARM),
        (TurnPhase::FinalizePending, false) => ("awaiting answer id", Theme::WARNING),
        (TurnPhase::Archived, _) => ("done", Theme::SUCCESS),
        _ => ("idle", Theme::MUTED_TEXT),
    }
}
