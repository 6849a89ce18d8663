use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{Effort, Theme};

/// Render the help overlay.
/// Displayed as centered popup when show_help is true.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text())
        .block(
            Block::default()
                .title(" Help - press any key to close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::ACTIVE_BORDER)),
        )
        .alignment(Alignment::Left)
        .style(Style::default().bg(Theme::BACKGROUND).fg(Theme::TEXT));

    frame.render_widget(paragraph, popup_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Theme::INFO)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Build help text with keybindings grouped by category.
fn build_help_text() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        section("ASKING"),
        Line::from("  Enter       - Send question"),
        Line::from("  Tab         - Cycle research effort"),
        Line::from("  Ctrl+T      - Cycle reasoning model"),
        Line::from("  Esc         - Cancel research / new session (clears everything)"),
        Line::from(""),
        section("HISTORY"),
        Line::from("  Ctrl+P / N  - Show research of older / newer answer"),
        Line::from("  PgUp / PgDn - Scroll conversation"),
        Line::from(""),
        section("EFFORT LEVELS"),
    ];

    for effort in Effort::ALL {
        let config = effort.config();
        lines.push(Line::from(format!(
            "  {:<11} - {} queries, up to {} research loops",
            effort.as_str(),
            config.query_count,
            config.loop_count
        )));
    }

    lines.extend([
        Line::from(""),
        section("GENERAL"),
        Line::from("  ?           - Help (on empty input)"),
        Line::from("  Ctrl+C      - Cancel research, or quit when idle"),
        Line::from("  Ctrl+Q      - Quit"),
    ]);

    lines
}

/// Helper function to create a centered rect using up certain percentage of the available rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
