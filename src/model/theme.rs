use ratatui::style::Color;

use super::timeline::TimelineEntry;

pub struct Theme;

impl Theme {
    // ── Base palette ────────────────────────────────────────────
    pub const BACKGROUND: Color = Color::Rgb(18, 18, 24);
    pub const TEXT: Color = Color::Rgb(225, 225, 235);
    pub const MUTED_TEXT: Color = Color::Rgb(100, 105, 120);

    // ── Accent colors ───────────────────────────────────────────
    pub const ACCENT: Color = Color::Rgb(80, 200, 200);       // teal: primary accent
    pub const ACCENT_WARM: Color = Color::Rgb(230, 160, 60);  // amber: in flight
    pub const ACCENT_PURPLE: Color = Color::Rgb(170, 130, 255); // soft purple: assistant

    // ── Semantic colors ─────────────────────────────────────────
    pub const SUCCESS: Color = Color::Rgb(80, 210, 120);
    pub const WARNING: Color = Color::Rgb(230, 180, 60);
    pub const ERROR: Color = Color::Rgb(230, 80, 80);
    pub const INFO: Color = Color::Rgb(80, 180, 220);

    // ── UI chrome ───────────────────────────────────────────────
    pub const HEADER_BG: Color = Color::Rgb(24, 24, 32);
    pub const FOOTER_BG: Color = Color::Rgb(24, 24, 32);
    pub const PANEL_BORDER: Color = Color::Rgb(50, 50, 65);
    pub const ACTIVE_BORDER: Color = Color::Rgb(80, 200, 200); // = ACCENT
    pub const SELECTION_BG: Color = Color::Rgb(40, 55, 75);

    // ── Conversation roles ──────────────────────────────────────
    pub const HUMAN_LABEL: Color = Color::Rgb(80, 180, 220);     // = INFO
    pub const ASSISTANT_LABEL: Color = Color::Rgb(170, 130, 255); // = ACCENT_PURPLE

    // ── Activity stages ─────────────────────────────────────────
    pub const STAGE_QUERIES: Color = Color::Rgb(140, 160, 255);  // blue-purple
    pub const STAGE_RESEARCH: Color = Color::Rgb(80, 180, 220);  // blue
    pub const STAGE_REFLECTION: Color = Color::Rgb(230, 160, 60); // amber
    pub const STAGE_FINALIZE: Color = Color::Rgb(80, 210, 120);  // green

    /// Get color for an activity timeline entry, keyed by its title.
    pub fn entry_color(entry: &TimelineEntry) -> Color {
        match entry.title.as_str() {
            TimelineEntry::GENERATING_QUERIES => Self::STAGE_QUERIES,
            TimelineEntry::WEB_RESEARCH => Self::STAGE_RESEARCH,
            TimelineEntry::REFLECTION => Self::STAGE_REFLECTION,
            TimelineEntry::FINALIZING => Self::STAGE_FINALIZE,
            _ => Self::MUTED_TEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_stages_have_distinct_colors() {
        let colors: Vec<_> = [
            TimelineEntry::GENERATING_QUERIES,
            TimelineEntry::WEB_RESEARCH,
            TimelineEntry::REFLECTION,
            TimelineEntry::FINALIZING,
        ]
        .iter()
        .map(|t| Theme::entry_color(&TimelineEntry::new(*t, "")))
        .collect();

        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_title_is_muted() {
        let entry = TimelineEntry::new("Something else", "x");
        assert_eq!(Theme::entry_color(&entry), Theme::MUTED_TEXT);
    }
}
