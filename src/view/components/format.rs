use chrono::{DateTime, Utc};

/// Format elapsed seconds as human-readable string.
/// - < 60s: "Xs"
/// - < 3600s: "XmYs"
/// - >= 3600s: "XhYm"
pub fn format_elapsed(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Elapsed time of a turn, clamped at zero for clock skew between ticks.
pub fn turn_elapsed(started_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_elapsed((now - started_at).num_seconds().max(0))
}

/// Truncate to at most `max` characters, appending "…" when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
