//! Error types for research-tui
//!
//! Domain-specific error enums using thiserror. Malformed node payloads are
//! not errors (they produce no timeline entry) and have no variant here.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown effort level {0:?} (expected low, medium or high)")]
    UnknownEffort(String),
    #[error("invalid API URL {0:?}: must start with http:// or https://")]
    InvalidApiUrl(String),
    #[error("reasoning model cannot be empty")]
    EmptyModel,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP: {0}")]
    Http(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("stream: {0}")]
    Stream(String),
    #[error("JSON in {event} event: {message}")]
    Json { event: String, message: String },
    #[error("agent error: {0}")]
    Remote(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_effort_display_names_input() {
        let error = ConfigError::UnknownEffort("extreme".into());
        let display = error.to_string();
        assert!(display.contains("\"extreme\""));
        assert!(display.contains("low, medium or high"));
    }

    #[test]
    fn status_error_display() {
        let error = TransportError::Status {
            status: 422,
            body: "bad input".into(),
        };
        assert_eq!(error.to_string(), "server returned 422: bad input");
    }
}
