//! Decoding of agent server SSE events into stream events.

use serde::Deserialize;

use crate::error::TransportError;
use crate::event::StreamEvent;
use crate::model::{Message, NodeUpdate};

#[derive(Deserialize)]
struct ValuesState {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode one SSE event. `Ok(None)` for events the session does not consume
/// (`metadata`, `end`, heartbeats, ...).
pub fn decode_event(event: &str, data: &str) -> Result<Option<StreamEvent>, TransportError> {
    match event {
        "updates" => serde_json::from_str::<NodeUpdate>(data)
            .map(|update| Some(StreamEvent::Updates(update)))
            .map_err(|e| json_error(event, e)),
        "values" => serde_json::from_str::<ValuesState>(data)
            .map(|state| Some(StreamEvent::Values(state.messages)))
            .map_err(|e| json_error(event, e)),
        "error" => Err(TransportError::Remote(remote_error_message(data))),
        other => {
            tracing::trace!(event = other, "ignoring SSE event");
            Ok(None)
        }
    }
}

fn json_error(event: &str, e: serde_json::Error) -> TransportError {
    TransportError::Json {
        event: event.to_string(),
        message: e.to_string(),
    }
}

fn remote_error_message(data: &str) -> String {
    match serde_json::from_str::<ErrorPayload>(data) {
        Ok(ErrorPayload {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorPayload {
            error: Some(error), ..
        }) => error,
        _ if data.trim().is_empty() => "An error occurred during streaming".to_string(),
        _ => data.to_string(),
    }
}
