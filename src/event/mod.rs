use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;

use crate::error::TransportError;
use crate::model::{Message, NodeUpdate, RunId};

/// All events that can occur in the application.
/// Sourced from the agent stream, keyboard input and timers.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input event
    Key(KeyEvent),

    /// Timer tick (for elapsed time display)
    Tick(DateTime<Utc>),

    /// Event from the stream subscription identified by `run_id`
    Stream { run_id: RunId, event: StreamEvent },
}

/// What a stream subscription can report.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Partial state from one or more pipeline nodes
    Updates(NodeUpdate),

    /// Full conversation snapshot, including server-assigned message ids
    Values(Vec<Message>),

    /// Stream ended normally; no further updates for this run
    Finished,

    /// Stream ended with a transport failure
    Failed(TransportError),
}
