use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::app::session::{SessionState, TurnPhase};
use crate::model::{Effort, Message, MessageId, TimelineEntry};

/// Maximum number of errors kept for the status bar.
pub const MAX_ERRORS: usize = 100;

/// Reasoning models offered for cycling in the input bar.
pub const DEFAULT_MODELS: [&str; 3] = ["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"];

/// Main application state.
/// Updated via `update(&mut state, event) -> effects`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Research session: conversation, timelines, turn lifecycle
    pub session: SessionState,

    /// Presentation state
    pub ui: UiState,

    /// Application-level bookkeeping
    pub meta: MetaState,
}

#[derive(Debug, Clone)]
pub struct UiState {
    /// Text being typed in the input box
    pub draft: String,

    /// Effort used for the next submission
    pub effort: Effort,

    /// Selectable reasoning models
    pub models: Vec<String>,

    /// Index into `models` of the model used for the next submission
    pub model_index: usize,

    /// Index into the conversation of the assistant message whose archived
    /// timeline is shown (None = follow the latest)
    pub selected_message: Option<usize>,

    /// Conversation scroll offset, in lines from the bottom
    pub conversation_scroll: usize,

    /// Furthest the conversation can scroll back, as of the last draw
    pub conversation_scroll_max: usize,

    /// Show help overlay
    pub show_help: bool,
}

#[derive(Debug, Clone)]
pub struct MetaState {
    /// Error message ring buffer (for status bar display)
    pub errors: VecDeque<String>,

    /// Time of the latest tick
    pub now: DateTime<Utc>,

    /// Signal to quit the application
    pub should_quit: bool,
}

/// What the activity panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySource<'a> {
    /// Live timeline of the in-flight (or not yet archived) turn
    Live,
    /// Archived timeline of a past assistant message
    Archived(&'a MessageId),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create new default application state
    pub fn new() -> Self {
        Self::with_settings(Effort::default(), DEFAULT_MODELS[1])
    }

    /// Create new state with the configured effort and reasoning model
    pub fn with_settings(effort: Effort, model: &str) -> Self {
        Self {
            session: SessionState::new(),
            ui: UiState::new(effort, model),
            meta: MetaState::new(),
        }
    }

    /// Record a non-fatal error for the status bar.
    pub fn push_error(&mut self, source: &str, error: impl std::fmt::Display) {
        if self.meta.errors.len() >= MAX_ERRORS {
            self.meta.errors.pop_front();
        }
        self.meta.errors.push_back(format!("{}: {}", source, error));
    }

    /// Which timeline the activity panel shows: the selected message's archive,
    /// else the live timeline while a turn is running or its timeline is not
    /// yet archived, else the archive of the latest assistant message.
    pub fn activity_source(&self) -> ActivitySource<'_> {
        if let Some(id) = self.selected_message_id() {
            return ActivitySource::Archived(id);
        }
        let session = &self.session;
        if session.in_flight() {
            return ActivitySource::Live;
        }
        if session.phase != TurnPhase::Archived && !session.timeline.live().is_empty() {
            return ActivitySource::Live;
        }
        session
            .messages
            .iter()
            .rev()
            .filter(|m| m.is_assistant())
            .find_map(|m| m.id.as_ref())
            .map(ActivitySource::Archived)
            .unwrap_or(ActivitySource::Live)
    }

    /// Entries for the activity panel.
    pub fn activity_entries(&self) -> &[TimelineEntry] {
        match self.activity_source() {
            ActivitySource::Live => self.session.timeline.live(),
            ActivitySource::Archived(id) => self.session.timeline.lookup(id),
        }
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.ui
            .selected_message
            .and_then(|idx| self.session.messages.get(idx))
    }

    fn selected_message_id(&self) -> Option<&MessageId> {
        self.selected_message()
            .filter(|m| m.is_assistant())
            .and_then(|m| m.id.as_ref())
    }

    pub fn model(&self) -> &str {
        &self.ui.models[self.ui.model_index]
    }
}

impl UiState {
    pub fn new(effort: Effort, model: &str) -> Self {
        let mut models: Vec<String> = DEFAULT_MODELS.iter().map(|m| m.to_string()).collect();
        let model_index = match models.iter().position(|m| m == model) {
            Some(idx) => idx,
            None => {
                models.insert(0, model.to_string());
                0
            }
        };

        Self {
            draft: String::new(),
            effort,
            models,
            model_index,
            selected_message: None,
            conversation_scroll: 0,
            conversation_scroll_max: 0,
            show_help: false,
        }
    }

    /// Clear per-session presentation state; effort and model survive.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.selected_message = None;
        self.conversation_scroll = 0;
    }
}

impl MetaState {
    pub fn new() -> Self {
        Self {
            errors: VecDeque::with_capacity(MAX_ERRORS),
            now: Utc::now(),
            should_quit: false,
        }
    }
}

impl Default for MetaState {
    fn default() -> Self {
        Self::new()
    }
}
