use chrono::{DateTime, Utc};

use crate::app::timeline::TimelineAggregator;
use crate::model::{Message, MessageId, NodeUpdate, RunId};
use crate::processor;

/// Lifecycle of a single turn.
///
/// `Idle → Streaming → FinalizePending → Archived → Idle`, where the last
/// step happens implicitly on the next submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Streaming,
    FinalizePending,
    Archived,
}

/// Conversation plus activity state for one research session. In memory only.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Conversation, oldest first. Replaced wholesale by server snapshots.
    pub messages: Vec<Message>,

    pub timeline: TimelineAggregator,

    /// Finalize stage observed for the current turn, archive not yet done.
    pub finalize_pending: bool,

    /// A stream subscription is delivering events.
    pub loading: bool,

    pub phase: TurnPhase,

    /// Run whose events are accepted. Events tagged with any other run are stale.
    pub active_run: Option<RunId>,

    pub turn_started_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            timeline: TimelineAggregator::new(),
            finalize_pending: false,
            loading: false,
            phase: TurnPhase::Idle,
            active_run: None,
            turn_started_at: None,
        }
    }

    /// A turn is in flight while its stream is still delivering.
    pub fn in_flight(&self) -> bool {
        self.loading
    }

    pub fn accepts(&self, run_id: &RunId) -> bool {
        self.active_run.as_ref() == Some(run_id)
    }

    /// Append the entries of one update tick. Returns how many were appended.
    pub fn apply_update(&mut self, update: &NodeUpdate) -> usize {
        let tick = processor::process_update(update);
        let appended = tick.entries.len();
        for entry in tick.entries {
            self.timeline.append(entry);
        }
        if tick.finalized && !self.finalize_pending {
            tracing::debug!("finalize stage observed, archive pending");
            self.finalize_pending = true;
            self.phase = TurnPhase::FinalizePending;
        }
        appended
    }

    pub fn apply_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// The stream stopped delivering, either normally or by failure.
    pub fn mark_idle(&mut self) {
        self.loading = false;
        if self.phase == TurnPhase::Streaming {
            self.phase = TurnPhase::Idle;
        }
    }

    /// Id of the newest message when it is an assistant message with an id.
    pub fn last_assistant_id(&self) -> Option<&MessageId> {
        self.messages
            .last()
            .filter(|m| m.is_assistant())
            .and_then(|m| m.id.as_ref())
    }

    /// Archive the live timeline once the turn is really over: finalize
    /// observed, stream idle and the closing assistant message identified.
    /// Otherwise a no-op; callers re-check on every later stream event.
    pub fn try_archive(&mut self) -> Option<MessageId> {
        if !self.finalize_pending || self.loading {
            return None;
        }
        let message_id = self.last_assistant_id()?.clone();

        self.timeline.archive(message_id.clone());
        self.finalize_pending = false;
        self.phase = TurnPhase::Archived;
        tracing::info!(
            %message_id,
            entries = self.timeline.lookup(&message_id).len(),
            "turn archived"
        );
        Some(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finalize_tick() -> NodeUpdate {
        NodeUpdate::new().with_node("finalize_answer", json!({"messages": []}))
    }

    #[test]
    fn finalize_sets_pending() {
        let mut session = SessionState::new();
        session.loading = true;
        session.phase = TurnPhase::Streaming;

        assert_eq!(session.apply_update(&finalize_tick()), 1);
        assert!(session.finalize_pending);
        assert_eq!(session.phase, TurnPhase::FinalizePending);
    }

    #[test]
    fn archive_deferred_while_loading() {
        let mut session = SessionState::new();
        session.loading = true;
        session.apply_update(&finalize_tick());
        session.apply_messages(vec![Message::assistant(Some("m1".into()), "answer")]);

        assert!(session.try_archive().is_none());
        assert!(session.finalize_pending);
        assert!(session.timeline.history().is_empty());
    }

    #[test]
    fn archive_deferred_without_assistant_id() {
        let mut session = SessionState::new();
        session.apply_update(&finalize_tick());
        session.apply_messages(vec![Message::assistant(None, "answer")]);

        assert!(session.try_archive().is_none());
        assert!(session.try_archive().is_none());
        assert!(session.finalize_pending);
        assert!(session.timeline.history().is_empty());
    }

    #[test]
    fn archive_requires_assistant_as_last_message() {
        let mut session = SessionState::new();
        session.apply_update(&finalize_tick());
        session.apply_messages(vec![
            Message::assistant(Some("m0".into()), "earlier"),
            Message::human("follow-up"),
        ]);

        assert!(session.try_archive().is_none());
    }

    #[test]
    fn archive_without_finalize_is_noop() {
        let mut session = SessionState::new();
        session.apply_messages(vec![Message::assistant(Some("m1".into()), "answer")]);

        assert!(session.try_archive().is_none());
        assert!(session.timeline.history().is_empty());
    }

    #[test]
    fn archive_clears_pending_once() {
        let mut session = SessionState::new();
        session.apply_update(&finalize_tick());
        session.apply_messages(vec![Message::assistant(Some("m1".into()), "answer")]);

        assert_eq!(session.try_archive(), Some(MessageId::new("m1")));
        assert!(!session.finalize_pending);
        assert_eq!(session.phase, TurnPhase::Archived);
        assert!(session.try_archive().is_none());
    }

    #[test]
    fn idle_without_finalize_returns_to_idle() {
        let mut session = SessionState::new();
        session.loading = true;
        session.phase = TurnPhase::Streaming;

        session.mark_idle();

        assert!(!session.loading);
        assert_eq!(session.phase, TurnPhase::Idle);
    }
}
