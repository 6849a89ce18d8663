use std::collections::BTreeMap;

use crate::model::{MessageId, TimelineEntry};

/// Archived timelines keyed by the assistant message that concluded the turn.
pub type HistoryIndex = BTreeMap<MessageId, Vec<TimelineEntry>>;

/// Live activity timeline of the in-flight turn plus the archive of past turns.
#[derive(Debug, Clone, Default)]
pub struct TimelineAggregator {
    live: Vec<TimelineEntry>,
    history: HistoryIndex,
}

impl TimelineAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: TimelineEntry) {
        self.live.push(entry);
    }

    /// Clear the live timeline. History is untouched.
    pub fn reset(&mut self) {
        self.live.clear();
    }

    /// Snapshot the live timeline under `message_id`.
    pub fn archive(&mut self, message_id: MessageId) {
        let snapshot = self.live.clone();
        if let Some(previous) = self.history.insert(message_id.clone(), snapshot) {
            tracing::warn!(
                %message_id,
                previous_entries = previous.len(),
                "message finalized twice, archived timeline overwritten"
            );
        }
    }

    /// Archived timeline for `message_id`; empty when none was archived.
    pub fn lookup(&self, message_id: &MessageId) -> &[TimelineEntry] {
        self.history
            .get(message_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn live(&self) -> &[TimelineEntry] {
        &self.live
    }

    pub fn history(&self) -> &HistoryIndex {
        &self.history
    }
}
