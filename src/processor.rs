//! Turns agent node updates into activity timeline entries.
//!
//! Pure functions only: the caller owns the timeline and the finalize flag.

use crate::model::{NodePayload, NodeUpdate, Source, TimelineEntry};

/// Maximum number of source labels quoted in a web-research entry.
const MAX_LABELS: usize = 3;

/// Result of processing one update tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedTick {
    /// Entries in the order their nodes appeared in the tick.
    pub entries: Vec<TimelineEntry>,
    /// The finalize stage was observed in this tick.
    pub finalized: bool,
}

/// Classify every node of a tick independently.
pub fn process_update(update: &NodeUpdate) -> ProcessedTick {
    let mut tick = ProcessedTick::default();

    for (node, payload) in update.nodes() {
        let payload = NodePayload::from_node(node, payload);
        if matches!(payload, NodePayload::Finalize) {
            tick.finalized = true;
        }
        match classify(&payload) {
            Some(entry) => tick.entries.push(entry),
            None => tracing::trace!(node, "no timeline entry for node"),
        }
    }

    tick
}

/// Map one payload to at most one timeline entry.
pub fn classify(payload: &NodePayload) -> Option<TimelineEntry> {
    match payload {
        NodePayload::QueryGeneration { queries } => {
            if queries.is_empty() {
                return None;
            }
            Some(TimelineEntry::new(
                TimelineEntry::GENERATING_QUERIES,
                queries.join(", "),
            ))
        }
        NodePayload::WebResearch { sources } => Some(TimelineEntry::new(
            TimelineEntry::WEB_RESEARCH,
            format_web_research(sources),
        )),
        NodePayload::Reflection {
            is_sufficient,
            follow_up_queries,
        } => Some(TimelineEntry::new(
            TimelineEntry::REFLECTION,
            format_reflection(*is_sufficient, follow_up_queries),
        )),
        NodePayload::Finalize => Some(TimelineEntry::new(
            TimelineEntry::FINALIZING,
            "Composing and presenting the final answer.",
        )),
        NodePayload::Unrecognized => None,
    }
}

fn format_web_research(sources: &[Source]) -> String {
    let labels = distinct_labels(sources, MAX_LABELS);
    let related = if labels.is_empty() {
        "N/A".to_string()
    } else {
        labels.join(", ")
    };
    format!("Gathered {} sources. Related to: {}.", sources.len(), related)
}

fn format_reflection(is_sufficient: bool, follow_up_queries: &[String]) -> String {
    if is_sufficient {
        return "Search successful, generating final answer.".to_string();
    }
    let follow_ups = if follow_up_queries.is_empty() {
        "N/A".to_string()
    } else {
        follow_up_queries.join(", ")
    };
    format!("Need more information, searching for {}", follow_ups)
}

/// First `limit` distinct non-empty labels, in first-seen order.
fn distinct_labels(sources: &[Source], limit: usize) -> Vec<&str> {
    let mut labels: Vec<&str> = Vec::with_capacity(limit);
    for source in sources {
        if labels.len() == limit {
            break;
        }
        let label = source.label.as_str();
        if !label.is_empty() && !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}
