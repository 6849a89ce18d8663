//! Turn submission and cancellation.

use chrono::Utc;

use crate::app::session::{SessionState, TurnPhase};
use crate::model::{Effort, Message, RunId, SessionRequest};

/// Start a new turn. Returns the run to start, or `None` when the input is
/// blank or a turn is still in flight (both leave the session untouched).
pub fn submit(
    session: &mut SessionState,
    text: &str,
    effort: Effort,
    model: &str,
) -> Option<(RunId, SessionRequest)> {
    if text.trim().is_empty() {
        return None;
    }
    if session.in_flight() {
        tracing::warn!("submit ignored: a turn is already in flight");
        return None;
    }

    session.timeline.reset();
    session.finalize_pending = false;

    let config = effort.config();
    session.messages.push(Message::human(text));

    let run_id = RunId::generate();
    session.active_run = Some(run_id.clone());
    session.loading = true;
    session.phase = TurnPhase::Streaming;
    session.turn_started_at = Some(Utc::now());

    tracing::info!(
        %run_id,
        %effort,
        query_count = config.query_count,
        loop_count = config.loop_count,
        model,
        "turn submitted"
    );

    let request = SessionRequest::new(session.messages.clone(), config, model);
    Some((run_id, request))
}

/// Abandon the current run and restart the session from scratch.
/// Nothing is archived. Returns the run that was active, if any.
pub fn cancel(session: &mut SessionState) -> Option<RunId> {
    let aborted = session.active_run.take();
    if let Some(ref run_id) = aborted {
        tracing::info!(%run_id, in_flight = session.loading, "session cancelled");
    }
    *session = SessionState::new();
    aborted
}
