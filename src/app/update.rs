use crate::app::{controller, handle_key, AppState, Effect};
use crate::event::{AppEvent, StreamEvent};

/// Update function following Elm Architecture.
/// Applies one event to the state and returns the side effects to run.
/// No I/O - fully deterministic and unit testable.
pub fn update(state: &mut AppState, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::Key(key) => handle_key(state, key),

        AppEvent::Tick(now) => {
            // Elapsed time computed in view from `now`
            state.meta.now = now;
            Vec::new()
        }

        AppEvent::Stream { run_id, event } => {
            if !state.session.accepts(&run_id) {
                tracing::debug!(%run_id, "dropping event from inactive run");
                return Vec::new();
            }
            apply_stream_event(state, event);
            // Every stream event may complete the archive preconditions
            state.session.try_archive();
            Vec::new()
        }
    }
}

fn apply_stream_event(state: &mut AppState, event: StreamEvent) {
    match event {
        StreamEvent::Updates(update) => {
            state.session.apply_update(&update);
        }
        StreamEvent::Values(messages) => {
            state.session.apply_messages(messages);
        }
        StreamEvent::Finished => {
            tracing::debug!("stream finished");
            state.session.mark_idle();
        }
        StreamEvent::Failed(error) => {
            tracing::error!(%error, "stream failed");
            state.push_error("agent", &error);
            state.session.mark_idle();
        }
    }
}

/// Submit the current draft with the selected effort and model.
pub fn submit_draft(state: &mut AppState) -> Vec<Effect> {
    let model = state.model().to_string();
    match controller::submit(&mut state.session, &state.ui.draft, state.ui.effort, &model) {
        Some((run_id, request)) => {
            state.ui.draft.clear();
            state.ui.selected_message = None;
            state.ui.conversation_scroll = 0;
            // Errors of earlier turns stay in the log file only
            state.meta.errors.clear();
            vec![Effect::StartRun { run_id, request }]
        }
        None => Vec::new(),
    }
}

/// Stop the active run and restart the session.
pub fn cancel_session(state: &mut AppState) -> Vec<Effect> {
    controller::cancel(&mut state.session);
    state.ui.reset();
    vec![Effect::StopRun]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::model::{Message, NodeUpdate, RunId};
    use chrono::Utc;
    use serde_json::json;

    fn started(state: &mut AppState, text: &str) -> RunId {
        state.ui.draft = text.to_string();
        match submit_draft(state).pop() {
            Some(Effect::StartRun { run_id, .. }) => run_id,
            other => panic!("expected StartRun, got {:?}", other),
        }
    }

    #[test]
    fn tick_updates_clock_only() {
        let mut state = AppState::new();
        let now = Utc::now();
        let effects = update(&mut state, AppEvent::Tick(now));
        assert!(effects.is_empty());
        assert_eq!(state.meta.now, now);
    }

    #[test]
    fn stale_run_events_are_dropped() {
        let mut state = AppState::new();
        started(&mut state, "q");

        let update_tick = NodeUpdate::new().with_node("generate_query", json!({"search_query": ["x"]}));
        update(
            &mut state,
            AppEvent::Stream {
                run_id: RunId::new("someone-else"),
                event: StreamEvent::Updates(update_tick),
            },
        );

        assert!(state.session.timeline.live().is_empty());
    }

    #[test]
    fn failure_stops_loading_and_records_error() {
        let mut state = AppState::new();
        let run_id = started(&mut state, "q");

        update(
            &mut state,
            AppEvent::Stream {
                run_id,
                event: StreamEvent::Failed(TransportError::Stream("reset".into())),
            },
        );

        assert!(!state.session.loading);
        assert_eq!(state.meta.errors.back().unwrap(), "agent: stream: reset");
    }

    #[test]
    fn values_after_finished_complete_archive() {
        let mut state = AppState::new();
        let run_id = started(&mut state, "q");

        let finalize = NodeUpdate::new().with_node("finalize_answer", json!({}));
        for event in [
            StreamEvent::Updates(finalize),
            StreamEvent::Finished,
            StreamEvent::Values(vec![
                Message::human("q"),
                Message::assistant(Some("m1".into()), "a"),
            ]),
        ] {
            update(
                &mut state,
                AppEvent::Stream {
                    run_id: run_id.clone(),
                    event,
                },
            );
        }

        assert_eq!(state.session.timeline.lookup(&"m1".into()).len(), 1);
        assert!(!state.session.finalize_pending);
    }

    #[test]
    fn cancel_emits_stop_and_clears_draft() {
        let mut state = AppState::new();
        started(&mut state, "q");
        state.ui.draft = "half typed".into();

        let effects = cancel_session(&mut state);

        assert_eq!(effects, vec![Effect::StopRun]);
        assert!(state.ui.draft.is_empty());
        assert!(state.session.messages.is_empty());
    }
}
