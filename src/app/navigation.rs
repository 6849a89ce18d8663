use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::update::{cancel_session, submit_draft};
use crate::app::{AppState, Effect};

/// Lines scrolled per PageUp / PageDown
const PAGE_JUMP: usize = 10;

/// Key handling: takes current state + keyboard event, mutates state and
/// returns the effects to run. No I/O.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Effect> {
    if key.kind == KeyEventKind::Release {
        return Vec::new();
    }

    // Help overlay has priority
    if state.ui.show_help {
        state.ui.show_help = false;
        return Vec::new();
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return handle_control_key(state, key.code);
    }

    match key.code {
        KeyCode::Enter => submit_draft(state),
        // Cancels a running turn; when idle, starts a new session
        KeyCode::Esc => cancel_session(state),
        KeyCode::Tab => {
            state.ui.effort = state.ui.effort.next();
            Vec::new()
        }
        KeyCode::Backspace => {
            state.ui.draft.pop();
            Vec::new()
        }
        KeyCode::PageUp => {
            state.ui.conversation_scroll = state
                .ui
                .conversation_scroll
                .saturating_add(PAGE_JUMP)
                .min(state.ui.conversation_scroll_max);
            Vec::new()
        }
        KeyCode::PageDown => {
            state.ui.conversation_scroll = state.ui.conversation_scroll.saturating_sub(PAGE_JUMP);
            Vec::new()
        }
        KeyCode::Char('?') if state.ui.draft.is_empty() => {
            state.ui.show_help = true;
            Vec::new()
        }
        KeyCode::Char(c) => {
            state.ui.draft.push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_control_key(state: &mut AppState, code: KeyCode) -> Vec<Effect> {
    match code {
        KeyCode::Char('q') => {
            state.meta.should_quit = true;
            Vec::new()
        }
        // Ctrl+C cancels a running turn, otherwise quits
        KeyCode::Char('c') => {
            if state.session.in_flight() {
                cancel_session(state)
            } else {
                state.meta.should_quit = true;
                Vec::new()
            }
        }
        KeyCode::Char('t') => {
            state.ui.model_index = (state.ui.model_index + 1) % state.ui.models.len();
            Vec::new()
        }
        KeyCode::Char('p') => {
            select_assistant_message(state, Direction::Older);
            Vec::new()
        }
        KeyCode::Char('n') => {
            select_assistant_message(state, Direction::Newer);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Older,
    Newer,
}

/// Move the selection to the next identified assistant message in `direction`.
/// Moving past the newest one clears the selection (follow latest).
fn select_assistant_message(state: &mut AppState, direction: Direction) {
    let candidates: Vec<usize> = state
        .session
        .messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_assistant() && m.id.is_some())
        .map(|(idx, _)| idx)
        .collect();

    let Some(&newest) = candidates.last() else {
        state.ui.selected_message = None;
        return;
    };

    state.ui.selected_message = match (state.ui.selected_message, direction) {
        (None, Direction::Older) => Some(newest),
        (None, Direction::Newer) => None,
        (Some(current), Direction::Older) => Some(
            candidates
                .iter()
                .rev()
                .find(|&&idx| idx < current)
                .copied()
                .unwrap_or(current),
        ),
        (Some(current), Direction::Newer) => candidates.iter().find(|&&idx| idx > current).copied(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effort, Message, TimelineEntry};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state_with_answers() -> AppState {
        let mut state = AppState::new();
        state.session.messages = vec![
            Message::human("q1"),
            Message::assistant(Some("a1".into()), "first"),
            Message::human("q2"),
            Message::assistant(Some("a2".into()), "second"),
        ];
        state
    }

    #[test]
    fn typing_edits_draft() {
        let mut state = AppState::new();
        handle_key(&mut state, key(KeyCode::Char('h')));
        handle_key(&mut state, key(KeyCode::Char('i')));
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.ui.draft, "h");
    }

    #[test]
    fn question_mark_types_when_draft_not_empty() {
        let mut state = AppState::new();
        state.ui.draft = "why".into();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.ui.draft, "why?");
        assert!(!state.ui.show_help);
    }

    #[test]
    fn question_mark_on_empty_draft_opens_help_and_any_key_closes() {
        let mut state = AppState::new();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert!(state.ui.show_help);
        handle_key(&mut state, key(KeyCode::Char('x')));
        assert!(!state.ui.show_help);
        assert!(state.ui.draft.is_empty());
    }

    #[test]
    fn tab_cycles_effort() {
        let mut state = AppState::with_settings(Effort::High, "m");
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.ui.effort, Effort::Low);
    }

    #[test]
    fn ctrl_t_cycles_model_with_wrap() {
        let mut state = AppState::new();
        let count = state.ui.models.len();
        let start = state.ui.model_index;
        for _ in 0..count {
            handle_key(&mut state, ctrl('t'));
        }
        assert_eq!(state.ui.model_index, start);
    }

    #[test]
    fn enter_submits_and_clears_draft() {
        let mut state = AppState::new();
        state.ui.draft = "What is X?".into();
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [Effect::StartRun { .. }]));
        assert!(state.ui.draft.is_empty());
        assert!(state.session.in_flight());
    }

    #[test]
    fn enter_on_blank_draft_does_nothing() {
        let mut state = AppState::new();
        state.ui.draft = "   ".into();
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(state.ui.draft, "   ");
    }

    #[test]
    fn ctrl_c_cancels_when_in_flight_then_quits_when_idle() {
        let mut state = AppState::new();
        state.ui.draft = "q".into();
        handle_key(&mut state, key(KeyCode::Enter));

        let effects = handle_key(&mut state, ctrl('c'));
        assert_eq!(effects, vec![Effect::StopRun]);
        assert!(!state.meta.should_quit);

        handle_key(&mut state, ctrl('c'));
        assert!(state.meta.should_quit);
    }

    #[test]
    fn esc_when_idle_starts_new_session() {
        let mut state = state_with_answers();
        state.session.timeline.append(TimelineEntry::new("Reflection", "done"));
        state.session.timeline.archive("a2".into());
        state.ui.selected_message = Some(1);
        assert!(!state.session.in_flight());
        assert_eq!(state.session.timeline.history().len(), 1);

        let effects = handle_key(&mut state, key(KeyCode::Esc));

        assert_eq!(effects, vec![Effect::StopRun]);
        assert!(state.session.messages.is_empty());
        assert!(state.session.timeline.history().is_empty());
        assert!(state.session.timeline.live().is_empty());
        assert!(state.ui.selected_message.is_none());
        assert!(!state.meta.should_quit);
    }

    #[test]
    fn ctrl_p_walks_back_through_assistant_messages() {
        let mut state = state_with_answers();
        handle_key(&mut state, ctrl('p'));
        assert_eq!(state.ui.selected_message, Some(3));
        handle_key(&mut state, ctrl('p'));
        assert_eq!(state.ui.selected_message, Some(1));
        handle_key(&mut state, ctrl('p'));
        assert_eq!(state.ui.selected_message, Some(1));
    }

    #[test]
    fn ctrl_n_past_newest_follows_latest() {
        let mut state = state_with_answers();
        state.ui.selected_message = Some(1);
        handle_key(&mut state, ctrl('n'));
        assert_eq!(state.ui.selected_message, Some(3));
        handle_key(&mut state, ctrl('n'));
        assert_eq!(state.ui.selected_message, None);
    }

    #[test]
    fn page_keys_scroll_conversation() {
        let mut state = AppState::new();
        state.ui.conversation_scroll_max = 50;
        handle_key(&mut state, key(KeyCode::PageUp));
        assert_eq!(state.ui.conversation_scroll, PAGE_JUMP);
        handle_key(&mut state, key(KeyCode::PageDown));
        handle_key(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.ui.conversation_scroll, 0);
    }

    #[test]
    fn page_up_stops_at_top_of_conversation() {
        let mut state = AppState::new();
        state.ui.conversation_scroll_max = 15;
        for _ in 0..5 {
            handle_key(&mut state, key(KeyCode::PageUp));
        }
        assert_eq!(state.ui.conversation_scroll, 15);

        // One PgDn moves back down right away
        handle_key(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.ui.conversation_scroll, 5);
    }

    #[test]
    fn page_up_with_nothing_to_scroll_stays_at_bottom() {
        let mut state = AppState::new();
        handle_key(&mut state, key(KeyCode::PageUp));
        assert_eq!(state.ui.conversation_scroll, 0);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut state = AppState::new();
        handle_key(&mut state, ctrl('q'));
        assert!(state.meta.should_quit);
    }
}
