// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (view switching,
// scrolling, position/team selection).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::{UserCommand, View};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Weeks never need more than two digits.
const MAX_WEEK_DIGITS: usize = 2;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (week changes, refresh, quit). Returns `None` when the
/// key was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.week_input.is_some() {
        return handle_week_input(key_event.code, view_state);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UserCommand::Quit),

        // View switching
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(view) = c.to_digit(10).and_then(View::from_number) {
                view_state.active_view = view;
            }
            None
        }
        KeyCode::Tab => {
            view_state.active_view = view_state.active_view.next();
            None
        }
        KeyCode::BackTab => {
            view_state.active_view = view_state.active_view.prev();
            None
        }

        // Scrolling (main panel)
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            view_state.scroll_offset.insert(view_state.active_view, 0);
            None
        }

        // Position (free agents) / team (report cards) selection
        KeyCode::Char('l') => {
            cycle_selection(view_state, true);
            None
        }
        KeyCode::Char('h') => {
            cycle_selection(view_state, false);
            None
        }

        // Week navigation
        KeyCode::Char(']') | KeyCode::Right => Some(UserCommand::NextWeek),
        KeyCode::Char('[') | KeyCode::Left => Some(UserCommand::PrevWeek),

        KeyCode::Char('g') => {
            view_state.week_input = Some(String::new());
            None
        }

        KeyCode::Char('r') => Some(UserCommand::Refresh),

        _ => None,
    }
}

/// Keys while the go-to-week prompt is open. Enter submits the typed week
/// (the app clamps it); an empty or zero entry just closes the prompt.
fn handle_week_input(code: KeyCode, view_state: &mut ViewState) -> Option<UserCommand> {
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(digits) = view_state.week_input.as_mut() {
                if digits.len() < MAX_WEEK_DIGITS {
                    digits.push(c);
                }
            }
            None
        }
        KeyCode::Backspace => {
            if let Some(digits) = view_state.week_input.as_mut() {
                digits.pop();
            }
            None
        }
        KeyCode::Enter => view_state
            .week_input
            .take()
            .and_then(|digits| digits.parse::<u32>().ok())
            .filter(|&week| week > 0)
            .map(UserCommand::SelectWeek),
        KeyCode::Esc => {
            view_state.week_input = None;
            None
        }
        _ => None,
    }
}

/// Move the view's sub-selection forward or back, wrapping around.
fn cycle_selection(view_state: &mut ViewState, forward: bool) {
    let len = view_state.sub_selection_len();
    if len == 0 {
        return;
    }
    let current = match view_state.active_view {
        View::FreeAgents => &mut view_state.fa_position,
        View::ReportCards => &mut view_state.selected_team,
        _ => return,
    };
    *current = if forward {
        (*current + 1) % len
    } else {
        (*current + len - 1) % len
    };
    view_state.scroll_offset.insert(view_state.active_view, 0);
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_view)
        .or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Widgets clamp the offset to their row count when rendering.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_view)
        .or_insert(0);
    *offset = offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::loaded_state;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn number_keys_switch_views() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Char('3')), &mut state), None);
        assert_eq!(state.active_view, View::ReportCards);
        handle_key(key(KeyCode::Char('5')), &mut state);
        assert_eq!(state.active_view, View::DraftValue);
        // Unmapped digits leave the view alone.
        handle_key(key(KeyCode::Char('9')), &mut state);
        assert_eq!(state.active_view, View::DraftValue);
    }

    #[test]
    fn tab_cycles_views_both_ways() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.active_view, View::FreeAgents);
        handle_key(key(KeyCode::BackTab), &mut state);
        handle_key(key(KeyCode::BackTab), &mut state);
        assert_eq!(state.active_view, View::DraftValue);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn brackets_and_arrows_change_week() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char(']')), &mut state),
            Some(UserCommand::NextWeek)
        );
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut state),
            Some(UserCommand::PrevWeek)
        );
    }

    #[test]
    fn r_requests_refresh() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::Refresh)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(release, &mut state), None);
    }

    #[test]
    fn scrolling_is_per_view_and_does_not_underflow() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.scroll(), 0);

        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll(), 11);

        state.active_view = View::Matchups;
        assert_eq!(state.scroll(), 0);

        state.active_view = View::BoomChoke;
        handle_key(key(KeyCode::Home), &mut state);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn l_and_h_cycle_free_agent_positions() {
        let mut state = loaded_state(4);
        state.active_view = View::FreeAgents;
        // Sample dashboard has QB and K tables.
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(state.fa_position, 1);
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(state.fa_position, 0);
        handle_key(key(KeyCode::Char('h')), &mut state);
        assert_eq!(state.fa_position, 1);
    }

    #[test]
    fn l_cycles_teams_and_resets_scroll() {
        let mut state = loaded_state(4);
        state.active_view = View::ReportCards;
        state.scroll_offset.insert(View::ReportCards, 4);
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(state.selected_team, 1);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn selection_keys_are_noops_elsewhere_or_without_data() {
        let mut state = ViewState::default();
        state.active_view = View::FreeAgents;
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(state.fa_position, 0);

        let mut state = loaded_state(4);
        state.active_view = View::Matchups;
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(state.fa_position, 0);
        assert_eq!(state.selected_team, 0);
    }

    #[test]
    fn g_opens_week_prompt_and_enter_selects_week() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Char('g')), &mut state), None);
        assert_eq!(state.week_input.as_deref(), Some(""));

        // Digits go to the prompt, not the view switcher.
        handle_key(key(KeyCode::Char('1')), &mut state);
        handle_key(key(KeyCode::Char('4')), &mut state);
        handle_key(key(KeyCode::Char('7')), &mut state);
        assert_eq!(state.week_input.as_deref(), Some("14"));
        assert_eq!(state.active_view, View::BoomChoke);

        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::SelectWeek(14))
        );
        assert!(state.week_input.is_none());
    }

    #[test]
    fn week_prompt_backspace_and_escape() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('g')), &mut state);
        handle_key(key(KeyCode::Char('9')), &mut state);
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.week_input.as_deref(), Some(""));

        // Esc closes the prompt without quitting.
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert!(state.week_input.is_none());
    }

    #[test]
    fn week_prompt_ignores_empty_and_zero() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('g')), &mut state);
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        assert!(state.week_input.is_none());

        handle_key(key(KeyCode::Char('g')), &mut state);
        handle_key(key(KeyCode::Char('0')), &mut state);
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
    }

    #[test]
    fn week_prompt_swallows_command_keys() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('g')), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Char('r')), &mut state), None);
        assert!(state.week_input.is_some());
        // Ctrl+C still quits.
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }
}
