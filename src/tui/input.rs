// Keyboard input handling for the lineup TUI.

use crossterm::event::{KeyCode, KeyEvent};

use crate::lineup::formation::{self, SLOT_COUNT};
use crate::session::{Session, Severity};

use super::{Mode, Pane, ViewState};

/// What the main loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

/// Apply a key press to the view and session.
pub fn handle_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) -> InputOutcome {
    match view.mode {
        Mode::Browse => handle_browse_key(key, view, session),
        Mode::PickPlayer => {
            handle_picker_key(key, view, session);
            InputOutcome::Continue
        }
        Mode::EditName => {
            handle_name_key(key, view, session);
            InputOutcome::Continue
        }
    }
}

fn handle_browse_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) -> InputOutcome {
    // Pane-independent keys first.
    match key.code {
        KeyCode::Char('q') => return InputOutcome::Quit,
        KeyCode::Tab => {
            view.pane = view.pane.next();
            return InputOutcome::Continue;
        }
        KeyCode::Char('s') => {
            match session.save() {
                Ok(notice) => view.notice = Some(notice),
                Err(e) => tracing::error!("save failed: {e:#}"),
            }
            view.refresh_saved(session);
            return InputOutcome::Continue;
        }
        KeyCode::Char('n') => {
            view.mode = Mode::EditName;
            view.name_input = session.lineup_name.clone();
            return InputOutcome::Continue;
        }
        _ => {}
    }

    match view.pane {
        Pane::Board => handle_board_key(key, view, session),
        Pane::Teams => handle_teams_key(key, view, session),
        Pane::Saved => handle_saved_key(key, view, session),
    }
    InputOutcome::Continue
}

fn handle_board_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            view.cursor_slot = (view.cursor_slot + SLOT_COUNT - 1) % SLOT_COUNT;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            view.cursor_slot = (view.cursor_slot + 1) % SLOT_COUNT;
        }
        KeyCode::Enter => {
            view.mode = Mode::PickPlayer;
            view.picker_filter.clear();
            view.picker_cursor = 0;
            view.refresh_picker(session);
        }
        KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
            session.clear_slot(view.cursor_slot);
        }
        KeyCode::Char('f') => {
            let notice = session.select_formation(next_formation(&session.formation_id));
            view.notice = Some(notice);
        }
        _ => {}
    }
}

fn handle_teams_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view.team_cursor = view.team_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view.team_cursor + 1 < view.team_choices.len() {
                view.team_cursor += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(team) = view.team_choices.get(view.team_cursor).cloned() {
                let mut rng = rand::thread_rng();
                view.notice = Some(session.auto_fill(&team, &mut rng));
            }
        }
        KeyCode::Char('r') => {
            view.shuffle_teams(session);
        }
        _ => {}
    }
}

fn handle_saved_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view.saved_cursor = view.saved_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view.saved_cursor + 1 < view.saved.len() {
                view.saved_cursor += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(id) = view.saved.get(view.saved_cursor).map(|l| l.id.clone()) {
                match session.load(&id) {
                    Ok(notice) => view.notice = Some(notice),
                    Err(e) => tracing::error!("load failed: {e:#}"),
                }
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = view.saved.get(view.saved_cursor).map(|l| l.id.clone()) {
                match session.delete(&id) {
                    Ok(notice) => view.notice = Some(notice),
                    Err(e) => tracing::error!("delete failed: {e:#}"),
                }
                view.refresh_saved(session);
            }
        }
        _ => {}
    }
}

fn handle_picker_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) {
    match key.code {
        KeyCode::Esc => {
            view.mode = Mode::Browse;
        }
        KeyCode::Up => {
            view.picker_cursor = view.picker_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if view.picker_cursor + 1 < view.picker.len() {
                view.picker_cursor += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(player) = view.picker.get(view.picker_cursor).cloned() {
                let notice = session.assign_player(view.cursor_slot, player);
                let accepted = notice.severity == Severity::Success;
                view.notice = Some(notice);
                if accepted {
                    view.mode = Mode::Browse;
                }
            }
        }
        KeyCode::Backspace => {
            view.picker_filter.pop();
            view.refresh_picker(session);
        }
        KeyCode::Char(c) => {
            view.picker_filter.push(c);
            view.refresh_picker(session);
        }
        _ => {}
    }
}

fn handle_name_key(key: KeyEvent, view: &mut ViewState, session: &mut Session) {
    match key.code {
        KeyCode::Esc => {
            view.mode = Mode::Browse;
            view.name_input.clear();
        }
        KeyCode::Enter => {
            session.lineup_name = view.name_input.trim().to_string();
            view.mode = Mode::Browse;
        }
        KeyCode::Backspace => {
            view.name_input.pop();
        }
        KeyCode::Char(c) => {
            view.name_input.push(c);
        }
        _ => {}
    }
}

/// The formation after `current` in the catalog, wrapping around.
fn next_formation(current: &str) -> &'static str {
    let ids: Vec<&'static str> = formation::FORMATIONS.iter().map(|f| f.id).collect();
    let idx = ids.iter().position(|&id| id == current);
    match idx {
        Some(i) => ids[(i + 1) % ids.len()],
        None => ids[0],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Position, Roster, RosterPlayer, Team};
    use crate::store::LineupStore;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn player(id: &str, name: &str, position: Position, team: &str) -> RosterPlayer {
        RosterPlayer {
            id: id.to_string(),
            name: name.to_string(),
            position,
            team: team.to_string(),
            image: "/noFilter.png".to_string(),
            rating: None,
        }
    }

    fn test_session() -> Session {
        let roster = Roster {
            players: vec![
                player("gk1", "Sam Keller", Position::Goalkeeper, "Lions"),
                player("gk2", "Noor Aden", Position::Goalkeeper, "Tigers"),
                player("d1", "Ivo Hart", Position::Defender, "Lions"),
            ],
            teams: vec![Team {
                id: "lions".to_string(),
                name: "Lions".to_string(),
                short_name: "LIO".to_string(),
                logo: None,
                primary_color: None,
                secondary_color: None,
            }],
        };
        Session::new(roster, LineupStore::open(":memory:").unwrap(), "2-3-1")
    }

    #[test]
    fn q_quits_only_in_browse_mode() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut view, &mut session),
            InputOutcome::Quit
        );

        view.mode = Mode::PickPlayer;
        view.refresh_picker(&session);
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut view, &mut session),
            InputOutcome::Continue
        );
        // The 'q' went into the filter instead.
        assert_eq!(view.picker_filter, "q");
    }

    #[test]
    fn tab_cycles_panes() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Tab), &mut view, &mut session);
        assert_eq!(view.pane, Pane::Teams);
        handle_key(key(KeyCode::Tab), &mut view, &mut session);
        assert_eq!(view.pane, Pane::Saved);
        handle_key(key(KeyCode::Tab), &mut view, &mut session);
        assert_eq!(view.pane, Pane::Board);
    }

    #[test]
    fn slot_cursor_wraps_both_directions() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Left), &mut view, &mut session);
        assert_eq!(view.cursor_slot, SLOT_COUNT - 1);
        handle_key(key(KeyCode::Right), &mut view, &mut session);
        assert_eq!(view.cursor_slot, 0);
    }

    #[test]
    fn enter_opens_picker_with_slot_candidates() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Enter), &mut view, &mut session);
        assert_eq!(view.mode, Mode::PickPlayer);
        // Slot 0 requires a goalkeeper; both keepers qualify.
        assert_eq!(view.picker.len(), 2);
    }

    #[test]
    fn picker_filter_narrows_and_assigns() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Enter), &mut view, &mut session);
        for c in "tigers".chars() {
            handle_key(key(KeyCode::Char(c)), &mut view, &mut session);
        }
        assert_eq!(view.picker.len(), 1);
        assert_eq!(view.picker[0].id, "gk2");

        handle_key(key(KeyCode::Enter), &mut view, &mut session);
        assert_eq!(view.mode, Mode::Browse);
        assert_eq!(session.board.get(0).unwrap().id, "gk2");
    }

    #[test]
    fn picker_stays_open_on_rejected_assignment() {
        let mut session = test_session();
        let gk = session.roster.player_by_id("gk1").unwrap().clone();
        session.assign_player(0, gk);

        let mut view = ViewState::for_session(&session);
        handle_key(key(KeyCode::Enter), &mut view, &mut session);
        // Cursor starts on gk1, who is already placed.
        handle_key(key(KeyCode::Enter), &mut view, &mut session);

        assert_eq!(view.mode, Mode::PickPlayer);
        let notice = view.notice.as_ref().unwrap();
        assert_eq!(notice.title, "Player Already Selected");
    }

    #[test]
    fn x_clears_cursor_slot() {
        let mut session = test_session();
        let gk = session.roster.player_by_id("gk1").unwrap().clone();
        session.assign_player(0, gk);

        let mut view = ViewState::for_session(&session);
        handle_key(key(KeyCode::Char('x')), &mut view, &mut session);
        assert!(session.board.is_empty());
    }

    #[test]
    fn f_cycles_formation_catalog() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Char('f')), &mut view, &mut session);
        assert_eq!(session.formation_id, "2-2-2");
        handle_key(key(KeyCode::Char('f')), &mut view, &mut session);
        assert_eq!(session.formation_id, "3-2-1");
        handle_key(key(KeyCode::Char('f')), &mut view, &mut session);
        assert_eq!(session.formation_id, "2-3-1");
    }

    #[test]
    fn next_formation_recovers_from_unknown_id() {
        assert_eq!(next_formation("4-3-3"), "2-3-1");
    }

    #[test]
    fn name_editing_commits_on_enter_and_cancels_on_esc() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Char('n')), &mut view, &mut session);
        assert_eq!(view.mode, Mode::EditName);
        for c in "My XI".chars() {
            handle_key(key(KeyCode::Char(c)), &mut view, &mut session);
        }
        handle_key(key(KeyCode::Enter), &mut view, &mut session);
        assert_eq!(session.lineup_name, "My XI");
        assert_eq!(view.mode, Mode::Browse);

        handle_key(key(KeyCode::Char('n')), &mut view, &mut session);
        handle_key(key(KeyCode::Char('z')), &mut view, &mut session);
        handle_key(key(KeyCode::Esc), &mut view, &mut session);
        assert_eq!(session.lineup_name, "My XI");
    }

    #[test]
    fn save_key_surfaces_warning_for_empty_board() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);

        handle_key(key(KeyCode::Char('s')), &mut view, &mut session);
        let notice = view.notice.as_ref().unwrap();
        assert_eq!(notice.title, "Not Enough Players");
        assert!(view.saved.is_empty());
    }

    #[test]
    fn teams_enter_autofills_from_selected_team() {
        let mut session = test_session();
        let mut view = ViewState::for_session(&session);
        view.pane = Pane::Teams;

        handle_key(key(KeyCode::Enter), &mut view, &mut session);
        let notice = view.notice.as_ref().unwrap();
        // Lions have a keeper and a defender, so a partial fill succeeds.
        assert_eq!(notice.title, "Lineup Pre-filled");
        assert_eq!(session.board.filled_count(), 2);
        assert_eq!(session.lineup_name, "LIO vs Random");
    }
}
