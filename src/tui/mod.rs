// TUI: layout, input handling, and rendering for the lineup board.
//
// The TUI owns a `ViewState` (cursors, panes, picker contents) alongside the
// `Session` that holds the actual board. Input mutates the session through
// its methods and surfaces the returned `Notice` in the status bar; a render
// tick redraws at ~30 fps.

pub mod input;
pub mod layout;

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyModifiers};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::lineup::formation;
use crate::roster::{RosterPlayer, Team};
use crate::session::{Notice, Session, Severity};
use crate::store::SavedLineup;

use layout::{build_layout, AppLayout};

/// Teams shown in the auto-fill panel at once.
const TEAM_PANEL_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which panel has keyboard focus while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Board,
    Teams,
    Saved,
}

impl Pane {
    pub fn next(self) -> Pane {
        match self {
            Pane::Board => Pane::Teams,
            Pane::Teams => Pane::Saved,
            Pane::Saved => Pane::Board,
        }
    }
}

/// Input mode. `PickPlayer` and `EditName` capture typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    PickPlayer,
    EditName,
}

/// TUI-local state: cursors, focus, and display copies of session data.
pub struct ViewState {
    pub pane: Pane,
    pub mode: Mode,
    /// Board slot under the cursor (0..SLOT_COUNT).
    pub cursor_slot: usize,
    pub team_cursor: usize,
    pub saved_cursor: usize,
    pub picker_cursor: usize,
    /// Search text filtering the picker by player name or team.
    pub picker_filter: String,
    /// Candidates for the slot being filled, already filtered.
    pub picker: Vec<RosterPlayer>,
    /// Random subset of teams offered for auto-fill.
    pub team_choices: Vec<Team>,
    /// Saved lineups, refreshed after every store mutation.
    pub saved: Vec<SavedLineup>,
    /// Latest action outcome shown in the status bar.
    pub notice: Option<Notice>,
    /// Working buffer while renaming the lineup.
    pub name_input: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            pane: Pane::Board,
            mode: Mode::Browse,
            cursor_slot: 0,
            team_cursor: 0,
            saved_cursor: 0,
            picker_cursor: 0,
            picker_filter: String::new(),
            picker: Vec::new(),
            team_choices: Vec::new(),
            saved: Vec::new(),
            notice: None,
            name_input: String::new(),
        }
    }
}

impl ViewState {
    /// Build the initial view for a session: saved lineups plus a random
    /// selection of teams for the auto-fill panel.
    pub fn for_session(session: &Session) -> Self {
        let mut view = ViewState::default();
        view.shuffle_teams(session);
        view.refresh_saved(session);
        view
    }

    pub fn shuffle_teams(&mut self, session: &Session) {
        let mut rng = rand::thread_rng();
        self.team_choices = session.roster.random_teams(TEAM_PANEL_SIZE, &mut rng);
        self.team_cursor = 0;
    }

    /// Re-read the saved lineup list and keep the cursor in range.
    pub fn refresh_saved(&mut self, session: &Session) {
        self.saved = session.saved_lineups().unwrap_or_default();
        if self.saved_cursor >= self.saved.len() {
            self.saved_cursor = self.saved.len().saturating_sub(1);
        }
    }

    /// Recompute picker candidates for the cursor slot from the current
    /// filter text.
    pub fn refresh_picker(&mut self, session: &Session) {
        self.picker = session
            .candidates_for_slot(self.cursor_slot, &self.picker_filter)
            .into_iter()
            .cloned()
            .collect();
        if self.picker_cursor >= self.picker.len() {
            self.picker_cursor = self.picker.len().saturating_sub(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the complete frame.
fn render_frame(frame: &mut Frame, view: &ViewState, session: &Session) {
    let layout = build_layout(frame.area());

    render_status_bar(frame, &layout, view, session);
    if view.mode == Mode::PickPlayer {
        render_picker(frame, &layout, view);
    } else {
        render_board(frame, &layout, view, session);
    }
    render_teams(frame, &layout, view);
    render_saved(frame, &layout, view);
    render_help_bar(frame, &layout, view);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
    }
}

fn render_status_bar(frame: &mut Frame, layout: &AppLayout, view: &ViewState, session: &Session) {
    let name = if view.mode == Mode::EditName {
        format!("{}_", view.name_input)
    } else if session.lineup_name.is_empty() {
        "(unnamed)".to_string()
    } else {
        session.lineup_name.clone()
    };

    let mut spans = vec![Span::styled(
        format!(
            " {} | {} | {}/{} filled ",
            name,
            session.formation_id,
            session.board.filled_count(),
            formation::SLOT_COUNT
        ),
        Style::default().fg(Color::White),
    )];

    if let Some(notice) = &view.notice {
        spans.push(Span::styled(
            format!("| {}: {} ", notice.title, notice.body),
            Style::default().fg(severity_color(notice.severity)),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.status_bar);
}

fn render_board(frame: &mut Frame, layout: &AppLayout, view: &ViewState, session: &Session) {
    let focused = view.pane == Pane::Board;
    let mut lines: Vec<Line> = Vec::new();

    match session.formation() {
        Some(f) => {
            for row in f.rows {
                let mut spans: Vec<Span> = vec![Span::raw(" ")];
                for &slot in row.iter() {
                    let pos = formation::required_position(slot)
                        .map(|p| p.display_str())
                        .unwrap_or("?");
                    let occupant = session
                        .board
                        .get(slot)
                        .map(|p| p.name.as_str())
                        .unwrap_or("--");
                    let text = format!("[{} {} {}] ", slot + 1, pos, occupant);

                    let style = if focused && slot == view.cursor_slot {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else if session.board.get(slot).is_some() {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    spans.push(Span::styled(text, style));
                }
                lines.push(Line::from(spans));
                lines.push(Line::from(""));
            }
        }
        None => {
            lines.push(Line::from(format!(
                "Unknown formation {} (press f to pick one)",
                session.formation_id
            )));
        }
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("Board ({})", session.formation_id)),
    );
    frame.render_widget(paragraph, layout.board);
}

fn render_picker(frame: &mut Frame, layout: &AppLayout, view: &ViewState) {
    let pos = formation::required_position(view.cursor_slot)
        .map(|p| p.display_str())
        .unwrap_or("?");

    let mut lines: Vec<Line> = vec![
        Line::from(format!(" Filter: {}_", view.picker_filter)),
        Line::from(""),
    ];

    if view.picker.is_empty() {
        lines.push(Line::from(" No matching players"));
    }
    for (i, player) in view.picker.iter().enumerate() {
        let rating = player
            .rating
            .map(|r| format!(" {r:.1}"))
            .unwrap_or_default();
        let text = format!(" {} ({}){}", player.name, player.team, rating);
        let style = if i == view.picker_cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("Pick {} for position {}", pos, view.cursor_slot + 1)),
    );
    frame.render_widget(paragraph, layout.board);
}

fn render_teams(frame: &mut Frame, layout: &AppLayout, view: &ViewState) {
    let focused = view.pane == Pane::Teams && view.mode == Mode::Browse;
    let mut lines: Vec<Line> = Vec::new();

    if view.team_choices.is_empty() {
        lines.push(Line::from(" No teams available"));
    }
    for (i, team) in view.team_choices.iter().enumerate() {
        let text = format!(" {} ({})", team.name, team.short_name);
        let style = if focused && i == view.team_cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Auto-fill from team"),
    );
    frame.render_widget(paragraph, layout.teams);
}

fn render_saved(frame: &mut Frame, layout: &AppLayout, view: &ViewState) {
    let focused = view.pane == Pane::Saved && view.mode == Mode::Browse;
    let mut lines: Vec<Line> = Vec::new();

    if view.saved.is_empty() {
        lines.push(Line::from(" No saved lineups"));
    }
    for (i, lineup) in view.saved.iter().enumerate() {
        let text = format!(
            " {}  {} \u{2022} {} players",
            lineup.name,
            lineup.formation,
            lineup.players.filled_count()
        );
        let style = if focused && i == view.saved_cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Saved lineups"),
    );
    frame.render_widget(paragraph, layout.saved);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, view: &ViewState) {
    let text = match view.mode {
        Mode::Browse => match view.pane {
            Pane::Board => {
                " Tab:Panel | \u{2190}\u{2192}:Slot | Enter:Pick | x:Clear | f:Formation | n:Name | s:Save | q:Quit"
            }
            Pane::Teams => " Tab:Panel | \u{2191}\u{2193}:Team | Enter:Auto-fill | r:Reshuffle | q:Quit",
            Pane::Saved => " Tab:Panel | \u{2191}\u{2193}:Lineup | Enter:Load | d:Delete | q:Quit",
        },
        Mode::PickPlayer => " Type to filter | \u{2191}\u{2193}:Move | Enter:Assign | Esc:Cancel",
        Mode::EditName => " Type the lineup name | Enter:Confirm | Esc:Cancel",
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop over a session until the user quits.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop over keyboard input and render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(mut session: Session) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal on panic; chain the original hook after ours.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view = ViewState::for_session(&session);

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(KeyModifiers::CONTROL)
                        {
                            break;
                        }
                        if input::handle_key(key_event, &mut view, &mut session)
                            == input::InputOutcome::Quit
                        {
                            break;
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events need no handling; the next
                        // render tick redraws with the current area.
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view, &session))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_state_default_is_sensible() {
        let view = ViewState::default();
        assert_eq!(view.pane, Pane::Board);
        assert_eq!(view.mode, Mode::Browse);
        assert_eq!(view.cursor_slot, 0);
        assert!(view.picker.is_empty());
        assert!(view.picker_filter.is_empty());
        assert!(view.team_choices.is_empty());
        assert!(view.saved.is_empty());
        assert!(view.notice.is_none());
        assert!(view.name_input.is_empty());
    }

    #[test]
    fn pane_cycle_visits_all_panes() {
        let start = Pane::Board;
        let mut pane = start;
        let mut seen = vec![pane];
        for _ in 0..2 {
            pane = pane.next();
            seen.push(pane);
        }
        assert_eq!(seen, vec![Pane::Board, Pane::Teams, Pane::Saved]);
        assert_eq!(pane.next(), start);
    }

    #[test]
    fn severity_colors_are_distinct() {
        let colors = [
            severity_color(Severity::Info),
            severity_color(Severity::Success),
            severity_color(Severity::Warning),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
