// Board editing session: ties the roster, formation catalog, placement
// rules, and lineup store together.
//
// Every user action returns a `Notice` describing what happened; rejected
// actions (wrong position, duplicate player, under-filled save) come back
// as warning notices, never as errors. `Result` is reserved for store I/O.

use anyhow::Result;
use rand::Rng;
use tracing::{info, warn};

use crate::lineup::assignment::{check_assign, AssignCheck, Assignment};
use crate::lineup::autofill::{auto_fill, AutoFillOutcome};
use crate::lineup::formation::{self, Formation, SLOT_COUNT};
use crate::roster::{Roster, RosterPlayer, Team};
use crate::store::{LineupStore, SaveOutcome, SavedLineup, MIN_SAVED_PLAYERS};

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// A user-facing outcome message, rendered in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Notice {
    fn success(title: &str, body: String) -> Self {
        Notice {
            severity: Severity::Success,
            title: title.to_string(),
            body,
        }
    }

    fn warning(title: &str, body: String) -> Self {
        Notice {
            severity: Severity::Warning,
            title: title.to_string(),
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's board editing session: the active formation, the current
/// assignment, a working lineup name, plus the roster and store.
pub struct Session {
    pub roster: Roster,
    store: LineupStore,
    pub formation_id: String,
    pub board: Assignment,
    pub lineup_name: String,
}

impl Session {
    pub fn new(roster: Roster, store: LineupStore, default_formation: &str) -> Self {
        Session {
            roster,
            store,
            formation_id: default_formation.to_string(),
            board: Assignment::new(),
            lineup_name: String::new(),
        }
    }

    /// The active formation. `None` when `formation_id` is not in the
    /// catalog, which can happen after loading a snapshot saved under a
    /// formation this build no longer ships.
    pub fn formation(&self) -> Option<&'static Formation> {
        formation::find(&self.formation_id)
    }

    /// Switch the active formation. The board is kept: slot positions are
    /// global, so existing placements stay valid.
    pub fn select_formation(&mut self, id: &str) -> Notice {
        match formation::find(id) {
            Some(f) => {
                self.formation_id = f.id.to_string();
                Notice {
                    severity: Severity::Info,
                    title: "Formation Changed".to_string(),
                    body: format!("Now building a {}", f.id),
                }
            }
            None => Notice::warning("Unknown Formation", format!("No formation named {id}")),
        }
    }

    /// Place `player` on `slot`, subject to the placement rules. An occupied
    /// slot is overwritten when the placement is otherwise valid.
    pub fn assign_player(&mut self, slot: usize, player: RosterPlayer) -> Notice {
        match check_assign(slot, &player, &self.board) {
            AssignCheck::Ok => {
                let name = player.name.clone();
                self.board = self.board.assign(slot, player);
                Notice::success("Player Assigned", format!("{name} is in at position {}", slot + 1))
            }
            AssignCheck::WrongPosition { required, actual } => {
                warn!(
                    "rejected placement of {} on slot {}: requires {}, player is {}",
                    player.name, slot, required, actual
                );
                Notice::warning(
                    "Wrong Position",
                    format!(
                        "This spot requires a {required}; {} is a {actual}",
                        player.name
                    ),
                )
            }
            AssignCheck::AlreadyAssigned { slot: held } => Notice::warning(
                "Player Already Selected",
                format!(
                    "{} is already in your lineup at position {}",
                    player.name,
                    held + 1
                ),
            ),
        }
    }

    /// Empty a slot. Clearing an already empty slot is a no-op.
    pub fn clear_slot(&mut self, slot: usize) {
        self.board = self.board.unassign(slot);
    }

    /// Replace the whole board with a random pick of `team`'s players. On
    /// success the working name becomes "{short name} vs Random". A team
    /// with no roster players leaves the board untouched.
    pub fn auto_fill<R: Rng>(&mut self, team: &Team, rng: &mut R) -> Notice {
        let Some(formation) = self.formation() else {
            return Notice::warning(
                "Unknown Formation",
                format!("No formation named {}", self.formation_id),
            );
        };

        match auto_fill(formation, &self.roster, team, rng) {
            AutoFillOutcome::Filled(board) => {
                let filled = board.filled_count();
                self.board = board;
                self.lineup_name = format!("{} vs Random", team.short_name);
                info!("auto-filled {filled}/{SLOT_COUNT} slots from {}", team.name);
                Notice::success(
                    "Lineup Pre-filled",
                    format!("{filled} of {SLOT_COUNT} spots filled from {}", team.name),
                )
            }
            AutoFillOutcome::NoPlayers => {
                warn!("auto-fill found no players for team {}", team.name);
                Notice::warning("No Players", format!("{} has no players in the roster", team.name))
            }
        }
    }

    /// Persist the current board under the working name. Boards with fewer
    /// than `MIN_SAVED_PLAYERS` filled slots are rejected with a warning.
    pub fn save(&mut self) -> Result<Notice> {
        match self
            .store
            .save(&self.lineup_name, &self.formation_id, &self.board)?
        {
            SaveOutcome::Saved(record) => {
                self.lineup_name = record.name.clone();
                info!("saved lineup {} ({})", record.name, record.id);
                Ok(Notice::success("Lineup Saved", format!("Saved \"{}\"", record.name)))
            }
            SaveOutcome::NotEnoughPlayers { filled } => Ok(Notice::warning(
                "Not Enough Players",
                format!("Add at least {MIN_SAVED_PLAYERS} players to save a lineup ({filled} assigned)"),
            )),
        }
    }

    /// Restore a saved lineup: formation and board are replaced wholesale.
    /// The snapshot is trusted as-is; players that have since left the
    /// roster are only logged.
    pub fn load(&mut self, id: &str) -> Result<Notice> {
        let Some(record) = self.store.load(id)? else {
            return Ok(Notice::warning(
                "Lineup Not Found",
                format!("No saved lineup with id {id}"),
            ));
        };

        for (slot, player) in record.players.iter() {
            if self.roster.player_by_id(&player.id).is_none() {
                warn!(
                    "loaded lineup {} references {} (slot {}) who is no longer in the roster",
                    record.name, player.name, slot
                );
            }
        }

        self.formation_id = record.formation;
        self.board = record.players;
        self.lineup_name = record.name.clone();
        Ok(Notice::success("Lineup Loaded", format!("Loaded \"{}\"", record.name)))
    }

    /// Delete a saved lineup. Unknown ids are a silent no-op at the store
    /// level; the notice still reports the action.
    pub fn delete(&mut self, id: &str) -> Result<Notice> {
        self.store.delete(id)?;
        Ok(Notice::success("Lineup Deleted", "Removed from saved lineups".to_string()))
    }

    /// All saved lineups in insertion order.
    pub fn saved_lineups(&self) -> Result<Vec<SavedLineup>> {
        self.store.list()
    }

    /// Players eligible for `slot`, filtered by a case-insensitive search
    /// over player name and team. Used by the picker panel.
    pub fn candidates_for_slot(&self, slot: usize, search: &str) -> Vec<&RosterPlayer> {
        let Some(required) = formation::required_position(slot) else {
            return vec![];
        };
        let needle = search.trim().to_lowercase();
        self.roster
            .players
            .iter()
            .filter(|p| p.position == required)
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.team.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
