// Random board filling from a single team's players.

use std::collections::HashSet;

use rand::Rng;

use crate::roster::{Roster, Team};

use super::assignment::Assignment;
use super::formation::{self, Formation};

/// Result of an auto-fill attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AutoFillOutcome {
    /// A fresh board that replaces whatever was assigned before. May be
    /// partially filled when the team lacks players for some positions.
    Filled(Assignment),
    /// The team has no players in the roster; the caller keeps its board.
    NoPlayers,
}

/// Build a board for `formation` from `team`'s players, picking uniformly at
/// random among the candidates for each slot. Iterates rows in order; a slot
/// with no remaining candidate of the required position stays empty. No
/// player is used twice.
pub fn auto_fill<R: Rng>(
    formation: &Formation,
    roster: &Roster,
    team: &Team,
    rng: &mut R,
) -> AutoFillOutcome {
    let pool = roster.players_for_team(team);
    if pool.is_empty() {
        return AutoFillOutcome::NoPlayers;
    }

    let mut board = Assignment::new();
    let mut used: HashSet<&str> = HashSet::new();

    for row in formation.rows {
        for &slot in row.iter() {
            let Some(required) = formation::required_position(slot) else {
                continue;
            };
            let candidates: Vec<_> = pool
                .iter()
                .filter(|p| p.position == required && !used.contains(p.id.as_str()))
                .collect();
            if candidates.is_empty() {
                continue;
            }
            let pick = candidates[rng.gen_range(0..candidates.len())];
            used.insert(pick.id.as_str());
            board = board.assign(slot, (*pick).clone());
        }
    }

    AutoFillOutcome::Filled(board)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
