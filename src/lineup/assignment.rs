// Board assignment: the slot -> player map and its placement rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roster::{Position, RosterPlayer};

use super::formation;

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// The board contents: each slot holds at most one player. Keys are slot
/// indices into the global slot -> position mapping, so the same assignment
/// stays meaningful across formation switches.
///
/// Serializes as a JSON object keyed by slot index, which is also the shape
/// persisted inside `SavedLineup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment(BTreeMap<usize, RosterPlayer>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: usize) -> Option<&RosterPlayer> {
        self.0.get(&slot)
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The slot currently holding `player_id`, if any.
    pub fn slot_of(&self, player_id: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(_, p)| p.id == player_id)
            .map(|(&slot, _)| slot)
    }

    /// Iterate filled slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RosterPlayer)> {
        self.0.iter().map(|(&slot, p)| (slot, p))
    }

    /// A new assignment with `slot` overwritten by `player`. Placing onto an
    /// occupied slot replaces its previous occupant.
    pub fn assign(&self, slot: usize, player: RosterPlayer) -> Assignment {
        let mut next = self.0.clone();
        next.insert(slot, player);
        Assignment(next)
    }

    /// A new assignment with the `slot` entry removed. Removing from an empty
    /// slot yields an identical assignment.
    pub fn unassign(&self, slot: usize) -> Assignment {
        let mut next = self.0.clone();
        next.remove(&slot);
        Assignment(next)
    }
}

// ---------------------------------------------------------------------------
// Placement check
// ---------------------------------------------------------------------------

/// Outcome of checking whether a player may be placed on a slot. Rejections
/// are ordinary values for the caller to surface, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignCheck {
    Ok,
    /// The player's position does not match what the slot requires.
    WrongPosition { required: Position, actual: Position },
    /// The player already occupies a board slot (0-based; display as slot + 1).
    AlreadyAssigned { slot: usize },
}

/// Check whether `player` may be placed on `slot` given the current board.
///
/// Position mismatch is checked before duplicate membership, so a player who
/// both mismatches and is already placed reports the position problem.
pub fn check_assign(slot: usize, player: &RosterPlayer, board: &Assignment) -> AssignCheck {
    if let Some(required) = formation::required_position(slot) {
        if player.position != required {
            return AssignCheck::WrongPosition {
                required,
                actual: player.position,
            };
        }
    }

    if let Some(held) = board.slot_of(&player.id) {
        return AssignCheck::AlreadyAssigned { slot: held };
    }

    AssignCheck::Ok
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
