// Formation catalog and the global slot -> required position mapping.
//
// All formations draw from the same seven board slots (0..=6). A slot's
// required position is a property of the slot itself, not of the formation;
// formations only decide how the slots are grouped into visual rows. This
// keeps a board assignment meaningful across formation switches.

use crate::roster::Position;

/// Number of board slots. Every formation uses all of them exactly once.
pub const SLOT_COUNT: usize = 7;

/// A named formation: an id like "2-3-1" plus its rows of slot indices,
/// goalkeeper first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formation {
    pub id: &'static str,
    pub rows: &'static [&'static [usize]],
}

impl Formation {
    /// All slot indices in row order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }
}

/// The supported 7-a-side formations.
pub const FORMATIONS: &[Formation] = &[
    Formation {
        id: "2-3-1",
        rows: &[&[0], &[1, 2], &[3, 4, 5], &[6]],
    },
    Formation {
        id: "2-2-2",
        rows: &[&[0], &[1, 2], &[3, 4], &[5, 6]],
    },
    Formation {
        id: "3-2-1",
        rows: &[&[0], &[1, 2, 3], &[4, 5], &[6]],
    },
];

/// Look up a formation by id. Unknown ids are absent, not an error.
pub fn find(id: &str) -> Option<&'static Formation> {
    FORMATIONS.iter().find(|f| f.id == id)
}

/// The position a board slot requires, shared by every formation.
/// Returns `None` for indices outside the board.
pub fn required_position(slot: usize) -> Option<Position> {
    match slot {
        0 => Some(Position::Goalkeeper),
        1 | 2 => Some(Position::Defender),
        3 | 4 | 5 => Some(Position::Midfielder),
        6 => Some(Position::Forward),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
