// Player and team data model for the league roster.

pub mod client;

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Field positions used for board slot assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles both the short codes used by the league API ("GK", "DEF",
    /// "MID", "FWD") and spelled-out forms.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GK" | "GOALKEEPER" => Some(Position::Goalkeeper),
            "DEF" | "DEFENDER" | "DEFENCE" => Some(Position::Defender),
            "MID" | "MIDFIELDER" | "MIDFIELD" => Some(Position::Midfielder),
            "FWD" | "FORWARD" | "STRIKER" => Some(Position::Forward),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Deterministic ordering index for display (back to front).
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Players and teams
// ---------------------------------------------------------------------------

/// A player as presented by the league API, normalized for display.
///
/// `team` is always a flat display string; the API sometimes nests the team
/// as an object, which the client flattens during fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub team: String,
    pub image: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
}

/// The full player and team pool fetched at startup. An empty roster is the
/// degraded state when the league API is unreachable.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub players: Vec<RosterPlayer>,
    pub teams: Vec<Team>,
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.teams.is_empty()
    }

    /// Players affiliated with `team`. A player's team field may carry either
    /// the full name or the short name depending on the API payload shape.
    pub fn players_for_team(&self, team: &Team) -> Vec<&RosterPlayer> {
        self.players
            .iter()
            .filter(|p| p.team == team.name || p.team == team.short_name)
            .collect()
    }

    pub fn player_by_id(&self, id: &str) -> Option<&RosterPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    /// A random selection of up to `limit` teams for the auto-fill panel.
    /// Returns all teams when the roster has `limit` or fewer.
    pub fn random_teams<R: Rng>(&self, limit: usize, rng: &mut R) -> Vec<Team> {
        self.teams
            .choose_multiple(rng, limit)
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

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

    fn team(name: &str, short: &str) -> Team {
        Team {
            id: name.to_lowercase(),
            name: name.to_string(),
            short_name: short.to_string(),
            logo: None,
            primary_color: None,
            secondary_color: None,
        }
    }

    #[test]
    fn position_parses_short_codes_and_long_forms() {
        assert_eq!(Position::from_str_pos("GK"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("def"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("Midfielder"), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("FWD"), Some(Position::Forward));
        assert_eq!(Position::from_str_pos("coach"), None);
    }

    #[test]
    fn position_display_round_trips() {
        for pos in [
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ] {
            assert_eq!(Position::from_str_pos(pos.display_str()), Some(pos));
        }
    }

    #[test]
    fn position_serde_uses_short_codes() {
        let json = serde_json::to_string(&Position::Goalkeeper).unwrap();
        assert_eq!(json, "\"GK\"");
        let back: Position = serde_json::from_str("\"FWD\"").unwrap();
        assert_eq!(back, Position::Forward);
    }

    #[test]
    fn players_for_team_matches_name_or_short_name() {
        let roster = Roster {
            players: vec![
                player("1", "A", Position::Goalkeeper, "Lions"),
                player("2", "B", Position::Defender, "LIO"),
                player("3", "C", Position::Defender, "Tigers"),
            ],
            teams: vec![team("Lions", "LIO")],
        };
        let lions = roster.players_for_team(&roster.teams[0]);
        assert_eq!(lions.len(), 2);
        assert!(lions.iter().all(|p| p.team == "Lions" || p.team == "LIO"));
    }

    #[test]
    fn player_by_id_finds_player() {
        let roster = Roster {
            players: vec![player("42", "A", Position::Forward, "Lions")],
            teams: vec![],
        };
        assert!(roster.player_by_id("42").is_some());
        assert!(roster.player_by_id("7").is_none());
    }

    #[test]
    fn random_teams_caps_at_limit() {
        let roster = Roster {
            players: vec![],
            teams: (0..8).map(|i| team(&format!("Team{i}"), &format!("T{i}"))).collect(),
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(roster.random_teams(5, &mut rng).len(), 5);
        assert_eq!(roster.random_teams(20, &mut rng).len(), 8);
    }
}
