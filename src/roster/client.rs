// League API client: fetches the player and team lists over HTTP.
//
// The admin API wraps each list in an envelope ({"players": [...]},
// {"teams": [...]}) and is inconsistent about the player `team` field,
// which arrives either as a plain string or as a nested team object.
// Everything is normalized here so the rest of the crate only sees
// flat `RosterPlayer` records.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use super::{Position, Roster, RosterPlayer, Team};

/// Placeholder used when a player record has no image URL.
pub const PLACEHOLDER_IMAGE: &str = "/noFilter.png";

// ---------------------------------------------------------------------------
// Wire formats
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PlayersEnvelope {
    players: Vec<WirePlayer>,
}

#[derive(Debug, Deserialize)]
struct TeamsEnvelope {
    teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Num(i64),
    Text(String),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTeam {
    Name(String),
    Object { name: String },
}

#[derive(Debug, Deserialize)]
struct WirePlayer {
    id: WireId,
    name: String,
    position: String,
    #[serde(default)]
    team: Option<WireTeam>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
}

/// Flatten a wire player into a `RosterPlayer`. Returns `None` (with a
/// warning) for players whose position string is not a known field position;
/// they could never be placed on the board anyway.
fn normalize(wire: WirePlayer) -> Option<RosterPlayer> {
    let Some(position) = Position::from_str_pos(&wire.position) else {
        warn!(
            "skipping player {} with unrecognized position {:?}",
            wire.name, wire.position
        );
        return None;
    };

    let team = match wire.team {
        Some(WireTeam::Name(name)) => name,
        Some(WireTeam::Object { name }) => name,
        None => "Unknown".to_string(),
    };

    Some(RosterPlayer {
        id: wire.id.into_string(),
        name: wire.name,
        position,
        team,
        image: wire.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        rating: wire.rating,
    })
}

// ---------------------------------------------------------------------------
// LeagueClient
// ---------------------------------------------------------------------------

/// HTTP client for the league admin API.
pub struct LeagueClient {
    http: reqwest::Client,
    base_url: String,
}

impl LeagueClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch players and teams in one pass. Any failure (network, HTTP
    /// status, payload shape) propagates; the caller decides whether to
    /// degrade to an empty roster.
    pub async fn fetch_roster(&self) -> Result<Roster> {
        let players = self.fetch_players().await?;
        let teams = self.fetch_teams().await?;
        Ok(Roster { players, teams })
    }

    async fn fetch_players(&self) -> Result<Vec<RosterPlayer>> {
        let url = format!("{}/players", self.base_url);
        let envelope: PlayersEnvelope = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch players from {url}"))?
            .error_for_status()
            .context("players endpoint returned an error status")?
            .json()
            .await
            .context("failed to parse players payload")?;

        Ok(envelope.players.into_iter().filter_map(normalize).collect())
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>> {
        let url = format!("{}/teams", self.base_url);
        let envelope: TeamsEnvelope = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch teams from {url}"))?
            .error_for_status()
            .context("teams endpoint returned an error status")?
            .json()
            .await
            .context("failed to parse teams payload")?;

        Ok(envelope.teams)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
