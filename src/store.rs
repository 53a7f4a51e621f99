// SQLite persistence layer for saved lineups.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::lineup::assignment::Assignment;

/// Key in the `app_state` table holding the JSON array of saved lineups.
const LINEUPS_KEY: &str = "saved_lineups";

/// Minimum number of filled slots required to save a lineup.
pub const MIN_SAVED_PLAYERS: usize = 7;

// ---------------------------------------------------------------------------
// SavedLineup
// ---------------------------------------------------------------------------

/// A persisted lineup snapshot. `players` is the full board assignment at
/// save time; loading restores it verbatim without revalidating against the
/// current roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLineup {
    pub id: String,
    pub name: String,
    pub formation: String,
    pub players: Assignment,
    pub created_at: String,
}

/// Result of a save attempt. An under-filled board is a user-facing
/// warning, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(SavedLineup),
    NotEnoughPlayers { filled: usize },
}

// ---------------------------------------------------------------------------
// LineupStore
// ---------------------------------------------------------------------------

/// SQLite-backed store for saved lineups, kept as a single JSON array under
/// a fixed key in a key-value table.
pub struct LineupStore {
    conn: Mutex<Connection>,
}

impl LineupStore {
    /// Open (or create) the store at `path` and ensure the schema exists.
    /// Pass `":memory:"` for an ephemeral in-memory store (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open lineup store at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set store pragmas")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS app_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .context("failed to create store schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the store connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }

    /// Persist an arbitrary JSON value under `key`. Uses INSERT OR REPLACE so
    /// repeated saves overwrite the previous value.
    fn save_value(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let conn = self.conn();
        let json_str = serde_json::to_string(value).context("failed to serialize state value")?;
        conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            params![key, json_str],
        )
        .context("failed to save state")?;
        Ok(())
    }

    /// Load a previously saved JSON value by `key`. Returns `None` if the key
    /// does not exist.
    fn load_value(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM app_state WHERE key = ?1")
            .context("failed to prepare state query")?;

        let mut rows = stmt
            .query_map(params![key], |row| {
                let json_str: String = row.get(0)?;
                Ok(json_str)
            })
            .context("failed to query state")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read state row")?;
                let value: serde_json::Value = serde_json::from_str(&json_str)
                    .context("failed to deserialize state value")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// All saved lineups in insertion order. A missing or unreadable payload
    /// yields an empty list; corruption is logged, never propagated.
    pub fn list(&self) -> Result<Vec<SavedLineup>> {
        let Some(value) = self.load_value(LINEUPS_KEY).unwrap_or_else(|e| {
            warn!("saved lineups unreadable, treating as empty: {e:#}");
            None
        }) else {
            return Ok(vec![]);
        };

        match serde_json::from_value(value) {
            Ok(lineups) => Ok(lineups),
            Err(e) => {
                warn!("saved lineups payload malformed, treating as empty: {e}");
                Ok(vec![])
            }
        }
    }

    /// Append a new saved lineup. Rejects boards with fewer than
    /// `MIN_SAVED_PLAYERS` filled slots. An empty `name` gets a positional
    /// default (`Lineup 1`, `Lineup 2`, ...).
    pub fn save(&self, name: &str, formation: &str, board: &Assignment) -> Result<SaveOutcome> {
        let filled = board.filled_count();
        if filled < MIN_SAVED_PLAYERS {
            return Ok(SaveOutcome::NotEnoughPlayers { filled });
        }

        let mut lineups = self.list()?;
        let name = if name.trim().is_empty() {
            format!("Lineup {}", lineups.len() + 1)
        } else {
            name.trim().to_string()
        };

        let record = SavedLineup {
            id: Self::generate_lineup_id(),
            name,
            formation: formation.to_string(),
            players: board.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        lineups.push(record.clone());
        self.persist(&lineups)?;

        Ok(SaveOutcome::Saved(record))
    }

    /// Fetch a saved lineup by id.
    pub fn load(&self, id: &str) -> Result<Option<SavedLineup>> {
        Ok(self.list()?.into_iter().find(|l| l.id == id))
    }

    /// Remove a saved lineup by id. Deleting an unknown id is a no-op.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut lineups = self.list()?;
        lineups.retain(|l| l.id != id);
        self.persist(&lineups)
    }

    fn persist(&self, lineups: &[SavedLineup]) -> Result<()> {
        let value = serde_json::to_value(lineups).context("failed to serialize saved lineups")?;
        self.save_value(LINEUPS_KEY, &value)
    }

    /// Generate a time-based lineup id: the current UTC timestamp in
    /// milliseconds. Unique per device for interactive use.
    pub fn generate_lineup_id() -> String {
        chrono::Utc::now().timestamp_millis().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
