// Lineup builder entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the lineup store
// 4. Fetch the roster from the league API (degrade to empty on failure)
// 5. Build the editing session
// 6. Run the TUI event loop
// 7. Cleanup on exit

use lineup_builder::config;
use lineup_builder::roster::client::LeagueClient;
use lineup_builder::roster::Roster;
use lineup_builder::session::Session;
use lineup_builder::store::LineupStore;
use lineup_builder::tui;

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Lineup builder starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, store={}, default formation={}",
        config.base_url, config.db_path, config.default_formation
    );

    // 3. Open the lineup store
    let db_path = resolve_db_path(&config.db_path)?;
    let store = LineupStore::open(&db_path).context("failed to open lineup store")?;
    info!("Lineup store opened at {db_path}");

    // 4. Fetch the roster; an unreachable API means an empty roster, not a
    //    startup failure (saved lineups can still be browsed).
    let client = LeagueClient::new(&config.base_url);
    let roster = match client.fetch_roster().await {
        Ok(roster) => {
            info!(
                "Roster fetched: {} players, {} teams",
                roster.players.len(),
                roster.teams.len()
            );
            roster
        }
        Err(e) => {
            warn!("roster fetch failed, continuing with empty roster: {e:#}");
            Roster::default()
        }
    };

    // 5. Build the editing session
    let session = Session::new(roster, store, &config.default_formation);

    // 6. Run the TUI event loop (blocks until the user quits)
    tui::run(session).await?;

    // 7. Cleanup
    info!("Lineup builder shut down cleanly");
    Ok(())
}

/// Resolve the configured store path. Absolute paths are used as-is;
/// relative paths land in the platform data directory so the database
/// survives runs from different working directories.
fn resolve_db_path(configured: &str) -> anyhow::Result<String> {
    let path = Path::new(configured);
    if path.is_absolute() {
        return Ok(configured.to_string());
    }

    let dirs = directories::ProjectDirs::from("", "", "lineup-builder")
        .context("could not determine a platform data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let full = data_dir.join(path);
    Ok(full.to_string_lossy().into_owned())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("lineup-builder.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lineup_builder=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
