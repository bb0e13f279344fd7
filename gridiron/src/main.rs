// League dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the Sleeper client
// 4. Resolve the starting season/week from /state/nfl
// 5. Create mpsc channels
// 6. Spawn app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::sync::Arc;

use gridiron::app;
use gridiron::config;
use gridiron::refresh::RefreshState;
use gridiron::sleeper::{LeagueSource, SleeperClient};
use gridiron::tui;

use anyhow::Context;
use chrono::Datelike;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("gridiron starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={} ({}), projections from {:?}, cache ttl {}s",
        config.league.name,
        config.league.league_id,
        config.sleeper.projection_source,
        config.sleeper.cache_ttl_secs
    );

    // 3. Build the Sleeper client
    let client = SleeperClient::new(
        &config.sleeper.api_base_url,
        &config.league.league_id,
        config.sleeper.projection_source,
    );

    // 4. Resolve the starting season/week
    let nfl_state = match client.nfl_state().await {
        Ok(state) => {
            info!("NFL state: season {} week {} ({})", state.season, state.week, state.season_type);
            Some(state)
        }
        Err(e) => {
            warn!("Could not fetch NFL state, using configured/default week: {}", e);
            None
        }
    };
    let fallback_season = chrono::Utc::now().year().to_string();
    let (season, week) = app::resolve_start(&config.league, nfl_state.as_ref(), &fallback_season);
    info!("Starting at season {} week {}", season, week);

    // 5. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    let ttl_secs = i64::try_from(config.sleeper.cache_ttl_secs).unwrap_or(i64::MAX);
    let refresh = RefreshState::new(
        chrono::Duration::try_seconds(ttl_secs).unwrap_or_else(|| chrono::Duration::seconds(60)),
    );
    let source: Arc<dyn LeagueSource> = Arc::new(client);
    let app_state = app::AppState::new(source, config.grading.clone(), refresh, season, week);

    // 6. Spawn app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the TUI event loop (blocking until user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    if tokio::time::timeout(std::time::Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        warn!("App task did not stop within 5s");
    }

    info!("gridiron shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gridiron.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridiron=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
