// Application state and orchestration logic.
//
// The central event loop: receives user commands from the TUI, fetches
// league snapshots through the refresh cache, runs the analytics engine and
// pushes finished dashboards to the TUI render loop.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::analytics::{compute_dashboard, GradingConfig};
use crate::config::{LeagueSettings, MAX_WEEK, MIN_WEEK};
use crate::league::NflState;
use crate::protocol::{UiUpdate, UserCommand};
use crate::refresh::RefreshState;
use crate::sleeper::LeagueSource;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Everything the orchestrator owns.
pub struct AppState {
    pub source: Arc<dyn LeagueSource>,
    pub grading: GradingConfig,
    pub refresh: RefreshState,
    pub season: String,
    /// Week currently shown.
    pub week: u32,
}

impl AppState {
    pub fn new(
        source: Arc<dyn LeagueSource>,
        grading: GradingConfig,
        refresh: RefreshState,
        season: String,
        week: u32,
    ) -> Self {
        AppState {
            source,
            grading,
            refresh,
            season,
            week: clamp_week(week),
        }
    }
}

pub fn clamp_week(week: u32) -> u32 {
    week.clamp(MIN_WEEK, MAX_WEEK)
}

/// Pick the starting (season, week).
///
/// Configured values win; otherwise the NFL state is used. Without either,
/// falls back to `fallback_season` and week 1. Off-season week 0 becomes 1.
pub fn resolve_start(
    league: &LeagueSettings,
    nfl_state: Option<&NflState>,
    fallback_season: &str,
) -> (String, u32) {
    let season = league
        .season
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            nfl_state
                .map(|s| s.season.clone())
                .filter(|s| !s.trim().is_empty())
        })
        .unwrap_or_else(|| fallback_season.to_string());
    let week = league
        .week
        .or_else(|| nfl_state.map(|s| s.week))
        .unwrap_or(MIN_WEEK);
    (season, clamp_week(week))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Fetch (or reuse) the snapshot for the current week, run the engine and
/// push the result. A failed fetch is reported, never fatal.
pub async fn load_current_week(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let week = state.week;
    let _ = ui_tx
        .send(UiUpdate::Loading {
            season: state.season.clone(),
            week,
        })
        .await;

    let now = Utc::now();
    let result = state
        .refresh
        .snapshot(state.source.as_ref(), &state.season, week, now)
        .await;

    match result {
        Ok(snapshot) => {
            let dashboard = compute_dashboard(&snapshot, &state.grading);
            let fetched_at = state.refresh.last_fetched_at.unwrap_or(now);
            info!(
                "Week {} ready: {} teams, {} matchups",
                week,
                dashboard.report_cards.len(),
                dashboard.matchups.len()
            );
            let _ = ui_tx
                .send(UiUpdate::Dashboard {
                    dashboard: Box::new(dashboard),
                    fetched_at,
                })
                .await;
        }
        Err(e) => {
            warn!("Failed to load week {}: {}", week, e);
            let _ = ui_tx
                .send(UiUpdate::FetchFailed {
                    week,
                    message: e.to_string(),
                })
                .await;
        }
    }
}

/// Handle a user command from the TUI. `Quit` is handled by the caller.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SelectWeek(week) => {
            state.week = clamp_week(week);
            info!("Selected week {}", state.week);
            load_current_week(state, ui_tx).await;
        }
        UserCommand::NextWeek => {
            state.week = clamp_week(state.week.saturating_add(1));
            load_current_week(state, ui_tx).await;
        }
        UserCommand::PrevWeek => {
            state.week = clamp_week(state.week.saturating_sub(1));
            load_current_week(state, ui_tx).await;
        }
        UserCommand::Refresh => {
            info!("Manual refresh of week {}", state.week);
            state.refresh.clear();
            load_current_week(state, ui_tx).await;
        }
        UserCommand::Quit => {}
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Loads the starting week, then listens for user commands and a periodic
/// tick at the cache TTL that re-requests the current week. Exits on
/// `Quit` or when the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!(
        "Application event loop started (season {}, week {})",
        state.season, state.week
    );

    if state.source.projections_mirror_stats() {
        warn!("Projections are read from the stats endpoint; boom/choke deltas will be zero");
    }

    load_current_week(&mut state, &ui_tx).await;

    let period = state
        .refresh
        .ttl()
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(60));
    let mut refresh_tick = tokio::time::interval(period);
    refresh_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately; the starting week is already loaded.
    refresh_tick.tick().await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            _ = refresh_tick.tick() => {
                debug!("Periodic refresh of week {}", state.week);
                load_current_week(&mut state, &ui_tx).await;
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
