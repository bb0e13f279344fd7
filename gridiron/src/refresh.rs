// Refresh state: when data was last fetched and a TTL cache of per-week
// snapshots.
//
// Owned by the app task and passed by reference; the analytics engine never
// sees it. A manual refresh clears the cache so the next request refetches.
// The player directory is cached separately and shared by every week.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::league::{LeagueSnapshot, Player, PlayerId};
use crate::sleeper::{LeagueSource, SourceError};

/// Minimum lifetime of the cached player directory.
pub const PLAYERS_TTL_HOURS: i64 = 24;

/// Player directory shared between snapshots.
pub type SharedPlayers = Arc<HashMap<PlayerId, Player>>;

/// Cache key: one snapshot per (season, week).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub season: String,
    pub week: u32,
}

impl SnapshotKey {
    pub fn new(season: &str, week: u32) -> Self {
        SnapshotKey {
            season: season.to_string(),
            week,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedSnapshot {
    fetched_at: DateTime<Utc>,
    snapshot: Arc<LeagueSnapshot>,
}

#[derive(Debug, Clone)]
struct CachedPlayers {
    fetched_at: DateTime<Utc>,
    players: SharedPlayers,
}

#[derive(Debug, Clone)]
pub struct RefreshState {
    /// Time of the most recent successful fetch, for the status bar.
    pub last_fetched_at: Option<DateTime<Utc>>,
    cache: HashMap<SnapshotKey, CachedSnapshot>,
    players: Option<CachedPlayers>,
    ttl: Duration,
    players_ttl: Duration,
}

impl RefreshState {
    pub fn new(ttl: Duration) -> Self {
        RefreshState {
            last_fetched_at: None,
            cache: HashMap::new(),
            players: None,
            ttl,
            players_ttl: ttl.max(Duration::hours(PLAYERS_TTL_HOURS)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached snapshot for `key` if it is younger than the TTL at `now`.
    pub fn fresh(&self, key: &SnapshotKey, now: DateTime<Utc>) -> Option<Arc<LeagueSnapshot>> {
        self.cache
            .get(key)
            .filter(|c| now - c.fetched_at < self.ttl)
            .map(|c| Arc::clone(&c.snapshot))
    }

    /// Cached player directory if it is younger than the player TTL at `now`.
    pub fn fresh_players(&self, now: DateTime<Utc>) -> Option<SharedPlayers> {
        self.players
            .as_ref()
            .filter(|c| now - c.fetched_at < self.players_ttl)
            .map(|c| Arc::clone(&c.players))
    }

    /// Store a snapshot, dropping every entry that has expired by `now`.
    pub fn insert(
        &mut self,
        key: SnapshotKey,
        snapshot: LeagueSnapshot,
        now: DateTime<Utc>,
    ) -> Arc<LeagueSnapshot> {
        let ttl = self.ttl;
        self.cache.retain(|_, c| now - c.fetched_at < ttl);

        let reused = self
            .players
            .as_ref()
            .is_some_and(|c| Arc::ptr_eq(&c.players, &snapshot.players));
        if !reused {
            self.players = Some(CachedPlayers {
                fetched_at: now,
                players: Arc::clone(&snapshot.players),
            });
        }

        let snapshot = Arc::new(snapshot);
        self.cache.insert(
            key,
            CachedSnapshot {
                fetched_at: now,
                snapshot: Arc::clone(&snapshot),
            },
        );
        self.last_fetched_at = Some(now);
        snapshot
    }

    /// Drop every cached snapshot and the player directory (manual refresh).
    pub fn clear(&mut self) {
        debug!("clearing {} cached snapshots", self.cache.len());
        self.cache.clear();
        self.players = None;
    }

    pub fn cached_weeks(&self) -> usize {
        self.cache.len()
    }

    /// Return the snapshot for (season, week), fetching through `source` when
    /// the cache has nothing fresh.
    pub async fn snapshot(
        &mut self,
        source: &dyn LeagueSource,
        season: &str,
        week: u32,
        now: DateTime<Utc>,
    ) -> Result<Arc<LeagueSnapshot>, SourceError> {
        let key = SnapshotKey::new(season, week);
        if let Some(hit) = self.fresh(&key, now) {
            debug!(season, week, "snapshot cache hit");
            return Ok(hit);
        }
        let players = self.fresh_players(now);
        let snapshot = fetch_snapshot_with_players(source, season, week, players).await?;
        Ok(self.insert(key, snapshot, now))
    }
}

/// Fetch and join everything the dashboard needs for one week.
///
/// Independent requests run concurrently. A league without a draft ID gets
/// an empty pick list. When the source reads projections from the stats
/// endpoint, the stats payload is reused instead of fetched twice.
pub async fn fetch_snapshot(
    source: &dyn LeagueSource,
    season: &str,
    week: u32,
) -> Result<LeagueSnapshot, SourceError> {
    fetch_snapshot_with_players(source, season, week, None).await
}

/// Like [`fetch_snapshot`], but reuses `players` instead of downloading the
/// player directory again when it is given.
pub async fn fetch_snapshot_with_players(
    source: &dyn LeagueSource,
    season: &str,
    week: u32,
    players: Option<SharedPlayers>,
) -> Result<LeagueSnapshot, SourceError> {
    info!(season, week, cached_players = players.is_some(), "fetching league snapshot");

    let players_fut = async move {
        match players {
            Some(players) => Ok(players),
            None => source.players().await.map(Arc::new),
        }
    };

    let (league, players, rosters, users, actuals, matchups) = tokio::try_join!(
        source.league(),
        players_fut,
        source.rosters(),
        source.users(),
        source.stats(season, week),
        source.matchups(week),
    )?;

    let mirror = source.projections_mirror_stats();
    let projections = if mirror {
        actuals.clone()
    } else {
        source.projections(season, week).await?
    };

    let draft_picks = match league.draft_id.as_deref() {
        Some(draft_id) if !draft_id.is_empty() => match source.draft_picks(draft_id).await {
            Ok(picks) => picks,
            Err(e) => {
                warn!(draft_id, error = %e, "draft picks unavailable; continuing without them");
                Vec::new()
            }
        },
        _ => {
            warn!("league {} has no draft_id; skipping draft picks", league.league_id);
            Vec::new()
        }
    };

    info!(
        players = players.len(),
        rosters = rosters.len(),
        users = users.len(),
        stat_lines = actuals.len(),
        matchups = matchups.len(),
        picks = draft_picks.len(),
        "snapshot fetched"
    );

    Ok(LeagueSnapshot {
        season: season.to_string(),
        week,
        league_name: league.name,
        players,
        rosters,
        users,
        projections,
        actuals,
        matchups,
        draft_picks,
        projections_mirror_actuals: mirror,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
