// League data source: the `LeagueSource` trait and its Sleeper HTTP
// implementation.

pub mod client;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::league::{
    DraftPick, League, MatchupEntry, NflState, Player, PlayerId, Roster, StatLine, User,
};

pub use client::SleeperClient;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Read-only access to one league's data.
///
/// Implementations treat partial payloads (null bodies, missing keys) as
/// empty collections; only transport and decode failures are errors.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn players(&self) -> Result<HashMap<PlayerId, Player>, SourceError>;

    async fn rosters(&self) -> Result<Vec<Roster>, SourceError>;

    async fn users(&self) -> Result<Vec<User>, SourceError>;

    /// Actual weekly stats.
    async fn stats(
        &self,
        season: &str,
        week: u32,
    ) -> Result<HashMap<PlayerId, StatLine>, SourceError>;

    /// Weekly projections.
    async fn projections(
        &self,
        season: &str,
        week: u32,
    ) -> Result<HashMap<PlayerId, StatLine>, SourceError>;

    /// Whether `projections` reads the same endpoint as `stats`.
    fn projections_mirror_stats(&self) -> bool;

    async fn matchups(&self, week: u32) -> Result<Vec<MatchupEntry>, SourceError>;

    async fn league(&self) -> Result<League, SourceError>;

    async fn draft_picks(&self, draft_id: &str) -> Result<Vec<DraftPick>, SourceError>;

    async fn nfl_state(&self) -> Result<NflState, SourceError>;
}
