// Sleeper HTTP client.
//
// Endpoints (relative to the configured base URL, normally
// https://api.sleeper.app/v1):
//   /players/nfl                         all NFL players (large, ~5 MB)
//   /league/{id}                         league metadata (draft_id)
//   /league/{id}/rosters                 rosters
//   /league/{id}/users                   league members
//   /league/{id}/matchups/{week}         weekly matchup scores
//   /stats/nfl/regular/{season}/{week}   weekly stats
//   /projections/nfl/regular/{season}/{week}
//   /draft/{id}/picks                    draft picks
//   /state/nfl                           current season/week

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::{LeagueSource, SourceError};
use crate::league::{
    DraftPick, League, MatchupEntry, NflState, Player, PlayerId, Roster, StatLine, User,
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Where weekly projections are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionSource {
    /// The stats endpoint, i.e. projections == actuals. Matches what the
    /// league's dashboards have always shown.
    #[default]
    Stats,
    /// Sleeper's dedicated projections endpoint.
    Projections,
}

/// Sleeper API client for a single league.
#[derive(Debug, Clone)]
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
    league_id: String,
    projection_source: ProjectionSource,
}

impl SleeperClient {
    pub fn new(base_url: &str, league_id: &str, projection_source: ProjectionSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            league_id: league_id.to_string(),
            projection_source,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a JSON document. A `null` body decodes as `T::default()`.
    async fn get_json<T>(&self, path: &str) -> Result<T, SourceError>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| SourceError::Http {
            url: url.clone(),
            source,
        })?;

        decode_body(&url, &body)
    }
}

/// Decode a response body, mapping an empty or `null` body to the default.
pub(crate) fn decode_body<T>(url: &str, body: &str) -> Result<T, SourceError>
where
    T: DeserializeOwned + Default,
{
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        debug!("{url} returned an empty body, using default");
        return Ok(T::default());
    }
    serde_json::from_str(trimmed).map_err(|source| SourceError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl LeagueSource for SleeperClient {
    async fn players(&self) -> Result<HashMap<PlayerId, Player>, SourceError> {
        let players: HashMap<PlayerId, Player> = self.get_json("players/nfl").await?;
        info!("Fetched {} players", players.len());
        Ok(players)
    }

    async fn rosters(&self) -> Result<Vec<Roster>, SourceError> {
        self.get_json(&format!("league/{}/rosters", self.league_id))
            .await
    }

    async fn users(&self) -> Result<Vec<User>, SourceError> {
        self.get_json(&format!("league/{}/users", self.league_id))
            .await
    }

    async fn stats(
        &self,
        season: &str,
        week: u32,
    ) -> Result<HashMap<PlayerId, StatLine>, SourceError> {
        self.get_json(&format!("stats/nfl/regular/{season}/{week}"))
            .await
    }

    async fn projections(
        &self,
        season: &str,
        week: u32,
    ) -> Result<HashMap<PlayerId, StatLine>, SourceError> {
        match self.projection_source {
            ProjectionSource::Stats => self.stats(season, week).await,
            ProjectionSource::Projections => {
                self.get_json(&format!("projections/nfl/regular/{season}/{week}"))
                    .await
            }
        }
    }

    fn projections_mirror_stats(&self) -> bool {
        self.projection_source == ProjectionSource::Stats
    }

    async fn matchups(&self, week: u32) -> Result<Vec<MatchupEntry>, SourceError> {
        self.get_json(&format!("league/{}/matchups/{week}", self.league_id))
            .await
    }

    async fn league(&self) -> Result<League, SourceError> {
        self.get_json(&format!("league/{}", self.league_id)).await
    }

    async fn draft_picks(&self, draft_id: &str) -> Result<Vec<DraftPick>, SourceError> {
        self.get_json(&format!("draft/{draft_id}/picks")).await
    }

    async fn nfl_state(&self) -> Result<NflState, SourceError> {
        self.get_json("state/nfl").await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
