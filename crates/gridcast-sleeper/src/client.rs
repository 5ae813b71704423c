// Sleeper v1 REST client.
//
// Read-only GETs against the public API. Sleeper answers `null` for empty
// collections (and for unknown ids), so every payload decodes through
// `decode_nullable`, which maps `null` to the type's default.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use gridcast_core::model::{
    normalize_player_ids, LeagueInfo, MatchupEntry, PlayerMap, ProjectionFeed, Roster,
    Transaction, User,
};

use crate::error::SleeperError;
use crate::feed::parse_projection_feed;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://api.sleeper.app/v1";
pub const DEFAULT_PROJECTIONS_URL: &str = "https://api.sleeper.com/projections/nfl";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Positions requested from the projections feed.
const FEED_POSITIONS: &[&str] = &["QB", "RB", "WR", "TE", "K", "DEF", "FLEX", "SUPER_FLEX"];

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Global NFL state (`/state/nfl`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NflState {
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub season_type: Option<String>,
}

/// Decode a JSON body, treating a literal `null` as `T::default()`.
pub fn decode_nullable<T>(body: &str, what: &str) -> Result<T, SleeperError>
where
    T: DeserializeOwned + Default,
{
    serde_json::from_str::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| SleeperError::Decode {
            what: what.to_string(),
            source: e,
        })
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
    projections_url: String,
}

impl SleeperClient {
    /// Client against the public endpoints with the default timeout.
    pub fn new() -> Result<Self, SleeperError> {
        Self::with_endpoints(DEFAULT_BASE_URL, DEFAULT_PROJECTIONS_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_endpoints(
        base_url: &str,
        projections_url: &str,
        timeout: Duration,
    ) -> Result<Self, SleeperError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SleeperError::Http {
                url: base_url.to_string(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            projections_url: projections_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SleeperError> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SleeperError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SleeperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SleeperError::Http {
            url: url.to_string(),
            source: e,
        })
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, SleeperError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}/{}", self.base_url, path);
        let body = self.get_text(&url, &[]).await?;
        decode_nullable(&body, path)
    }

    pub async fn league(&self, league_id: &str) -> Result<LeagueInfo, SleeperError> {
        let league: LeagueInfo = self.get_json(&format!("league/{league_id}")).await?;
        if league.league_id.is_empty() {
            return Err(SleeperError::LeagueNotFound {
                league_id: league_id.to_string(),
            });
        }
        Ok(league)
    }

    pub async fn users(&self, league_id: &str) -> Result<Vec<User>, SleeperError> {
        self.get_json(&format!("league/{league_id}/users")).await
    }

    pub async fn rosters(&self, league_id: &str) -> Result<Vec<Roster>, SleeperError> {
        self.get_json(&format!("league/{league_id}/rosters")).await
    }

    pub async fn matchups(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<MatchupEntry>, SleeperError> {
        self.get_json(&format!("league/{league_id}/matchups/{week}"))
            .await
    }

    pub async fn transactions(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<Transaction>, SleeperError> {
        self.get_json(&format!("league/{league_id}/transactions/{week}"))
            .await
    }

    /// Full NFL player metadata. Large (several MB); fetched once per run.
    pub async fn players(&self) -> Result<PlayerMap, SleeperError> {
        let mut players: PlayerMap = self.get_json("players/nfl").await?;
        normalize_player_ids(&mut players);
        Ok(players)
    }

    pub async fn nfl_state(&self) -> Result<NflState, SleeperError> {
        self.get_json("state/nfl").await
    }

    /// PPR projections for one week, normalized.
    pub async fn projections(&self, season: &str, week: u32) -> Result<ProjectionFeed, SleeperError> {
        let url = format!("{}/{}/{}", self.projections_url, season, week);
        let mut query: Vec<(&str, &str)> = vec![("season_type", "regular"), ("order_by", "ppr")];
        query.extend(FEED_POSITIONS.iter().map(|&pos| ("position[]", pos)));
        let body = self.get_text(&url, &query).await?;
        parse_projection_feed(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
