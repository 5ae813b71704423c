// League data sources.
//
// `LeagueSource` is the seam between report generation and where the data
// comes from: the live Sleeper API, or a snapshot file saved from an earlier
// run so reports can be replayed offline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use gridcast_core::digest::resolve_week;
use gridcast_core::model::{LeagueSnapshot, MatchupEntry, ProjectionFeed};

use crate::client::SleeperClient;
use crate::error::SleeperError;

/// What to load.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub league_id: String,
    /// Explicit week; `None` uses the week Sleeper reports.
    pub week: Option<u32>,
    /// Season length used when the league does not report a playoff start.
    pub regular_season_weeks: u32,
}

#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn load(&self, request: &FetchRequest) -> Result<LeagueSnapshot, SleeperError>;
}

// ---------------------------------------------------------------------------
// Live API
// ---------------------------------------------------------------------------

pub struct SleeperSource {
    client: SleeperClient,
}

impl SleeperSource {
    pub fn new(client: SleeperClient) -> Self {
        Self { client }
    }

    /// Matchups for every week after `week` through `last_week`. Weeks that
    /// fail to load are left out; the season projection falls back to the
    /// current opponent for them.
    async fn future_matchups(
        &self,
        league_id: &str,
        week: u32,
        last_week: u32,
    ) -> BTreeMap<u32, Vec<MatchupEntry>> {
        let mut out = BTreeMap::new();
        for w in (week + 1)..=last_week {
            match self.client.matchups(league_id, w).await {
                Ok(entries) if !entries.is_empty() => {
                    out.insert(w, entries);
                }
                Ok(_) => {}
                Err(e) => warn!("skipping week {} schedule: {}", w, e),
            }
        }
        out
    }
}

#[async_trait]
impl LeagueSource for SleeperSource {
    async fn load(&self, request: &FetchRequest) -> Result<LeagueSnapshot, SleeperError> {
        let league_id = request.league_id.as_str();

        let state = match self.client.nfl_state().await {
            Ok(state) => state,
            Err(e) => {
                warn!("NFL state unavailable, relying on the requested week: {}", e);
                Default::default()
            }
        };

        let mut league = self.client.league(league_id).await?;
        league.week = state.week;
        let resolved = resolve_week(request.week, league.week);
        let week = resolved.week;
        if let Some(note) = &resolved.note {
            warn!("{}", note);
        }
        let season = if league.season.is_empty() {
            state.season.clone().unwrap_or_default()
        } else {
            league.season.clone()
        };
        info!(league = %league.name, %season, week, "fetching league data");

        let (users, rosters, matchups, transactions, players) = tokio::try_join!(
            self.client.users(league_id),
            self.client.rosters(league_id),
            self.client.matchups(league_id, week),
            self.client.transactions(league_id, week),
            self.client.players(),
        )?;

        let projection_feed = match self.client.projections(&season, week).await {
            Ok(feed) => feed,
            Err(e) => {
                warn!("projections feed unavailable: {}", e);
                ProjectionFeed::default()
            }
        };

        let last_week = league
            .settings
            .playoff_week_start
            .filter(|&w| w > 1)
            .map(|w| w - 1)
            .unwrap_or(request.regular_season_weeks);
        let future_matchups = self.future_matchups(league_id, week, last_week).await;

        info!(
            users = users.len(),
            rosters = rosters.len(),
            matchups = matchups.len(),
            transactions = transactions.len(),
            players = players.len(),
            future_weeks = future_matchups.len(),
            "league data loaded"
        );

        Ok(LeagueSnapshot {
            league,
            week,
            users,
            rosters,
            matchups,
            future_matchups,
            transactions,
            players,
            projection_feed,
            off_season_note: resolved.note,
        })
    }
}

// ---------------------------------------------------------------------------
// Snapshot file
// ---------------------------------------------------------------------------

/// A `LeagueSnapshot` saved as JSON.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SleeperError {
        SleeperError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    pub async fn save(&self, snapshot: &LeagueSnapshot) -> Result<(), SleeperError> {
        let body = serde_json::to_string_pretty(snapshot).map_err(|e| SleeperError::Decode {
            what: "snapshot".to_string(),
            source: e,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

#[async_trait]
impl LeagueSource for SnapshotFile {
    async fn load(&self, request: &FetchRequest) -> Result<LeagueSnapshot, SleeperError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        let snapshot: LeagueSnapshot =
            serde_json::from_str(&body).map_err(|e| SleeperError::Decode {
                what: self.path.display().to_string(),
                source: e,
            })?;

        if let Some(w) = request.week.filter(|&w| w != snapshot.week) {
            warn!(
                requested = w,
                recorded = snapshot.week,
                "snapshot holds a different week; reporting the recorded week"
            );
        }
        if !request.league_id.is_empty() && request.league_id != snapshot.league.league_id {
            warn!(
                configured = %request.league_id,
                recorded = %snapshot.league.league_id,
                "snapshot was recorded for a different league"
            );
        }
        Ok(snapshot)
    }
}
