// Report runs: pick a league source, load the snapshot, fill ADP, render the
// requested section, and optionally deliver it.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use gridcast_core::digest::{self, strategy, trade_radar, waivers, weekly, ReportContext, ReportSettings};
use gridcast_core::model::LeagueSnapshot;
use gridcast_core::projections::{apply_adp, load_adp};
use gridcast_core::ReportError;
use gridcast_sleeper::{FetchRequest, LeagueSource, SleeperClient, SleeperSource, SnapshotFile};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::delivery::DiscordWebhook;

// ---------------------------------------------------------------------------
// Run options
// ---------------------------------------------------------------------------

/// What one invocation asks for, independent of how it was parsed.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub command: Command,
    pub week: Option<u32>,
    pub snapshot: Option<PathBuf>,
    pub save_snapshot: Option<PathBuf>,
    pub deliver: bool,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            command: cli.command,
            week: cli.week,
            snapshot: cli.snapshot.clone(),
            save_snapshot: cli.save_snapshot.clone(),
            deliver: cli.deliver,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// The live API, or a saved snapshot when one is given.
pub fn source_for(config: &Config, opts: &RunOptions) -> anyhow::Result<Box<dyn LeagueSource>> {
    if let Some(path) = &opts.snapshot {
        info!(path = %path.display(), "reading league snapshot");
        return Ok(Box::new(SnapshotFile::new(path)));
    }
    if config.league.league_id.trim().is_empty() {
        return Err(ReportError::MissingLeagueId.into());
    }
    let client = SleeperClient::new().context("failed to build Sleeper client")?;
    Ok(Box::new(SleeperSource::new(client)))
}

pub async fn load_snapshot(config: &Config, opts: &RunOptions) -> anyhow::Result<LeagueSnapshot> {
    let source = source_for(config, opts)?;
    let request = FetchRequest {
        league_id: config.league.league_id.trim().to_string(),
        week: opts.week,
        regular_season_weeks: config.league.regular_season_weeks,
    };
    let snapshot = source
        .load(&request)
        .await
        .context("failed to load league data")?;

    if let Some(path) = &opts.save_snapshot {
        SnapshotFile::new(path)
            .save(&snapshot)
            .await
            .context("failed to save league snapshot")?;
    }
    Ok(snapshot)
}

/// Fill missing ADP from the projections feed and the configured overlay.
pub fn fill_adp(snapshot: &mut LeagueSnapshot, config: &Config) -> anyhow::Result<()> {
    let overlay = match config.adp_csv_path() {
        Some(path) => load_adp(&path)
            .with_context(|| format!("failed to load ADP overlay {}", path.display()))?,
        None => Default::default(),
    };
    let filled = apply_adp(&mut snapshot.players, &snapshot.projection_feed, &overlay);
    info!(filled, overlay = overlay.len(), "ADP filled");
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render(command: Command, ctx: &ReportContext<'_>, generated_at: DateTime<Utc>) -> String {
    match command {
        Command::WeeklyReport => weekly::render(ctx, false),
        Command::Waivers => waivers::render(ctx),
        Command::TradeRadar => trade_radar::render(ctx),
        Command::Strategy => strategy::render(ctx),
        Command::Digest => digest::full_digest(ctx, generated_at),
    }
}

/// Render one report from a prepared snapshot.
pub fn build_report(
    snapshot: &LeagueSnapshot,
    config: &Config,
    command: Command,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let settings = ReportSettings {
        target_user: config.target_user(),
        policy: config.strategy.clone(),
    };
    let ctx = ReportContext::new(snapshot, &settings)?;
    Ok(render(command, &ctx, generated_at))
}

/// Load, prepare, and render the report `opts` asks for.
pub async fn generate(config: &Config, opts: &RunOptions) -> anyhow::Result<String> {
    let mut snapshot = load_snapshot(config, opts).await?;
    fill_adp(&mut snapshot, config)?;
    build_report(&snapshot, config, opts.command, Utc::now())
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

pub async fn deliver(config: &Config, report: &str) -> anyhow::Result<()> {
    if report.trim().is_empty() {
        warn!("empty report, nothing to deliver");
        return Ok(());
    }
    let hook = DiscordWebhook::from_config(config.credentials.discord_webhook.as_deref())?;
    hook.send(report)
        .await
        .context("failed to deliver report to Discord")?;
    Ok(())
}
