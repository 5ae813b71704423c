// End-to-end report runs over the recorded league snapshot.
//
// Every run here reads a snapshot file, so no test touches the network.

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};

use gridcast_app::cli::Command;
use gridcast_app::config::{Config, CredentialsConfig, LeagueConfig};
use gridcast_app::report::{self, RunOptions};
use gridcast_core::policy::Policy;
use gridcast_core::ReportError;

// ===========================================================================
// Test helpers
// ===========================================================================

fn core_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../gridcast-core/tests/fixtures")
        .join(name)
}

fn config(display_name: Option<&str>, adp_csv: Option<PathBuf>) -> Config {
    Config {
        league: LeagueConfig {
            league_id: String::new(),
            display_name: display_name.map(String::from),
            regular_season_weeks: 14,
            adp_csv: adp_csv.map(|p| p.display().to_string()),
            verbose: false,
        },
        strategy: Policy::default(),
        credentials: CredentialsConfig::default(),
        base_dir: std::env::temp_dir(),
    }
}

fn from_snapshot(command: Command) -> RunOptions {
    RunOptions {
        command,
        week: None,
        snapshot: Some(core_fixture("league_snapshot.json")),
        save_snapshot: None,
        deliver: false,
    }
}

async fn run(config: &Config, command: Command) -> String {
    let mut snapshot = report::load_snapshot(config, &from_snapshot(command))
        .await
        .expect("snapshot loads");
    report::fill_adp(&mut snapshot, config).expect("ADP fills");
    let at = Utc.with_ymd_and_hms(2025, 10, 12, 15, 0, 0).unwrap();
    report::build_report(&snapshot, config, command, at).expect("report renders")
}

// ===========================================================================
// Sections
// ===========================================================================

#[tokio::test]
async fn weekly_report_from_snapshot() {
    let out = run(&config(None, None), Command::WeeklyReport).await;
    assert!(out.starts_with("🏈 Weekly Report — Sunday Scaries (Season 2025) — Week 6"));
    assert!(!out.contains("ROS avg"));
}

#[tokio::test]
async fn waivers_from_snapshot() {
    let out = run(&config(None, None), Command::Waivers).await;
    assert!(out.starts_with("📥 Waiver Activity — Week 6"));
    assert!(out.contains("added by"));
}

#[tokio::test]
async fn trade_radar_from_snapshot() {
    let out = run(&config(None, None), Command::TradeRadar).await;
    assert!(out.starts_with("📊 Trade Radar — Week 6"));
    assert!(out.contains("⚠️"));
}

#[tokio::test]
async fn strategy_for_configured_user() {
    let out = run(&config(Some("gridiron_guru"), None), Command::Strategy).await;
    assert!(out.starts_with("🧠 Strategy Digest — Week 6"));
    assert!(out.contains("🔮 Projected Outcome — Week 6"));
    assert!(!out.contains("Trade targets need a configured display name"));
}

#[tokio::test]
async fn digest_carries_timestamp_and_all_sections() {
    let out = run(&config(Some("gridiron_guru"), None), Command::Digest).await;
    assert!(out.starts_with("📧 Weekly Digest — Week 6\nGenerated 2025-10-12 15:00 UTC"));
    for header in [
        "🏈 Weekly Report",
        "📥 Waiver Activity",
        "🧠 Strategy Recommendations",
        "📊 Trade Radar",
    ] {
        assert!(out.contains(header), "missing section {header}");
    }
    assert!(out.contains("ROS avg"));
}

// ===========================================================================
// Preparation
// ===========================================================================

#[tokio::test]
async fn overlay_fills_adp_missing_from_feed() {
    let with_overlay = config(None, Some(core_fixture("adp_overlay.csv")));
    let mut snapshot = report::load_snapshot(&with_overlay, &from_snapshot(Command::Digest))
        .await
        .unwrap();
    report::fill_adp(&mut snapshot, &with_overlay).unwrap();
    assert_eq!(snapshot.players["KC"].adp, Some(150.0));
    assert_eq!(snapshot.players["9221"].adp, Some(10.0));

    let without = config(None, None);
    let mut snapshot = report::load_snapshot(&without, &from_snapshot(Command::Digest))
        .await
        .unwrap();
    report::fill_adp(&mut snapshot, &without).unwrap();
    assert_eq!(snapshot.players["KC"].adp, None);
}

#[tokio::test]
async fn missing_overlay_file_is_an_error() {
    let cfg = config(None, Some(core_fixture("no_such_overlay.csv")));
    let mut snapshot = report::load_snapshot(&cfg, &from_snapshot(Command::Digest))
        .await
        .unwrap();
    assert!(report::fill_adp(&mut snapshot, &cfg).is_err());
}

#[tokio::test]
async fn save_snapshot_writes_a_replayable_file() {
    let out_path = std::env::temp_dir().join("gridcast_app_tests/saved.json");
    let _ = std::fs::remove_file(&out_path);

    let cfg = config(None, None);
    let opts = RunOptions {
        save_snapshot: Some(out_path.clone()),
        ..from_snapshot(Command::Waivers)
    };
    let original = report::load_snapshot(&cfg, &opts).await.unwrap();
    assert!(out_path.exists());

    let replay = RunOptions {
        snapshot: Some(out_path.clone()),
        ..from_snapshot(Command::Waivers)
    };
    let reloaded = report::load_snapshot(&cfg, &replay).await.unwrap();
    assert_eq!(reloaded, original);

    let _ = std::fs::remove_file(&out_path);
}

// ===========================================================================
// Configuration errors
// ===========================================================================

#[tokio::test]
async fn live_run_without_league_id_fails_fast() {
    let opts = RunOptions {
        snapshot: None,
        ..from_snapshot(Command::WeeklyReport)
    };
    let err = report::generate(&config(None, None), &opts).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::MissingLeagueId)
    ));
}

#[tokio::test]
async fn unknown_display_name_is_reported() {
    let cfg = config(Some("nobody_here"), None);
    let snapshot = report::load_snapshot(&cfg, &from_snapshot(Command::Strategy))
        .await
        .unwrap();
    let at = Utc.with_ymd_and_hms(2025, 10, 12, 15, 0, 0).unwrap();
    let err = report::build_report(&snapshot, &cfg, Command::Strategy, at).unwrap_err();
    match err.downcast_ref::<ReportError>() {
        Some(ReportError::UnknownUser { name }) => assert_eq!(name, "nobody_here"),
        other => panic!("expected UnknownUser, got {other:?}"),
    }
}

#[tokio::test]
async fn deliver_without_webhook_fails() {
    let err = report::deliver(&config(None, None), "hello").await.unwrap_err();
    assert!(err.to_string().contains("no Discord webhook configured"));
}
