// Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gridcast")]
#[command(about = "Weekly Sleeper league reports: matchups, waivers, trade radar, and strategy")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// NFL week to report on (defaults to the week Sleeper reports)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=18))]
    pub week: Option<u32>,

    /// Read league data from a saved snapshot instead of the Sleeper API
    #[arg(long, global = true, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Save the fetched league data to FILE for later replay
    #[arg(long, global = true, value_name = "FILE")]
    pub save_snapshot: Option<PathBuf>,

    /// Post the report to the configured Discord webhook
    #[arg(long, global = true)]
    pub deliver: bool,

    /// Directory holding config/ (and defaults/)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Scores and projections for every matchup this week
    WeeklyReport,
    /// Adds, drops, and trades made this week
    Waivers,
    /// The lowest-projected teams with trade and buy-low tips
    TradeRadar,
    /// Personalized waiver, trade, lineup, and outcome advice
    Strategy,
    /// Every section in one message
    Digest,
}
