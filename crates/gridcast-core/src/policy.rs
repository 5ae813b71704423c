// Tunable thresholds for depth analysis, simulation, and recommendations.
//
// Every constant the engine compares against lives here so reports can be
// reproduced with a given strategy file and tests can inject their own.
// `Default` reproduces the stock behavior.

use serde::Deserialize;

use crate::model::Position;

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DepthPolicy {
    /// A position with fewer rostered players than this is a need.
    pub need_threshold: u32,
    /// A position with more rostered players than this is a surplus.
    pub surplus_threshold: u32,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            need_threshold: 2,
            surplus_threshold: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// One step of the playoff-odds table: at least `min_wins` projected wins
/// gives `odds` percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlayoffStep {
    pub min_wins: u32,
    pub odds: u32,
}

/// Parameters of the linear win-probability heuristic and the playoff-odds
/// step function. Neither is a fitted model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationPolicy {
    /// Percentage points of win probability per point of projected margin.
    pub points_per_margin: f64,
    pub min_win_prob: f64,
    pub max_win_prob: f64,
    /// Checked in order; the first step whose `min_wins` is met applies.
    pub playoff_steps: Vec<PlayoffStep>,
    /// Odds when no step applies.
    pub playoff_floor: u32,
    /// Last regular-season week. Used when the league does not report a
    /// playoff start week.
    pub regular_season_weeks: u32,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            points_per_margin: 2.0,
            min_win_prob: 10.0,
            max_win_prob: 90.0,
            playoff_steps: vec![
                PlayoffStep { min_wins: 9, odds: 100 },
                PlayoffStep { min_wins: 7, odds: 70 },
                PlayoffStep { min_wins: 5, odds: 40 },
            ],
            playoff_floor: 10,
            regular_season_weeks: 14,
        }
    }
}

impl SimulationPolicy {
    /// Playoff odds (percent) for a projected win total.
    pub fn playoff_odds(&self, wins: u32) -> u32 {
        self.playoff_steps
            .iter()
            .find(|step| wins >= step.min_wins)
            .map(|step| step.odds)
            .unwrap_or(self.playoff_floor)
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    pub waiver_gem_limit: usize,
    pub stash_limit: usize,
    /// Stash candidates need a ROS score strictly above this.
    pub stash_min_ros: f64,
    /// Positions scanned for trade needs, in output order.
    pub trade_positions: Vec<Position>,
    /// Weekly projection at or above which a fresh pickup is recommended.
    pub add_min_projection: f64,
    /// Buy-low: bench players with ROS above this...
    pub buy_low_min_ros: f64,
    /// ...and a weekly projection below this.
    pub buy_low_max_projection: f64,
    /// Number of lowest-projected teams covered by the trade radar.
    pub trade_radar_teams: usize,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            waiver_gem_limit: 5,
            stash_limit: 5,
            stash_min_ros: 120.0,
            trade_positions: vec![Position::RB, Position::WR, Position::TE, Position::QB],
            add_min_projection: 8.0,
            buy_low_min_ros: 140.0,
            buy_low_max_projection: 9.0,
            trade_radar_teams: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

/// Which starter/bench pairs the lineup optimizer compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapVariant {
    /// Every starter against every bench player.
    Threshold,
    /// Same position, or both flex-eligible (RB/WR/TE).
    PositionAware,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineupPolicy {
    pub variant: SwapVariant,
    /// Bench player must beat the starter by more than this many points...
    pub min_margin: f64,
    /// ...and project above this absolute floor.
    pub min_projection: f64,
}

impl Default for LineupPolicy {
    fn default() -> Self {
        Self {
            variant: SwapVariant::PositionAware,
            min_margin: 2.0,
            min_projection: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// All engine policies together, as read from a strategy file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub depth: DepthPolicy,
    pub simulation: SimulationPolicy,
    pub recommendations: RecommendationPolicy,
    pub lineup: LineupPolicy,
}
