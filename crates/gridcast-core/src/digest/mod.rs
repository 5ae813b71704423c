// Report assembly.
//
// `ReportContext` is built once per run from a league snapshot and holds
// everything the sections share: owner names, ROS scores, projections, depth,
// and the resolved target roster. Each section module renders plain text.

pub mod strategy;
pub mod trade_radar;
pub mod waivers;
pub mod weekly;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::depth::{Depth, LeagueDepth};
use crate::error::ReportError;
use crate::model::{LeagueSnapshot, PlayerMap, Roster, User};
use crate::policy::Policy;
use crate::projections::ProjectionStore;
use crate::recommend::rostered_ids;
use crate::ros::{generate_ros_scores, RosScores};

/// Weeks outside this range are treated as off-season.
pub const FIRST_WEEK: u32 = 1;
pub const LAST_WEEK: u32 = 18;

pub(crate) const SEPARATOR_WIDTH: usize = 50;

pub(crate) fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

// ---------------------------------------------------------------------------
// Week resolution
// ---------------------------------------------------------------------------

/// The week a run reports on, plus a note when it had to fall back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekResolution {
    pub week: u32,
    pub note: Option<String>,
}

/// Requested week, else the reported week. Anything outside 1..=18 (or no
/// week at all) falls back to week 1 with an off-season note.
pub fn resolve_week(requested: Option<u32>, reported: Option<u32>) -> WeekResolution {
    match requested.or(reported) {
        Some(w) if (FIRST_WEEK..=LAST_WEEK).contains(&w) => WeekResolution { week: w, note: None },
        _ => {
            let shown = reported
                .map(|w| w.to_string())
                .unwrap_or_else(|| "none".to_string());
            WeekResolution {
                week: FIRST_WEEK,
                note: Some(format!(
                    "ℹ️ Sleeper reports week {shown} — likely off-season. Defaulting to week {FIRST_WEEK}."
                )),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Target user
// ---------------------------------------------------------------------------

/// Find the user a personalized report is for: exact user id, or exact
/// display name ignoring case.
pub fn resolve_user<'a>(users: &'a [User], wanted: &str) -> Result<&'a User, ReportError> {
    let wanted = wanted.trim();
    if let Some(user) = users.iter().find(|u| u.user_id == wanted) {
        return Ok(user);
    }

    let matches: Vec<&User> = users
        .iter()
        .filter(|u| {
            u.display_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
        })
        .collect();

    match matches.as_slice() {
        [] => Err(ReportError::UnknownUser {
            name: wanted.to_string(),
        }),
        [one] => Ok(one),
        many => Err(ReportError::AmbiguousUser {
            name: wanted.to_string(),
            candidates: many.iter().map(|u| u.user_id.clone()).collect(),
        }),
    }
}

/// The roster owned by the named user.
pub fn resolve_target<'a>(
    users: &[User],
    rosters: &'a [Roster],
    wanted: &str,
) -> Result<&'a Roster, ReportError> {
    let user = resolve_user(users, wanted)?;
    rosters
        .iter()
        .find(|r| r.owner_id.as_deref() == Some(user.user_id.as_str()))
        .ok_or_else(|| ReportError::NoRoster { name: user.name() })
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Per-run report options.
#[derive(Debug, Clone, Default)]
pub struct ReportSettings {
    /// User id or display name for personalized sections.
    pub target_user: Option<String>,
    pub policy: Policy,
}

pub struct ReportContext<'a> {
    pub snapshot: &'a LeagueSnapshot,
    pub week: u32,
    pub off_season_note: Option<String>,
    pub policy: &'a Policy,
    pub ros: RosScores,
    pub projections: ProjectionStore,
    pub depth: LeagueDepth,
    pub target: Option<&'a Roster>,
    user_names: HashMap<&'a str, String>,
}

impl<'a> ReportContext<'a> {
    /// Build the shared context. Fails only when a target user is configured
    /// and cannot be resolved to exactly one roster.
    pub fn new(
        snapshot: &'a LeagueSnapshot,
        settings: &'a ReportSettings,
    ) -> Result<Self, ReportError> {
        let target = match settings.target_user.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                Some(resolve_target(&snapshot.users, &snapshot.rosters, name)?)
            }
            _ => None,
        };

        let user_names: HashMap<&str, String> = snapshot
            .users
            .iter()
            .map(|u| (u.user_id.as_str(), u.name()))
            .collect();

        let ros = generate_ros_scores(&snapshot.players);
        let projections = ProjectionStore::build(&snapshot.matchups, &snapshot.projection_feed);
        let depth = LeagueDepth::build(&snapshot.rosters, &snapshot.players, |r| {
            owner_name_from(&user_names, r)
        });

        info!(
            week = snapshot.week,
            rosters = snapshot.rosters.len(),
            ros_scored = ros.len(),
            target_roster = target.map(|r| r.roster_id),
            "report context ready"
        );

        Ok(ReportContext {
            snapshot,
            week: snapshot.week,
            off_season_note: snapshot.off_season_note.clone(),
            policy: &settings.policy,
            ros,
            projections,
            depth,
            target,
            user_names,
        })
    }

    pub fn players(&self) -> &PlayerMap {
        &self.snapshot.players
    }

    pub fn rosters(&self) -> &[Roster] {
        &self.snapshot.rosters
    }

    pub fn roster(&self, roster_id: u32) -> Option<&'a Roster> {
        self.snapshot.rosters.iter().find(|r| r.roster_id == roster_id)
    }

    /// Display name of a user id, `"User <id>"` when unknown.
    pub fn user_name(&self, user_id: &str) -> String {
        self.user_names
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| format!("User {user_id}"))
    }

    /// Owner display name of a roster, `"Roster <id>"` when unowned or the
    /// owner is not a league user.
    pub fn owner_name(&self, roster: &Roster) -> String {
        owner_name_from(&self.user_names, roster)
    }

    pub fn owner_name_by_id(&self, roster_id: u32) -> String {
        match self.roster(roster_id) {
            Some(r) => self.owner_name(r),
            None => format!("Roster {roster_id}"),
        }
    }

    pub fn rostered(&self) -> HashSet<&str> {
        rostered_ids(&self.snapshot.rosters)
    }

    pub fn target_depth(&self) -> Option<Depth> {
        self.target
            .map(|r| Depth::for_roster(r, &self.snapshot.players))
    }

    /// Mean ROS score over a roster's players (missing scores count as 0).
    pub fn ros_average(&self, roster: &Roster) -> f64 {
        if roster.players.is_empty() {
            return 0.0;
        }
        let total: f64 = roster
            .players
            .iter()
            .map(|pid| crate::ros::score_or_zero(&self.ros, pid))
            .sum();
        crate::ros::round1(total / roster.players.len() as f64)
    }
}

fn owner_name_from(user_names: &HashMap<&str, String>, roster: &Roster) -> String {
    roster
        .owner_id
        .as_deref()
        .and_then(|id| user_names.get(id).cloned())
        .unwrap_or_else(|| format!("Roster {}", roster.roster_id))
}

// ---------------------------------------------------------------------------
// Full digest
// ---------------------------------------------------------------------------

/// Every section in one message: weekly report with ROS averages, waiver
/// activity, strategy digest, and trade radar.
pub fn full_digest(ctx: &ReportContext<'_>, generated_at: DateTime<Utc>) -> String {
    let sections = [
        format!(
            "📧 Weekly Digest — Week {}\nGenerated {}",
            ctx.week,
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        weekly::render(ctx, true),
        waivers::render(ctx),
        format!("🧠 Strategy Recommendations\n\n{}", strategy::render(ctx)),
        trade_radar::render(ctx),
    ];
    debug!(sections = sections.len(), "digest assembled");
    sections.join("\n\n")
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
