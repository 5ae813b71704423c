// Matchup and season simulation.
//
// Win probability is a linear function of the projected margin, clamped
// short of certainty. Season odds come from a step table on projected wins.
// Both are placeholder heuristics kept stable so reports stay reproducible.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{opponent_of, MatchupEntry, PlayerMap, Record, Roster};
use crate::policy::SimulationPolicy;
use crate::projections::ProjectionStore;
use crate::ros::round1;

/// Projected outcome of one matchup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekProjection {
    pub my_score: f64,
    pub opp_score: f64,
    /// Percent, in [min_win_prob, max_win_prob].
    pub win_prob: f64,
}

/// Projected end-of-season record and playoff odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonProjection {
    pub record: Record,
    /// Percent.
    pub playoff_odds: u32,
}

/// A future pairing: my starters against an opponent's.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledMatchup {
    pub week: u32,
    pub opponent_roster_id: u32,
    pub my_starters: Vec<String>,
    pub opp_starters: Vec<String>,
}

/// Win probability for a projected margin.
pub fn win_probability(my_score: f64, opp_score: f64, policy: &SimulationPolicy) -> f64 {
    let diff = my_score - opp_score;
    let raw = 50.0 + diff * policy.points_per_margin;
    let prob = if diff == 0.0 {
        50.0
    } else if diff > 0.0 {
        raw.min(policy.max_win_prob)
    } else {
        raw.max(policy.min_win_prob)
    };
    round1(prob)
}

/// Project one week: sum each side's starter projections and derive a win
/// probability from the unrounded margin. Scores are rounded for display.
pub fn simulate_week(
    my_starters: &[String],
    opp_starters: &[String],
    projections: &ProjectionStore,
    players: &PlayerMap,
    policy: &SimulationPolicy,
) -> WeekProjection {
    let my_total = projections.lineup_total(my_starters, players);
    let opp_total = projections.lineup_total(opp_starters, players);
    WeekProjection {
        my_score: round1(my_total),
        opp_score: round1(opp_total),
        win_prob: win_probability(my_total, opp_total, policy),
    }
}

/// Play out the remaining schedule. A projected win probability of 50 or
/// more counts as a win; anything else is a loss (no draws).
pub fn project_season(
    current: Record,
    remaining: &[ScheduledMatchup],
    projections: &ProjectionStore,
    players: &PlayerMap,
    policy: &SimulationPolicy,
) -> SeasonProjection {
    let mut record = current;
    for game in remaining {
        let result = simulate_week(
            &game.my_starters,
            &game.opp_starters,
            projections,
            players,
            policy,
        );
        if result.win_prob >= 50.0 {
            record.wins += 1;
        } else {
            record.losses += 1;
        }
    }
    SeasonProjection {
        record,
        playoff_odds: policy.playoff_odds(record.wins),
    }
}

/// Wins and losses for a roster from actual points in a set of matchups.
/// Equal scores count as neither.
pub fn team_record(roster_id: u32, matchups: &[MatchupEntry]) -> Record {
    let mut record = Record::default();
    for m in matchups.iter().filter(|m| m.roster_id == roster_id) {
        let opp_points = m
            .matchup_id
            .and_then(|mid| {
                matchups
                    .iter()
                    .find(|x| x.matchup_id == Some(mid) && x.roster_id != roster_id)
            })
            .map(|x| x.points)
            .unwrap_or(0.0);
        if m.points > opp_points {
            record.wins += 1;
        } else if m.points < opp_points {
            record.losses += 1;
        }
    }
    record
}

/// Record to project from: the league-reported record when present,
/// otherwise the record from this week's matchups.
pub fn current_record(roster: &Roster, matchups: &[MatchupEntry]) -> Record {
    roster
        .record()
        .unwrap_or_else(|| team_record(roster.roster_id, matchups))
}

/// Build the remaining regular-season schedule for `my_roster`.
///
/// Covers weeks `week + 1 ..= last_week`. A week with fetched matchups uses
/// that week's opponent (with the opponent's current starters). A week
/// without data repeats `fallback_opponent`. Weeks with data but no opponent
/// for my roster (a bye) are skipped.
pub fn remaining_schedule(
    my_roster: &Roster,
    rosters: &[Roster],
    week: u32,
    last_week: u32,
    future_matchups: &BTreeMap<u32, Vec<MatchupEntry>>,
    fallback_opponent: Option<&Roster>,
) -> Vec<ScheduledMatchup> {
    let mut schedule = Vec::new();
    for w in (week + 1)..=last_week {
        let opponent = match future_matchups.get(&w) {
            Some(entries) if !entries.is_empty() => opponent_of(entries, my_roster.roster_id)
                .and_then(|opp| rosters.iter().find(|r| r.roster_id == opp.roster_id)),
            _ => fallback_opponent,
        };
        if let Some(opp) = opponent {
            schedule.push(ScheduledMatchup {
                week: w,
                opponent_roster_id: opp.roster_id,
                my_starters: my_roster.starters.clone(),
                opp_starters: opp.starters.clone(),
            });
        }
    }
    schedule
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
