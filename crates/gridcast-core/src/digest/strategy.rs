// Personalized strategy digest.
//
// Sections are built for the target roster when one is configured. Without
// a target, gems are unfiltered, waiver targets cover every pickup, lineup
// tips cover every roster, and the outcome section is unavailable.

use std::collections::BTreeSet;

use super::trade_radar::{tip_line, tips_for};
use super::ReportContext;
use crate::model::{opponent_of, Roster};
use crate::recommend::{
    lineup_swaps, recommend_adds, stash_suggestions, waiver_gems, PlayerTag, WaiverGem,
};
use crate::simulator::{current_record, project_season, remaining_schedule, simulate_week};

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Last regular-season week: the week before the league's playoffs start,
/// else the configured season length.
pub fn last_regular_week(ctx: &ReportContext<'_>) -> u32 {
    ctx.snapshot
        .league
        .settings
        .playoff_week_start
        .filter(|&w| w > 1)
        .map(|w| w - 1)
        .unwrap_or(ctx.policy.simulation.regular_season_weeks)
}

/// Player ids picked up this week (waiver or free agent), by the target
/// roster when there is one. Sorted, without duplicates.
pub fn pickups(ctx: &ReportContext<'_>) -> Vec<String> {
    let mut ids = BTreeSet::new();
    for txn in ctx.snapshot.transactions.iter().filter(|t| t.kind.is_pickup()) {
        for (pid, &rid) in &txn.adds {
            let mine = match ctx.target {
                Some(target) => {
                    rid == target.roster_id
                        || (txn.creator_id.is_some() && txn.creator_id == target.owner_id)
                }
                None => true,
            };
            if mine {
                ids.insert(pid.clone());
            }
        }
    }
    ids.into_iter().collect()
}

fn gems_section(ctx: &ReportContext<'_>) -> Vec<String> {
    let rostered = ctx.rostered();
    let depth = ctx.target_depth();
    let gems: Vec<WaiverGem> = waiver_gems(
        ctx.players(),
        &ctx.ros,
        &rostered,
        &ctx.projections,
        depth.as_ref(),
        &ctx.policy.depth,
        &ctx.policy.recommendations,
    );

    let mut out = vec![format!("🏆 Top Waiver Gems — Week {}", ctx.week)];
    if gems.is_empty() {
        out.push("  No waiver gems fit your roster needs this week.".to_string());
    }
    for gem in gems {
        out.push(format!(
            "  ➕ {:22} ({}, {}) — ROS: {:.1}, W{} proj: {}",
            gem.player.name,
            gem.player.position,
            gem.player.team,
            gem.ros,
            ctx.week,
            fmt_opt(gem.week_projection)
        ));
    }
    out
}

fn targets_section(ctx: &ReportContext<'_>, added: &[String]) -> Vec<String> {
    let mut out = vec![format!("📥 Waiver Targets — Week {}", ctx.week)];
    if added.is_empty() {
        out.push("  No notable waiver adds this week.".to_string());
    }
    for pid in added {
        let tag = PlayerTag::resolve(ctx.players(), pid);
        out.push(format!(
            "  - {} ({}, {}) — ROS: {}, W{} proj: {}",
            tag.name,
            tag.position,
            tag.team,
            fmt_opt(ctx.ros.get(pid).copied()),
            ctx.week,
            fmt_opt(ctx.projections.get(pid))
        ));
    }
    out
}

fn trade_section(ctx: &ReportContext<'_>) -> Vec<String> {
    let mut out = vec![format!("🔁 Trade Targets — Week {}", ctx.week)];
    match ctx.target {
        Some(roster) => {
            let tips = tips_for(ctx, roster);
            if tips.is_empty() {
                out.push("  No trade targets for your roster this week.".to_string());
            }
            out.extend(tips.iter().map(tip_line));
        }
        None => out.push("  Trade targets need a configured display name.".to_string()),
    }
    out
}

fn lineup_section(ctx: &ReportContext<'_>) -> Vec<String> {
    let rosters: Vec<&Roster> = match ctx.target {
        Some(roster) => vec![roster],
        None => ctx.rosters().iter().collect(),
    };

    let mut out = vec![format!("📝 Lineup Tips — Week {}", ctx.week)];
    let mut any = false;
    for roster in rosters {
        let owner = ctx.owner_name(roster);
        for swap in lineup_swaps(roster, ctx.players(), &ctx.projections, &ctx.policy.lineup) {
            out.push(format!("  ✅ {owner}: {swap}"));
            any = true;
        }
    }
    if !any {
        out.push("  No lineup changes suggested this week.".to_string());
    }
    out
}

fn outcome_section(ctx: &ReportContext<'_>) -> Vec<String> {
    let mut out = vec![format!("🔮 Projected Outcome — Week {}", ctx.week)];

    let opponent = ctx.target.and_then(|me| {
        opponent_of(&ctx.snapshot.matchups, me.roster_id)
            .and_then(|opp| ctx.roster(opp.roster_id))
            .map(|opp| (me, opp))
    });
    let Some((me, opp)) = opponent else {
        out.push("  - Matchup or season projection unavailable".to_string());
        return out;
    };

    let sim = &ctx.policy.simulation;
    let week = simulate_week(&me.starters, &opp.starters, &ctx.projections, ctx.players(), sim);
    out.push(format!(
        "  - Matchup vs {}: {:.1} pts vs {:.1} pts → {:.1}% win probability",
        ctx.owner_name(opp),
        week.my_score,
        week.opp_score,
        week.win_prob
    ));

    let schedule = remaining_schedule(
        me,
        ctx.rosters(),
        ctx.week,
        last_regular_week(ctx),
        &ctx.snapshot.future_matchups,
        Some(opp),
    );
    let season = project_season(
        current_record(me, &ctx.snapshot.matchups),
        &schedule,
        &ctx.projections,
        ctx.players(),
        sim,
    );
    out.push(format!(
        "  - Season projection: {}, {}% playoff odds",
        season.record, season.playoff_odds
    ));
    out
}

fn recommendations_section(ctx: &ReportContext<'_>, added: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = recommend_adds(
        added,
        ctx.players(),
        &ctx.projections,
        &ctx.policy.recommendations,
    )
    .iter()
    .map(ToString::to_string)
    .collect();

    if let Some(roster) = ctx.target {
        lines.extend(tips_for(ctx, roster).iter().map(ToString::to_string));
        if let Some(depth) = ctx.target_depth() {
            let rostered = ctx.rostered();
            lines.extend(
                stash_suggestions(
                    ctx.players(),
                    &ctx.ros,
                    &rostered,
                    &depth,
                    &ctx.policy.depth,
                    &ctx.policy.recommendations,
                )
                .iter()
                .map(ToString::to_string),
            );
        }
    }

    let mut out = vec!["🧠 Recommendations".to_string()];
    if lines.is_empty() {
        out.push("  No specific recommendations this week.".to_string());
    }
    out.extend(lines.into_iter().map(|l| format!("  {l}")));
    out
}

pub fn render(ctx: &ReportContext<'_>) -> String {
    let added = pickups(ctx);
    let sections = [
        vec![format!("🧠 Strategy Digest — Week {}", ctx.week)],
        gems_section(ctx),
        targets_section(ctx, &added),
        trade_section(ctx),
        lineup_section(ctx),
        outcome_section(ctx),
        recommendations_section(ctx, &added),
    ];
    sections
        .iter()
        .map(|s| s.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
