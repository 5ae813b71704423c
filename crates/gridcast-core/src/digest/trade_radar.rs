// Trade radar: the lowest-projected teams, where they could trade for depth,
// and which of their bench players look like buy-low holds.

use std::cmp::Ordering;

use super::{separator, ReportContext};
use crate::model::Roster;
use crate::recommend::{buy_low_candidates, trade_suggestions, TradeSuggestion};

/// Lowest projected team totals this week, ascending (ties by roster id).
pub fn lowest_projected(ctx: &ReportContext<'_>) -> Vec<(u32, f64)> {
    let mut totals: Vec<(u32, f64)> = ctx
        .snapshot
        .matchups
        .iter()
        .map(|m| (m.roster_id, ctx.projections.team_total(m.roster_id)))
        .collect();
    totals.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    totals.dedup_by_key(|(rid, _)| *rid);
    totals.truncate(ctx.policy.recommendations.trade_radar_teams);
    totals
}

pub(crate) fn tip_line(tip: &TradeSuggestion) -> String {
    format!(
        "  💡 Trade Tip: {} should target a {} from {} (depth: {})",
        tip.team, tip.position, tip.partner, tip.partner_depth
    )
}

/// Trade tips for one roster.
pub fn tips_for(ctx: &ReportContext<'_>, roster: &Roster) -> Vec<TradeSuggestion> {
    trade_suggestions(
        roster.roster_id,
        &ctx.depth,
        &ctx.policy.depth,
        &ctx.policy.recommendations,
    )
}

pub fn render(ctx: &ReportContext<'_>) -> String {
    let mut out = vec![format!("📊 Trade Radar — Week {}", ctx.week)];

    let lowest = lowest_projected(ctx);
    if lowest.is_empty() {
        out.push("  No projected matchups available this week.".to_string());
    }

    for (rid, total) in lowest {
        out.push(format!(
            "⚠️ {} projected only {total:.1} pts",
            ctx.owner_name_by_id(rid)
        ));
        if let Some(roster) = ctx.roster(rid) {
            out.extend(tips_for(ctx, roster).iter().map(tip_line));
            out.extend(
                buy_low_candidates(
                    roster,
                    ctx.players(),
                    &ctx.ros,
                    &ctx.projections,
                    &ctx.policy.recommendations,
                )
                .iter()
                .map(|c| format!("  {c}")),
            );
        }
        out.push(separator());
    }
    out.join("\n")
}
