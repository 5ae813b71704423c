// Weekly matchup report.

use super::{separator, ReportContext};
use crate::model::{pair_matchups, MatchupEntry};

fn team_line(ctx: &ReportContext<'_>, entry: &MatchupEntry, include_ros: bool) -> String {
    let name = ctx.owner_name_by_id(entry.roster_id);
    let shown = ctx.projections.display_points(entry);
    let projected = ctx.projections.team_total(entry.roster_id);
    let mut line = format!("{name:20}  {shown:5.1} pts  (proj {projected:5.1})");
    if include_ros {
        let avg = ctx
            .roster(entry.roster_id)
            .map(|r| ctx.ros_average(r))
            .unwrap_or(0.0);
        line.push_str(&format!(" — ROS avg: {avg:.1}"));
    }
    line
}

/// One block per complete matchup pair. Incomplete pairings are left out.
pub fn render(ctx: &ReportContext<'_>, include_ros: bool) -> String {
    let league = &ctx.snapshot.league;
    let mut out = Vec::new();
    if let Some(note) = &ctx.off_season_note {
        out.push(note.clone());
    }
    out.push(format!(
        "🏈 Weekly Report — {} (Season {}) — Week {}",
        league.name, league.season, ctx.week
    ));
    out.push(String::new());

    let pairs = pair_matchups(&ctx.snapshot.matchups);
    if pairs.is_empty() {
        out.push("No matchups found for this week.".to_string());
    }
    for pair in pairs {
        out.push(team_line(ctx, pair.home, include_ros));
        out.push(team_line(ctx, pair.away, include_ros));
        out.push(separator());
    }
    out.join("\n")
}
