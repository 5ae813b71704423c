// Recommendation engine: waiver gems, trades, stashes, lineup swaps,
// waiver-add picks, and buy-low candidates.
//
// Everything here is a pure function of the league data plus policy. Results
// are structured values; `Display` renders the one-line report phrase.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use crate::depth::{Depth, LeagueDepth};
use crate::model::{PlayerMap, Position, Roster};
use crate::policy::{DepthPolicy, LineupPolicy, RecommendationPolicy, SwapVariant};
use crate::projections::ProjectionStore;
use crate::ros::RosScores;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Display fields for a player id, with placeholders for unknown ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTag {
    pub player_id: String,
    pub name: String,
    pub position: Position,
    pub team: String,
}

impl PlayerTag {
    pub fn resolve(players: &PlayerMap, player_id: &str) -> Self {
        match players.get(player_id) {
            Some(p) => PlayerTag {
                player_id: player_id.to_string(),
                name: p.display_name(),
                position: p.position,
                team: p.team_or_fa().to_string(),
            },
            None => PlayerTag {
                player_id: player_id.to_string(),
                name: "Unknown".to_string(),
                position: Position::Unknown,
                team: "FA".to_string(),
            },
        }
    }
}

/// Every player id on any roster.
pub fn rostered_ids(rosters: &[Roster]) -> HashSet<&str> {
    rosters
        .iter()
        .flat_map(|r| r.players.iter().map(String::as_str))
        .collect()
}

/// Descending by value, then ascending by id.
fn rank_desc(a: (f64, &str), b: (f64, &str)) -> Ordering {
    b.0.partial_cmp(&a.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.1.cmp(b.1))
}

// ---------------------------------------------------------------------------
// Waiver gems
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WaiverGem {
    pub player: PlayerTag,
    pub ros: f64,
    /// This week's projection, when one exists.
    pub week_projection: Option<f64>,
}

impl WaiverGem {
    /// Ranking value: the better of ROS and this week's projection.
    pub fn value(&self) -> f64 {
        self.ros.max(self.week_projection.unwrap_or(0.0))
    }
}

/// Best unrostered players. Candidates are players with a ROS score that no
/// roster holds. With `my_depth`, only positions where that roster is below
/// the need threshold are kept.
pub fn waiver_gems(
    players: &PlayerMap,
    ros: &RosScores,
    rostered: &HashSet<&str>,
    projections: &ProjectionStore,
    my_depth: Option<&Depth>,
    depth_policy: &DepthPolicy,
    policy: &RecommendationPolicy,
) -> Vec<WaiverGem> {
    let mut gems: Vec<WaiverGem> = ros
        .iter()
        .filter(|(id, _)| !rostered.contains(id.as_str()))
        .map(|(id, &score)| WaiverGem {
            player: PlayerTag::resolve(players, id),
            ros: score,
            week_projection: projections
                .get(id)
                .or_else(|| players.get(id).and_then(|p| p.projected_points)),
        })
        .filter(|gem| match my_depth {
            Some(depth) => depth.is_need(gem.player.position, depth_policy),
            None => true,
        })
        .collect();

    gems.sort_by(|a, b| {
        rank_desc(
            (a.value(), a.player.player_id.as_str()),
            (b.value(), b.player.player_id.as_str()),
        )
    });
    gems.truncate(policy.waiver_gem_limit);
    gems
}

// ---------------------------------------------------------------------------
// Trades
// ---------------------------------------------------------------------------

/// `team` is thin at `position`; `partner` has a surplus there.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSuggestion {
    pub team: String,
    pub position: Position,
    pub partner: String,
    pub partner_depth: u32,
}

impl fmt::Display for TradeSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "🔁 {} should trade for a {} from {} (depth: {})",
            self.team, self.position, self.partner, self.partner_depth
        )
    }
}

/// For each trade position where roster `roster_id` is below the need
/// threshold, one suggestion per other roster above the surplus threshold
/// there. Position order follows the policy; partners follow league order.
pub fn trade_suggestions(
    roster_id: u32,
    league: &LeagueDepth,
    depth_policy: &DepthPolicy,
    policy: &RecommendationPolicy,
) -> Vec<TradeSuggestion> {
    let empty = Depth::default();
    let (team, my_depth) = match league.team(roster_id) {
        Some(t) => (t.owner.clone(), &t.depth),
        None => (format!("Roster {roster_id}"), &empty),
    };

    let mut out = Vec::new();
    for &pos in &policy.trade_positions {
        if !my_depth.is_need(pos, depth_policy) {
            continue;
        }
        for other in league.iter() {
            if other.roster_id == roster_id || !other.depth.is_surplus(pos, depth_policy) {
                continue;
            }
            out.push(TradeSuggestion {
                team: team.clone(),
                position: pos,
                partner: other.owner.clone(),
                partner_depth: other.depth.count(pos),
            });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Stashes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StashSuggestion {
    pub player: PlayerTag,
    pub ros: f64,
}

impl fmt::Display for StashSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📦 Stash {} ({}, {}) — ROS: {:.1}",
            self.player.name, self.player.position, self.player.team, self.ros
        )
    }
}

/// Unrostered players at a position of need with ROS above the stash
/// floor, best first.
pub fn stash_suggestions(
    players: &PlayerMap,
    ros: &RosScores,
    rostered: &HashSet<&str>,
    my_depth: &Depth,
    depth_policy: &DepthPolicy,
    policy: &RecommendationPolicy,
) -> Vec<StashSuggestion> {
    let mut stashes: Vec<StashSuggestion> = ros
        .iter()
        .filter(|(id, &score)| !rostered.contains(id.as_str()) && score > policy.stash_min_ros)
        .map(|(id, &score)| StashSuggestion {
            player: PlayerTag::resolve(players, id),
            ros: score,
        })
        .filter(|s| my_depth.is_need(s.player.position, depth_policy))
        .collect();

    stashes.sort_by(|a, b| {
        rank_desc(
            (a.ros, a.player.player_id.as_str()),
            (b.ros, b.player.player_id.as_str()),
        )
    });
    stashes.truncate(policy.stash_limit);
    stashes
}

// ---------------------------------------------------------------------------
// Lineup swaps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LineupSwap {
    pub bench: PlayerTag,
    pub bench_points: f64,
    pub starter: PlayerTag,
    pub starter_points: f64,
}

impl fmt::Display for LineupSwap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start {} ({:.1}) over {} ({:.1})",
            self.bench.name, self.bench_points, self.starter.name, self.starter_points
        )
    }
}

fn swap_allowed(variant: SwapVariant, starter: Position, bench: Position) -> bool {
    match variant {
        SwapVariant::Threshold => true,
        SwapVariant::PositionAware => {
            (starter == bench && starter.is_known())
                || (starter.is_flex_eligible() && bench.is_flex_eligible())
        }
    }
}

/// Bench players projected to clearly outscore a starter.
///
/// A pair is flagged when `bench > max(starter + min_margin, min_projection)`.
/// Starters at a core skill position projecting exactly zero are treated as
/// inactive and skipped.
pub fn lineup_swaps(
    roster: &Roster,
    players: &PlayerMap,
    projections: &ProjectionStore,
    policy: &LineupPolicy,
) -> Vec<LineupSwap> {
    let bench: Vec<(PlayerTag, f64)> = roster
        .bench()
        .into_iter()
        .map(|pid| {
            (
                PlayerTag::resolve(players, pid),
                projections.points_for(pid, players),
            )
        })
        .collect();

    let mut swaps = Vec::new();
    for s_pid in &roster.starters {
        let starter = PlayerTag::resolve(players, s_pid);
        let s_points = projections.points_for(s_pid, players);
        if s_points == 0.0 && starter.position.is_core_skill() {
            continue;
        }
        let bar = (s_points + policy.min_margin).max(policy.min_projection);
        for (b_tag, b_points) in &bench {
            if *b_points > bar && swap_allowed(policy.variant, starter.position, b_tag.position) {
                swaps.push(LineupSwap {
                    bench: b_tag.clone(),
                    bench_points: *b_points,
                    starter: starter.clone(),
                    starter_points: s_points,
                });
            }
        }
    }
    swaps
}

// ---------------------------------------------------------------------------
// Waiver adds and buy-low
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AddRecommendation {
    pub player: PlayerTag,
    pub projection: f64,
}

impl fmt::Display for AddRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✅ Add {} ({}, {}) — projected {:.1} pts",
            self.player.name, self.player.position, self.player.team, self.projection
        )
    }
}

/// Of the players just added, those projecting at or above the add floor.
pub fn recommend_adds(
    added: &[String],
    players: &PlayerMap,
    projections: &ProjectionStore,
    policy: &RecommendationPolicy,
) -> Vec<AddRecommendation> {
    added
        .iter()
        .filter_map(|pid| {
            let projection = projections.points_for(pid, players);
            (projection >= policy.add_min_projection).then(|| AddRecommendation {
                player: PlayerTag::resolve(players, pid),
                projection,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuyLowCandidate {
    pub player: PlayerTag,
    pub ros: f64,
    pub projection: f64,
}

impl fmt::Display for BuyLowCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "🔍 Buy-low candidate: {} ({}, {}) — ROS: {:.1}, projected {:.1} pts",
            self.player.name, self.player.position, self.player.team, self.ros, self.projection
        )
    }
}

/// Bench players with strong rest-of-season value but a weak week.
pub fn buy_low_candidates(
    roster: &Roster,
    players: &PlayerMap,
    ros: &RosScores,
    projections: &ProjectionStore,
    policy: &RecommendationPolicy,
) -> Vec<BuyLowCandidate> {
    roster
        .bench()
        .into_iter()
        .filter_map(|pid| {
            let score = ros.get(pid).copied()?;
            let projection = projections.points_for(pid, players);
            (score > policy.buy_low_min_ros && projection < policy.buy_low_max_projection).then(
                || BuyLowCandidate {
                    player: PlayerTag::resolve(players, pid),
                    ros: score,
                    projection,
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Player;
    use std::collections::HashMap;

    fn player(id: &str, name: &str, pos: Position, team: &str) -> Player {
        Player {
            player_id: id.into(),
            full_name: Some(name.into()),
            position: pos,
            team: Some(team.into()),
            ..Player::default()
        }
    }

    fn player_map(list: Vec<Player>) -> PlayerMap {
        list.into_iter().map(|p| (p.player_id.clone(), p)).collect()
    }

    fn store(points: &[(&str, f64)]) -> ProjectionStore {
        ProjectionStore::from_points(
            points
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn ros_map(scores: &[(&str, f64)]) -> RosScores {
        scores.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn roster(id: u32, starters: &[&str], bench: &[&str]) -> Roster {
        Roster {
            roster_id: id,
            owner_id: Some(format!("u{id}")),
            starters: starters.iter().map(|s| s.to_string()).collect(),
            players: starters
                .iter()
                .chain(bench.iter())
                .map(|s| s.to_string())
                .collect(),
            settings: None,
        }
    }

    // -- waiver gems --

    #[test]
    fn gems_exclude_rostered_and_rank_by_value() {
        let players = player_map(vec![
            player("a", "Alpha", Position::RB, "KC"),
            player("b", "Bravo", Position::WR, "BUF"),
            player("c", "Charlie", Position::TE, "DAL"),
            player("d", "Delta", Position::QB, "SF"),
        ]);
        let ros = ros_map(&[("a", 150.0), ("b", 180.0), ("c", 90.0), ("d", 200.0)]);
        let rosters = vec![roster(1, &["d"], &[])];
        let rostered = rostered_ids(&rosters);

        let gems = waiver_gems(
            &players,
            &ros,
            &rostered,
            &ProjectionStore::default(),
            None,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        let ids: Vec<&str> = gems.iter().map(|g| g.player.player_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(gems.iter().all(|g| !rostered.contains(g.player.player_id.as_str())));
    }

    #[test]
    fn gems_filtered_by_need_and_limited() {
        let players = player_map(vec![
            player("rb1", "Rb One", Position::RB, "KC"),
            player("rb2", "Rb Two", Position::RB, "KC"),
            player("wr1", "Wr One", Position::WR, "KC"),
            player("te1", "Te One", Position::TE, "KC"),
            player("te2", "Te Two", Position::TE, "KC"),
        ]);
        let ros = ros_map(&[("wr1", 200.0), ("te1", 100.0), ("te2", 100.0)]);
        let mine = roster(1, &["rb1", "rb2"], &[]);
        let depth = Depth::for_roster(&mine, &players);
        let rosters = vec![mine];
        let rostered = rostered_ids(&rosters);
        let policy = RecommendationPolicy {
            waiver_gem_limit: 1,
            ..RecommendationPolicy::default()
        };

        // wr1 outranks, but my WR depth is 0 so both WR and TE are needs
        let gems = waiver_gems(
            &players,
            &ros,
            &rostered,
            &ProjectionStore::default(),
            Some(&depth),
            &DepthPolicy::default(),
            &policy,
        );
        assert_eq!(gems.len(), 1);
        assert_eq!(gems[0].player.player_id, "wr1");

        // RB is not a need (depth 2), so an RB gem is filtered out
        let ros = ros_map(&[("rb9", 300.0), ("te1", 100.0), ("te2", 100.0)]);
        let mut players = players;
        players.insert("rb9".into(), player("rb9", "Rb Nine", Position::RB, "NYJ"));
        let gems = waiver_gems(
            &players,
            &ros,
            &rostered,
            &ProjectionStore::default(),
            Some(&depth),
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        let ids: Vec<&str> = gems.iter().map(|g| g.player.player_id.as_str()).collect();
        // equal value: tie broken by id
        assert_eq!(ids, vec!["te1", "te2"]);
    }

    #[test]
    fn gem_value_uses_week_projection_when_higher() {
        let players = player_map(vec![
            player("a", "Alpha", Position::WR, "KC"),
            player("b", "Bravo", Position::WR, "KC"),
        ]);
        let ros = ros_map(&[("a", 10.0), ("b", 12.0)]);
        let gems = waiver_gems(
            &players,
            &ros,
            &HashSet::new(),
            &store(&[("a", 25.0)]),
            None,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        assert_eq!(gems[0].player.player_id, "a");
        assert_eq!(gems[0].week_projection, Some(25.0));
        assert_eq!(gems[1].week_projection, None);
    }

    // -- trades --

    #[test]
    fn trade_suggestions_from_surplus_teams() {
        let players = player_map(vec![
            player("qb1", "Q", Position::QB, "KC"),
            player("qb2", "Q2", Position::QB, "KC"),
            player("rb1", "R1", Position::RB, "KC"),
            player("rb2", "R2", Position::RB, "KC"),
            player("rb3", "R3", Position::RB, "KC"),
            player("rb4", "R4", Position::RB, "KC"),
            player("wr1", "W1", Position::WR, "KC"),
            player("wr2", "W2", Position::WR, "KC"),
            player("te1", "T1", Position::TE, "KC"),
            player("te2", "T2", Position::TE, "KC"),
        ]);
        let rosters = vec![
            roster(1, &["qb1", "qb2", "wr1", "wr2", "te1", "te2"], &[]),
            roster(2, &["rb1", "rb2", "rb3", "rb4"], &[]),
            roster(3, &[], &[]),
        ];
        let league = LeagueDepth::build(&rosters, &players, |r| format!("Team {}", r.roster_id));
        let tips = trade_suggestions(
            1,
            &league,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        assert_eq!(tips.len(), 1);
        assert_eq!(
            tips[0].to_string(),
            "🔁 Team 1 should trade for a RB from Team 2 (depth: 4)"
        );

        // team 3 needs everything; only team 2 has a surplus (RB)
        let tips = trade_suggestions(
            3,
            &league,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].partner, "Team 2");
    }

    #[test]
    fn trade_suggestions_for_unknown_team_use_empty_depth() {
        let league = LeagueDepth::default();
        let tips = trade_suggestions(
            7,
            &league,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        assert!(tips.is_empty());
    }

    #[test]
    fn trade_suggestions_with_duplicate_owner_names() {
        let players = player_map(vec![
            player("qb1", "Q1", Position::QB, "KC"),
            player("rb1", "R1", Position::RB, "KC"),
            player("rb2", "R2", Position::RB, "KC"),
            player("rb3", "R3", Position::RB, "KC"),
            player("rb4", "R4", Position::RB, "KC"),
        ]);
        let rosters = vec![
            roster(1, &["qb1"], &[]),
            roster(2, &["rb1", "rb2", "rb3", "rb4"], &[]),
        ];
        let league = LeagueDepth::build(&rosters, &players, |_| "Sam".to_string());

        // roster 1 is thin at RB; roster 2 shares the name but is a partner
        let tips = trade_suggestions(
            1,
            &league,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].position, Position::RB);
        assert_eq!(tips[0].partner_depth, 4);

        // roster 2 is deep at RB and never its own partner
        let tips = trade_suggestions(
            2,
            &league,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        assert!(tips.is_empty());
    }

    // -- stashes --

    #[test]
    fn stashes_require_need_and_ros_floor() {
        let players = player_map(vec![
            player("rb1", "R1", Position::RB, "KC"),
            player("rb2", "R2", Position::RB, "KC"),
            player("wr1", "W1", Position::WR, "MIA"),
            player("wr2", "W2", Position::WR, "MIA"),
            player("rb9", "R9", Position::RB, "NYJ"),
            player("te1", "T1", Position::TE, "DAL"),
        ]);
        let mine = roster(1, &["rb1", "rb2"], &[]);
        let depth = Depth::for_roster(&mine, &players);
        let rosters = vec![mine];
        let rostered = rostered_ids(&rosters);
        let ros = ros_map(&[
            ("wr1", 130.0),
            ("wr2", 120.0),
            ("rb9", 250.0),
            ("te1", 170.0),
            ("rb1", 300.0),
        ]);

        let stashes = stash_suggestions(
            &players,
            &ros,
            &rostered,
            &depth,
            &DepthPolicy::default(),
            &RecommendationPolicy::default(),
        );
        let ids: Vec<&str> = stashes.iter().map(|s| s.player.player_id.as_str()).collect();
        // wr2 is at the floor (not strictly above); rb9 is not a need
        assert_eq!(ids, vec!["te1", "wr1"]);
        assert_eq!(stashes[0].to_string(), "📦 Stash T1 (TE, DAL) — ROS: 170.0");
    }

    // -- lineup swaps --

    fn qb_case(bench_points: f64, variant: SwapVariant) -> Vec<LineupSwap> {
        let players = player_map(vec![
            player("s", "Starter QB", Position::QB, "KC"),
            player("b", "Bench QB", Position::QB, "BUF"),
        ]);
        let r = roster(1, &["s"], &["b"]);
        let policy = LineupPolicy {
            variant,
            ..LineupPolicy::default()
        };
        lineup_swaps(&r, &players, &store(&[("s", 5.0), ("b", bench_points)]), &policy)
    }

    #[test]
    fn qb_fifteen_over_five() {
        for variant in [SwapVariant::Threshold, SwapVariant::PositionAware] {
            let swaps = qb_case(15.0, variant);
            assert_eq!(swaps.len(), 1);
            assert_eq!(swaps[0].to_string(), "Start Bench QB (15.0) over Starter QB (5.0)");
        }
    }

    #[test]
    fn qb_seven_over_five_is_not_enough() {
        assert!(qb_case(7.0, SwapVariant::Threshold).is_empty());
        assert!(qb_case(7.0, SwapVariant::PositionAware).is_empty());
    }

    #[test]
    fn boundary_does_not_trigger() {
        // max(5 + 2, 10) = 10
        assert!(qb_case(10.0, SwapVariant::Threshold).is_empty());
        assert_eq!(qb_case(10.1, SwapVariant::Threshold).len(), 1);

        let players = player_map(vec![
            player("s", "S", Position::WR, "KC"),
            player("b", "B", Position::WR, "KC"),
        ]);
        let r = roster(1, &["s"], &["b"]);
        // max(12 + 2, 10) = 14
        let swaps = lineup_swaps(
            &r,
            &players,
            &store(&[("s", 12.0), ("b", 14.0)]),
            &LineupPolicy::default(),
        );
        assert!(swaps.is_empty());
    }

    #[test]
    fn zero_projection_core_starter_skipped() {
        let players = player_map(vec![
            player("s", "Injured RB", Position::RB, "KC"),
            player("b", "Healthy RB", Position::RB, "KC"),
        ]);
        let r = roster(1, &["s"], &["b"]);
        let swaps = lineup_swaps(
            &r,
            &players,
            &store(&[("s", 0.0), ("b", 20.0)]),
            &LineupPolicy::default(),
        );
        assert!(swaps.is_empty());
    }

    #[test]
    fn position_aware_blocks_cross_position_swaps() {
        let players = player_map(vec![
            player("k", "Kicker", Position::K, "KC"),
            player("qb", "Backup QB", Position::QB, "KC"),
            player("wr", "Starter WR", Position::WR, "KC"),
            player("te", "Bench TE", Position::TE, "KC"),
        ]);
        let r = roster(1, &["k", "wr"], &["qb", "te"]);
        let s = store(&[("k", 4.0), ("wr", 6.0), ("qb", 18.0), ("te", 16.0)]);

        let aware = lineup_swaps(&r, &players, &s, &LineupPolicy::default());
        let pairs: Vec<(&str, &str)> = aware
            .iter()
            .map(|x| (x.bench.player_id.as_str(), x.starter.player_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("te", "wr")]);

        let threshold = lineup_swaps(
            &r,
            &players,
            &s,
            &LineupPolicy {
                variant: SwapVariant::Threshold,
                ..LineupPolicy::default()
            },
        );
        assert_eq!(threshold.len(), 4);
    }

    // -- adds and buy-low --

    #[test]
    fn adds_need_projection_floor() {
        let players = player_map(vec![
            player("a", "Alpha", Position::WR, "KC"),
            player("b", "Bravo", Position::RB, "NYG"),
        ]);
        let added = vec!["a".to_string(), "b".to_string(), "ghost".to_string()];
        let adds = recommend_adds(
            &added,
            &players,
            &store(&[("a", 8.0), ("b", 7.9)]),
            &RecommendationPolicy::default(),
        );
        assert_eq!(adds.len(), 1);
        assert_eq!(adds[0].to_string(), "✅ Add Alpha (WR, KC) — projected 8.0 pts");
    }

    #[test]
    fn buy_low_needs_high_ros_and_low_week() {
        let players = player_map(vec![
            player("s", "Starter", Position::WR, "KC"),
            player("b1", "Slumping", Position::WR, "KC"),
            player("b2", "Hot", Position::WR, "KC"),
            player("b3", "Meh", Position::WR, "KC"),
        ]);
        let r = roster(1, &["s"], &["b1", "b2", "b3"]);
        let ros = ros_map(&[("s", 200.0), ("b1", 180.0), ("b2", 190.0), ("b3", 140.0)]);
        let s = store(&[("s", 2.0), ("b1", 4.5), ("b2", 15.0), ("b3", 1.0)]);
        let picks = buy_low_candidates(&r, &players, &ros, &s, &RecommendationPolicy::default());
        assert_eq!(picks.len(), 1);
        assert_eq!(
            picks[0].to_string(),
            "🔍 Buy-low candidate: Slumping (WR, KC) — ROS: 180.0, projected 4.5 pts"
        );
    }

    #[test]
    fn unknown_ids_resolve_to_placeholders() {
        let tag = PlayerTag::resolve(&PlayerMap::new(), "404");
        assert_eq!(tag.name, "Unknown");
        assert_eq!(tag.position, Position::Unknown);
        assert_eq!(tag.team, "FA");
    }
}
