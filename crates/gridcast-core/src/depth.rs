// Positional roster depth.
//
// Counts rostered players per position. A count below the need threshold
// marks a hole to fill; a count above the surplus threshold marks a roster
// that can afford to trade from that position.

use std::collections::{BTreeMap, HashMap};

use crate::model::{PlayerMap, Position, Roster};
use crate::policy::DepthPolicy;

/// Position -> number of rostered players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Depth {
    counts: BTreeMap<Position, u32>,
}

impl Depth {
    /// Count positions over a list of player ids. Unknown ids count as UNK.
    pub fn from_player_ids<S: AsRef<str>>(player_ids: &[S], players: &PlayerMap) -> Self {
        let mut counts = BTreeMap::new();
        for pid in player_ids {
            let pos = players
                .get(pid.as_ref())
                .map(|p| p.position)
                .unwrap_or(Position::Unknown);
            *counts.entry(pos).or_insert(0) += 1;
        }
        Depth { counts }
    }

    pub fn for_roster(roster: &Roster, players: &PlayerMap) -> Self {
        Self::from_player_ids(&roster.players, players)
    }

    /// Count at a position, 0 when absent.
    pub fn count(&self, pos: Position) -> u32 {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_need(&self, pos: Position, policy: &DepthPolicy) -> bool {
        self.count(pos) < policy.need_threshold
    }

    pub fn is_surplus(&self, pos: Position, policy: &DepthPolicy) -> bool {
        self.count(pos) > policy.surplus_threshold
    }

    /// Positions from `candidates` that are needs, in candidate order.
    pub fn needs(&self, candidates: &[Position], policy: &DepthPolicy) -> Vec<Position> {
        candidates
            .iter()
            .copied()
            .filter(|&pos| self.is_need(pos, policy))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.counts.iter().map(|(&pos, &n)| (pos, n))
    }
}

/// One roster's depth, with the owner name used in report lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamDepth {
    pub roster_id: u32,
    pub owner: String,
    pub depth: Depth,
}

/// Depth per team, keyed by roster id. Owner names may repeat.
#[derive(Debug, Clone, Default)]
pub struct LeagueDepth {
    /// In roster order.
    teams: Vec<TeamDepth>,
}

impl LeagueDepth {
    /// Build depth for every roster. `owner_name` supplies the name shown
    /// for each roster.
    pub fn build<F>(rosters: &[Roster], players: &PlayerMap, owner_name: F) -> Self
    where
        F: Fn(&Roster) -> String,
    {
        let teams = rosters
            .iter()
            .map(|roster| TeamDepth {
                roster_id: roster.roster_id,
                owner: owner_name(roster),
                depth: Depth::for_roster(roster, players),
            })
            .collect();
        LeagueDepth { teams }
    }

    pub fn team(&self, roster_id: u32) -> Option<&TeamDepth> {
        self.teams.iter().find(|t| t.roster_id == roster_id)
    }

    pub fn get(&self, roster_id: u32) -> Option<&Depth> {
        self.team(roster_id).map(|t| &t.depth)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamDepth> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Plain roster id -> (position -> count) view.
    pub fn to_map(&self) -> HashMap<u32, HashMap<Position, u32>> {
        self.teams
            .iter()
            .map(|t| (t.roster_id, t.depth.iter().collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Player;

    fn players() -> PlayerMap {
        let mut m = PlayerMap::new();
        for (id, pos) in [
            ("qb1", Position::QB),
            ("rb1", Position::RB),
            ("rb2", Position::RB),
            ("wr1", Position::WR),
            ("wr2", Position::WR),
            ("wr3", Position::WR),
            ("wr4", Position::WR),
            ("k1", Position::K),
        ] {
            m.insert(
                id.into(),
                Player {
                    player_id: id.into(),
                    position: pos,
                    ..Player::default()
                },
            );
        }
        m
    }

    fn roster(id: u32, ids: &[&str]) -> Roster {
        Roster {
            roster_id: id,
            owner_id: Some(format!("u{id}")),
            players: ids.iter().map(|s| s.to_string()).collect(),
            ..Roster::default()
        }
    }

    #[test]
    fn counts_sum_to_roster_size() {
        let r = roster(1, &["qb1", "rb1", "rb2", "wr1", "ghost", "k1"]);
        let depth = Depth::for_roster(&r, &players());
        assert_eq!(depth.total(), r.players.len() as u32);
        assert_eq!(depth.count(Position::RB), 2);
        assert_eq!(depth.count(Position::Unknown), 1);
        assert_eq!(depth.count(Position::TE), 0);
    }

    #[test]
    fn need_and_surplus_thresholds() {
        let policy = DepthPolicy::default();
        let r = roster(1, &["qb1", "rb1", "rb2", "wr1", "wr2", "wr3", "wr4"]);
        let depth = Depth::for_roster(&r, &players());
        assert!(depth.is_need(Position::QB, &policy));
        assert!(!depth.is_need(Position::RB, &policy));
        assert!(depth.is_need(Position::TE, &policy));
        assert!(depth.is_surplus(Position::WR, &policy));
        assert!(!depth.is_surplus(Position::RB, &policy));
        assert_eq!(
            depth.needs(&[Position::RB, Position::WR, Position::TE, Position::QB], &policy),
            vec![Position::TE, Position::QB]
        );
    }

    #[test]
    fn thresholds_are_configurable() {
        let policy = DepthPolicy {
            need_threshold: 3,
            surplus_threshold: 1,
        };
        let r = roster(1, &["rb1", "rb2"]);
        let depth = Depth::for_roster(&r, &players());
        assert!(depth.is_need(Position::RB, &policy));
        assert!(depth.is_surplus(Position::RB, &policy));
    }

    #[test]
    fn league_depth_keyed_by_roster() {
        let rosters = vec![roster(1, &["qb1"]), roster(2, &["rb1", "rb2"])];
        let league = LeagueDepth::build(&rosters, &players(), |r| format!("Owner {}", r.roster_id));
        assert_eq!(league.len(), 2);
        assert_eq!(league.get(2).unwrap().count(Position::RB), 2);
        assert_eq!(league.team(2).unwrap().owner, "Owner 2");
        assert!(league.get(3).is_none());
        let map = league.to_map();
        assert_eq!(map[&1][&Position::QB], 1);
    }

    #[test]
    fn shared_owner_names_keep_separate_depth() {
        let rosters = vec![roster(1, &["qb1"]), roster(2, &["rb1", "rb2"])];
        let league = LeagueDepth::build(&rosters, &players(), |_| "Same Name".to_string());
        assert_eq!(league.len(), 2);
        assert_eq!(league.get(1).unwrap().count(Position::RB), 0);
        assert_eq!(league.get(2).unwrap().count(Position::RB), 2);
    }

    #[test]
    fn empty_roster_has_zero_depth() {
        let depth = Depth::for_roster(&roster(9, &[]), &players());
        assert_eq!(depth.total(), 0);
        assert_eq!(depth.count(Position::QB), 0);
    }
}
