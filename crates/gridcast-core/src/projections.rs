// Weekly projection aggregation.
//
// Merges the projections feed with any per-player projections recorded on
// the matchups, and derives team totals. Also loads the
// optional ADP overlay CSV used to fill draft-value gaps before ROS scoring.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{MatchupEntry, PlayerMap, ProjectionFeed};

// ---------------------------------------------------------------------------
// ProjectionStore
// ---------------------------------------------------------------------------

/// Per-player and per-team projections for one week.
#[derive(Debug, Clone, Default)]
pub struct ProjectionStore {
    player_points: HashMap<String, f64>,
    team_totals: HashMap<u32, f64>,
}

impl ProjectionStore {
    /// Build the store from a week's matchups and the projections feed.
    ///
    /// The feed is the source of per-player projections. Projections
    /// recorded on a matchup only fill ids the feed lacks (last write wins
    /// among matchups). Actual points (`players_points`) are never read
    /// here. A team total is the matchup's own projection when it is
    /// positive, else the sum over starters with a projection.
    pub fn build(matchups: &[MatchupEntry], feed: &ProjectionFeed) -> Self {
        let mut player_points: HashMap<String, f64> = feed
            .points
            .iter()
            .filter(|(_, pts)| pts.is_finite())
            .map(|(pid, &pts)| (pid.clone(), pts))
            .collect();
        let mut recorded: HashMap<&str, f64> = HashMap::new();
        for m in matchups {
            for (pid, &pts) in &m.player_points {
                recorded.insert(pid.as_str(), if pts.is_finite() { pts } else { 0.0 });
            }
        }
        for (pid, pts) in recorded {
            player_points.entry(pid.to_string()).or_insert(pts);
        }

        let mut team_totals = HashMap::new();
        for m in matchups {
            let total = match m.projected_points {
                Some(team) if team.is_finite() && team > 0.0 => team,
                _ => m
                    .starters
                    .iter()
                    .filter_map(|pid| player_points.get(pid).copied())
                    .sum(),
            };
            team_totals.insert(m.roster_id, total);
        }

        debug!(
            players = player_points.len(),
            teams = team_totals.len(),
            "projection store built"
        );

        Self {
            player_points,
            team_totals,
        }
    }

    /// Build a store from an explicit player map (no team totals).
    pub fn from_points(player_points: HashMap<String, f64>) -> Self {
        Self {
            player_points,
            team_totals: HashMap::new(),
        }
    }

    /// Projected points from the merged map only.
    pub fn get(&self, player_id: &str) -> Option<f64> {
        self.player_points.get(player_id).copied()
    }

    /// Projected points for a player: the merged map, then the player's own
    /// projected points, then 0.0.
    pub fn points_for(&self, player_id: &str, players: &PlayerMap) -> f64 {
        self.get(player_id)
            .or_else(|| players.get(player_id).and_then(|p| p.projected_points))
            .unwrap_or(0.0)
    }

    /// Sum of projected points over a list of starters.
    pub fn lineup_total(&self, starters: &[String], players: &PlayerMap) -> f64 {
        starters.iter().map(|pid| self.points_for(pid, players)).sum()
    }

    /// Projected total for a roster this week, 0.0 when unknown.
    pub fn team_total(&self, roster_id: u32) -> f64 {
        self.team_totals.get(&roster_id).copied().unwrap_or(0.0)
    }

    /// Points shown for a matchup side: actual once scoring has started,
    /// otherwise the projection.
    pub fn display_points(&self, entry: &MatchupEntry) -> f64 {
        if entry.points > 0.0 {
            entry.points
        } else {
            self.team_total(entry.roster_id)
        }
    }

    pub fn player_points(&self) -> &HashMap<String, f64> {
        &self.player_points
    }

    pub fn team_totals(&self) -> &HashMap<u32, f64> {
        &self.team_totals
    }
}

// ---------------------------------------------------------------------------
// ADP overlay
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct RawAdp {
    #[serde(alias = "id", alias = "PlayerId")]
    player_id: String,
    #[serde(alias = "ADP")]
    adp: f64,
}

fn load_adp_from_reader<R: Read>(rdr: R) -> Result<HashMap<String, f64>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut map = HashMap::new();
    for result in reader.deserialize::<RawAdp>() {
        match result {
            Ok(raw) => {
                let id = raw.player_id.trim().to_string();
                if !raw.adp.is_finite() {
                    warn!("skipping ADP entry for '{}': non-finite value", id);
                    continue;
                }
                if map.contains_key(&id) {
                    warn!("duplicate ADP entry for '{}', using latest value", id);
                }
                map.insert(id, raw.adp);
            }
            Err(e) => {
                warn!("skipping malformed ADP row: {}", e);
            }
        }
    }
    Ok(map)
}

/// Load an ADP overlay CSV (`player_id,adp`). Returns player id -> ADP.
pub fn load_adp(path: &Path) -> Result<HashMap<String, f64>, ProjectionError> {
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_adp_from_reader(file).map_err(|e| ProjectionError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Fill missing ADP values: the player's own value wins, then the
/// projections feed, then the overlay. Returns how many players were filled.
pub fn apply_adp(
    players: &mut PlayerMap,
    feed: &ProjectionFeed,
    overlay: &HashMap<String, f64>,
) -> usize {
    let mut filled = 0;
    for (id, player) in players.iter_mut() {
        if player.adp.is_some() {
            continue;
        }
        if let Some(&adp) = feed.adp.get(id).or_else(|| overlay.get(id)) {
            player.adp = Some(adp);
            filled += 1;
        }
    }
    filled
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Player;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn matchup(roster_id: u32, starters: &[&str], points: &[(&str, f64)]) -> MatchupEntry {
        MatchupEntry {
            roster_id,
            matchup_id: Some(1),
            starters: starters.iter().map(|s| s.to_string()).collect(),
            players: starters.iter().map(|s| s.to_string()).collect(),
            player_points: points.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..MatchupEntry::default()
        }
    }

    #[test]
    fn merges_matchups_and_sums_starters() {
        let matchups = vec![
            matchup(1, &["a", "b"], &[("a", 10.0), ("b", 5.5)]),
            matchup(2, &["c"], &[("c", 7.0)]),
        ];
        let store = ProjectionStore::build(&matchups, &ProjectionFeed::default());
        assert!(approx_eq(store.team_total(1), 15.5));
        assert!(approx_eq(store.team_total(2), 7.0));
        assert_eq!(store.get("c"), Some(7.0));
    }

    #[test]
    fn last_write_wins_on_duplicate_ids() {
        let matchups = vec![
            matchup(1, &["a"], &[("a", 10.0)]),
            matchup(2, &["x"], &[("a", 12.0)]),
        ];
        let store = ProjectionStore::build(&matchups, &ProjectionFeed::default());
        assert_eq!(store.get("a"), Some(12.0));
    }

    #[test]
    fn feed_wins_over_recorded_points() {
        let matchups = vec![matchup(1, &["a", "b"], &[("a", 10.0), ("c", 3.0)])];
        let mut feed = ProjectionFeed::default();
        feed.points.insert("a".into(), 99.0);
        feed.points.insert("b".into(), 4.0);
        let store = ProjectionStore::build(&matchups, &feed);
        assert_eq!(store.get("a"), Some(99.0));
        assert_eq!(store.get("b"), Some(4.0));
        assert_eq!(store.get("c"), Some(3.0));
        assert!(approx_eq(store.team_total(1), 103.0));
    }

    #[test]
    fn team_projection_preferred_when_positive() {
        let mut m = matchup(3, &["z"], &[("z", 12.0)]);
        m.projected_points = Some(88.5);
        let mut zero = matchup(4, &["y"], &[("y", 7.5)]);
        zero.projected_points = Some(0.0);
        let store = ProjectionStore::build(&[m, zero], &ProjectionFeed::default());
        assert!(approx_eq(store.team_total(3), 88.5));
        assert!(approx_eq(store.team_total(4), 7.5));
        assert!(approx_eq(store.team_total(42), 0.0));
    }

    #[test]
    fn actual_points_before_kickoff_do_not_zero_projections() {
        let json = r#"[
            {"roster_id":1,"matchup_id":1,"points":0.0,"starters":["qb_s","wr"],
             "players":["qb_s","qb_b","wr"],"players_points":{"qb_s":0.0,"qb_b":0.0,"wr":0.0}},
            {"roster_id":2,"matchup_id":1,"points":0.0,"starters":["o"],
             "players":["o"],"players_points":{"o":0.0}}
        ]"#;
        let matchups: Vec<MatchupEntry> = serde_json::from_str(json).unwrap();
        let mut feed = ProjectionFeed::default();
        feed.points.insert("qb_s".into(), 5.0);
        feed.points.insert("qb_b".into(), 15.0);
        feed.points.insert("wr".into(), 10.0);
        feed.points.insert("o".into(), 20.0);

        let store = ProjectionStore::build(&matchups, &feed);
        assert_eq!(store.get("qb_s"), Some(5.0));
        assert!(approx_eq(store.team_total(1), 15.0));
        assert!(approx_eq(store.team_total(2), 20.0));
        assert!(approx_eq(store.display_points(&matchups[0]), 15.0));
        assert!(store.get("qb_b").unwrap() > store.get("qb_s").unwrap());

        let week = crate::simulator::simulate_week(
            &matchups[0].starters,
            &matchups[1].starters,
            &store,
            &PlayerMap::new(),
            &crate::policy::SimulationPolicy::default(),
        );
        assert!(approx_eq(week.win_prob, 40.0));
    }

    #[test]
    fn points_for_falls_back_to_player_then_zero() {
        let store = ProjectionStore::from_points(HashMap::from([("a".to_string(), 3.0)]));
        let mut players = PlayerMap::new();
        players.insert(
            "b".into(),
            Player {
                projected_points: Some(6.5),
                ..Player::default()
            },
        );
        assert!(approx_eq(store.points_for("a", &players), 3.0));
        assert!(approx_eq(store.points_for("b", &players), 6.5));
        assert!(approx_eq(store.points_for("missing", &players), 0.0));
    }

    #[test]
    fn display_points_prefers_actual() {
        let mut m = matchup(1, &["a"], &[("a", 20.0)]);
        let store = ProjectionStore::build(std::slice::from_ref(&m), &ProjectionFeed::default());
        assert!(approx_eq(store.display_points(&m), 20.0));
        m.points = 31.2;
        assert!(approx_eq(store.display_points(&m), 31.2));
    }

    #[test]
    fn empty_inputs_are_tolerated() {
        let store = ProjectionStore::build(&[], &ProjectionFeed::default());
        assert!(store.player_points().is_empty());
        assert!(approx_eq(store.team_total(1), 0.0));
    }

    #[test]
    fn adp_csv_loading() {
        let csv_data = "\
player_id,adp
4046,3.5
 6794 ,12.0
bad,NaN
4046,4.0";
        let adp = load_adp_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(adp.len(), 2);
        assert!(approx_eq(adp["4046"], 4.0));
        assert!(approx_eq(adp["6794"], 12.0));
    }

    #[test]
    fn adp_csv_header_aliases_and_bad_rows() {
        let csv_data = "\
id,ADP
1,2.0
2,not_a_number
3,9.5";
        let adp = load_adp_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(adp.len(), 2);
        assert!(adp.contains_key("1"));
        assert!(adp.contains_key("3"));
    }

    #[test]
    fn apply_adp_priority() {
        let mut players = PlayerMap::new();
        players.insert(
            "own".into(),
            Player {
                adp: Some(1.0),
                ..Player::default()
            },
        );
        players.insert("feed".into(), Player::default());
        players.insert("overlay".into(), Player::default());
        players.insert("none".into(), Player::default());

        let mut feed = ProjectionFeed::default();
        feed.adp.insert("own".into(), 50.0);
        feed.adp.insert("feed".into(), 20.0);
        let overlay = HashMap::from([
            ("feed".to_string(), 30.0),
            ("overlay".to_string(), 40.0),
        ]);

        let filled = apply_adp(&mut players, &feed, &overlay);
        assert_eq!(filled, 2);
        assert_eq!(players["own"].adp, Some(1.0));
        assert_eq!(players["feed"].adp, Some(20.0));
        assert_eq!(players["overlay"].adp, Some(40.0));
        assert_eq!(players["none"].adp, None);
    }

    #[test]
    fn load_adp_missing_file_is_io_error() {
        let err = load_adp(Path::new("/nonexistent/adp.csv")).unwrap_err();
        assert!(matches!(err, ProjectionError::Io { .. }));
    }
}
