// Rest-of-season (ROS) value scores.
//
// A linear draft-value heuristic: earlier ADP means more value, scaled by a
// fixed positional weight. Not a fitted projection model.

use std::collections::HashMap;

use crate::model::{PlayerMap, Position};

/// Player id -> ROS score. Players without a score are absent.
pub type RosScores = HashMap<String, f64>;

/// ADP-to-value intercept.
const BASE_INTERCEPT: f64 = 200.0;
/// Value lost per ADP slot.
const ADP_SLOPE: f64 = 1.5;

/// Positional multiplier. `None` for positions that receive no score.
pub fn position_weight(pos: Position) -> Option<f64> {
    match pos {
        Position::QB => Some(1.0),
        Position::RB => Some(1.2),
        Position::WR => Some(1.1),
        Position::TE => Some(1.3),
        Position::K => Some(0.6),
        Position::DEF => Some(0.8),
        Position::Unknown => None,
    }
}

/// Round to one decimal place.
///
/// Rounds the exact binary value, so `0.35` (stored just below) goes down,
/// and exact ties go to the even digit. Non-finite values pass through.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Score a single ADP/position pair.
pub fn ros_score(adp: f64, pos: Position) -> Option<f64> {
    let weight = position_weight(pos)?;
    if !adp.is_finite() {
        return None;
    }
    let base = round1(BASE_INTERCEPT - adp * ADP_SLOPE);
    Some(round1(base * weight))
}

/// Compute ROS scores for every player with an ADP and a recognized position.
pub fn generate_ros_scores(players: &PlayerMap) -> RosScores {
    players
        .iter()
        .filter_map(|(id, player)| {
            let adp = player.adp?;
            ros_score(adp, player.position).map(|score| (id.clone(), score))
        })
        .collect()
}

/// ROS score for a player, 0.0 when undefined.
pub fn score_or_zero(scores: &RosScores, player_id: &str) -> f64 {
    scores.get(player_id).copied().unwrap_or(0.0)
}
