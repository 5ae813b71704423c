// Projections feed normalization.
//
// The feed comes back either as an array of records carrying `player_id`, or
// as a map keyed by player id. Points may sit at the top level (`pts`,
// `projected_points`) or under `stats.pts_ppr`; ADP sits under
// `stats.adp_dd_ppr` or `stats.adp_ppr`. Records without a usable id are
// skipped.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use gridcast_core::model::ProjectionFeed;

use crate::error::SleeperError;

/// ADP values at or above this mean "not drafted" upstream.
const UNDRAFTED_ADP: f64 = 999.0;

fn number(value: Option<&Value>) -> Option<f64> {
    let v = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn record_points(record: &Map<String, Value>) -> Option<f64> {
    let stats = record.get("stats").and_then(Value::as_object);
    number(record.get("pts"))
        .or_else(|| number(record.get("projected_points")))
        .or_else(|| stats.and_then(|s| number(s.get("pts_ppr"))))
}

fn record_adp(record: &Map<String, Value>) -> Option<f64> {
    let stats = record.get("stats").and_then(Value::as_object)?;
    number(stats.get("adp_dd_ppr"))
        .or_else(|| number(stats.get("adp_ppr")))
        .filter(|&adp| adp > 0.0 && adp < UNDRAFTED_ADP)
}

fn absorb(feed: &mut ProjectionFeed, id: String, record: &Map<String, Value>) {
    if let Some(pts) = record_points(record) {
        feed.points.insert(id.clone(), pts);
    }
    if let Some(adp) = record_adp(record) {
        feed.adp.insert(id, adp);
    }
}

/// Parse a projections feed body into per-player points and ADP.
pub fn parse_projection_feed(body: &str) -> Result<ProjectionFeed, SleeperError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SleeperError::Decode {
        what: "projections feed".to_string(),
        source: e,
    })?;
    Ok(normalize_feed(&value))
}

pub fn normalize_feed(value: &Value) -> ProjectionFeed {
    let mut feed = ProjectionFeed::default();
    let mut skipped = 0usize;

    match value {
        Value::Array(items) => {
            for item in items {
                let Some(record) = item.as_object() else {
                    skipped += 1;
                    continue;
                };
                match id_string(record.get("player_id")) {
                    Some(id) => absorb(&mut feed, id, record),
                    None => skipped += 1,
                }
            }
        }
        Value::Object(map) => {
            for (id, item) in map {
                match item.as_object() {
                    Some(record) => absorb(&mut feed, id.trim().to_string(), record),
                    None => skipped += 1,
                }
            }
        }
        Value::Null => {}
        other => {
            warn!("unexpected projections feed shape: {}", type_name(other));
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped projection records without a player id");
    }
    debug!(
        points = feed.points.len(),
        adp = feed.adp.len(),
        "projections feed normalized"
    );
    feed
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
