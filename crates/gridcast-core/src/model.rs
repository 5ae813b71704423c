// League data model: players, rosters, matchups, transactions.
//
// Field names follow the Sleeper v1 JSON payloads so the fetch layer can
// deserialize straight into these types. Every optional or nullable upstream
// field decodes to a default instead of failing the whole payload.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Decode `null` (or a missing field, together with `#[serde(default)]`) as
/// `T::default()`. Sleeper sends `null` for empty player lists and maps.
pub(crate) fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Football positions tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
    Unknown,
}

/// Skill positions: a starter at one of these projecting exactly zero is
/// treated as an inactive placeholder.
pub const CORE_SKILL_POSITIONS: &[Position] = &[Position::QB, Position::RB, Position::WR, Position::TE];

/// Every recognized position, in display order.
pub const ALL_POSITIONS: &[Position] = &[
    Position::QB,
    Position::RB,
    Position::WR,
    Position::TE,
    Position::K,
    Position::DEF,
];

impl Position {
    /// Parse a position string. Case-insensitive; unrecognized strings map
    /// to `Unknown` rather than failing.
    pub fn from_str_pos(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "QB" => Position::QB,
            "RB" => Position::RB,
            "WR" => Position::WR,
            "TE" => Position::TE,
            "K" => Position::K,
            "DEF" | "DST" | "D/ST" => Position::DEF,
            _ => Position::Unknown,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
            Position::Unknown => "UNK",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Position::Unknown
    }

    pub fn is_core_skill(&self) -> bool {
        CORE_SKILL_POSITIONS.contains(self)
    }

    /// Whether this position can fill a WR/RB/TE flex slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(self, Position::RB | Position::WR | Position::TE)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Unknown
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Position::from_str_pos(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.display_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Player metadata. One immutable snapshot per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,
    #[serde(default)]
    pub team: Option<String>,
    /// Average draft position. Lower means drafted earlier.
    #[serde(default)]
    pub adp: Option<f64>,
    /// Current-week projected points, when the payload carries one.
    #[serde(default)]
    pub projected_points: Option<f64>,
}

impl Player {
    /// Placeholder for an id that does not resolve in the player map.
    pub fn placeholder(player_id: &str) -> Self {
        Player {
            player_id: player_id.to_string(),
            ..Player::default()
        }
    }

    /// Human-readable name. Team defenses without a name render as
    /// `"<TEAM> DEF"`; anything else unnamed renders as `"Unknown"`.
    pub fn display_name(&self) -> String {
        let full = self.full_name.as_deref().filter(|n| !n.trim().is_empty());
        if self.position == Position::DEF && full.is_none() {
            return format!("{} DEF", self.team.as_deref().unwrap_or("Unknown"));
        }
        if let Some(name) = full {
            return name.to_string();
        }
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{first} {last}")
            }
            (_, Some(last)) if !last.is_empty() => last.to_string(),
            _ => "Unknown".to_string(),
        }
    }

    /// Team abbreviation, `"FA"` for free agents.
    pub fn team_or_fa(&self) -> &str {
        self.team.as_deref().filter(|t| !t.is_empty()).unwrap_or("FA")
    }
}

/// Player metadata keyed by player id.
pub type PlayerMap = HashMap<String, Player>;

/// Copy each map key into `player_id` (the Sleeper players payload is keyed
/// by id and not every record repeats it).
pub fn normalize_player_ids(players: &mut PlayerMap) {
    for (id, player) in players.iter_mut() {
        if player.player_id.is_empty() {
            player.player_id = id.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// League, users, rosters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default)]
    pub playoff_week_start: Option<u32>,
}

/// League metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueInfo {
    #[serde(default)]
    pub league_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    /// Week reported upstream. The league payload itself does not carry it;
    /// the fetch layer fills it from the NFL state endpoint.
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scoring_settings: serde_json::Map<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roster_positions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: LeagueSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl User {
    pub fn name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("User {}", self.user_id),
        }
    }
}

/// Season record carried in roster settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ties > 0 {
            write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            write!(f, "{}-{}", self.wins, self.losses)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<String>,
    #[serde(default)]
    pub settings: Option<Record>,
}

impl Roster {
    /// Players not in the starting lineup, in roster order.
    pub fn bench(&self) -> Vec<&str> {
        self.players
            .iter()
            .filter(|p| !self.starters.contains(p))
            .map(String::as_str)
            .collect()
    }

    /// Season record from roster settings, if the league reported one.
    pub fn record(&self) -> Option<Record> {
        self.settings
    }
}

// ---------------------------------------------------------------------------
// Matchups
// ---------------------------------------------------------------------------

/// One side of a weekly matchup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupEntry {
    pub roster_id: u32,
    #[serde(default)]
    pub matchup_id: Option<u32>,
    /// Actual points scored so far.
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: f64,
    /// Team-level projection, when upstream provides one.
    #[serde(default)]
    pub projected_points: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<String>,
    /// Actual points per player so far this week (0.0 before kickoff).
    #[serde(default, deserialize_with = "null_as_default")]
    pub players_points: HashMap<String, f64>,
    /// Per-player projections recorded alongside the matchup. Sleeper does
    /// not send these; saved snapshots may.
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_points: HashMap<String, f64>,
}

/// A complete head-to-head pairing.
#[derive(Debug, Clone, Copy)]
pub struct MatchupPair<'a> {
    pub matchup_id: u32,
    pub home: &'a MatchupEntry,
    pub away: &'a MatchupEntry,
}

/// Group entries by matchup id, keeping only ids with exactly two sides.
/// Pairs come back in order of first appearance.
pub fn pair_matchups(entries: &[MatchupEntry]) -> Vec<MatchupPair<'_>> {
    let mut order: Vec<u32> = Vec::new();
    let mut groups: HashMap<u32, Vec<&MatchupEntry>> = HashMap::new();
    for entry in entries {
        let Some(mid) = entry.matchup_id else {
            continue;
        };
        let group = groups.entry(mid).or_default();
        if group.is_empty() {
            order.push(mid);
        }
        group.push(entry);
    }

    order
        .into_iter()
        .filter_map(|mid| match groups.get(&mid).map(Vec::as_slice) {
            Some([home, away]) => Some(MatchupPair {
                matchup_id: mid,
                home,
                away,
            }),
            _ => None,
        })
        .collect()
}

/// Find the entry facing `roster_id` in a week's matchups.
pub fn opponent_of(entries: &[MatchupEntry], roster_id: u32) -> Option<&MatchupEntry> {
    let mine = entries.iter().find(|m| m.roster_id == roster_id)?;
    let mid = mine.matchup_id?;
    entries
        .iter()
        .find(|m| m.matchup_id == Some(mid) && m.roster_id != roster_id)
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Waiver,
    FreeAgent,
    Trade,
    Commissioner,
    #[serde(other)]
    Other,
}

impl TransactionKind {
    /// Kinds that add a player off the waiver wire.
    pub fn is_pickup(&self) -> bool {
        matches!(self, TransactionKind::Waiver | TransactionKind::FreeAgent)
    }

    /// Kinds shown in the waiver activity report.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            TransactionKind::Waiver | TransactionKind::FreeAgent | TransactionKind::Trade
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transaction_id: String,
    /// Added player id -> receiving roster id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub adds: BTreeMap<String, u32>,
    /// Dropped player id -> releasing roster id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub drops: BTreeMap<String, u32>,
    #[serde(default, alias = "creator")]
    pub creator_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roster_ids: Vec<u32>,
    #[serde(default, alias = "leg")]
    pub week: Option<u32>,
}

// ---------------------------------------------------------------------------
// Projection feed and snapshot
// ---------------------------------------------------------------------------

/// Normalized external projections for one week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionFeed {
    #[serde(default)]
    pub points: HashMap<String, f64>,
    #[serde(default)]
    pub adp: HashMap<String, f64>,
}

/// Everything fetched for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub league: LeagueInfo,
    pub week: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub rosters: Vec<Roster>,
    #[serde(default)]
    pub matchups: Vec<MatchupEntry>,
    /// Matchups for the remaining regular-season weeks, keyed by week.
    #[serde(default)]
    pub future_matchups: BTreeMap<u32, Vec<MatchupEntry>>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub players: PlayerMap,
    #[serde(default)]
    pub projection_feed: ProjectionFeed,
    /// Set when the requested week fell back to week 1 because the league
    /// reported none.
    #[serde(default)]
    pub off_season_note: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
