// Configuration loading and parsing (league.toml, strategy.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use gridcast_core::digest::LAST_WEEK;
use gridcast_core::policy::Policy;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub strategy: Policy,
    pub credentials: CredentialsConfig,
    /// Directory holding `config/`; relative paths in the files resolve
    /// against it.
    pub base_dir: PathBuf,
}

impl Config {
    /// Resolved path of the ADP overlay CSV, if one is configured.
    pub fn adp_csv_path(&self) -> Option<PathBuf> {
        let raw = self.league.adp_csv.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let path = Path::new(raw);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        })
    }

    /// Display name or user id for personalized sections; blank means none.
    pub fn target_user(&self) -> Option<String> {
        self.league
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// Sleeper league id. May be blank in the file and supplied through
    /// `LEAGUE_ID`; a live run without one fails before any request.
    #[serde(default)]
    pub league_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub regular_season_weeks: u32,
    #[serde(default)]
    pub adp_csv: Option<String>,
    #[serde(default)]
    pub verbose: bool,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub discord_webhook: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml`,
/// `config/strategy.toml`, and (optionally) `config/credentials.toml`,
/// all relative to the given `base_dir`.
///
/// Does not copy defaults or read the environment; `load_config()` does both.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;
    let league = league_file.league;

    // --- strategy.toml (required) ---
    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let mut strategy: Policy =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;
    // Season length is a league property; league.toml is authoritative.
    strategy.simulation.regular_season_weeks = league.regular_season_weeks;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        league,
        strategy,
        credentials,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     pass --config-dir or run from a directory containing config/",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Templates stay in defaults/
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Pick the directory that holds `config/`: an explicit `--config-dir`,
/// else the working directory when it has `config/` or `defaults/`, else the
/// platform config directory.
pub fn resolve_base_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        return Ok(cwd);
    }

    directories::ProjectDirs::from("dev", "gridcast", "gridcast")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::FileNotFound { path: cwd })
}

/// Resolve the base directory, copy missing defaults, load, and apply
/// environment overrides.
pub fn load_config(config_dir: Option<&Path>) -> Result<Config, ConfigError> {
    let base_dir = resolve_base_dir(config_dir)?;
    debug!(base_dir = %base_dir.display(), "loading configuration");

    let copied = ensure_config_files(&base_dir)?;
    for path in &copied {
        info!("created {} from defaults", path.display());
    }

    let mut config = load_config_from(&base_dir)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

pub const ENV_LEAGUE_ID: &str = "LEAGUE_ID";
pub const ENV_DISPLAY_NAME: &str = "SLEEPER_DISPLAY_NAME";
pub const ENV_DISCORD_WEBHOOK: &str = "DISCORD_WEBHOOK";
pub const ENV_VERBOSE: &str = "GRIDCAST_VERBOSE";

/// Overlay non-empty environment values on the loaded files. `lookup` is
/// `std::env::var` outside tests.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(id) = get(ENV_LEAGUE_ID) {
        config.league.league_id = id;
    }
    if let Some(name) = get(ENV_DISPLAY_NAME) {
        config.league.display_name = Some(name);
    }
    if let Some(url) = get(ENV_DISCORD_WEBHOOK) {
        config.credentials.discord_webhook = Some(url);
    }
    if let Some(flag) = get(ENV_VERBOSE) {
        config.league.verbose = matches!(
            flag.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let weeks = config.league.regular_season_weeks;
    if !(1..=LAST_WEEK).contains(&weeks) {
        return Err(invalid(
            "league.regular_season_weeks",
            format!("must be between 1 and {LAST_WEEK}, got {weeks}"),
        ));
    }

    let depth = &config.strategy.depth;
    if depth.surplus_threshold < depth.need_threshold {
        return Err(invalid(
            "depth.surplus_threshold",
            format!(
                "must be >= need_threshold ({}), got {}",
                depth.need_threshold, depth.surplus_threshold
            ),
        ));
    }

    let sim = &config.strategy.simulation;
    if !sim.points_per_margin.is_finite() || sim.points_per_margin <= 0.0 {
        return Err(invalid(
            "simulation.points_per_margin",
            format!("must be > 0, got {}", sim.points_per_margin),
        ));
    }
    if !(0.0..=50.0).contains(&sim.min_win_prob) {
        return Err(invalid(
            "simulation.min_win_prob",
            format!("must be between 0 and 50, got {}", sim.min_win_prob),
        ));
    }
    if !(50.0..=100.0).contains(&sim.max_win_prob) {
        return Err(invalid(
            "simulation.max_win_prob",
            format!("must be between 50 and 100, got {}", sim.max_win_prob),
        ));
    }
    if sim.playoff_floor > 100 {
        return Err(invalid(
            "simulation.playoff_floor",
            format!("must be <= 100, got {}", sim.playoff_floor),
        ));
    }
    for (i, step) in sim.playoff_steps.iter().enumerate() {
        if step.odds > 100 {
            return Err(invalid(
                &format!("simulation.playoff_steps[{i}].odds"),
                format!("must be <= 100, got {}", step.odds),
            ));
        }
    }
    // Steps are checked in order, so a lower step before a higher one
    // would shadow it.
    if let Some(i) = sim
        .playoff_steps
        .windows(2)
        .position(|w| w[1].min_wins > w[0].min_wins)
    {
        return Err(invalid(
            &format!("simulation.playoff_steps[{}].min_wins", i + 1),
            "steps must be listed from most wins to fewest".into(),
        ));
    }

    let rec = &config.strategy.recommendations;
    if rec.trade_radar_teams == 0 {
        return Err(invalid(
            "recommendations.trade_radar_teams",
            "must be greater than 0".into(),
        ));
    }
    let non_negative: &[(&str, f64)] = &[
        ("recommendations.stash_min_ros", rec.stash_min_ros),
        ("recommendations.add_min_projection", rec.add_min_projection),
        ("recommendations.buy_low_min_ros", rec.buy_low_min_ros),
        ("recommendations.buy_low_max_projection", rec.buy_low_max_projection),
        ("lineup.min_margin", config.strategy.lineup.min_margin),
        ("lineup.min_projection", config.strategy.lineup.min_projection),
    ];
    for (name, val) in non_negative {
        if !val.is_finite() || *val < 0.0 {
            return Err(invalid(name, format!("must be >= 0, got {val}")));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
