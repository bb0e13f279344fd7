// Configuration loading and parsing (league.toml, grading.toml).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analytics::boom::BoomConfig;
use crate::analytics::draft_value::DraftValueConfig;
use crate::analytics::free_agents::FreeAgentConfig;
use crate::analytics::gpa::GpaMethod;
use crate::analytics::grade::CeilingTable;
use crate::analytics::GradingConfig;
use crate::league::Position;
use crate::sleeper::client::{ProjectionSource, DEFAULT_API_BASE_URL};

/// Regular-season weeks the dashboard can show.
pub const MIN_WEEK: u32 = 1;
pub const MAX_WEEK: u32 = 18;

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

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueSettings,
    pub sleeper: SleeperSettings,
    pub grading: GradingConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueSettings,
    #[serde(default)]
    sleeper: SleeperSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueSettings {
    pub league_id: String,
    /// Shown in the status bar until the league endpoint supplies the real
    /// name.
    #[serde(default)]
    pub name: String,
    /// Season to show. Defaults to the current NFL season from /state/nfl.
    #[serde(default)]
    pub season: Option<String>,
    /// Starting week. Defaults to the current NFL week from /state/nfl.
    #[serde(default)]
    pub week: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default)]
    pub projection_source: ProjectionSource,
}

impl Default for SleeperSettings {
    fn default() -> Self {
        SleeperSettings {
            api_base_url: default_api_base_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
            projection_source: ProjectionSource::default(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    60
}

// ---------------------------------------------------------------------------
// grading.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire grading.toml file.
#[derive(Debug, Clone, Deserialize)]
struct GradingFile {
    default_ceiling: f64,
    ceilings: HashMap<String, f64>,
    boom: BoomConfig,
    gpa: GpaSection,
    free_agents: FreeAgentSection,
    draft: DraftValueConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum GpaMethodName {
    RawPoints,
    CeilingPercent,
}

#[derive(Debug, Clone, Deserialize)]
struct GpaSection {
    method: GpaMethodName,
    #[serde(default)]
    divisor: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct FreeAgentSection {
    min_points: f64,
    limit: usize,
    positions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/grading.toml`, relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- grading.toml (required) ---
    let grading_path = config_dir.join("grading.toml");
    let grading_text = read_file(&grading_path)?;
    let grading_file: GradingFile =
        toml::from_str(&grading_text).map_err(|e| ConfigError::ParseError {
            path: grading_path.clone(),
            source: e,
        })?;

    let grading = build_grading(grading_file)?;

    let config = Config {
        league: league_file.league,
        sleeper: league_file.sleeper,
        grading,
    };

    validate(&config)?;

    Ok(config)
}

/// Turn the raw grading file into engine config, validating as we go.
fn build_grading(file: GradingFile) -> Result<GradingConfig, ConfigError> {
    let mut by_position = HashMap::new();
    for (key, value) in &file.ceilings {
        let pos = Position::from_str_pos(key);
        if !pos.is_skill() {
            return Err(invalid(
                format!("ceilings.{key}"),
                "unknown position (expected QB, RB, WR, TE, K or DEF)",
            ));
        }
        if !(value.is_finite() && *value > 0.0) {
            return Err(invalid(
                format!("ceilings.{key}"),
                format!("must be > 0, got {value}"),
            ));
        }
        by_position.insert(pos, *value);
    }

    let ceilings = CeilingTable::new(by_position, file.default_ceiling)
        .map_err(|e| invalid("default_ceiling", e.to_string()))?;

    let gpa = match file.gpa.method {
        GpaMethodName::CeilingPercent => GpaMethod::CeilingPercent,
        GpaMethodName::RawPoints => {
            let divisor = file
                .gpa
                .divisor
                .ok_or_else(|| invalid("gpa.divisor", "required when method = \"raw_points\""))?;
            if !(divisor.is_finite() && divisor > 0.0) {
                return Err(invalid("gpa.divisor", format!("must be > 0, got {divisor}")));
            }
            GpaMethod::RawPoints { divisor }
        }
    };

    let mut positions = Vec::with_capacity(file.free_agents.positions.len());
    for raw in &file.free_agents.positions {
        let pos = Position::from_str_pos(raw);
        if !pos.is_skill() {
            return Err(invalid(
                "free_agents.positions",
                format!("unknown position `{raw}`"),
            ));
        }
        if !positions.contains(&pos) {
            positions.push(pos);
        }
    }

    Ok(GradingConfig {
        ceilings,
        boom: file.boom,
        gpa,
        free_agents: FreeAgentConfig {
            min_points: file.free_agents.min_points,
            limit: file.free_agents.limit,
            positions,
        },
        draft: file.draft,
    })
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
                     run from the project root or ensure defaults/ is present",
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

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.league_id.trim().is_empty() {
        return Err(invalid("league.league_id", "must not be empty"));
    }

    if let Some(week) = config.league.week {
        if !(MIN_WEEK..=MAX_WEEK).contains(&week) {
            return Err(invalid(
                "league.week",
                format!("must be between {MIN_WEEK} and {MAX_WEEK}, got {week}"),
            ));
        }
    }

    if config.sleeper.cache_ttl_secs == 0 {
        return Err(invalid("sleeper.cache_ttl_secs", "must be greater than 0"));
    }

    if !config.sleeper.api_base_url.starts_with("http") {
        return Err(invalid(
            "sleeper.api_base_url",
            format!("must be an http(s) URL, got `{}`", config.sleeper.api_base_url),
        ));
    }

    let boom = &config.grading.boom;
    if !(boom.threshold.is_finite() && boom.threshold >= 0.0) {
        return Err(invalid(
            "boom.threshold",
            format!("must be >= 0, got {}", boom.threshold),
        ));
    }
    if !boom.min_projected.is_finite() {
        return Err(invalid("boom.min_projected", "must be a finite number"));
    }

    let fa = &config.grading.free_agents;
    if fa.limit == 0 {
        return Err(invalid("free_agents.limit", "must be > 0"));
    }
    if !fa.min_points.is_finite() {
        return Err(invalid("free_agents.min_points", "must be a finite number"));
    }
    if fa.positions.is_empty() {
        return Err(invalid("free_agents.positions", "must list at least one position"));
    }

    let draft = &config.grading.draft;
    if draft.early_round_max >= draft.late_round_min {
        return Err(invalid(
            "draft.late_round_min",
            format!(
                "must be greater than draft.early_round_max ({}), got {}",
                draft.early_round_max, draft.late_round_min
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper: returns the path to the gridiron package root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("gridiron/defaults").exists() {
            cwd.join("gridiron")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Fresh temp dir with `config/` populated from the shipped defaults.
    fn temp_config_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        let config_dir = tmp.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), config_dir.join("league.toml")).unwrap();
        fs::copy(root.join("defaults/grading.toml"), config_dir.join("grading.toml")).unwrap();
        tmp
    }

    fn rewrite(tmp: &Path, file: &str, from: &str, to: &str) {
        let path = tmp.join("config").join(file);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(from), "{file} does not contain `{from}`");
        fs::write(&path, text.replace(from, to)).unwrap();
    }

    fn expect_field(tmp: &Path, field: &str) {
        let err = load_config_from(tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field: f, .. } => assert_eq!(f, field),
            other => panic!("expected ValidationError for {field}, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_defaults() {
        let tmp = temp_config_dir("gridiron_config_defaults");
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.league.league_id, "1239058549716303872");
        assert_eq!(config.league.name, "League of Extraordinarily Mental Men");
        assert!(config.league.season.is_none());
        assert!(config.league.week.is_none());

        assert_eq!(config.sleeper.api_base_url, "https://api.sleeper.app/v1");
        assert_eq!(config.sleeper.cache_ttl_secs, 60);
        assert_eq!(config.sleeper.projection_source, ProjectionSource::Stats);

        let g = &config.grading;
        assert_eq!(g.ceilings, CeilingTable::default());
        assert_eq!(g.boom, BoomConfig::default());
        assert_eq!(g.gpa, GpaMethod::RawPoints { divisor: 14.0 });
        assert_eq!(g.free_agents, FreeAgentConfig::default());
        assert_eq!(g.draft, DraftValueConfig::default());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn sleeper_section_is_optional() {
        let tmp = temp_config_dir("gridiron_config_no_sleeper");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nleague_id = \"42\"\nweek = 3\n",
        )
        .unwrap();
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.league.week, Some(3));
        assert_eq!(config.sleeper.cache_ttl_secs, 60);
        assert_eq!(config.sleeper.api_base_url, DEFAULT_API_BASE_URL);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn projection_source_can_be_switched() {
        let tmp = temp_config_dir("gridiron_config_projection_source");
        rewrite(
            &tmp,
            "league.toml",
            "projection_source = \"stats\"",
            "projection_source = \"projections\"",
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.sleeper.projection_source, ProjectionSource::Projections);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ceiling_percent_method_needs_no_divisor() {
        let tmp = temp_config_dir("gridiron_config_ceiling_percent");
        rewrite(&tmp, "grading.toml", "method = \"raw_points\"", "method = \"ceiling_percent\"");
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.grading.gpa, GpaMethod::CeilingPercent);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_ceiling() {
        let tmp = temp_config_dir("gridiron_config_zero_ceiling");
        rewrite(&tmp, "grading.toml", "K   = 10.0", "K   = 0.0");
        expect_field(&tmp, "ceilings.K");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_default_ceiling() {
        let tmp = temp_config_dir("gridiron_config_negative_default");
        rewrite(&tmp, "grading.toml", "default_ceiling = 15.0", "default_ceiling = -15.0");
        expect_field(&tmp, "default_ceiling");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_ceiling_position() {
        let tmp = temp_config_dir("gridiron_config_unknown_ceiling");
        rewrite(&tmp, "grading.toml", "K   = 10.0", "K   = 10.0\nLB  = 8.0");
        expect_field(&tmp, "ceilings.LB");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_gpa_divisor() {
        let tmp = temp_config_dir("gridiron_config_zero_divisor");
        rewrite(&tmp, "grading.toml", "divisor = 14.0", "divisor = 0.0");
        expect_field(&tmp, "gpa.divisor");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_free_agent_limit() {
        let tmp = temp_config_dir("gridiron_config_zero_limit");
        rewrite(&tmp, "grading.toml", "limit = 10", "limit = 0");
        expect_field(&tmp, "free_agents.limit");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_overlapping_draft_rounds() {
        let tmp = temp_config_dir("gridiron_config_draft_rounds");
        rewrite(&tmp, "grading.toml", "late_round_min = 10", "late_round_min = 2");
        expect_field(&tmp, "draft.late_round_min");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_league_id() {
        let tmp = temp_config_dir("gridiron_config_empty_league");
        rewrite(
            &tmp,
            "league.toml",
            "league_id = \"1239058549716303872\"",
            "league_id = \"\"",
        );
        expect_field(&tmp, "league.league_id");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_out_of_range_week() {
        let tmp = temp_config_dir("gridiron_config_bad_week");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nleague_id = \"42\"\nweek = 19\n",
        )
        .unwrap();
        expect_field(&tmp, "league.week");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_cache_ttl() {
        let tmp = temp_config_dir("gridiron_config_zero_ttl");
        rewrite(&tmp, "league.toml", "cache_ttl_secs = 60", "cache_ttl_secs = 0");
        expect_field(&tmp, "sleeper.cache_ttl_secs");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_grading_toml() {
        let tmp = temp_config_dir("gridiron_config_missing_grading");
        fs::remove_file(tmp.join("config/grading.toml")).unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("grading.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_config_dir("gridiron_config_invalid_toml");
        fs::write(tmp.join("config/league.toml"), "this is not valid [[[ toml").unwrap();
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_and_skips_existing() {
        let tmp = std::env::temp_dir().join("gridiron_config_ensure");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), defaults_dir.join("league.toml")).unwrap();
        fs::copy(root.join("defaults/grading.toml"), defaults_dir.join("grading.toml")).unwrap();
        fs::write(defaults_dir.join("league.toml.example"), "# template\n").unwrap();
        fs::write(config_dir.join("league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(copied[0].ends_with("grading.toml"));
        assert_eq!(
            fs::read_to_string(config_dir.join("league.toml")).unwrap(),
            "# custom\n"
        );
        assert!(!config_dir.join("league.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("gridiron_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
