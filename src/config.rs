// Configuration loading and parsing (board.toml, credentials.toml).

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

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
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub github: GithubConfig,
    pub report: ReportConfig,
    pub filters: FilterDefaults,
    pub cache_ttl_secs: u64,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// board.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire board.toml file.
#[derive(Debug, Clone, Deserialize)]
struct BoardFile {
    github: GithubConfig,
    report: ReportConfig,
    #[serde(default)]
    filters: FilterDefaults,
    cache: CacheSection,
}

/// Where the per-game CSV files live.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    pub folder_path: String,
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Only this team's batters are summarized.
    pub team: String,
    /// OBP variant: when true, hit-by-pitch counts toward reaching base.
    #[serde(default)]
    pub include_hit_by_pitch: bool,
}

/// Default filter selection applied at startup. Both levels and both
/// handedness options are on unless the file says otherwise.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FilterDefaults {
    #[serde(default = "default_true")]
    pub level_a: bool,
    #[serde(default = "default_true")]
    pub level_b: bool,
    #[serde(default = "default_true")]
    pub vs_right: bool,
    #[serde(default = "default_true")]
    pub vs_left: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl Default for FilterDefaults {
    fn default() -> Self {
        FilterDefaults {
            level_a: true,
            level_b: true,
            vs_right: true,
            vs_left: true,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CacheSection {
    ttl_secs: u64,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub github_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/board.toml` and
/// `config/credentials.toml`, both relative to the given `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- board.toml (required) ---
    let board_path = config_dir.join("board.toml");
    let board_text = read_file(&board_path)?;

    // --- credentials.toml (optional file) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials_text = if credentials_path.exists() {
        Some(read_file(&credentials_path)?)
    } else {
        None
    };

    let config = parse_config(
        &board_text,
        &board_path,
        credentials_text.as_deref(),
        &credentials_path,
    )?;
    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

/// Parse the config file texts into an assembled `Config`. Split out from
/// the path-based loader so tests can use inline TOML.
fn parse_config(
    board_text: &str,
    board_path: &Path,
    credentials_text: Option<&str>,
    credentials_path: &Path,
) -> Result<Config, ConfigError> {
    let board: BoardFile = toml::from_str(board_text).map_err(|e| ConfigError::ParseError {
        path: board_path.to_path_buf(),
        source: e,
    })?;

    let credentials = match credentials_text {
        Some(text) => toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.to_path_buf(),
            source: e,
        })?,
        None => CredentialsConfig::default(),
    };

    Ok(Config {
        github: board.github,
        report: board.report,
        filters: board.filters,
        cache_ttl_secs: board.cache.ttl_secs,
        credentials,
    })
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
    let required: &[(&str, &str)] = &[
        ("github.owner", &config.github.owner),
        ("github.repo", &config.github.repo),
        ("github.folder_path", &config.github.folder_path),
        ("github.branch", &config.github.branch),
        ("report.team", &config.report.team),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "cache.ttl_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    match &config.credentials.github_token {
        Some(token) if !token.trim().is_empty() => {}
        _ => {
            return Err(ConfigError::ValidationError {
                field: "credentials.github_token".into(),
                message: "required to fetch data from the private repository".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
