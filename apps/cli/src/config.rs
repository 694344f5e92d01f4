//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db ./dev.db                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     DINDIN_DB_PATH=./dev.db                                            │
//! │     DINDIN_SEED_CATEGORIES=true                                        │
//! │     DINDIN_LOG=debug                                                   │
//! │                                                                         │
//! │  3. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/dindin/config.toml (Linux)                               │
//! │     ~/Library/Application Support/br.dindin.dindin/config.toml (macOS) │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     dindin.db in the platform data directory                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/home/me/dindin.db"
//! max_connections = 4
//! connect_timeout_secs = 30
//!
//! [seed]
//! sample_categories = false   # on by default
//!
//! [log]
//! filter = "warn,dindin=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use dindin_core::DATABASE_FILE_NAME;
use dindin_db::DbConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,dindin=info,sqlx=warn";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. Defaults to `dindin.db` in the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Insert the sample categories when the table is empty.
    #[serde(default = "default_true")]
    pub sample_categories: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeedSettings {
    fn default() -> Self {
        SeedSettings {
            sample_categories: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub seed: SeedSettings,

    #[serde(default)]
    pub log: LogSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `explicit_path` must exist; the platform default may be absent
    /// 3. Environment variables
    pub fn load(explicit_path: Option<&Path>) -> CliResult<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses one TOML file; missing sections take their defaults.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from `lookup` (the process environment in production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("DINDIN_DB_PATH").filter(|p| !p.is_empty()) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("DINDIN_SEED_CATEGORIES") {
            match parse_bool(&flag) {
                Some(seed) => self.seed.sample_categories = seed,
                None => warn!(value = %flag, "Ignoring DINDIN_SEED_CATEGORIES, expected true/false"),
            }
        }

        if let Some(filter) = lookup("DINDIN_LOG").filter(|f| !f.is_empty()) {
            self.log.filter = filter;
        }
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.database.max_connections == 0 {
            return Err(CliError::InvalidConfig(
                "database.max_connections must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The database file to open.
    pub fn database_path(&self) -> CliResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            CliError::InvalidConfig("Could not determine the data directory; pass --db".into())
        })?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Pool settings for the gateway.
    pub fn db_config(&self) -> CliResult<DbConfig> {
        Ok(DbConfig::new(self.database_path()?)
            .max_connections(self.database.max_connections)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
            .seed_sample_categories(self.seed.sample_categories))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("br", "dindin", "dindin")
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, None);
        assert_eq!(config.database.max_connections, 4);
        assert!(config.seed.sample_categories);
        assert_eq!(config.log.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[seed]\nsample_categories = false\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();

        assert!(!config.seed.sample_categories);
        assert_eq!(config.database, DatabaseSettings::default());
    }

    #[test]
    fn test_empty_seed_section_keeps_samples_on() {
        let config: AppConfig = toml::from_str("[seed]\n").unwrap();
        assert!(config.seed.sample_categories);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database\npath = 1").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(CliError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[
            ("DINDIN_DB_PATH", "/tmp/other.db"),
            ("DINDIN_SEED_CATEGORIES", "false"),
            ("DINDIN_LOG", "debug"),
        ]));

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/other.db")));
        assert!(!config.seed.sample_categories);
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_bad_env_bool_is_ignored() {
        let mut config = AppConfig::default();
        config.seed.sample_categories = false;
        config.apply_env_overrides(env(&[("DINDIN_SEED_CATEGORIES", "maybe")]));

        assert!(!config.seed.sample_categories);
    }

    #[test]
    fn test_zero_connections_rejected() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_db_config_uses_settings() {
        let mut config = AppConfig::default();
        config.database.path = Some(PathBuf::from("/tmp/x.db"));
        config.seed.sample_categories = false;

        let db = config.db_config().unwrap();
        assert_eq!(db.database_path, PathBuf::from("/tmp/x.db"));
        assert!(!db.seed_sample_categories);
        assert_eq!(db.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
