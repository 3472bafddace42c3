//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tooltrack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::inventory::DEFAULT_MAX_NAME_LENGTH;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    /// Problems met while loading, logged once the file logger is up.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub data_file: Option<String>,
    pub history_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub max_name_length: Option<usize>,
    pub confirm_destructive: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_FILE: &str = "tool_lending_data.json";
pub const DEFAULT_HISTORY_FILE: &str = "tool_lending_history.log";
pub const LOG_FILE: &str = "tooltrack.log";
const APP_DIR: &str = ".tooltrack";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub data_path: PathBuf,
    pub history_path: PathBuf,
    pub log_path: PathBuf,
    pub max_name_length: usize,
    pub confirm_destructive: bool,
    pub warnings: Vec<String>,
}

/// Values taken from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.tooltrack/`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DIR))
}

/// Returns the path to `~/.tooltrack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `path`, or from `~/.tooltrack/config.toml` when `None`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `TrackerConfig::default()`. An explicitly given path must exist.
/// A malformed file returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig, ConfigError> {
    if let Some(path) = path {
        return read_config(path);
    }

    let mut config = TrackerConfig::default();
    let path = match config_path() {
        Some(p) => p,
        None => {
            config
                .warnings
                .push("Could not determine home directory, using default config".to_string());
            return Ok(config);
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        if let Err(e) = generate_default_config(&path) {
            config.warnings.push(format!(
                "Failed to write default config {}: {}",
                path.display(),
                e
            ));
        }
        return Ok(config);
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TrackerConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# Tool Lending Tracker Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [storage]
# data_dir = "~/.tooltrack"                   # Or set TOOLTRACK_DATA_DIR, or pass --data-dir
# data_file = "tool_lending_data.json"        # Relative to data_dir
# history_file = "tool_lending_history.log"   # Relative to data_dir

# [general]
# max_name_length = 30                        # Or set TOOLTRACK_MAX_NAME_LENGTH
# confirm_destructive = true                  # Ask before deleting or returning
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Expand a leading `~/` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TrackerConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Data dir: CLI → env → config → ~/.tooltrack → current directory
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("TOOLTRACK_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.storage.data_dir.as_deref().map(expand_home))
        .or_else(app_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let data_file = config
        .storage
        .data_file
        .as_deref()
        .unwrap_or(DEFAULT_DATA_FILE);
    let history_file = config
        .storage
        .history_file
        .as_deref()
        .unwrap_or(DEFAULT_HISTORY_FILE);

    let mut warnings = config.warnings.clone();

    // Name limit: env → config → default. Zero would reject every name.
    let max_name_length = name_length_from_env(
        std::env::var("TOOLTRACK_MAX_NAME_LENGTH").ok(),
        &mut warnings,
    )
    .or(config.general.max_name_length)
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_NAME_LENGTH);

    ResolvedConfig {
        data_path: data_dir.join(data_file),
        history_path: data_dir.join(history_file),
        log_path: data_dir.join(LOG_FILE),
        data_dir,
        max_name_length,
        confirm_destructive: config.general.confirm_destructive.unwrap_or(true),
        warnings,
    }
}

/// Parse `TOOLTRACK_MAX_NAME_LENGTH`; an unparseable value is ignored with a warning.
fn name_length_from_env(raw: Option<String>, warnings: &mut Vec<String>) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            warnings.push(format!("Ignoring TOOLTRACK_MAX_NAME_LENGTH={:?}: {}", raw, e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_dir(dir: &str) -> CliOverrides {
        CliOverrides {
            data_dir: Some(PathBuf::from(dir)),
        }
    }

    #[test]
    fn test_default_config_parses() {
        let config = TrackerConfig::default();
        assert!(config.storage.data_dir.is_none());
        assert!(config.general.max_name_length.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = TrackerConfig::default();
        let resolved = resolve(&config, &cli_dir("/tmp/tt"));
        assert_eq!(resolved.data_path, PathBuf::from("/tmp/tt/tool_lending_data.json"));
        assert_eq!(
            resolved.history_path,
            PathBuf::from("/tmp/tt/tool_lending_history.log")
        );
        assert_eq!(resolved.log_path, PathBuf::from("/tmp/tt/tooltrack.log"));
        assert!(resolved.confirm_destructive);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TrackerConfig {
            storage: StorageConfig {
                data_dir: None,
                data_file: Some("shed.json".to_string()),
                history_file: Some("shed.log".to_string()),
            },
            general: GeneralConfig {
                max_name_length: Some(12),
                confirm_destructive: Some(false),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &cli_dir("/srv/shed"));
        assert_eq!(resolved.data_path, PathBuf::from("/srv/shed/shed.json"));
        assert_eq!(resolved.history_path, PathBuf::from("/srv/shed/shed.log"));
        assert!(!resolved.confirm_destructive);
    }

    #[test]
    fn test_resolve_cli_data_dir_wins() {
        let config = TrackerConfig {
            storage: StorageConfig {
                data_dir: Some("/from/config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &cli_dir("/from/cli"));
        assert_eq!(resolved.data_dir, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_zero_name_length_falls_back() {
        let config = TrackerConfig {
            general: GeneralConfig {
                max_name_length: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        // Only meaningful when the env override is absent
        if std::env::var("TOOLTRACK_MAX_NAME_LENGTH").is_err() {
            let resolved = resolve(&config, &cli_dir("/tmp"));
            assert_eq!(resolved.max_name_length, DEFAULT_MAX_NAME_LENGTH);
        }
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/shed"), home.join("shed"));
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[storage]
data_dir = "/var/lib/tooltrack"
history_file = "audit.log"

[general]
max_name_length = 40
confirm_destructive = false
"#;
        let config: TrackerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.data_dir.as_deref(), Some("/var/lib/tooltrack"));
        assert_eq!(config.storage.data_file, None);
        assert_eq!(config.storage.history_file.as_deref(), Some("audit.log"));
        assert_eq!(config.general.max_name_length, Some(40));
        assert_eq!(config.general.confirm_destructive, Some(false));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
confirm_destructive = false
"#;
        let config: TrackerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.confirm_destructive, Some(false));
        assert!(config.general.max_name_length.is_none());
        assert!(config.storage.data_file.is_none());
    }

    #[test]
    fn test_bad_env_name_length_is_reported() {
        let mut warnings = Vec::new();
        assert_eq!(name_length_from_env(Some("40".to_string()), &mut warnings), Some(40));
        assert_eq!(name_length_from_env(None, &mut warnings), None);
        assert!(warnings.is_empty());

        assert_eq!(name_length_from_env(Some("lots".to_string()), &mut warnings), None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("TOOLTRACK_MAX_NAME_LENGTH=\"lots\""));
    }

    #[test]
    fn test_load_warnings_carry_into_resolved() {
        let config = TrackerConfig {
            warnings: vec!["Failed to write default config".to_string()],
            ..Default::default()
        };
        let resolved = resolve(&config, &cli_dir("/tmp/tt"));
        assert!(resolved
            .warnings
            .contains(&"Failed to write default config".to_string()));
    }

    #[test]
    fn test_default_config_write_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the config directory should be
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();
        assert!(generate_default_config(&blocker.join("config.toml")).is_err());

        let path = dir.path().join("app").join("config.toml");
        generate_default_config(&path).unwrap();
        let generated: TrackerConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(generated.general.max_name_length.is_none());
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(load_config(Some(&missing)), Err(ConfigError::Io(_))));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[general\nmax_name_length = ").unwrap();
        assert!(matches!(load_config(Some(&bad)), Err(ConfigError::Parse(_))));
    }
}
