//! TOML configuration for eveboard.
//!
//! Layered the usual way: an explicit `--config` path, then the
//! `EVEBOARD_CONFIG` environment variable, then `./eveboard.toml`, then
//! compiled-in defaults. CLI flags override whatever is loaded here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::table::{Column, Direction, SortState};

pub const CONFIG_ENV: &str = "EVEBOARD_CONFIG";
pub const LOCAL_CONFIG: &str = "eveboard.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "loaded dashboard configuration");
        Ok(config)
    }

    /// Resolve the configuration.
    ///
    /// An explicit path must load; a broken file found through the
    /// environment or the working directory only logs a warning.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = Path::new(&env_path);
            match Self::load(path) {
                Ok(cfg) => return Ok(cfg),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "{} set but file could not be loaded, trying fallback",
                        CONFIG_ENV
                    );
                }
            }
        }

        let local = Path::new(LOCAL_CONFIG);
        if local.exists() {
            match Self::load(local) {
                Ok(cfg) => return Ok(cfg),
                Err(e) => {
                    warn!(
                        path = %local.display(),
                        error = %e,
                        "local config file exists but could not be loaded, using defaults"
                    );
                }
            }
        }

        debug!("no config file found, using compiled-in defaults");
        Ok(Self::default())
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Alert fixture: a JSON array, or newline-delimited records.
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/eve.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Column sorted when no sort is requested, e.g. `"timestamp"`.
    pub sort: Option<Column>,
    pub direction: Direction,
    /// Maximum rows printed by the terminal table. `None` prints all.
    pub limit: Option<usize>,
}

impl TableConfig {
    pub fn default_sort(&self) -> SortState {
        match self.sort {
            Some(column) => SortState::by(column, self.direction),
            None => SortState::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.data.path, PathBuf::from("data/eve.json"));
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.table.default_sort(), SortState::new());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: DashboardConfig = toml::from_str(
            r#"
            [table]
            sort = "alert.severity"
            direction = "desc"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.table.default_sort().current(),
            Some((Column::Severity, Direction::Desc))
        );
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[data]\npath = \"/srv/eve.json\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();
        let cfg = DashboardConfig::resolve(Some(file.path())).unwrap();
        assert_eq!(cfg.data.path, PathBuf::from("/srv/eve.json"));
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        assert!(DashboardConfig::resolve(Some(Path::new("no/such/eveboard.toml"))).is_err());
    }

    #[test]
    fn test_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = ").unwrap();
        assert!(DashboardConfig::load(file.path()).is_err());
    }
}
