//! Console configuration
//!
//! Read from `~/.shopctl/config.toml` unless `--config` names another file.
//! Every key is optional:
//!
//! ```toml
//! [database]
//! host = "localhost"
//!
//! [session]
//! cancel_keyword = ":q"
//!
//! [logging]
//! level = "warn"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use shopctl_core::DEFAULT_CANCEL_KEYWORD;
use tracing::debug;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub host: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub cancel_keyword: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl ShopConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional and a
    /// missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `~/.shopctl/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn host(&self) -> &str {
        self.database.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn cancel_keyword(&self) -> &str {
        self.session
            .cancel_keyword
            .as_deref()
            .unwrap_or(DEFAULT_CANCEL_KEYWORD)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// `~/.shopctl`
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".shopctl"))
}

/// Load `.env` from the current directory, then `~/.shopctl/.env`.
///
/// Variables already set in the environment are never overwritten.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    let Some(env_file) = config_dir().map(|dir| dir.join(".env")) else {
        return;
    };
    if env_file.exists() {
        match dotenvy::from_path(&env_file) {
            Ok(()) => debug!("Loaded .env from {}", env_file.display()),
            Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
        }
    }
}
