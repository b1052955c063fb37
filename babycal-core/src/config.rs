//! Runtime configuration.
//!
//! Read from `~/.config/babycal/config.toml` (or an explicit path), then
//! overridden by `BABYCAL_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{BabycalError, BabycalResult};

static DEFAULT_PERIODS_FILE: &str = "data/periods.json";
static DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

fn default_periods_file() -> PathBuf {
    PathBuf::from(DEFAULT_PERIODS_FILE)
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("babycal"))
        .unwrap_or_else(|| PathBuf::from(".cache"))
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BabycalConfig {
    #[serde(default = "default_periods_file")]
    pub periods_file: PathBuf,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BabycalConfig {
    fn default() -> Self {
        BabycalConfig {
            periods_file: default_periods_file(),
            cache_dir: default_cache_dir(),
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl BabycalConfig {
    pub fn config_path() -> BabycalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BabycalError::Config("Could not determine config directory".into()))?
            .join("babycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file is not an error when falling back to the default location.
    pub fn load(path: Option<&Path>) -> BabycalResult<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        let config: BabycalConfig = Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(Environment::with_prefix("BABYCAL").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| BabycalError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn periods_path(&self) -> PathBuf {
        expand(&self.periods_file)
    }

    pub fn cache_path(&self) -> PathBuf {
        expand(&self.cache_dir)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
