use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::Result;

use crate::domains::layout::OverwritePolicy;
use crate::domains::replay::DEFAULT_SPEED_MS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub planner: PlannerConfig,
    pub playback: PlaybackConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scenario: Option<ScenarioConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    pub default_speed_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    /// Give a start/end slot back when another marker is placed over it.
    pub reclaim_on_overwrite: bool,
}

impl LayoutConfig {
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        if self.reclaim_on_overwrite {
            OverwritePolicy::Reclaim
        } else {
            OverwritePolicy::Keep
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub file: String,
    pub level: String,
}

/// A layout to author on startup, with cells given as coordinate labels ("A1").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub width: usize,
    pub height: usize,
    pub agents: u32,
    #[serde(default)]
    pub obstacles: Vec<String>,
    #[serde(default)]
    pub starts: Vec<String>,
    #[serde(default)]
    pub ends: Vec<String>,
}

pub const ENV_PREFIX: &str = "ROBOGRID";
pub const CONFIG_PATH_ENV: &str = "ROBOGRID_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl Config {
    /// Config file named by `ROBOGRID_CONFIG`, or `config.toml` in the working directory.
    pub fn path_from_env() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults, then the TOML file if it exists, then `ROBOGRID__SECTION__KEY` variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults = toml::to_string(&Config::default())?;
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(&defaults, ::config::FileFormat::Toml))
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planner: PlannerConfig {
                endpoint: "http://127.0.0.1:5000/move_bots".to_string(),
                timeout_secs: 30,
                connect_timeout_secs: 5,
            },
            playback: PlaybackConfig {
                default_speed_ms: DEFAULT_SPEED_MS,
            },
            layout: LayoutConfig {
                reclaim_on_overwrite: false,
            },
            logging: LoggingConfig {
                file: "./robogrid.log".to_string(),
                level: "info".to_string(),
            },
            scenario: None,
        }
    }
}
