//! Runtime configuration.
//!
//! Values come from an optional YAML file and are then overridden by CLI
//! flags (which clap may in turn read from the environment or `.env`).
//!
//! ```yaml
//! username: Saint of the Day
//! post_time: "07:30"
//! # interval_secs: 3600   # post every hour instead of at post_time
//! timeout_secs: 10
//! webhook_url: https://discord.com/api/webhooks/...
//! ```

use crate::cli::Cli;
use crate::scheduler::Schedule;
use crate::scrapers::fetch::{BROWSER_USER_AGENT, DEFAULT_TIMEOUT};
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("invalid post time '{0}', expected HH:MM")]
    PostTime(String),

    #[error("timeout must be at least one second")]
    Timeout,

    #[error("post interval must be at least one second")]
    Interval,
}

/// Effective bot settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Name the webhook posts under.
    pub username: String,
    /// User agent sent to the saint sites.
    pub user_agent: String,
    /// Per-request timeout for the saint sites, in seconds.
    pub timeout_secs: u64,
    /// Local time of the daily post, `HH:MM`.
    pub post_time: String,
    /// Fixed interval between posts, in seconds; replaces `post_time` when set.
    pub interval_secs: Option<u64>,
    /// Channel webhook; messages go to stdout when unset.
    pub webhook_url: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            username: "Saint of the Day".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            post_time: "08:00".to_string(),
            interval_secs: None,
            webhook_url: None,
        }
    }
}

impl BotConfig {
    /// Read a YAML config file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        info!("Loaded config file");
        Ok(config)
    }

    fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load the file named by `--config` (if any), then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.webhook_url {
            self.webhook_url = Some(url.clone());
        }
        if let Some(secs) = cli.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(time) = &cli.post_time {
            self.post_time = time.clone();
        }
        if let Some(secs) = cli.interval_secs {
            self.interval_secs = Some(secs);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.post_time()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }
        if self.interval_secs == Some(0) {
            return Err(ConfigError::Interval);
        }
        Ok(())
    }

    /// When the `run` command posts: every `interval_secs` if set, otherwise
    /// daily at `post_time`.
    pub fn schedule(&self) -> Result<Schedule, ConfigError> {
        match self.interval_secs {
            Some(0) => Err(ConfigError::Interval),
            Some(secs) => Ok(Schedule::Every(Duration::from_secs(secs))),
            None => Ok(Schedule::DailyAt(self.post_time()?)),
        }
    }

    /// Parsed daily post time.
    pub fn post_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.post_time.trim(), "%H:%M")
            .map_err(|_| ConfigError::PostTime(self.post_time.clone()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
