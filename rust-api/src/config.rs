//! Server configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::Level;

use crate::models::League;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Backend settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root for room files and the room registry
    pub data_dir: PathBuf,
    pub leagues: Vec<League>,
    pub poll_interval: Duration,
    /// `YYYYMMDD`; when set, each league is polled once for that date
    pub poll_date: Option<String>,
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            data_dir: PathBuf::from("data"),
            leagues: League::ALL.to_vec(),
            poll_interval: Duration::from_secs(10),
            poll_date: None,
            log_level: Level::INFO,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|e| invalid("PORT", &port, e))?;
        }
        if let Some(dir) = get("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get("LEAGUES") {
            config.leagues = raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<League>().map_err(|e| invalid("LEAGUES", &raw, e)))
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(secs) = get("POLL_INTERVAL_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| invalid("POLL_INTERVAL_SECS", &secs, e))?;
            if secs == 0 {
                return Err(invalid("POLL_INTERVAL_SECS", "0", "must be positive"));
            }
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(date) = get("POLL_DATE") {
            let date = date.trim().to_string();
            if date.len() != 8 || !date.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid("POLL_DATE", &date, "expected YYYYMMDD"));
            }
            config.poll_date = Some(date);
        }
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level
                .trim()
                .parse()
                .map_err(|e| invalid("LOG_LEVEL", &level, e))?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
