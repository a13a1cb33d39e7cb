use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ChesswatchError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.chess.com/pub";
pub const DEFAULT_WINDOW_DAYS: u32 = 2;
pub const DEFAULT_ARCHIVE_LOOKBACK: usize = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_JSON_PATH: &str = "data/stats.json";

const TOOL_NAME: &str = "chess-activity-checker/1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSettings {
    pub players: Vec<String>,
    pub window_days: u32,
    #[serde(default = "default_archive_lookback")]
    pub archive_lookback: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub contact_email: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Identifying header value sent with every request.
    pub fn user_agent(&self) -> String {
        format!("{TOOL_NAME} ({})", self.contact_email)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_json_path")]
    pub json_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    pub watch: WatchSettings,
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub ops: OpsConfig,
}

fn default_archive_lookback() -> usize {
    DEFAULT_ARCHIVE_LOOKBACK
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_json_path() -> String {
    DEFAULT_JSON_PATH.into()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            watch: WatchSettings {
                players: vec!["err_daemon".into(), "m41k".into(), "Kathi_2905".into()],
                window_days: DEFAULT_WINDOW_DAYS,
                archive_lookback: DEFAULT_ARCHIVE_LOOKBACK,
            },
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.into(),
                contact_email: "chesswatch@example.com".into(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            output: OutputConfig {
                json_path: DEFAULT_JSON_PATH.into(),
            },
            ops: OpsConfig {
                log_level: "info".into(),
            },
        }
    }
}

impl WatchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            ChesswatchError::Configuration(format!(
                "unable to read config file {}: {err}",
                path_ref.display()
            ))
        })?;
        toml::from_str(&contents).map_err(|err| {
            ChesswatchError::Configuration(format!(
                "failed to parse config file {}: {err}",
                path_ref.display()
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.watch.players.is_empty() {
            return Err(ChesswatchError::Configuration(
                "watch.players must list at least one account".into(),
            ));
        }
        if self.watch.players.iter().any(|p| p.trim().is_empty()) {
            return Err(ChesswatchError::Configuration(
                "watch.players must not contain blank usernames".into(),
            ));
        }
        if self.watch.window_days == 0 {
            return Err(ChesswatchError::Configuration(
                "watch.window_days must be at least 1".into(),
            ));
        }
        if self.watch.archive_lookback == 0 {
            return Err(ChesswatchError::Configuration(
                "watch.archive_lookback must be at least 1".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ChesswatchError::Configuration(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.api.contact_email.trim().is_empty() {
            return Err(ChesswatchError::Configuration(
                "api.contact_email must not be empty".into(),
            ));
        }
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(ChesswatchError::Configuration(
                "api.base_url must be an http(s) url".into(),
            ));
        }
        Ok(())
    }
}
