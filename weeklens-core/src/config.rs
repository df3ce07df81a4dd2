//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/weeklens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/weeklens/` (~/.config/weeklens/)
//! - Data: `$XDG_DATA_HOME/weeklens/` (~/.local/share/weeklens/)
//! - State/Logs: `$XDG_STATE_HOME/weeklens/` (~/.local/state/weeklens/)

use crate::error::{Error, Result};
use crate::grid::GridConfig;
use crate::palette::CategoryPalette;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "weeklens";
/// File name suffix of the daily log files.
pub const LOG_FILE_SUFFIX: &str = "log";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Remote assistant used by the chat box
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Input file locations
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Grid shape and weekday labels
    #[serde(default)]
    pub grid: GridSettings,

    /// Category color overrides (`"Travel" = "#6b7280"`)
    #[serde(default)]
    pub palette: BTreeMap<String, String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote assistant configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Endpoint receiving `POST {"message": ...}`
    #[serde(default = "default_assistant_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,

    /// Assistant message shown when a request fails
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_assistant_endpoint(),
            timeout_secs: default_assistant_timeout(),
            fallback_message: default_fallback_message(),
        }
    }
}

impl AssistantConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            Error::Config(format!(
                "assistant.endpoint {:?} is not a valid URL: {}",
                self.endpoint, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(
                "assistant.endpoint must be an http(s) URL".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "assistant.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_assistant_endpoint() -> String {
    "https://time-tracker-backend-production-40ca.up.railway.app/".to_string()
}

fn default_assistant_timeout() -> u64 {
    30
}

fn default_fallback_message() -> String {
    "Sorry, something went wrong.".to_string()
}

/// Input file locations
#[derive(Debug, Deserialize, Default, Clone)]
pub struct DatasetConfig {
    /// Classified week data (JSON)
    pub week_data: Option<PathBuf>,
    /// Screen-time series (JSON); the built-in series is used when unset
    pub screen_time: Option<PathBuf>,
}

impl DatasetConfig {
    /// Configured week data path, or the default under the data directory.
    pub fn week_data_path(&self) -> PathBuf {
        self.week_data
            .clone()
            .unwrap_or_else(|| Config::data_dir().join("week_data_classified.json"))
    }
}

/// Grid shape as written in the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct GridSettings {
    /// Column labels, one per sorted date
    #[serde(default = "default_weekdays")]
    pub weekdays: Vec<String>,

    /// Minutes after midnight where slot 0 starts
    #[serde(default)]
    pub day_start_minutes: u32,

    /// Slots recorded per day
    #[serde(default = "default_slots_per_day")]
    pub slots_per_day: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            weekdays: default_weekdays(),
            day_start_minutes: 0,
            slots_per_day: default_slots_per_day(),
        }
    }
}

impl GridSettings {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.weekdays.len() != 7 {
            return Err(Error::Config(format!(
                "grid.weekdays must have exactly 7 labels, got {}",
                self.weekdays.len()
            )));
        }
        if self.day_start_minutes >= 24 * 60 || self.day_start_minutes % 30 != 0 {
            return Err(Error::Config(
                "grid.day_start_minutes must be a multiple of 30 below 1440".to_string(),
            ));
        }
        if self.slots_per_day == 0 {
            return Err(Error::Config(
                "grid.slots_per_day must be at least 1".to_string(),
            ));
        }
        let end = self.day_start_minutes as usize + self.slots_per_day * 30;
        if end > 24 * 60 {
            return Err(Error::Config(
                "grid slots must end before midnight".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_weekdays() -> Vec<String> {
    ["Wed", "Thu", "Fri", "Sat", "Sun", "Mon", "Tue"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_slots_per_day() -> usize {
    14
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.assistant.validate()?;
        self.grid.validate()?;
        CategoryPalette::with_overrides(&self.palette)?;
        Ok(())
    }

    /// Build the grid configuration (shape, labels and palette).
    pub fn grid_config(&self) -> Result<GridConfig> {
        self.grid.validate()?;
        let palette = CategoryPalette::with_overrides(&self.palette)?;
        Ok(GridConfig::new(
            self.grid.weekdays.clone(),
            self.grid.day_start_minutes,
            self.grid.slots_per_day,
            palette,
        ))
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/weeklens/config.toml` (~/.config/weeklens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("weeklens").join("config.toml")
    }

    /// Returns the data directory path (default input files)
    ///
    /// `$XDG_DATA_HOME/weeklens/` (~/.local/share/weeklens/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("weeklens")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/weeklens/` (~/.local/state/weeklens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("weeklens")
    }

    /// Today's log file, `$XDG_STATE_HOME/weeklens/weeklens.YYYY-MM-DD.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join(Self::log_file_name(chrono::Utc::now().date_naive()))
    }

    /// Name the daily appender gives the log file for `day` (UTC).
    pub fn log_file_name(day: NaiveDate) -> String {
        format!("{LOG_FILE_PREFIX}.{}.{LOG_FILE_SUFFIX}", day.format("%Y-%m-%d"))
    }
}
