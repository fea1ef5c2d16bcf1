//! Configuration schema types
//!
//! This module defines the configuration structure for Sluice.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main Sluice configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SluiceConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Sailthru API configuration
    pub sailthru: SailthruConfig,

    /// BigQuery destination configuration
    pub bigquery: BigQueryConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SluiceConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.sailthru.validate()?;
        self.bigquery.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (don't invoke the BigQuery loader)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Sailthru API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SailthruConfig {
    /// Base URL of the Sailthru REST API
    #[serde(default = "default_sailthru_base_url")]
    pub base_url: String,

    /// API key
    pub api_key: String,

    /// Shared secret used to sign requests
    /// Stored securely in memory and automatically zeroized on drop
    pub api_secret: SecretString,

    /// Request timeout in seconds. Export downloads apply it to the gap
    /// between chunks instead of the whole transfer.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Export job polling
    #[serde(default)]
    pub poll: PollConfig,
}

impl SailthruConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("sailthru.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("sailthru.base_url must start with http:// or https://".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("sailthru.base_url is not a valid URL: {e}"))?;

        if self.api_key.trim().is_empty() {
            return Err("sailthru.api_key cannot be empty".to_string());
        }

        if self.api_secret.expose_secret().is_empty() {
            return Err("sailthru.api_secret cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("sailthru.timeout_seconds must be greater than 0".to_string());
        }

        self.poll.validate()
    }
}

/// Export job polling configuration
///
/// The first status check happens immediately. Before check `n + 1` the poller
/// waits `interval_seconds * backoff_multiplier^(n - 1)`, capped at
/// `max_interval_seconds`. After `max_attempts` checks the job is abandoned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay before the second status check
    #[serde(default = "default_poll_interval_seconds")]
    pub interval_seconds: f64,

    /// Growth factor applied to the delay after every check
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Upper bound for a single delay
    #[serde(default = "default_max_interval_seconds")]
    pub max_interval_seconds: f64,

    /// Maximum number of status checks
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_poll_interval_seconds(),
            backoff_multiplier: default_backoff_multiplier(),
            max_interval_seconds: default_max_interval_seconds(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollConfig {
    /// Delay to wait after the `attempt`-th (1-based) status check
    pub fn delay_after(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let secs = self.interval_seconds * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(secs.min(self.max_interval_seconds).max(0.0))
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.interval_seconds > 0.0) {
            return Err("sailthru.poll.interval_seconds must be greater than 0".to_string());
        }
        if !(self.backoff_multiplier >= 1.0) {
            return Err("sailthru.poll.backoff_multiplier must be at least 1.0".to_string());
        }
        if !(self.max_interval_seconds >= self.interval_seconds) {
            return Err(
                "sailthru.poll.max_interval_seconds must be at least interval_seconds".to_string(),
            );
        }
        if self.max_attempts == 0 {
            return Err("sailthru.poll.max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// BigQuery destination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BigQueryConfig {
    /// GCP project passed to `bq --project_id`
    pub project: String,

    /// Dataset holding the `campaigns` and `blast_<id>` tables
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Schema file for the `campaigns` table
    #[serde(default = "default_campaign_schema")]
    pub campaign_schema: String,

    /// Schema file for the `blast_<id>` tables
    #[serde(default = "default_blast_schema")]
    pub blast_schema: String,

    /// Explicit path to the `bq` binary; looked up on PATH when unset
    #[serde(default)]
    pub bq_binary: Option<String>,
}

impl BigQueryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.project.trim().is_empty() {
            return Err("bigquery.project cannot be empty".to_string());
        }

        if self.dataset.is_empty()
            || !self
                .dataset
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(format!(
                "bigquery.dataset '{}' must be non-empty and contain only letters, digits or underscores",
                self.dataset
            ));
        }

        if self.campaign_schema.trim().is_empty() {
            return Err("bigquery.campaign_schema cannot be empty".to_string());
        }

        if self.blast_schema.trim().is_empty() {
            return Err("bigquery.blast_schema cannot be empty".to_string());
        }

        Ok(())
    }

    /// Fully qualified `dataset.table` name
    pub fn qualified_table(&self, table: &str) -> String {
        format!("{}.{}", self.dataset, table)
    }
}

/// How the `campaigns` table is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignsWriteMode {
    /// Append rows to the existing table
    #[default]
    Append,
    /// Replace the table contents
    Replace,
}

/// Longest accepted recent window, about a century
pub const MAX_RECENT_WINDOW_DAYS: u32 = 36_500;

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Start of the campaign range used by the daily export
    #[serde(default = "default_daily_start_date")]
    pub daily_start_date: String,

    /// Number of days before the end date whose blasts count as recent
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: u32,

    /// Abort the daily export on the first failed blast
    #[serde(default)]
    pub fail_fast: bool,

    /// Write mode for the campaigns table
    #[serde(default)]
    pub campaigns_write_mode: CampaignsWriteMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            daily_start_date: default_daily_start_date(),
            recent_window_days: default_recent_window_days(),
            fail_fast: false,
            campaigns_write_mode: CampaignsWriteMode::default(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.daily_start_date.trim().is_empty() {
            return Err("export.daily_start_date cannot be empty".to_string());
        }

        if self.recent_window_days == 0 {
            return Err("export.recent_window_days must be at least 1".to_string());
        }

        if self.recent_window_days > MAX_RECENT_WINDOW_DAYS {
            return Err(format!(
                "export.recent_window_days must be at most {MAX_RECENT_WINDOW_DAYS}"
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a local rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sailthru_base_url() -> String {
    "https://api.sailthru.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_poll_interval_seconds() -> f64 {
    5.0
}

fn default_backoff_multiplier() -> f64 {
    1.5
}

fn default_max_interval_seconds() -> f64 {
    60.0
}

fn default_max_attempts() -> usize {
    120
}

fn default_dataset() -> String {
    "sailthru_blasts".to_string()
}

fn default_campaign_schema() -> String {
    "schemas/sailthru_campaign_export_schema.json".to_string()
}

fn default_blast_schema() -> String {
    "schemas/sailthru_blast_export_schema.json".to_string()
}

fn default_daily_start_date() -> String {
    "January 1 2010".to_string()
}

fn default_recent_window_days() -> u32 {
    7
}

fn default_local_path() -> String {
    "/var/log/sluice".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
