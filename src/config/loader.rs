//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CampaignsWriteMode, SluiceConfig};
use crate::config::secret_string;
use crate::domain::errors::SluiceError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SluiceConfig
/// 4. Applies environment variable overrides (SLUICE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use sluice::config::loader::load_config;
///
/// let config = load_config("sluice.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SluiceConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SluiceError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SluiceError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SluiceError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Parses TOML text after `${VAR}` substitution, without overrides or validation
pub fn parse_config(contents: &str) -> Result<SluiceConfig> {
    let contents = substitute_env_vars(contents)?;
    toml::from_str(&contents)
        .map_err(|e| SluiceError::Configuration(format!("Failed to parse TOML: {}", e)))
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SluiceError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        SluiceError::Configuration(format!("Invalid value '{value}' for environment variable {name}"))
    })
}

/// Applies environment variable overrides using SLUICE_* prefix
///
/// Environment variables follow the pattern: SLUICE_<SECTION>_<KEY>
/// For example: SLUICE_SAILTHRU_API_KEY, SLUICE_BIGQUERY_DATASET
fn apply_env_overrides(config: &mut SluiceConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SLUICE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("SLUICE_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("SLUICE_APPLICATION_DRY_RUN", &val)?;
    }

    // Sailthru overrides
    if let Ok(val) = std::env::var("SLUICE_SAILTHRU_BASE_URL") {
        config.sailthru.base_url = val;
    }
    if let Ok(val) = std::env::var("SLUICE_SAILTHRU_API_KEY") {
        config.sailthru.api_key = val;
    }
    if let Ok(val) = std::env::var("SLUICE_SAILTHRU_API_SECRET") {
        config.sailthru.api_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("SLUICE_SAILTHRU_TIMEOUT_SECONDS") {
        config.sailthru.timeout_seconds = parse_override("SLUICE_SAILTHRU_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("SLUICE_SAILTHRU_POLL_INTERVAL_SECONDS") {
        config.sailthru.poll.interval_seconds =
            parse_override("SLUICE_SAILTHRU_POLL_INTERVAL_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("SLUICE_SAILTHRU_POLL_MAX_ATTEMPTS") {
        config.sailthru.poll.max_attempts =
            parse_override("SLUICE_SAILTHRU_POLL_MAX_ATTEMPTS", &val)?;
    }

    // BigQuery overrides
    if let Ok(val) = std::env::var("SLUICE_BIGQUERY_PROJECT") {
        config.bigquery.project = val;
    }
    if let Ok(val) = std::env::var("SLUICE_BIGQUERY_DATASET") {
        config.bigquery.dataset = val;
    }
    if let Ok(val) = std::env::var("SLUICE_BIGQUERY_BQ_BINARY") {
        config.bigquery.bq_binary = Some(val);
    }

    // Export overrides
    if let Ok(val) = std::env::var("SLUICE_EXPORT_DAILY_START_DATE") {
        config.export.daily_start_date = val;
    }
    if let Ok(val) = std::env::var("SLUICE_EXPORT_RECENT_WINDOW_DAYS") {
        config.export.recent_window_days =
            parse_override("SLUICE_EXPORT_RECENT_WINDOW_DAYS", &val)?;
    }
    if let Ok(val) = std::env::var("SLUICE_EXPORT_FAIL_FAST") {
        config.export.fail_fast = parse_override("SLUICE_EXPORT_FAIL_FAST", &val)?;
    }
    if let Ok(val) = std::env::var("SLUICE_EXPORT_CAMPAIGNS_WRITE_MODE") {
        config.export.campaigns_write_mode = match val.to_lowercase().as_str() {
            "append" => CampaignsWriteMode::Append,
            "replace" => CampaignsWriteMode::Replace,
            _ => {
                return Err(SluiceError::Configuration(format!(
                    "Invalid value '{val}' for SLUICE_EXPORT_CAMPAIGNS_WRITE_MODE (append or replace)"
                )))
            }
        };
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SLUICE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("SLUICE_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("SLUICE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
