//! Configuration management for Sluice.
//!
//! Sluice uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SLUICE_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sluice::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sluice.toml")?;
//! println!("Sailthru: {}", config.sailthru.base_url);
//! println!("Dataset: {}", config.bigquery.dataset);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [sailthru]
//! api_key = "${SAILTHRU_API_KEY}"
//! api_secret = "${SAILTHRU_API_SECRET}"
//!
//! [sailthru.poll]
//! interval_seconds = 5
//! max_attempts = 120
//!
//! [bigquery]
//! project = "my-analytics-project"
//! dataset = "sailthru_blasts"
//!
//! [export]
//! daily_start_date = "January 1 2010"
//! recent_window_days = 7
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, BigQueryConfig, CampaignsWriteMode, ExportConfig, LoggingConfig,
    PollConfig, SailthruConfig, SluiceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
