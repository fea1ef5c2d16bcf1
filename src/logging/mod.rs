//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output
//! - optional JSON logs in a rolling local file
//!
//! # Example
//!
//! ```no_run
//! use sluice::logging::init_logging;
//! use sluice::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(blast_id = "8260012", "Exporting blast");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a status check of a Sailthru export job
///
/// # Example
///
/// ```no_run
/// use sluice::log_job_poll;
///
/// log_job_poll!("5a1b2c", 2, 120, "queued");
/// ```
#[macro_export]
macro_rules! log_job_poll {
    ($job_id:expr, $attempt:expr, $max_attempts:expr, $status:expr) => {
        tracing::debug!(
            job_id = %$job_id,
            attempt = $attempt,
            max_attempts = $max_attempts,
            status = %$status,
            "Waiting for Sailthru export job"
        );
    };
}
