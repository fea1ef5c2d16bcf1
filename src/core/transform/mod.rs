//! File transforms applied between Sailthru and BigQuery
//!
//! - [`BlastIdPrefixer`] - streams a blast export CSV, prepending the
//!   `blast_id` column
//! - [`write_ndjson`] - writes campaign records as newline-delimited JSON

pub mod ndjson;
pub mod prefix;

pub use ndjson::write_ndjson;
pub use prefix::BlastIdPrefixer;
