//! Domain models and types for Sluice.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`BlastId`], [`JobId`])
//! - **Campaign records** ([`CampaignRecord`], [`CampaignStatus`]) and the
//!   provider's date formats
//! - **Error types** ([`SluiceError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! ```rust
//! use sluice::domain::BlastId;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let blast_id = BlastId::new("8260012")?;
//! assert_eq!(blast_id.table_name(), "blast_8260012");
//!
//! // Rejected: would not make a valid table name
//! assert!(BlastId::new("8260012; drop").is_err());
//! # Ok(())
//! # }
//! ```

pub mod campaign;
pub mod errors;
pub mod ids;
pub mod result;

pub use campaign::{CampaignRecord, CampaignStatus};
pub use errors::{ApiError, SluiceError};
pub use ids::{BlastId, JobId};
pub use result::Result;
