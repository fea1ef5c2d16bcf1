//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers handed out by Sailthru. Each type
//! guarantees the value is usable where it ends up (table names, query params).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Blast identifier newtype wrapper
///
/// Sailthru returns blast ids as JSON numbers in listings but accepts and
/// echoes them as strings elsewhere, so the canonical form is the decimal
/// string. The id becomes part of a BigQuery table name (`blast_<id>`), which
/// restricts it to ASCII alphanumerics and underscores.
///
/// # Examples
///
/// ```
/// use sluice::domain::ids::BlastId;
/// use std::str::FromStr;
///
/// let blast_id = BlastId::from_str("8260012").unwrap();
/// assert_eq!(blast_id.table_name(), "blast_8260012");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlastId(String);

impl BlastId {
    /// Creates a new BlastId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(BlastId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err("Blast ID cannot be empty".to_string());
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!(
                "Blast ID '{id}' contains characters not allowed in a table name"
            ));
        }
        Ok(Self(id.to_string()))
    }

    /// Builds a BlastId from the `blast_id` value of an API record
    ///
    /// Integers and strings are accepted; anything else is rejected.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::Number(n) if n.is_u64() || n.is_i64() => Self::new(n.to_string()),
            Value::String(s) => Self::new(s.as_str()),
            other => Err(format!("Unsupported blast_id value: {other}")),
        }
    }

    /// Returns the blast ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the per-blast destination table
    pub fn table_name(&self) -> String {
        format!("blast_{}", self.0)
    }
}

impl fmt::Display for BlastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlastId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BlastId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Export job identifier
///
/// Opaque token returned by `POST job`. Only used to poll the job status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Creates a new JobId, rejecting empty values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Job ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the job ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
