//! Response shapes for the Sailthru job endpoints
//!
//! Bodies are read leniently from `serde_json::Value`; Sailthru adds fields
//! freely, and only a handful are relevant here.

use crate::domain::JobId;
use serde_json::Value;

/// State of an export job as reported by `GET job`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// Finished; the export URL should be present
    Completed { export_url: Option<String> },
    /// Sailthru gave up on the job
    Expired,
    /// Anything else (`queued`, `running`, or missing)
    Pending(String),
}

impl JobStatus {
    /// Reads the status out of a `GET job` body
    pub fn from_body(body: &Value) -> Self {
        match body.get("status").and_then(Value::as_str) {
            Some("completed") => JobStatus::Completed {
                export_url: body
                    .get("export_url")
                    .and_then(Value::as_str)
                    .filter(|u| !u.is_empty())
                    .map(str::to_string),
            },
            Some("expired") => JobStatus::Expired,
            Some(other) => JobStatus::Pending(other.to_string()),
            None => JobStatus::Pending("unknown".to_string()),
        }
    }

    /// Label used in logs
    pub fn label(&self) -> &str {
        match self {
            JobStatus::Completed { .. } => "completed",
            JobStatus::Expired => "expired",
            JobStatus::Pending(status) => status,
        }
    }
}

/// Extracts `job_id` from a `POST job` body, if Sailthru created a job
pub fn job_id_from_body(body: &Value) -> Option<JobId> {
    match body.get("job_id")? {
        Value::String(s) => JobId::new(s.as_str()).ok(),
        Value::Number(n) => JobId::new(n.to_string()).ok(),
        _ => None,
    }
}
