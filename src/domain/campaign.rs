//! Campaign records and the provider's date formats
//!
//! Sailthru's campaign schema changes between releases, so a record is kept as
//! the raw JSON object and only `blast_id` and `start_time` are ever read.

use super::errors::SluiceError;
use super::ids::BlastId;
use super::result::Result;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Format of the human-readable dates passed to `GET blast` (`January 13 2017`)
pub const REPORT_DATE_FORMAT: &str = "%B %d %Y";

/// Format of `start_time` after the leading `<weekday>, ` token
const START_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// Campaign status filter accepted by `GET blast`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Already sent
    Sent,
    /// Currently sending
    Sending,
    /// Scheduled for later
    Scheduled,
    /// Not yet scheduled
    Draft,
}

impl CampaignStatus {
    /// Wire value for the `status` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Sent => "sent",
            CampaignStatus::Sending => "sending",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One campaign/blast summary as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignRecord(Map<String, Value>);

impl CampaignRecord {
    /// Converts an API value into a record, rejecting non-objects
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(SluiceError::InvalidResponse(format!(
                "expected campaign object, got {other}"
            ))),
        }
    }

    /// The record's blast identifier
    pub fn blast_id(&self) -> Result<BlastId> {
        let value = self
            .0
            .get("blast_id")
            .ok_or_else(|| SluiceError::Validation("campaign record has no blast_id".to_string()))?;
        BlastId::from_json(value).map_err(SluiceError::Validation)
    }

    /// The record's start time as provider wall-clock time
    pub fn start_time(&self) -> Result<NaiveDateTime> {
        match self.0.get("start_time") {
            Some(Value::String(raw)) => parse_start_time(raw),
            Some(other) => Err(SluiceError::Timestamp(format!(
                "start_time is not a string: {other}"
            ))),
            None => Err(SluiceError::Timestamp(
                "campaign record has no start_time".to_string(),
            )),
        }
    }
}

/// Parses a Sailthru `start_time` such as `Sun, 08 Jan 2017 10:00:00 -0500`
///
/// The weekday token must be a valid English abbreviation but is not checked
/// against the date. The result is the wall-clock time with the offset
/// dropped, which is what the report cutoff is compared against.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime> {
    let malformed = || SluiceError::Timestamp(format!("malformed start_time '{raw}'"));

    let (weekday, rest) = raw.split_once(", ").ok_or_else(malformed)?;
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return Err(malformed());
    }

    DateTime::parse_from_str(rest.trim(), START_TIME_FORMAT)
        .map(|dt| dt.naive_local())
        .map_err(|e| SluiceError::Timestamp(format!("malformed start_time '{raw}': {e}")))
}

/// Parses a report date such as `January 13 2017`
pub fn parse_report_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), REPORT_DATE_FORMAT).map_err(|e| {
        SluiceError::Validation(format!(
            "invalid date '{raw}' (expected e.g. 'January 13 2017'): {e}"
        ))
    })
}

/// Formats a date the way `GET blast` expects it
pub fn format_report_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

/// Earliest start time that still counts as recent for a report ending on `end_date`
///
/// # Errors
///
/// Returns a validation error if the window reaches before the earliest
/// representable date.
pub fn recent_cutoff(end_date: NaiveDate, window_days: u32) -> Result<NaiveDateTime> {
    end_date
        .checked_sub_days(Days::new(u64::from(window_days)))
        .map(|start| start.and_time(NaiveTime::MIN))
        .ok_or_else(|| {
            SluiceError::Validation(format!(
                "recent window of {window_days} days before {end_date} is out of range"
            ))
        })
}
