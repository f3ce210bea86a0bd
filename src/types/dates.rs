//! Inclusive, date-only ranges used by history and finance requests.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format of every date the API accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Optional inclusive `[start, end]` range, serialized as `start_date` / `end_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "start_date", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(rename = "end_date", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Parse `YYYY-MM-DD` bounds. Ordering is checked separately by the validator.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            start: start.map(|s| parse_date("start_date", s)).transpose()?,
            end: end.map(|s| parse_date("end_date", s)).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// False only when both bounds are set and start is after end.
    pub fn is_ordered(&self) -> bool {
        match (self.start, self.end) {
            (Some(s), Some(e)) => s <= e,
            _ => true,
        }
    }
}

/// Parse a date-only value; times and other layouts are rejected.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        Error::invalid_field(
            field,
            format!("'{}' is not a YYYY-MM-DD date: {}", raw.trim(), e),
        )
    })
}
