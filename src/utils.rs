use crate::error::{DashboardMetricsError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Extracts the calendar date from an ISO-8601 date or date-time string.
/// Time of day and zone offset are dropped; the date is taken as written.
pub fn parse_date_part(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date_time.date_naive());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(date_time.date());
        }
    }

    Err(DashboardMetricsError::DateError(format!(
        "Invalid date: '{}'. Expected YYYY-MM-DD or an ISO-8601 date-time",
        value
    )))
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(DashboardMetricsError::InvalidDateRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from the raw start/end inputs of a date picker.
    /// The range only applies when both bounds are filled in; a blank bound
    /// means "no date filtering".
    pub fn from_inputs(start: &str, end: &str) -> Result<Option<Self>> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Ok(None);
        }

        let start = parse_bound(start, "start")?;
        let end = parse_bound(end, "end")?;
        Self::new(start, end).map(Some)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_bound(value: &str, label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        DashboardMetricsError::DateError(format!(
            "Invalid {} date: '{}'. Expected YYYY-MM-DD",
            label, value
        ))
    })
}
