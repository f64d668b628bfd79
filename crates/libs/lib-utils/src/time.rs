//! # Time Utilities
//!
//! Calendar-date parsing for the planner's target date, using chrono.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parse a calendar date in `YYYY-MM-DD` form, as produced by an HTML date input.
pub fn parse_date(date: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| Error::FailToDateParse(date.to_string()))
}

/// Midnight UTC at the start of `date`.
pub fn date_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
