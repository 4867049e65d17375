//! Calendar-date handling for the two optional date fields.
//!
//! Date pickers hand over either a bare date or a timestamp. Only the
//! calendar date as the user saw it matters: a timestamp contributes the
//! date in its own offset, never a UTC-shifted one.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Wire format for dates in payloads and stored records.
pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Format used on the detail card.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid calendar date: {0:?}")]
pub struct DateParseError(pub String);

/// Parse a date input. Empty (after trimming) means the picker was cleared.
///
/// Accepted forms: `YYYY-MM-DD`, `dd/mm/yyyy`, RFC 3339 timestamps.
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>, DateParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(None);
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, WIRE_FORMAT) {
        return Ok(Some(d));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, DISPLAY_FORMAT) {
        return Ok(Some(d));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(ts.date_naive()));
    }

    Err(DateParseError(s.to_string()))
}

/// `2024-03-05` → `"05/03/2024"`.
pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Deserialize an optional date that may arrive as null, `""`, a bare date,
/// or a full timestamp.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_date_input(&s).map_err(serde::de::Error::custom),
    }
}
