//! Serde adapters for the API date-time format.
//!
//! The API emits `YYYY-MM-DDTHH:MM:SS.sss±HH:MM` with a varying number of
//! fractional digits, so parsing accepts any RFC 3339 value. Formatting
//! always writes six fractional digits.

use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Format used for every outgoing timestamp.
pub const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

/// Render a timestamp in the API format.
pub fn format(value: &OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(DATE_TIME_FORMAT)
}

/// Parse a timestamp returned by the API.
pub fn parse(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = format(value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}
