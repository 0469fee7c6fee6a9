//! Date and time encoder
//!
//! Encodes a date or time as a Unix timestamp in seconds. The inferred format and
//! the UTC offset are kept in the context so the shifted value can be printed in
//! the same shape as the input.

use super::dateparse::{self, ParsedDateTime};
use super::{ContextValue, Encoder, EncoderContext};
use crate::domain::{AnonymizerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};

const FORMAT_KEY: &str = "format";
const TIMEZONE_KEY: &str = "timezone";

/// Encoder for dates and times
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeEncoder;

impl DateTimeEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for DateTimeEncoder {
    fn encode(&self, value: &str) -> Result<(f64, EncoderContext)> {
        let ParsedDateTime {
            datetime,
            timezone,
            format,
        } = dateparse::parse(value)?;

        let timestamp =
            datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
        let timezone = match timezone {
            Some(offset) => ContextValue::Integer(i64::from(offset.local_minus_utc())),
            None => ContextValue::Null,
        };

        let ctx = EncoderContext::new()
            .with(FORMAT_KEY, ContextValue::Text(format))
            .with(TIMEZONE_KEY, timezone);
        Ok((timestamp, ctx))
    }

    fn decode(&self, value: f64, ctx: &EncoderContext) -> Result<String> {
        let format = ctx.text(FORMAT_KEY)?;
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(AnonymizerError::InvalidContext(format!(
                "invalid date format '{format}'"
            )));
        }

        let timezone = match ctx.optional_integer(TIMEZONE_KEY)? {
            Some(seconds) => Some(
                i32::try_from(seconds)
                    .ok()
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| {
                        AnonymizerError::InvalidContext(format!(
                            "invalid UTC offset of {seconds} seconds"
                        ))
                    })?,
            ),
            None => None,
        };

        let datetime = from_timestamp(value)?;
        dateparse::render(&datetime, timezone, format).ok_or_else(|| {
            AnonymizerError::InvalidContext(format!(
                "date format '{format}' cannot be rendered for this value"
            ))
        })
    }
}

/// Convert seconds since the epoch, rounded to whole nanoseconds
fn from_timestamp(value: f64) -> Result<DateTime<FixedOffset>> {
    let out_of_range = || AnonymizerError::InvalidInput("Timestamp out of range".to_string());
    if !value.is_finite() {
        return Err(out_of_range());
    }

    let mut seconds = value.floor();
    let mut nanos = ((value - seconds) * 1e9).round();
    if nanos >= 1e9 {
        seconds += 1.0;
        nanos = 0.0;
    }
    if seconds < i64::MIN as f64 || seconds >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    DateTime::from_timestamp(seconds as i64, nanos as u32)
        .map(|datetime| datetime.fixed_offset())
        .ok_or_else(out_of_range)
}
