//! Format-inferring date and time parser
//!
//! Tries an ordered list of `strftime` candidates and keeps the first one whose
//! rendering of the parsed value reproduces the input exactly. The winning format is
//! therefore always good enough to print the value back in the shape it arrived in.

use crate::domain::{AnonymizerError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Calendar date, midnight
    Date,
    /// Time of day, anchored on today's date
    Time,
    /// Date and time without an offset
    Naive,
    /// Date and time with an explicit UTC offset
    Zoned,
}

const CANDIDATES: &[(&str, Shape)] = &[
    // ISO 8601 and RFC 3339
    ("%Y-%m-%dT%H:%M:%S%:z", Shape::Zoned),
    ("%Y-%m-%dT%H:%M:%S%.3f%:z", Shape::Zoned),
    ("%Y-%m-%dT%H:%M:%S%.6f%:z", Shape::Zoned),
    ("%Y-%m-%dT%H:%M:%S%z", Shape::Zoned),
    ("%Y-%m-%d %H:%M:%S%:z", Shape::Zoned),
    ("%Y-%m-%d %H:%M:%S %z", Shape::Zoned),
    ("%a, %d %b %Y %H:%M:%S %z", Shape::Zoned),
    ("%Y-%m-%dT%H:%M:%SZ", Shape::Naive),
    ("%Y-%m-%dT%H:%M:%S%.3fZ", Shape::Naive),
    ("%Y-%m-%dT%H:%M:%S", Shape::Naive),
    ("%Y-%m-%dT%H:%M:%S%.3f", Shape::Naive),
    ("%Y-%m-%dT%H:%M:%S%.6f", Shape::Naive),
    ("%Y-%m-%dT%H:%M", Shape::Naive),
    ("%Y-%m-%d %H:%M:%S", Shape::Naive),
    ("%Y-%m-%d %H:%M:%S%.3f", Shape::Naive),
    ("%Y-%m-%d %H:%M:%S%.6f", Shape::Naive),
    ("%Y-%m-%d %H:%M", Shape::Naive),
    ("%Y%m%dT%H%M%S", Shape::Naive),
    ("%Y%m%dT%H%M", Shape::Naive),
    // Regional date and time
    ("%d.%m.%Y %H:%M:%S", Shape::Naive),
    ("%d.%m.%Y %H:%M", Shape::Naive),
    ("%m/%d/%Y %H:%M:%S", Shape::Naive),
    ("%m/%d/%Y %H:%M", Shape::Naive),
    ("%m/%d/%Y %I:%M %p", Shape::Naive),
    ("%d/%m/%Y %H:%M:%S", Shape::Naive),
    ("%d/%m/%Y %H:%M", Shape::Naive),
    ("%a %b %d %H:%M:%S %Y", Shape::Naive),
    ("%B %d, %Y %I:%M %p", Shape::Naive),
    // Dates
    ("%Y-%m-%d", Shape::Date),
    ("%Y/%m/%d", Shape::Date),
    ("%Y.%m.%d", Shape::Date),
    ("%Y%m%d", Shape::Date),
    ("%d.%m.%Y", Shape::Date),
    ("%-d.%-m.%Y", Shape::Date),
    ("%d.%m.%y", Shape::Date),
    ("%m/%d/%Y", Shape::Date),
    ("%-m/%-d/%Y", Shape::Date),
    ("%d/%m/%Y", Shape::Date),
    ("%m/%d/%y", Shape::Date),
    ("%d/%m/%y", Shape::Date),
    ("%m-%d-%Y", Shape::Date),
    ("%d-%m-%Y", Shape::Date),
    ("%d %b %Y", Shape::Date),
    ("%-d %b %Y", Shape::Date),
    ("%d %B %Y", Shape::Date),
    ("%-d %B %Y", Shape::Date),
    ("%b %d, %Y", Shape::Date),
    ("%b %-d, %Y", Shape::Date),
    ("%B %d, %Y", Shape::Date),
    ("%B %-d, %Y", Shape::Date),
    ("%b %d %Y", Shape::Date),
    ("%a %b %d %Y", Shape::Date),
    ("%A, %B %d, %Y", Shape::Date),
    ("%A, %B %-d, %Y", Shape::Date),
    // Times of day
    ("%H:%M:%S", Shape::Time),
    ("%H:%M:%S%.3f", Shape::Time),
    ("%H:%M", Shape::Time),
    ("%I:%M %p", Shape::Time),
    ("%I:%M%p", Shape::Time),
    ("%-I:%M %p", Shape::Time),
    ("%-I:%M%p", Shape::Time),
    ("%I:%M:%S %p", Shape::Time),
    ("%I:%M %P", Shape::Time),
    ("%I:%M%P", Shape::Time),
    ("%-I:%M %P", Shape::Time),
    ("%-I:%M%P", Shape::Time),
];

/// Result of parsing a date or time string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDateTime {
    /// The parsed instant
    pub datetime: DateTime<FixedOffset>,
    /// Offset given in the input, `None` for naive values (treated as UTC)
    pub timezone: Option<FixedOffset>,
    /// `strftime` format that renders `datetime` back into the input
    pub format: String,
}

/// Parse a date or time, inferring its format
///
/// Time-only inputs are anchored on the current UTC date.
///
/// # Errors
///
/// Returns [`AnonymizerError::Parse`] if no candidate format round-trips.
pub fn parse(text: &str) -> Result<ParsedDateTime> {
    parse_on(text, Utc::now().date_naive())
}

/// Parse a date or time, anchoring time-only inputs on `today`
pub fn parse_on(text: &str, today: NaiveDate) -> Result<ParsedDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AnonymizerError::Parse("Empty date".to_string()));
    }

    // Surrounding whitespace is kept as literal text of the format
    let start = text.len() - text.trim_start().len();
    let leading = &text[..start];
    let trailing = &text[start + trimmed.len()..];

    for &(format, shape) in CANDIDATES {
        let Some((datetime, timezone)) = try_candidate(trimmed, format, shape, today) else {
            continue;
        };
        if render(&datetime, timezone, format).as_deref() != Some(trimmed) {
            continue;
        }
        return Ok(ParsedDateTime {
            datetime,
            timezone,
            format: format!("{leading}{format}{trailing}"),
        });
    }

    Err(AnonymizerError::Parse(
        "Unrecognized date or time format".to_string(),
    ))
}

fn try_candidate(
    text: &str,
    format: &str,
    shape: Shape,
    today: NaiveDate,
) -> Option<(DateTime<FixedOffset>, Option<FixedOffset>)> {
    let naive = match shape {
        Shape::Zoned => {
            let datetime = DateTime::parse_from_str(text, format).ok()?;
            return Some((datetime, Some(*datetime.offset())));
        }
        Shape::Naive => NaiveDateTime::parse_from_str(text, format).ok()?,
        Shape::Date => NaiveDate::parse_from_str(text, format)
            .ok()?
            .and_hms_opt(0, 0, 0)?,
        Shape::Time => today.and_time(NaiveTime::parse_from_str(text, format).ok()?),
    };
    Some((naive.and_utc().fixed_offset(), None))
}

/// Render an instant with a `strftime` format
///
/// Naive values (no timezone) are rendered as UTC wall-clock time. Returns `None` if
/// the format is invalid or needs an offset the value does not have.
pub fn render(
    datetime: &DateTime<FixedOffset>,
    timezone: Option<FixedOffset>,
    format: &str,
) -> Option<String> {
    let mut out = String::new();
    let written = match timezone {
        Some(offset) => write!(out, "{}", datetime.with_timezone(&offset).format(format)),
        None => write!(out, "{}", datetime.naive_utc().format(format)),
    };
    written.ok().map(|_| out)
}
