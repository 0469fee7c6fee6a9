//! Integration tests for encoders

use chrono::NaiveDate;
use pii_anonymizer::domain::AnonymizerError;
use pii_anonymizer::encoders::{
    dateparse, DateTimeEncoder, DelimitedNumberEncoder, Encoder, EncoderContext, EncoderKind,
};

const HOUR: f64 = 3600.0;

fn shift(encoder: &dyn Encoder, input: &str, delta: f64) -> String {
    let (value, ctx) = encoder.encode(input).unwrap();
    encoder.decode(value + delta, &ctx).unwrap()
}

#[test]
fn test_datetime_round_trips_common_formats() {
    let encoder = DateTimeEncoder::new();
    for input in [
        "2020-01-02",
        "2020-01-02T10:30:00",
        "2020-01-02T10:30:00+02:00",
        "2020-01-02 10:30",
        "31.12.2019",
        "31.12.2019 12:30",
        "12/31/2019",
        "March 5, 2021",
        "5 Mar 2021",
    ] {
        assert_eq!(shift(&encoder, input, 0.0), input);
    }
}

#[test]
fn test_datetime_shift_keeps_format() {
    let encoder = DateTimeEncoder::new();
    assert_eq!(shift(&encoder, "2020-01-02", 24.0 * HOUR), "2020-01-03");
    assert_eq!(
        shift(&encoder, "31.12.2019 12:30", 23.0 * HOUR),
        "01.01.2020 11:30"
    );
    assert_eq!(
        shift(&encoder, "2020-01-02T23:00:00+02:00", 2.0 * HOUR),
        "2020-01-03T01:00:00+02:00"
    );
}

#[test]
fn test_datetime_time_only() {
    let encoder = DateTimeEncoder::new();
    assert_eq!(shift(&encoder, "23:30", 2.0 * HOUR + 300.0), "01:35");
}

#[test]
fn test_datetime_context_is_structural() {
    let (_, ctx) = DateTimeEncoder::new().encode("2020-01-02").unwrap();
    assert_eq!(ctx.text("format").unwrap(), "%Y-%m-%d");
    assert!(!format!("{ctx:?}").contains("2020"));
}

#[test]
fn test_datetime_rejects_unparseable() {
    assert!(matches!(
        DateTimeEncoder::new().encode("next tuesday-ish"),
        Err(AnonymizerError::Parse(_))
    ));
    assert!(matches!(
        DateTimeEncoder::new().decode(0.0, &EncoderContext::new()),
        Err(AnonymizerError::InvalidContext(_))
    ));
}

#[test]
fn test_datetime_decode_needs_format() {
    let encoder = DateTimeEncoder::new();
    let (value, mut ctx) = encoder.encode("2020-01-02T10:30:00+02:00").unwrap();
    assert!(ctx.remove("format").is_some());
    assert!(ctx.remove("format").is_none());
    assert!(matches!(
        encoder.decode(value, &ctx),
        Err(AnonymizerError::InvalidContext(_))
    ));
}

#[test]
fn test_dateparse_anchors_times_on_given_day() {
    let today = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();
    let parsed = dateparse::parse_on("08:15", today).unwrap();
    assert_eq!(parsed.format, "%H:%M");
    assert_eq!(parsed.timezone, None);
    assert_eq!(
        parsed.datetime.naive_utc(),
        today.and_hms_opt(8, 15, 0).unwrap()
    );
}

#[test]
fn test_delimited_number_shapes() {
    let encoder = DelimitedNumberEncoder::new();
    assert_eq!(shift(&encoder, "12,18 €", 2.1), "14,28 €");
    assert_eq!(shift(&encoder, "12.14$", 2.1), "14.24$");
    assert_eq!(shift(&encoder, "EURO -12,14", 24.0), "EURO 11,86");
    assert_eq!(shift(&encoder, "Age: 42 years", 1.0), "Age: 43 years");
}

#[test]
fn test_delimited_number_rejects_text() {
    assert!(matches!(
        DelimitedNumberEncoder::new().encode("no digits here"),
        Err(AnonymizerError::InvalidInput(_))
    ));
}

#[test]
fn test_encoder_kind_selects_encoder() {
    let encoder = EncoderKind::Datetime.to_encoder();
    assert_eq!(shift(encoder.as_ref(), "2020-01-02", 0.0), "2020-01-02");

    let encoder = EncoderKind::DelimitedNumber.to_encoder();
    assert_eq!(shift(encoder.as_ref(), "7 kg", 1.0), "8 kg");

    let kind: EncoderKind = serde_json::from_str(r#""delimitedNumber""#).unwrap();
    assert_eq!(kind, EncoderKind::DelimitedNumber);
    assert_eq!(kind.name(), "delimitedNumber");
}
