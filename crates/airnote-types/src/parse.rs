//! Lenient parsing between human-entered text and typed values.
//!
//! Numeric form fields follow a "silently absent" policy: malformed text
//! yields `None` rather than an error, so a half-typed reading never blocks
//! the rest of the form. Date and time fields are the opposite: they are
//! validated against the fixed display patterns `DD/MM/YYYY` and `HH:MM`
//! and rejected when unparsable.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use crate::error::{ParseError, ParseResult};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Parse a decimal sensor value from free-form text.
///
/// Returns `None` for anything that is not a finite number; parse failures
/// are silent by design.
///
/// # Examples
///
/// ```
/// use airnote_types::parse::parse_decimal;
///
/// assert_eq!(parse_decimal("123.4"), Some(123.4));
/// assert_eq!(parse_decimal(" 812.5 "), Some(812.5));
/// assert_eq!(parse_decimal("abc"), None);
/// assert_eq!(parse_decimal(""), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Render a decimal value back into form-field text.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    value.to_string()
}

/// Normalise optional free text: blank becomes absent.
#[must_use]
pub fn blank_to_none(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse a date entered in the fixed `DD/MM/YYYY` display pattern.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDate`] when the text does not match the
/// pattern or names an impossible date.
pub fn parse_date(text: &str) -> ParseResult<Date> {
    Date::parse(text.trim(), &DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        input: text.to_string(),
    })
}

/// Parse a time entered in the fixed `HH:MM` display pattern.
///
/// # Errors
///
/// Returns [`ParseError::InvalidTime`] when the text does not match the
/// pattern.
pub fn parse_time(text: &str) -> ParseResult<Time> {
    Time::parse(text.trim(), &TIME_FORMAT).map_err(|_| ParseError::InvalidTime {
        input: text.to_string(),
    })
}

/// Render a date in the `DD/MM/YYYY` display pattern.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(&DATE_FORMAT).expect("valid date format description")
}

/// Render a time in the `HH:MM` display pattern.
#[must_use]
pub fn format_time(time: Time) -> String {
    time.format(&TIME_FORMAT).expect("valid time format description")
}

/// Render a timestamp for list display, e.g. `05/08/2025 at 14:30`.
#[must_use]
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    format!(
        "{} at {}",
        format_date(timestamp.date()),
        format_time(timestamp.time())
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_decimal_accepts_plain_numbers() {
        assert_eq!(parse_decimal("123.4"), Some(123.4));
        assert_eq!(parse_decimal("0"), Some(0.0));
        assert_eq!(parse_decimal("-3.2"), Some(-3.2));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage_silently() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("12,5"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
    }

    #[test]
    fn test_parse_decimal_rejects_non_finite() {
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("-inf"), None);
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(""), None);
        assert_eq!(blank_to_none("   "), None);
        assert_eq!(blank_to_none("stuffy room"), Some("stuffy room".to_string()));
    }

    #[test]
    fn test_parse_date_display_pattern() {
        let date = parse_date("31/12/2025").unwrap();
        assert_eq!(date.day(), 31);
        assert_eq!(date.month(), time::Month::December);
        assert_eq!(date.year(), 2025);

        assert!(parse_date("2025-12-31").is_err());
        assert!(parse_date("31/02/2025").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn test_parse_time_display_pattern() {
        let time = parse_time("09:45").unwrap();
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 45);

        assert!(parse_time("25:00").is_err());
        assert!(parse_time("9h45").is_err());
    }

    #[test]
    fn test_date_time_round_trip_through_display_pattern() {
        let date = parse_date("05/08/2025").unwrap();
        assert_eq!(format_date(date), "05/08/2025");

        let time = parse_time("14:30").unwrap();
        assert_eq!(format_time(time), "14:30");
    }

    #[test]
    fn test_format_timestamp_wording() {
        let timestamp = PrimitiveDateTime::new(
            parse_date("05/08/2025").unwrap(),
            parse_time("14:30").unwrap(),
        );
        assert_eq!(format_timestamp(timestamp), "05/08/2025 at 14:30");
    }

    proptest! {
        #[test]
        fn prop_parse_decimal_never_panics(text in ".*") {
            let _ = parse_decimal(&text);
        }

        #[test]
        fn prop_finite_values_round_trip(value in -1.0e6f64..1.0e6f64) {
            let parsed = parse_decimal(&format_decimal(value));
            prop_assert_eq!(parsed, Some(value));
        }
    }
}
