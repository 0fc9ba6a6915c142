//! Wikibase timestamp parsing and formatting.
//!
//! Wikibase stores points in time as `+YYYY-MM-DDThh:mm:ssZ`:
//! - The sign is mandatory and the year may have more than four digits
//! - Month and day are `00` when the value is less precise than a month/day
//! - Times are always UTC, so the only accepted zone designator is `Z`

use std::fmt;

/// Error type for timestamp parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError {
    pub message: String,
}

impl fmt::Display for TimestampParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TimestampParseError {}

/// A Wikibase point in time, split into its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    /// Proleptic year; negative for BCE.
    pub year: i64,
    /// Month 1-12, or 0 when unspecified.
    pub month: u8,
    /// Day 1-31, or 0 when unspecified.
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    /// Creates a day-precision timestamp at midnight.
    pub fn from_date(year: i64, month: u8, day: u8) -> Self {
        Timestamp {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(self))
    }
}

/// Returns true if the given year is a leap year.
fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn invalid(kind: &str, input: &str) -> TimestampParseError {
    TimestampParseError {
        message: format!("Invalid {} in timestamp: {}", kind, input),
    }
}

/// Parses a two-digit field, checking it lies within `max`.
fn parse_two_digits(part: &str, max: u8, kind: &str, input: &str) -> Result<u8, TimestampParseError> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(kind, input));
    }
    let value: u8 = part.parse().map_err(|_| invalid(kind, input))?;
    if value > max {
        return Err(invalid(kind, input));
    }
    Ok(value)
}

/// Parses a Wikibase timestamp such as `+2001-12-31T00:00:00Z`.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, TimestampParseError> {
    let negative = match input.chars().next() {
        Some('+') => false,
        Some('-') => true,
        _ => {
            return Err(TimestampParseError {
                message: format!("Timestamp must start with '+' or '-': {}", input),
            })
        }
    };

    let rest = &input[1..];
    let Some(rest) = rest.strip_suffix('Z') else {
        return Err(TimestampParseError {
            message: format!("Timestamp must end with 'Z': {}", input),
        });
    };
    let Some((date_part, time_part)) = rest.split_once('T') else {
        return Err(TimestampParseError {
            message: format!("Timestamp is missing the 'T' separator: {}", input),
        });
    };

    // Year is everything before the last two '-' separated fields
    let mut date_fields = date_part.rsplitn(3, '-');
    let (Some(day), Some(month), Some(year)) =
        (date_fields.next(), date_fields.next(), date_fields.next())
    else {
        return Err(invalid("date", input));
    };

    if year.len() < 4 || year.len() > 16 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("year", input));
    }
    let year: i64 = year.parse().map_err(|_| invalid("year", input))?;
    // A signed zero would not survive formatting
    if negative && year == 0 {
        return Err(invalid("year", input));
    }
    let year = if negative { -year } else { year };

    let month = parse_two_digits(month, 12, "month", input)?;
    let day = parse_two_digits(day, 31, "day", input)?;
    if month == 0 && day != 0 {
        return Err(invalid("day", input));
    }
    if month != 0 && day > days_in_month(year, month) {
        return Err(invalid("day", input));
    }

    let mut time_fields = time_part.split(':');
    let (Some(hour), Some(minute), Some(second), None) = (
        time_fields.next(),
        time_fields.next(),
        time_fields.next(),
        time_fields.next(),
    ) else {
        return Err(invalid("time", input));
    };

    Ok(Timestamp {
        year,
        month,
        day,
        hour: parse_two_digits(hour, 23, "hour", input)?,
        minute: parse_two_digits(minute, 59, "minute", input)?,
        second: parse_two_digits(second, 59, "second", input)?,
    })
}

/// Formats a timestamp in canonical Wikibase form (at least four year digits).
pub fn format_timestamp(ts: &Timestamp) -> String {
    let sign = if ts.year < 0 { '-' } else { '+' };
    format!(
        "{}{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        sign,
        ts.year.unsigned_abs(),
        ts.month,
        ts.day,
        ts.hour,
        ts.minute,
        ts.second
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_precision() {
        let ts = parse_timestamp("+2001-12-31T00:00:00Z").unwrap();
        assert_eq!(ts, Timestamp::from_date(2001, 12, 31));
        assert_eq!(format_timestamp(&ts), "+2001-12-31T00:00:00Z");
    }

    #[test]
    fn test_parse_negative_year() {
        let ts = parse_timestamp("-0044-03-15T00:00:00Z").unwrap();
        assert_eq!(ts.year, -44);
        assert_eq!(format_timestamp(&ts), "-0044-03-15T00:00:00Z");
    }

    #[test]
    fn test_year_zero_is_positive_only() {
        let ts = parse_timestamp("+0000-00-00T00:00:00Z").unwrap();
        assert_eq!(ts.year, 0);
        assert_eq!(format_timestamp(&ts), "+0000-00-00T00:00:00Z");

        assert!(parse_timestamp("-0000-00-00T00:00:00Z").is_err());
        assert!(parse_timestamp("-00000000-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_parse_coarse_precision() {
        // Year precision leaves month and day unspecified
        let ts = parse_timestamp("+1952-00-00T00:00:00Z").unwrap();
        assert_eq!((ts.year, ts.month, ts.day), (1952, 0, 0));

        // Deep time uses long years
        let ts = parse_timestamp("-13798000000-00-00T00:00:00Z").unwrap();
        assert_eq!(ts.year, -13_798_000_000);
        assert_eq!(format_timestamp(&ts), "-13798000000-00-00T00:00:00Z");
    }

    #[test]
    fn test_parse_long_zero_padded_year() {
        let ts = parse_timestamp("+00000002001-01-15T00:00:00Z").unwrap();
        assert_eq!(ts, Timestamp::from_date(2001, 1, 15));
        // Canonical form drops the extra padding
        assert_eq!(ts.to_string(), "+2001-01-15T00:00:00Z");
    }

    #[test]
    fn test_parse_with_time_of_day() {
        let ts = parse_timestamp("+2020-02-29T13:45:07Z").unwrap();
        assert_eq!((ts.hour, ts.minute, ts.second), (13, 45, 7));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let bad = [
            "2001-12-31T00:00:00Z",     // missing sign
            "+2001-12-31T00:00:00",     // missing Z
            "+2001-12-31 00:00:00Z",    // missing T
            "+2001-13-01T00:00:00Z",    // month
            "+2001-02-29T00:00:00Z",    // not a leap year
            "+2001-00-05T00:00:00Z",    // day without month
            "+2001-01-01T24:00:00Z",    // hour
            "+2001-01-01T00:60:00Z",    // minute
            "+01-01-01T00:00:00Z",      // short year
            "+2001-1-01T00:00:00Z",     // short month
            "+2001-01-01T00:00:00:00Z", // extra time field
            "",
        ];
        for s in bad {
            assert!(parse_timestamp(s).is_err(), "{}", s);
        }
    }
}
