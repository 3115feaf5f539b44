//! Date parsing for SHARE NOW invoices.

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::patterns::PASS_PERIOD;
use crate::error::ParseError;
use crate::models::record::PassPeriod;

/// Parse a `DD.MM.YYYY` date.
pub fn parse_full_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d.%m.%Y").ok()
}

/// Parse a `DD.MM.YY` (or `DD.MM.YYYY`) date.
///
/// Two-digit years take their century from `reference`, falling back one
/// century when the result would lie more than a year after it.
pub fn parse_short_date(s: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let mut parts = s.trim().split('.');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year_str = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let year: i32 = year_str.parse().ok()?;
    let year = match year_str.len() {
        2 => expand_year(year, reference.year()),
        4 => year,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_year(two_digit: i32, reference_year: i32) -> i32 {
    let year = reference_year - reference_year.rem_euclid(100) + two_digit;
    if year > reference_year + 1 {
        year - 100
    } else {
        year
    }
}

/// Parse an `HH:MM` clock time.
pub fn parse_clock_time(field: &'static str, s: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| ParseError::MalformedNumeric {
        field,
        value: s.to_string(),
    })
}

/// Parse a short date, failing the document if it is not a calendar date.
pub fn parse_short_date_field(
    field: &'static str,
    s: &str,
    reference: NaiveDate,
) -> Result<NaiveDate, ParseError> {
    parse_short_date(s, reference).ok_or_else(|| ParseError::MalformedNumeric {
        field,
        value: s.to_string(),
    })
}

/// Extract the SHARE NOW Pass validity period.
pub fn extract_pass_period(
    text: &str,
    invoice_date: NaiveDate,
) -> Result<Option<PassPeriod>, ParseError> {
    let Some(caps) = PASS_PERIOD.captures(text) else {
        return Ok(None);
    };

    let period_start = parse_short_date_field("period_start", &caps[1], invoice_date)?;
    let period_end = parse_short_date_field("period_end", &caps[2], invoice_date)?;

    Ok(Some(PassPeriod {
        period_start,
        period_end,
    }))
}
