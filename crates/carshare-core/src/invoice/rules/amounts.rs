//! Amount extraction for SHARE NOW invoices.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::GRAND_TOTAL;
use crate::error::ParseError;

/// Parse a comma-decimal quantity (e.g. "12,34", "1.234,56" or "12.34").
pub fn parse_comma_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // With a comma present, dots can only be thousands separators
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse a matched quantity, failing the document if it is not a number.
pub fn parse_amount(field: &'static str, s: &str) -> Result<Decimal, ParseError> {
    parse_comma_decimal(s).ok_or_else(|| ParseError::MalformedNumeric {
        field,
        value: s.to_string(),
    })
}

/// Extract the gross amount from the grand-total line.
///
/// The line carries three quantities (net, tax, gross); the last one is
/// returned. `Ok(None)` means the line is absent.
pub fn extract_grand_total(text: &str) -> Result<Option<Decimal>, ParseError> {
    match GRAND_TOTAL.captures(text) {
        Some(caps) => parse_amount("total_amount", &caps[3]).map(Some),
        None => Ok(None),
    }
}
