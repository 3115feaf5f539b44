//! Invoice number and invoice date.

use chrono::NaiveDate;

use super::dates::parse_full_date;
use super::patterns::{INVOICE_DATE, INVOICE_NUMBER};
use crate::error::ParseError;

/// Fields every SHARE NOW invoice starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
}

/// Extract the invoice header, failing if either field is absent.
pub fn extract_header(text: &str) -> Result<InvoiceHeader, ParseError> {
    let invoice_number = INVOICE_NUMBER
        .captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or(ParseError::MissingHeader("invoice_number"))?;

    let raw_date = INVOICE_DATE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or(ParseError::MissingHeader("invoice_date"))?;

    let invoice_date = parse_full_date(&raw_date).ok_or(ParseError::MalformedNumeric {
        field: "invoice_date",
        value: raw_date,
    })?;

    Ok(InvoiceHeader {
        invoice_number,
        invoice_date,
    })
}
