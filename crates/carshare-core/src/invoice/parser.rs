//! Rule-based parser for SHARE NOW invoices.

use tracing::{debug, info};

use crate::error::ParseError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{DocumentKind, InvoiceRecord, RecordDetails};

use super::classifier::detect_kind;
use super::rules::{
    extract_fee_details, extract_grand_total, extract_header, extract_pass_period, extract_trip,
    TripOptions,
};
use super::Result;

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse one document's text into a record.
    fn parse(&self, text: &str) -> Result<InvoiceRecord>;
}

/// Parser for the SHARE NOW document layouts.
#[derive(Debug, Clone)]
pub struct ShareNowParser {
    trip_options: TripOptions,
}

impl ShareNowParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            trip_options: TripOptions::default(),
        }
    }

    /// Create a parser from the extraction section of the configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_vehicle_token_limit(config.vehicle_token_limit)
            .with_pass_detection(config.detect_pass_discount)
    }

    /// Set how many leading vehicle tokens are kept.
    pub fn with_vehicle_token_limit(mut self, limit: usize) -> Self {
        self.trip_options.vehicle_token_limit = limit.max(1);
        self
    }

    /// Set SHARE NOW Pass discount detection on trips.
    pub fn with_pass_detection(mut self, detect: bool) -> Self {
        self.trip_options.detect_pass_discount = detect;
        self
    }

    fn extract_details(
        &self,
        kind: DocumentKind,
        text: &str,
        header_date: chrono::NaiveDate,
    ) -> Result<RecordDetails> {
        match kind {
            DocumentKind::ShareNowPass => extract_pass_period(text, header_date)?
                .map(RecordDetails::ShareNowPass)
                .ok_or(ParseError::UnrecognizedDocument),
            DocumentKind::ProcessingFee => {
                extract_fee_details(text).map(RecordDetails::ProcessingFee)
            }
            DocumentKind::Reservation => Ok(RecordDetails::Reservation),
            DocumentKind::Trip => extract_trip(text, header_date, &self.trip_options)?
                .map(RecordDetails::Trip)
                .ok_or(ParseError::UnrecognizedDocument),
        }
    }
}

impl Default for ShareNowParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for ShareNowParser {
    fn parse(&self, text: &str) -> Result<InvoiceRecord> {
        debug!("Parsing invoice from {} characters of text", text.len());

        let header = extract_header(text)?;
        let kind = detect_kind(text).ok_or(ParseError::UnrecognizedDocument)?;
        let details = self.extract_details(kind, text, header.invoice_date)?;

        let total_amount = extract_grand_total(text)?.ok_or(ParseError::MissingField {
            kind,
            field: "total_amount",
        })?;

        info!(
            "Parsed {} invoice {} dated {} ({})",
            kind, header.invoice_number, header.invoice_date, total_amount
        );

        Ok(InvoiceRecord {
            invoice_number: header.invoice_number,
            invoice_date: header.invoice_date,
            total_amount,
            details,
        })
    }
}
