//! Invoice record models for SHARE NOW billing documents.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed billing document.
///
/// The fields every document carries live on the record itself; everything
/// that depends on the document kind lives in [`RecordDetails`], so a record
/// can never hold fields its kind does not declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number, unique across the store.
    pub invoice_number: String,

    /// Date the invoice was issued.
    pub invoice_date: NaiveDate,

    /// Gross total of the invoice.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Kind-specific fields, tagged by `kind` when serialized.
    #[serde(flatten)]
    pub details: RecordDetails,
}

/// Kind-specific part of an [`InvoiceRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordDetails {
    /// A single rental.
    Trip(TripDetails),
    /// Multiple reservation or reservation extension.
    Reservation,
    /// SHARE NOW Pass subscription period.
    ShareNowPass(PassPeriod),
    /// Processing fee for a fine or penalty.
    ProcessingFee(FeeDetails),
}

/// Fields of a trip invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    /// Day the trip started.
    pub date: NaiveDate,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    /// Elapsed minutes, corrected for trips that cross midnight.
    #[serde(rename = "duration")]
    pub duration_minutes: i64,

    #[serde(with = "rust_decimal::serde::float")]
    pub distance_km: Decimal,

    /// Manufacturer and model, e.g. "Fiat 500".
    pub vehicle: String,

    pub start_location: String,

    pub end_location: String,

    /// "lat,lon" as printed on the invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_coordinates: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_coordinates: Option<String>,

    pub license_plate: String,

    /// Whether the invoice mentions a SHARE NOW Pass discount.
    pub pass_discount_applied: bool,
}

/// Validity period of a SHARE NOW Pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassPeriod {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Optional details of a processing fee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDetails {
    /// What the fee was charged for, e.g. "Verwarnungsgeld".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_offense: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}

/// Discriminant of [`InvoiceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Trip,
    Reservation,
    ShareNowPass,
    ProcessingFee,
}

impl DocumentKind {
    /// All kinds, in classification priority order.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::ShareNowPass,
        DocumentKind::ProcessingFee,
        DocumentKind::Reservation,
        DocumentKind::Trip,
    ];

    /// Serialized name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Trip => "trip",
            DocumentKind::Reservation => "reservation",
            DocumentKind::ShareNowPass => "share_now_pass",
            DocumentKind::ProcessingFee => "processing_fee",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase().replace(['-', ' '], "_");
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown document kind: {s}"))
    }
}

impl InvoiceRecord {
    /// Kind of the document this record was parsed from.
    pub fn kind(&self) -> DocumentKind {
        match self.details {
            RecordDetails::Trip(_) => DocumentKind::Trip,
            RecordDetails::Reservation => DocumentKind::Reservation,
            RecordDetails::ShareNowPass(_) => DocumentKind::ShareNowPass,
            RecordDetails::ProcessingFee(_) => DocumentKind::ProcessingFee,
        }
    }

    /// Trip fields, if this is a trip invoice.
    pub fn trip(&self) -> Option<&TripDetails> {
        match &self.details {
            RecordDetails::Trip(trip) => Some(trip),
            _ => None,
        }
    }
}
