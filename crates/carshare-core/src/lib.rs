//! Core library for SHARE NOW invoice processing.
//!
//! This crate provides:
//! - Invoice classification (trip, reservation, SHARE NOW Pass, processing fee)
//! - Field extraction from invoice text
//! - A JSON record store deduplicated by invoice number
//! - Summary figures over stored records
//! - PDF text extraction (behind the `pdf` feature)

pub mod error;
pub mod invoice;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod report;
pub mod store;

pub use error::{CarshareError, ParseError, PdfError, Result, StoreError};
pub use invoice::{classify, parse, InvoiceParser, ShareNowParser};
pub use models::config::CarshareConfig;
pub use models::record::{
    DocumentKind, FeeDetails, InvoiceRecord, PassPeriod, RecordDetails, TripDetails,
};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{summarize, Summary, VehicleTotals};
pub use store::{FileBackend, MemoryBackend, RecordBackend, RecordStore};
