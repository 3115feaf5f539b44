//! Error types for the carshare-core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::record::DocumentKind;

/// Main error type for the carshare library.
#[derive(Error, Debug)]
pub enum CarshareError {
    /// Invoice parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Per-document failures of classification and field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invoice number or invoice date could not be found.
    #[error("missing invoice header field: {0}")]
    MissingHeader(&'static str),

    /// No document kind matched, including the trip fallback.
    #[error("unrecognized document")]
    UnrecognizedDocument,

    /// A matched numeric or date substring could not be parsed.
    #[error("malformed {field}: {value:?}")]
    MalformedNumeric { field: &'static str, value: String },

    /// A field the chosen kind cannot do without is absent.
    #[error("{kind} document is missing {field}")]
    MissingField {
        kind: DocumentKind,
        field: &'static str,
    },
}

/// Errors raised by record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this invoice number is already stored.
    #[error("invoice {0} already exists")]
    DuplicateInvoice(String),

    /// No record with this invoice number is stored.
    #[error("invoice {0} not found")]
    NotFound(String),

    /// Another writer holds the store lock.
    #[error(
        "store is locked by another writer: {} (remove it if no carshare process is running)",
        .0.display()
    )]
    Locked(PathBuf),

    /// Backend I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the collection.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the caller can report this and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::DuplicateInvoice(_) | StoreError::NotFound(_))
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the carshare library.
pub type Result<T> = std::result::Result<T, CarshareError>;
