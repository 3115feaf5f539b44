//! Invoice classification and field extraction module.

pub mod classifier;
mod parser;
pub mod rules;

pub use classifier::{classify, detect_kind};
pub use parser::{InvoiceParser, ShareNowParser};

use crate::error::ParseError;
use crate::models::record::InvoiceRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse invoice text with the default parser settings.
pub fn parse(text: &str) -> Result<InvoiceRecord> {
    ShareNowParser::new().parse(text)
}
