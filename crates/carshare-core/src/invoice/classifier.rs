//! Document kind selection.
//!
//! Marker phrases are not exclusive to one kind (a pass invoice may contain a
//! trip-shaped row, a fee invoice may mention a reservation), so kinds are
//! tried in a fixed order and the first match wins:
//!
//! 1. SHARE NOW Pass period
//! 2. processing fee / penalty
//! 3. multiple reservation / reservation extension
//! 4. trip row

use tracing::debug;

use super::rules::{extract_header, has_trip_row, FEE_MARKER, PASS_PERIOD, RESERVATION_MARKER};
use super::Result;
use crate::error::ParseError;
use crate::models::record::DocumentKind;

/// Classify invoice text.
///
/// Fails with `MissingHeader` before looking at any marker when the invoice
/// number or date is absent.
pub fn classify(text: &str) -> Result<DocumentKind> {
    extract_header(text)?;
    detect_kind(text).ok_or(ParseError::UnrecognizedDocument)
}

/// Apply the marker priority to text whose header is already known.
pub fn detect_kind(text: &str) -> Option<DocumentKind> {
    let kind = if PASS_PERIOD.is_match(text) {
        DocumentKind::ShareNowPass
    } else if FEE_MARKER.is_match(text) {
        DocumentKind::ProcessingFee
    } else if RESERVATION_MARKER.is_match(text) {
        DocumentKind::Reservation
    } else if has_trip_row(text) {
        DocumentKind::Trip
    } else {
        return None;
    };

    debug!("Classified document as {}", kind);
    Some(kind)
}
