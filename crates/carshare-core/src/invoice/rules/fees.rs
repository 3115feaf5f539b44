//! Processing fee description.

use super::dates::parse_full_date;
use super::patterns::FEE_DESCRIPTION;
use crate::error::ParseError;
use crate::models::record::FeeDetails;

/// Extract the optional fee description sentence.
///
/// A missing sentence yields empty details; a sentence with an impossible
/// offense date fails the document.
pub fn extract_fee_details(text: &str) -> Result<FeeDetails, ParseError> {
    let Some(caps) = FEE_DESCRIPTION.captures(text) else {
        return Ok(FeeDetails::default());
    };

    let raw_date = &caps["date"];
    let date_of_offense = parse_full_date(raw_date).ok_or_else(|| ParseError::MalformedNumeric {
        field: "date_of_offense",
        value: raw_date.to_string(),
    })?;

    Ok(FeeDetails {
        description: Some(caps["subject"].trim().to_string()),
        date_of_offense: Some(date_of_offense),
        license_plate: Some(caps["plate"].replace(' ', "")),
    })
}
