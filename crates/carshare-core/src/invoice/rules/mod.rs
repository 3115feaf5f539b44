//! Rule-based field extractors for SHARE NOW invoices.

pub mod amounts;
pub mod dates;
pub mod fees;
pub mod header;
pub mod patterns;
pub mod trip;

pub use amounts::{extract_grand_total, parse_amount, parse_comma_decimal};
pub use dates::{extract_pass_period, parse_full_date, parse_short_date};
pub use fees::extract_fee_details;
pub use header::{extract_header, InvoiceHeader};
pub use patterns::*;
pub use trip::{
    extract_trip, has_trip_row, mentions_pass_outside_period, trip_duration_minutes,
    truncate_vehicle, TripOptions,
};
