//! Trip row extraction and derived trip fields.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use super::amounts::parse_amount;
use super::dates::{parse_clock_time, parse_short_date_field};
use super::patterns::{PASS_MARKER, PASS_PERIOD, TRIP_ROW, TRIP_ROW_INLINE};
use crate::error::ParseError;
use crate::models::record::TripDetails;

/// Knobs for trip extraction.
#[derive(Debug, Clone, Copy)]
pub struct TripOptions {
    /// Leading vehicle tokens to keep.
    pub vehicle_token_limit: usize,
    /// Whether to look for a SHARE NOW Pass mention.
    pub detect_pass_discount: bool,
}

impl Default for TripOptions {
    fn default() -> Self {
        Self {
            vehicle_token_limit: 2,
            detect_pass_discount: true,
        }
    }
}

/// Whether the text contains a trip row in either layout.
pub fn has_trip_row(text: &str) -> bool {
    TRIP_ROW_INLINE.is_match(text) || TRIP_ROW.is_match(text)
}

/// Raw substrings of one trip row, before numeric parsing.
struct RawTrip<'t> {
    date: &'t str,
    start_time: &'t str,
    end_time: &'t str,
    distance: &'t str,
    vehicle: String,
    license_plate: &'t str,
    start_location: String,
    end_location: String,
    start_coordinates: Option<String>,
    end_coordinates: Option<String>,
}

/// Single-line rows carry no line breaks between vehicle and locations.
///
/// Tokens between the distance and the plate beyond the vehicle token limit
/// are the start location, and the text between plate and end time is the
/// end location. Without such leftover tokens the text after the plate is
/// taken as the start location and the end location stays empty.
fn inline_row(text: &str, vehicle_token_limit: usize) -> Option<RawTrip<'_>> {
    let caps = TRIP_ROW_INLINE.captures(text)?;

    let tokens: Vec<&str> = caps
        .name("vehicle")
        .map_or("", |m| m.as_str())
        .split_whitespace()
        .collect();
    let split = vehicle_token_limit.min(tokens.len());
    let leftover = tokens[split..].join(" ");
    let after_plate = caps
        .name("locations")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let (start_location, end_location) = if leftover.is_empty() {
        (after_plate, String::new())
    } else {
        (leftover, after_plate)
    };

    Some(RawTrip {
        date: caps.name("date")?.as_str(),
        start_time: caps.name("start_time")?.as_str(),
        end_time: caps.name("end_time")?.as_str(),
        distance: caps.name("distance")?.as_str(),
        vehicle: tokens[..split].join(" "),
        license_plate: caps.name("license_plate")?.as_str(),
        start_location,
        end_location,
        start_coordinates: None,
        end_coordinates: None,
    })
}

fn multiline_row(text: &str, vehicle_token_limit: usize) -> Option<RawTrip<'_>> {
    let caps = TRIP_ROW.captures(text)?;
    let coordinates = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };

    Some(RawTrip {
        date: caps.name("date")?.as_str(),
        start_time: caps.name("start_time")?.as_str(),
        end_time: caps.name("end_time")?.as_str(),
        distance: caps.name("distance")?.as_str(),
        vehicle: truncate_vehicle(caps.name("vehicle")?.as_str(), vehicle_token_limit),
        license_plate: caps.name("license_plate")?.as_str(),
        start_location: caps.name("start_location")?.as_str().trim().to_string(),
        end_location: caps.name("end_location")?.as_str().trim().to_string(),
        start_coordinates: coordinates("start_coordinates"),
        end_coordinates: coordinates("end_coordinates"),
    })
}

/// Extract the trip fields. `Ok(None)` means no trip row was found.
///
/// The single-line layout is tried first, since the multi-line pattern can
/// also span a single-line row and the lines after it.
pub fn extract_trip(
    text: &str,
    invoice_date: NaiveDate,
    options: &TripOptions,
) -> Result<Option<TripDetails>, ParseError> {
    let Some(raw) = inline_row(text, options.vehicle_token_limit)
        .or_else(|| multiline_row(text, options.vehicle_token_limit))
    else {
        return Ok(None);
    };

    let date = parse_short_date_field("date", raw.date, invoice_date)?;
    let start_time = parse_clock_time("start_time", raw.start_time)?;
    let end_time = parse_clock_time("end_time", raw.end_time)?;
    let distance_km = parse_amount("distance_km", raw.distance)?;

    let trip = TripDetails {
        date,
        start_time,
        end_time,
        duration_minutes: trip_duration_minutes(date, start_time, end_time),
        distance_km,
        vehicle: raw.vehicle,
        start_location: raw.start_location,
        end_location: raw.end_location,
        start_coordinates: raw.start_coordinates,
        end_coordinates: raw.end_coordinates,
        license_plate: raw.license_plate.replace(' ', ""),
        pass_discount_applied: options.detect_pass_discount && mentions_pass_outside_period(text),
    };

    debug!(
        "Trip {} {}-{} ({} min, {} km) in {}",
        trip.date, trip.start_time, trip.end_time, trip.duration_minutes, trip.distance_km, trip.vehicle
    );

    Ok(Some(trip))
}

/// Minutes between start and end, moving the end to the next day when it
/// lies before the start.
pub fn trip_duration_minutes(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> i64 {
    let started = date.and_time(start);
    let mut ended = date.and_time(end);
    if ended < started {
        ended += Duration::days(1);
    }
    (ended - started).num_minutes()
}

/// Keep the first `limit` whitespace tokens of a vehicle descriptor.
pub fn truncate_vehicle(raw: &str, limit: usize) -> String {
    raw.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether "SHARE NOW Pass" appears outside a pass-period block.
pub fn mentions_pass_outside_period(text: &str) -> bool {
    PASS_MARKER.is_match(&PASS_PERIOD.replace_all(text, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    const TRIP_TEXT: &str = "\
Datum Start km Fahrzeug Kennzeichen
03.06.24 09:15 12,3 Fiat 500 Cabrio weiss HH-AB123
Essener Bogen 10, 22419 Hamburg
Lat/Lon: 53.6512,10.0832
Grindelallee 100, 20146 Hamburg
Lat/Lon: 53.5690,9.9850
09:47
";

    #[test]
    fn test_extract_trip_fields() {
        let trip = extract_trip(TRIP_TEXT, day(), &TripOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(trip.date, day());
        assert_eq!(trip.start_time, time(9, 15));
        assert_eq!(trip.end_time, time(9, 47));
        assert_eq!(trip.duration_minutes, 32);
        assert_eq!(trip.distance_km, Decimal::new(123, 1));
        assert_eq!(trip.vehicle, "Fiat 500");
        assert_eq!(trip.license_plate, "HH-AB123");
        assert_eq!(trip.start_location, "Essener Bogen 10, 22419 Hamburg");
        assert_eq!(trip.end_location, "Grindelallee 100, 20146 Hamburg");
        assert_eq!(trip.start_coordinates.as_deref(), Some("53.6512,10.0832"));
        assert_eq!(trip.end_coordinates.as_deref(), Some("53.5690,9.9850"));
        assert!(!trip.pass_discount_applied);
    }

    #[test]
    fn test_single_line_row() {
        let text = "03.06.24 09:15 12,3 Fiat 500 Essener Bogen 10 HH-AB123 Grindelallee 100 09:47\n\
                    Gesamtbetrag 6,30 1,20 7,50\n";
        let trip = extract_trip(text, day(), &TripOptions::default()).unwrap().unwrap();

        assert_eq!(trip.vehicle, "Fiat 500");
        assert_eq!(trip.license_plate, "HH-AB123");
        assert_eq!(trip.start_location, "Essener Bogen 10");
        assert_eq!(trip.end_location, "Grindelallee 100");
        assert_eq!(trip.distance_km, Decimal::new(123, 1));
        assert_eq!(trip.duration_minutes, 32);
    }

    #[test]
    fn test_single_line_row_without_leftover_tokens() {
        let text = "03.06.24 23:50 4,0 km BMW i3 B-XY 123E Torstrasse 50 00:10";
        let trip = extract_trip(text, day(), &TripOptions::default()).unwrap().unwrap();

        assert_eq!(trip.vehicle, "BMW i3");
        assert_eq!(trip.license_plate, "B-XY123E");
        assert_eq!(trip.start_location, "Torstrasse 50");
        assert_eq!(trip.end_location, "");
        assert_eq!(trip.duration_minutes, 20);
    }

    #[test]
    fn test_plate_with_digits_after_dash() {
        let text = TRIP_TEXT.replace("HH-AB123", "HH-1234");
        let trip = extract_trip(&text, day(), &TripOptions::default()).unwrap().unwrap();

        assert_eq!(trip.license_plate, "HH-1234");
        assert_eq!(trip.vehicle, "Fiat 500");
    }

    #[test]
    fn test_no_trip_row() {
        let text = "Mehrfachreservierung 15 Min";
        assert_eq!(extract_trip(text, day(), &TripOptions::default()), Ok(None));
        assert!(!has_trip_row(text));
    }

    #[test]
    fn test_duration_crosses_midnight() {
        assert_eq!(trip_duration_minutes(day(), time(23, 50), time(0, 10)), 20);
        assert_eq!(trip_duration_minutes(day(), time(9, 15), time(9, 47)), 32);
        assert_eq!(trip_duration_minutes(day(), time(12, 0), time(12, 0)), 0);
    }

    #[test]
    fn test_duration_is_never_negative() {
        for (start, end) in [((0, 0), (23, 59)), ((23, 59), (0, 0)), ((13, 5), (13, 4))] {
            let minutes = trip_duration_minutes(day(), time(start.0, start.1), time(end.0, end.1));
            assert!((0..24 * 60).contains(&minutes));
        }
    }

    #[test]
    fn test_truncate_vehicle() {
        assert_eq!(truncate_vehicle("Fiat 500 Cabrio weiss", 2), "Fiat 500");
        assert_eq!(truncate_vehicle("  BMW\ti3 ", 2), "BMW i3");
        assert_eq!(truncate_vehicle("Smart", 2), "Smart");
        assert_eq!(truncate_vehicle("Mercedes-Benz A 180", 3), "Mercedes-Benz A 180");
    }

    #[test]
    fn test_pass_mention_outside_period() {
        assert!(mentions_pass_outside_period("Rabatt SHARE NOW Pass -10%"));
        assert!(!mentions_pass_outside_period("SHARE NOW Pass 01.06.24 - 30.06.24"));
        assert!(!mentions_pass_outside_period("Fahrt ohne Rabatt"));
    }

    #[test]
    fn test_pass_detection_can_be_disabled() {
        let text = format!("{TRIP_TEXT}SHARE NOW Pass Rabatt\n");
        let options = TripOptions {
            detect_pass_discount: false,
            ..TripOptions::default()
        };

        let trip = extract_trip(&text, day(), &options).unwrap().unwrap();
        assert!(!trip.pass_discount_applied);

        let trip = extract_trip(&text, day(), &TripOptions::default()).unwrap().unwrap();
        assert!(trip.pass_discount_applied);
    }

    #[test]
    fn test_malformed_distance() {
        let text = TRIP_TEXT.replace("12,3", "1,2,3");
        assert!(matches!(
            extract_trip(&text, day(), &TripOptions::default()),
            Err(ParseError::MalformedNumeric { field: "distance_km", .. })
        ));
    }
}
