//! Common regex patterns for SHARE NOW invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// German license plate: 1-2 letter district, dash, then up to two
/// alphanumerics optionally followed by a space and up to four more
/// (`HH-AB123`, `HH-1234`, `M-SN 42`, `B-XY123E`).
macro_rules! license_plate {
    () => {
        r"[A-Z]{1,2}-[A-Z0-9]{1,2}(?: ?[A-Z0-9]{1,4})?"
    };
}

lazy_static! {
    // Invoice header
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?:Rechnungsnr\.|Rechnungsnummer)\s*:?\s*(\d+)"
    ).unwrap();

    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"Rechnungsdatum\s*:?\s*(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();

    // Grand total: net, tax, gross columns after the label
    pub static ref GRAND_TOTAL: Regex = Regex::new(
        r"Gesamtbetrag\s*:?\s+(\d[\d.,]*)%?\s+(\d[\d.,]*)%?\s+(\d[\d.,]*)"
    ).unwrap();

    // SHARE NOW Pass
    pub static ref PASS_PERIOD: Regex = Regex::new(
        r"(?i:SHARE\s*NOW\s+Pass)[^\n]*?\b(\d{2}\.\d{2}\.(?:\d{4}|\d{2}))\s*(?:-|–|bis)\s*(\d{2}\.\d{2}\.(?:\d{4}|\d{2}))\b"
    ).unwrap();

    pub static ref PASS_MARKER: Regex = Regex::new(
        r"(?i)SHARE\s*NOW\s+Pass"
    ).unwrap();

    // Processing fees and penalties
    pub static ref FEE_MARKER: Regex = Regex::new(
        r"(?i)Bearbeitungsgeb(?:ü|ue)hr|Verwarnungsgeld|Bu(?:ß|ss)geld"
    ).unwrap();

    pub static ref FEE_DESCRIPTION: Regex = Regex::new(concat!(
        r"(?i:Bearbeitungsgeb(?:ü|ue)hr)\s+(?i:f(?:ü|ue)r)\s+",
        r"(?P<subject>[^\n]+?)\s+vom\s+(?P<date>\d{2}\.\d{2}\.\d{4})\b",
        r"[^\n]*?(?:Fahrzeug|Kennzeichen)\s*:?\s*",
        r"(?P<plate>\b", license_plate!(), r")\b",
    )).unwrap();

    // Reservations
    pub static ref RESERVATION_MARKER: Regex = Regex::new(
        r"(?i)Mehrfach-?\s?reservierung|Reservierungsverl(?:ä|ae)ngerung|Verl(?:ä|ae)ngerung\s+der\s+Reservierung"
    ).unwrap();

    // Trip row on a single line: date, start, distance, vehicle, plate,
    // locations and end time.
    pub static ref TRIP_ROW_INLINE: Regex = Regex::new(concat!(
        r"(?P<date>\b\d{2}\.\d{2}\.\d{2}\b)[ \t]+",
        r"(?P<start_time>\b\d{2}:\d{2}\b)[ \t]+",
        r"(?P<distance>\d[\d.,]*)(?:[ \t]*km)?[ \t]+",
        r"(?P<vehicle>[^\n]+?)[ \t]+",
        r"(?P<license_plate>\b", license_plate!(), r")\b",
        r"(?:[ \t]+(?P<locations>[^\n]*?))?",
        r"[ \t]+(?P<end_time>\b\d{2}:\d{2}\b)",
    )).unwrap();

    // Trip row: date, start, distance, vehicle and plate on one line, then
    // start and end address lines (each optionally followed by a Lat/Lon
    // line), then the end time.
    pub static ref TRIP_ROW: Regex = Regex::new(concat!(
        r"(?P<date>\b\d{2}\.\d{2}\.\d{2}\b)[ \t]+",
        r"(?P<start_time>\b\d{2}:\d{2}\b)[ \t]+",
        r"(?P<distance>\d[\d.,]*)(?:[ \t]*km)?[ \t]+",
        r"(?P<vehicle>[^\n]+?)[ \t]+",
        r"(?P<license_plate>\b", license_plate!(), r")\b[^\n]*\n\s*",
        r"(?P<start_location>[^\n]+?)[ \t\r]*\n\s*",
        r"(?:Lat/Lon:?[ \t]*(?P<start_coordinates>[^\n]+?)[ \t\r]*\n\s*)?",
        r"(?P<end_location>[^\n]+?)",
        r"(?:[ \t\r]*\n\s*Lat/Lon:?[ \t]*(?P<end_coordinates>[^\n]+?))?",
        r"\s+(?P<end_time>\b\d{2}:\d{2}\b)",
    )).unwrap();
}
