use carshare_core::{
    classify, parse, DocumentKind, ParseError, RecordDetails, RecordStore, StoreError,
};
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

const TRIP_INVOICE: &str = "\
SHARE NOW GmbH
Rechnungsnr.: 10045
Rechnungsdatum: 03.06.2024

Datum Start km Fahrzeug Kennzeichen
03.06.24 09:15 12,3 km Fiat 500 HH-AB123
Essener Bogen 10, 22419 Hamburg
Grindelallee 100, 20146 Hamburg
09:47

Netto MwSt Brutto
Gesamtbetrag 6,30 1,20 7,50
";

const NIGHT_TRIP_INVOICE: &str = "\
Rechnungsnr.: 10046
Rechnungsdatum: 01.01.2024

31.12.23 23:50 4,0 BMW i3 B-XY123E
Alexanderplatz 1, 10178 Berlin
Lat/Lon: 52.5219,13.4132
Torstrasse 50, 10119 Berlin
Lat/Lon: 52.5290,13.4010
00:10

Gesamtbetrag 2,94 0,56 3,50
";

const PASS_INVOICE: &str = "\
Rechnungsnr.: 20001
Rechnungsdatum: 01.06.2024

SHARE NOW Pass 01.06.24 - 30.06.24
03.06.24 09:15 12,3 Fiat 500 HH-AB123
Essener Bogen 10, 22419 Hamburg
Grindelallee 100, 20146 Hamburg
09:47

Gesamtbetrag 8,39 1,60 9,99
";

const RESERVATION_INVOICE: &str = "\
Rechnungsnr.: 30001
Rechnungsdatum: 12.06.2024

Mehrfachreservierung 3 Fahrzeuge

Gesamtbetrag 0,84 0,16 1,00
";

const FEE_INVOICE: &str = "\
Rechnungsnr.: 40001
Rechnungsdatum: 20.05.2024

Bearbeitungsgebühr für Verwarnungsgeld vom 12.05.2024 mit dem Fahrzeug B-GO1234
Mehrfachreservierung

Gesamtbetrag 12,61 2,39 15,00
";

#[test]
fn test_trip_invoice() {
    let record = parse(TRIP_INVOICE).unwrap();

    assert_eq!(record.invoice_number, "10045");
    assert_eq!(record.total_amount, Decimal::new(750, 2));

    let trip = record.trip().unwrap();
    assert_eq!(trip.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    assert_eq!(trip.distance_km, Decimal::new(123, 1));
    assert_eq!(trip.duration_minutes, 32);
    assert_eq!(trip.license_plate, "HH-AB123");
    assert_eq!(trip.vehicle, "Fiat 500");
}

#[test]
fn test_trip_across_midnight() {
    let record = parse(NIGHT_TRIP_INVOICE).unwrap();
    let trip = record.trip().unwrap();

    assert_eq!(trip.date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    assert_eq!(trip.start_time, NaiveTime::from_hms_opt(23, 50, 0).unwrap());
    assert_eq!(trip.end_time, NaiveTime::from_hms_opt(0, 10, 0).unwrap());
    assert_eq!(trip.duration_minutes, 20);
    assert_eq!(trip.license_plate, "B-XY123E");
    assert_eq!(trip.start_coordinates.as_deref(), Some("52.5219,13.4132"));
}

#[test]
fn test_pass_period_wins_over_trip_row() {
    assert_eq!(classify(PASS_INVOICE), Ok(DocumentKind::ShareNowPass));

    let record = parse(PASS_INVOICE).unwrap();
    assert_eq!(record.total_amount, Decimal::new(999, 2));
    match record.details {
        RecordDetails::ShareNowPass(period) => {
            assert_eq!(period.period_start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
            assert_eq!(period.period_end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        }
        other => panic!("expected a pass record, got {other:?}"),
    }
}

#[test]
fn test_reservation_invoice() {
    let record = parse(RESERVATION_INVOICE).unwrap();

    assert_eq!(record.kind(), DocumentKind::Reservation);
    assert_eq!(record.total_amount, Decimal::new(100, 2));
}

#[test]
fn test_fee_wins_over_reservation() {
    let record = parse(FEE_INVOICE).unwrap();

    let RecordDetails::ProcessingFee(fee) = &record.details else {
        panic!("expected a fee record, got {:?}", record.details);
    };
    assert_eq!(fee.description.as_deref(), Some("Verwarnungsgeld"));
    assert_eq!(fee.date_of_offense, NaiveDate::from_ymd_opt(2024, 5, 12));
    assert_eq!(fee.license_plate.as_deref(), Some("B-GO1234"));
    assert_eq!(record.total_amount, Decimal::new(1500, 2));
}

#[test]
fn test_missing_header() {
    let text = TRIP_INVOICE.replace("Rechnungsnr.: 10045\n", "");

    assert_eq!(classify(&text), Err(ParseError::MissingHeader("invoice_number")));
    assert_eq!(parse(&text), Err(ParseError::MissingHeader("invoice_number")));
}

#[test]
fn test_unrecognized_document() {
    let text = "Rechnungsnr.: 1\nRechnungsdatum: 01.01.2024\nVielen Dank\nGesamtbetrag 1,00 0,19 1,19";

    assert_eq!(parse(text), Err(ParseError::UnrecognizedDocument));
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carsharing_data.json");
    let store = RecordStore::open(&path);

    for text in [TRIP_INVOICE, PASS_INVOICE, FEE_INVOICE] {
        store.insert(parse(text).unwrap()).unwrap();
    }

    let err = store.insert(parse(TRIP_INVOICE).unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateInvoice(ref n) if n == "10045"));

    let reopened = RecordStore::open(&path);
    let numbers: Vec<String> = reopened
        .list_all()
        .into_iter()
        .map(|r| r.invoice_number)
        .collect();
    assert_eq!(numbers, vec!["10045", "20001", "40001"]);
    assert_eq!(reopened.find("10045"), Some(parse(TRIP_INVOICE).unwrap()));

    assert!(matches!(reopened.delete("99999"), Err(StoreError::NotFound(_))));
    assert!(!reopened.backend().lock_path().exists());
}

#[test]
fn test_file_store_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    RecordStore::open(&path)
        .insert(parse(TRIP_INVOICE).unwrap())
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let entry = &json[0];

    assert_eq!(entry["kind"], "trip");
    assert_eq!(entry["invoice_number"], "10045");
    assert_eq!(entry["invoice_date"], "2024-06-03");
    assert_eq!(entry["total_amount"], 7.5);
    assert_eq!(entry["duration"], 32);
    assert_eq!(entry["distance_km"], 12.3);
}

#[test]
fn test_corrupt_store_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(&path, "[{\"invoice_number\": ").unwrap();

    let store = RecordStore::open(&path);
    assert!(store.list_all().is_empty());

    store.insert(parse(RESERVATION_INVOICE).unwrap()).unwrap();
    assert_eq!(store.list_all().len(), 1);
}

#[test]
fn test_single_line_trip_invoice() {
    let text = "Rechnungsnr.: 10045\nRechnungsdatum: 03.06.2024\n\
                03.06.24 09:15 12,3 Fiat 500 Essener Bogen 10 HH-AB123 Grindelallee 100 09:47\n\
                Gesamtbetrag 6,30 1,20 7,50";

    assert_eq!(classify(text), Ok(DocumentKind::Trip));

    let record = parse(text).unwrap();
    assert_eq!(record.total_amount, Decimal::new(750, 2));

    let trip = record.trip().unwrap();
    assert_eq!(trip.distance_km, Decimal::new(123, 1));
    assert_eq!(trip.duration_minutes, 32);
    assert_eq!(trip.vehicle, "Fiat 500");
    assert_eq!(trip.license_plate, "HH-AB123");
    assert_eq!(trip.start_location, "Essener Bogen 10");
    assert_eq!(trip.end_location, "Grindelallee 100");
}

#[test]
fn test_numeric_plate_trip_invoice() {
    let text = TRIP_INVOICE.replace("HH-AB123", "HH-1234");

    let record = parse(&text).unwrap();
    let trip = record.trip().unwrap();
    assert_eq!(trip.license_plate, "HH-1234");
    assert_eq!(trip.start_location, "Essener Bogen 10, 22419 Hamburg");
}

#[test]
fn test_file_store_update_keeps_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let store = RecordStore::open(&path);

    for text in [TRIP_INVOICE, RESERVATION_INVOICE, FEE_INVOICE] {
        store.insert(parse(text).unwrap()).unwrap();
    }

    let mut reservation = parse(RESERVATION_INVOICE).unwrap();
    reservation.total_amount = Decimal::new(250, 2);
    store.update(reservation).unwrap();

    let records = RecordStore::open(&path).list_all();
    let numbers: Vec<&str> = records.iter().map(|r| r.invoice_number.as_str()).collect();
    assert_eq!(numbers, vec!["10045", "30001", "40001"]);
    assert_eq!(records[1].total_amount, Decimal::new(250, 2));
    assert_eq!(records[1].kind(), DocumentKind::Reservation);
}

#[test]
fn test_unreadable_store_rejects_insert() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep.txt"), "previous contents").unwrap();

    let store = RecordStore::open(&path);
    let err = store.insert(parse(TRIP_INVOICE).unwrap()).unwrap_err();

    assert!(matches!(err, StoreError::Io(_)));
    assert_eq!(
        std::fs::read_to_string(path.join("keep.txt")).unwrap(),
        "previous contents"
    );
    assert!(!store.backend().lock_path().exists());
}
