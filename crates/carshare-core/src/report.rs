//! Aggregate figures over stored records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::record::{DocumentKind, InvoiceRecord};

/// Headline figures for a set of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Number of trip invoices.
    pub trip_count: usize,
    pub total_distance_km: Decimal,
    pub total_duration_minutes: i64,
    /// Sum of trip invoice amounts.
    pub total_trip_cost: Decimal,
    /// Trip figures per vehicle, keyed by vehicle name.
    pub by_vehicle: BTreeMap<String, VehicleTotals>,
    /// Invoice amounts per document kind.
    pub amount_by_kind: BTreeMap<String, Decimal>,
    /// Sum over all invoices.
    pub grand_total: Decimal,
}

/// Trip figures for one vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleTotals {
    pub trips: usize,
    pub distance_km: Decimal,
    pub duration_minutes: i64,
    pub cost: Decimal,
}

/// Date a record is reported under: the trip date for trips, the invoice
/// date otherwise.
pub fn record_date(record: &InvoiceRecord) -> NaiveDate {
    record
        .trip()
        .map(|trip| trip.date)
        .unwrap_or(record.invoice_date)
}

/// Keep records whose report date lies within the inclusive range.
pub fn within_dates(
    records: &[InvoiceRecord],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<InvoiceRecord> {
    records
        .iter()
        .filter(|r| {
            let date = record_date(r);
            from.is_none_or(|from| date >= from) && to.is_none_or(|to| date <= to)
        })
        .cloned()
        .collect()
}

/// Compute the summary of a record set.
pub fn summarize(records: &[InvoiceRecord]) -> Summary {
    let mut summary = Summary::default();

    for record in records {
        summary.grand_total += record.total_amount;
        *summary
            .amount_by_kind
            .entry(record.kind().to_string())
            .or_default() += record.total_amount;

        if let Some(trip) = record.trip() {
            summary.trip_count += 1;
            summary.total_distance_km += trip.distance_km;
            summary.total_duration_minutes += trip.duration_minutes;
            summary.total_trip_cost += record.total_amount;

            let vehicle = summary.by_vehicle.entry(trip.vehicle.clone()).or_default();
            vehicle.trips += 1;
            vehicle.distance_km += trip.distance_km;
            vehicle.duration_minutes += trip.duration_minutes;
            vehicle.cost += record.total_amount;
        }
    }

    summary
}

/// Count records per kind, in classification order.
pub fn count_by_kind(records: &[InvoiceRecord]) -> Vec<(DocumentKind, usize)> {
    DocumentKind::ALL
        .into_iter()
        .map(|kind| (kind, records.iter().filter(|r| r.kind() == kind).count()))
        .collect()
}
