//! Process command - extract a record from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use carshare_core::invoice::{InvoiceParser, ShareNowParser};
use carshare_core::models::record::{InvoiceRecord, RecordDetails};

use super::{load_config, read_invoice_text};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let text = read_invoice_text(&args.input)?;
    let record = ShareNowParser::from_config(&config.extraction).parse(&text)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
        format => format_records(std::slice::from_ref(&record), format)?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render records in the chosen output format.
pub fn format_records(records: &[InvoiceRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(records.iter().map(format_text).collect::<Vec<_>>().join("\n")),
    }
}

fn format_csv(records: &[InvoiceRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "kind",
        "invoice_number",
        "invoice_date",
        "total_amount",
        "date",
        "start_time",
        "end_time",
        "duration",
        "distance_km",
        "vehicle",
        "license_plate",
        "start_location",
        "end_location",
        "pass_discount_applied",
        "period_start",
        "period_end",
        "description",
        "date_of_offense",
    ])?;

    for record in records {
        let mut row = vec![
            record.kind().to_string(),
            record.invoice_number.clone(),
            record.invoice_date.to_string(),
            record.total_amount.to_string(),
        ];
        row.resize(18, String::new());

        match &record.details {
            RecordDetails::Trip(trip) => {
                row[4] = trip.date.to_string();
                row[5] = trip.start_time.format("%H:%M").to_string();
                row[6] = trip.end_time.format("%H:%M").to_string();
                row[7] = trip.duration_minutes.to_string();
                row[8] = trip.distance_km.to_string();
                row[9] = trip.vehicle.clone();
                row[10] = trip.license_plate.clone();
                row[11] = trip.start_location.clone();
                row[12] = trip.end_location.clone();
                row[13] = trip.pass_discount_applied.to_string();
            }
            RecordDetails::ShareNowPass(period) => {
                row[14] = period.period_start.to_string();
                row[15] = period.period_end.to_string();
            }
            RecordDetails::ProcessingFee(fee) => {
                row[10] = fee.license_plate.clone().unwrap_or_default();
                row[16] = fee.description.clone().unwrap_or_default();
                row[17] = fee
                    .date_of_offense
                    .map(|d| d.to_string())
                    .unwrap_or_default();
            }
            RecordDetails::Reservation => {}
        }

        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {} ({})\n", record.invoice_number, record.kind()));
    output.push_str(&format!("Date: {}\n", record.invoice_date));
    output.push_str(&format!("Total: {} EUR\n", record.total_amount));

    match &record.details {
        RecordDetails::Trip(trip) => {
            output.push_str("\nTrip:\n");
            output.push_str(&format!(
                "  {} {}-{} ({} min)\n",
                trip.date,
                trip.start_time.format("%H:%M"),
                trip.end_time.format("%H:%M"),
                trip.duration_minutes
            ));
            output.push_str(&format!("  {} km in {} ({})\n", trip.distance_km, trip.vehicle, trip.license_plate));
            output.push_str(&format!("  From: {}\n", trip.start_location));
            output.push_str(&format!("  To:   {}\n", trip.end_location));
            if trip.pass_discount_applied {
                output.push_str("  SHARE NOW Pass discount applied\n");
            }
        }
        RecordDetails::ShareNowPass(period) => {
            output.push_str(&format!(
                "\nPass period: {} - {}\n",
                period.period_start, period.period_end
            ));
        }
        RecordDetails::ProcessingFee(fee) => {
            if let Some(description) = &fee.description {
                output.push_str(&format!("\nFee for: {}\n", description));
            }
            if let Some(date) = fee.date_of_offense {
                output.push_str(&format!("Offense date: {}\n", date));
            }
            if let Some(plate) = &fee.license_plate {
                output.push_str(&format!("Vehicle: {}\n", plate));
            }
        }
        RecordDetails::Reservation => {}
    }

    output
}
