//! Summary command - totals over the stored records.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;

use carshare_core::report::{count_by_kind, summarize, within_dates, Summary};

use super::{load_config, open_store};

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Record store file (default: from config)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SummaryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config, args.store.as_deref());

    let records = within_dates(&store.list_all(), args.from, args.to);
    let summary = summarize(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", style("Invoices").bold());
    for (kind, count) in count_by_kind(&records) {
        let amount = summary
            .amount_by_kind
            .get(kind.as_str())
            .copied()
            .unwrap_or_default();
        println!("  {:<16} {:>4}  {:>10} EUR", kind.as_str(), count, amount);
    }
    println!("  {:<16} {:>4}  {:>10} EUR", "total", records.len(), summary.grand_total);

    print_trips(&summary);

    Ok(())
}

fn print_trips(summary: &Summary) {
    println!();
    println!("{}", style("Trips").bold());

    if summary.trip_count == 0 {
        println!("  none");
        return;
    }

    println!("  count:    {}", summary.trip_count);
    println!("  distance: {} km", summary.total_distance_km);
    println!("  duration: {} min", summary.total_duration_minutes);
    println!("  cost:     {} EUR", summary.total_trip_cost);

    println!();
    println!("{}", style("By vehicle").bold());
    for (vehicle, totals) in &summary.by_vehicle {
        println!(
            "  {:<20} {:>3} trips  {:>8} km  {:>6} min  {:>10} EUR",
            vehicle, totals.trips, totals.distance_km, totals.duration_minutes, totals.cost
        );
    }
}
