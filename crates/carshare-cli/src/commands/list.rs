//! List command - print stored records.

use std::path::PathBuf;

use clap::Args;

use carshare_core::models::record::DocumentKind;

use super::process::{format_records, OutputFormat};
use super::{load_config, open_store};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Record store file (default: from config)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only show records of this kind (trip, reservation, share_now_pass, processing_fee)
    #[arg(short, long)]
    kind: Option<DocumentKind>,
}

pub fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config, args.store.as_deref());

    let records: Vec<_> = store
        .list_all()
        .into_iter()
        .filter(|r| args.kind.is_none_or(|kind| r.kind() == kind))
        .collect();

    if records.is_empty() && !matches!(args.format, OutputFormat::Json) {
        println!("No records stored.");
        return Ok(());
    }

    print!("{}", format_records(&records, args.format)?);
    if matches!(args.format, OutputFormat::Json) {
        println!();
    }

    Ok(())
}
