//! Delete command - remove a record by invoice number.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::{load_config, open_store};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Invoice number of the record to remove
    #[arg(required = true)]
    invoice_number: String,

    /// Record store file (default: from config)
    #[arg(short, long)]
    store: Option<PathBuf>,
}

pub fn run(args: DeleteArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config, args.store.as_deref());

    let removed = store.delete(&args.invoice_number)?;

    println!(
        "{} Deleted {} invoice {}",
        style("✓").green(),
        removed.kind(),
        removed.invoice_number
    );

    Ok(())
}
