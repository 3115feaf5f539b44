//! Ingest command - parse many invoice files into the record store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use carshare_core::error::StoreError;
use carshare_core::invoice::{InvoiceParser, ShareNowParser};
use carshare_core::models::config::CarshareConfig;

use super::{load_config, open_store, read_invoice_text};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Record store file (default: from config)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Replace stored records with the same invoice number
    #[arg(long)]
    replace: bool,

    /// Skip files that fail to parse instead of aborting (default: from config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    continue_on_error: Option<bool>,
}

/// What happened to one input file.
enum Outcome {
    Inserted,
    Replaced,
    Duplicate(String),
    Failed(String),
}

pub fn run(args: IngestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let continue_on_error = args
        .continue_on_error
        .unwrap_or(config.ingest.continue_on_error);
    let replace = args.replace || config.ingest.replace_existing;

    let files = collect_files(&args.input, &config)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.input);
    }

    println!(
        "{} Found {} files to ingest",
        style("ℹ").blue(),
        files.len()
    );

    let store = open_store(&config, args.store.as_deref());
    let parser = ShareNowParser::from_config(&config.extraction);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let parsed = read_invoice_text(&path)
            .and_then(|text| parser.parse(&text).map_err(anyhow::Error::from));

        let outcome = match parsed {
            Ok(record) => {
                let number = record.invoice_number.clone();
                let stored = if replace {
                    store.upsert(record).map(|replaced| {
                        if replaced {
                            Outcome::Replaced
                        } else {
                            Outcome::Inserted
                        }
                    })
                } else {
                    store.insert(record).map(|()| Outcome::Inserted)
                };

                match stored {
                    Ok(outcome) => outcome,
                    Err(StoreError::DuplicateInvoice(_)) => Outcome::Duplicate(number),
                    Err(e) => {
                        pb.abandon();
                        return Err(e.into());
                    }
                }
            }
            Err(e) => {
                if continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), e);
                    Outcome::Failed(e.to_string())
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), e);
                    anyhow::bail!("Processing {} failed: {}", path.display(), e);
                }
            }
        };

        results.push((path, outcome));
        pb.inc(1);
    }

    pb.finish_and_clear();

    let count = |f: fn(&Outcome) -> bool| results.iter().filter(|(_, o)| f(o)).count();
    let inserted = count(|o| matches!(o, Outcome::Inserted));
    let replaced = count(|o| matches!(o, Outcome::Replaced));
    let duplicates = count(|o| matches!(o, Outcome::Duplicate(_)));
    let failed = count(|o| matches!(o, Outcome::Failed(_)));

    println!(
        "{} Ingested {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} inserted, {} replaced, {} duplicate, {} failed",
        style(inserted).green(),
        style(replaced).green(),
        style(duplicates).yellow(),
        style(failed).red()
    );

    for (path, outcome) in &results {
        match outcome {
            Outcome::Duplicate(number) => {
                println!("  - {}: invoice {} already stored", path.display(), number)
            }
            Outcome::Failed(message) => println!("  - {}: {}", path.display(), message),
            _ => {}
        }
    }

    Ok(())
}

/// Expand the input into a sorted list of files to ingest.
///
/// A directory is walked one level deep and filtered by the configured
/// extensions; anything else is treated as a glob pattern.
fn collect_files(input: &str, config: &CarshareConfig) -> anyhow::Result<Vec<PathBuf>> {
    let input_path = Path::new(input);

    let mut files: Vec<PathBuf> = if input_path.is_dir() {
        fs::read_dir(input_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect()
    } else {
        glob(input)?.filter_map(|r| r.ok()).collect()
    };

    files.retain(|p| {
        let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
        config.accepts_extension(ext)
    });
    files.sort();

    debug!("Collected {} files from {}", files.len(), input);
    Ok(files)
}
