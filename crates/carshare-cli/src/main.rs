//! CLI application for SHARE NOW invoice ingestion.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, delete, ingest, list, process, summary};

/// SHARE NOW invoices - classify, extract and store car-sharing invoices
#[derive(Parser)]
#[command(name = "carshare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a record from a single invoice file
    Process(process::ProcessArgs),

    /// Parse invoice files into the record store
    Ingest(ingest::IngestArgs),

    /// List stored records
    List(list::ListArgs),

    /// Show totals over stored records
    Summary(summary::SummaryArgs),

    /// Delete a stored record
    Delete(delete::DeleteArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path),
        Commands::Ingest(args) => ingest::run(args, config_path),
        Commands::List(args) => list::run(args, config_path),
        Commands::Summary(args) => summary::run(args, config_path),
        Commands::Delete(args) => delete::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
