//! CLI entry point for airnote.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use airnote_client::{DEFAULT_PHOTO_BUCKET, MeasurementStore, RestStore};

mod commands;
mod config;
mod format;

use config::Config;

#[derive(Parser)]
#[command(name = "airnote")]
#[command(author, version, about = "CLI for the airnote air-quality journal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recorded measurements
    List {
        /// Filter by location-name substring (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show a single measurement
    Show {
        /// Measurement identifier
        id: String,
    },

    /// Record a new measurement
    Add(commands::AddArgs),

    /// Edit an existing measurement
    Edit(commands::EditArgs),

    /// Delete a measurement and its photo
    Delete {
        /// Measurement identifier
        id: String,
    },

    /// Show summary statistics and the CO2 trend
    Dashboard,

    /// Extract sensor values from an OCR text file
    Ocr {
        /// Text file with the recognised display text
        file: PathBuf,
    },

    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Commands that need no backend connection
    match &cli.command {
        Commands::Ocr { file } => return commands::cmd_ocr(file),
        Commands::Config => return print_config(),
        _ => {}
    }

    let config = Config::load()?;
    let store = build_store(&config)?;

    match cli.command {
        Commands::List { search, format } => commands::cmd_list(store, search, &format).await,
        Commands::Show { id } => commands::cmd_show(store, &id).await,
        Commands::Add(args) => commands::cmd_add(store, args, cli.quiet).await,
        Commands::Edit(args) => commands::cmd_edit(store, args, cli.quiet).await,
        Commands::Delete { id } => commands::cmd_delete(store, &id, cli.quiet).await,
        Commands::Dashboard => commands::cmd_dashboard(store).await,
        Commands::Ocr { .. } | Commands::Config => unreachable!(),
    }
}

fn build_store(config: &Config) -> Result<Arc<dyn MeasurementStore>> {
    let base_url = config.resolved_base_url()?;
    let api_key = config.resolved_api_key()?;

    tracing::debug!(%base_url, "connecting to backend");
    let mut store = RestStore::new(&base_url, &api_key)?;
    if let Some(bucket) = &config.bucket {
        store = store.with_bucket(bucket.as_str());
    }
    Ok(Arc::new(store))
}

fn print_config() -> Result<()> {
    let config = Config::load()?;

    match Config::config_path() {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: <no config directory>"),
    }
    println!(
        "base_url: {}",
        config.base_url.as_deref().unwrap_or("<unset>")
    );
    println!(
        "api_key:  {}",
        if config.api_key.is_some() {
            "<set>"
        } else {
            "<unset>"
        }
    );
    println!(
        "bucket:   {}",
        config.bucket.as_deref().unwrap_or(DEFAULT_PHOTO_BUCKET)
    );
    Ok(())
}
