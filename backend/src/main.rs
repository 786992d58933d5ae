//! Railcat CLI - import JMRI rosters and CSV files into the collection catalog
//!
//! # Commands
//!
//! ```bash
//! railcat serve                                 # Start HTTP server (port 3000)
//! railcat import-roster BR_218.xml 252.xml      # Import JMRI roster files
//! railcat import-csv --kind locomotives a.csv   # Import a CSV file
//! railcat template rolling-stock                # Print a CSV template
//! railcat history                               # Show import history
//! ```
//!
//! Records go to `RAILCAT_DATA_DIR` (default `.railcat/data`) unless
//! `--memory` is given.

use clap::{Parser, Subcommand};
use railcat::api::types::{CsvImportResponse, HistoryResponse, RosterImportResponse};
use railcat::{
    csv_template, decode_upload, import_csv_batch, import_roster_batch, AppConfig, CsvTarget,
    JsonFileStore, MemoryStore, Store,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "railcat")]
#[command(about = "Import model-railway rosters and CSV files into a collection catalog", long_about = None)]
struct Cli {
    /// Data directory for the file store (overrides RAILCAT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides RAILCAT_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Import JMRI roster XML files, one locomotive each
    ImportRoster {
        /// Roster files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file for the report (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a CSV file of locomotives or rolling stock
    ImportCsv {
        /// Target collection: locomotives | rolling-stock
        #[arg(short, long, value_parser = parse_target)]
        kind: CsvTarget,

        /// Input CSV file
        input: PathBuf,

        /// Output file for the report (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the CSV template for a collection
    Template {
        /// locomotives | rolling-stock
        #[arg(value_parser = parse_target)]
        kind: CsvTarget,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show import history, newest first
    History {
        /// Maximum number of events
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
}

fn parse_target(s: &str) -> Result<CsvTarget, String> {
    CsvTarget::from_slug(s).ok_or_else(|| format!("unknown kind '{}' (locomotives | rolling-stock)", s))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_data_dir(cli.data_dir.clone());
    let store = open_store(&config, cli.memory);

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(config.with_port(port), store).await,

        Commands::ImportRoster { files, output } => {
            cmd_import_roster(store.as_ref(), &files, output.as_deref()).await
        }

        Commands::ImportCsv { kind, input, output } => {
            cmd_import_csv(store.as_ref(), kind, &input, output.as_deref()).await
        }

        Commands::Template { kind, output } => write_output(&csv_template(kind), output.as_deref()),

        Commands::History { limit } => cmd_history(store.as_ref(), limit).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn open_store(config: &AppConfig, memory: bool) -> Arc<dyn Store> {
    if memory {
        eprintln!("🧠 Using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        eprintln!("💾 Data directory: {}", config.data_dir.display());
        Arc::new(JsonFileStore::with_dir(&config.data_dir))
    }
}

async fn cmd_serve(config: AppConfig, store: Arc<dyn Store>) -> Result<(), Box<dyn std::error::Error>> {
    railcat::server::start_server(config, store).await
}

async fn cmd_import_roster(
    store: &dyn Store,
    files: &[PathBuf],
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        eprintln!("📄 Reading: {}", file.display());
        documents.push(decode_upload(&fs::read(file)?));
    }

    let report = import_roster_batch(store, &documents).await?;
    eprintln!("✅ {}", report.summary());

    let json = serde_json::to_string_pretty(&RosterImportResponse::from(report))?;
    write_output(&json, output)
}

async fn cmd_import_csv(
    store: &dyn Store,
    kind: CsvTarget,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());
    let content = decode_upload(&fs::read(input)?);

    let report = import_csv_batch(store, kind, &content).await?;
    eprintln!("✅ {}", report.summary());

    let json = serde_json::to_string_pretty(&CsvImportResponse::from(report))?;
    write_output(&json, output)
}

async fn cmd_history(store: &dyn Store, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let events = store.audit_history(limit).await?;
    let json = serde_json::to_string_pretty(&HistoryResponse::from(events))?;
    write_output(&json, None)
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
