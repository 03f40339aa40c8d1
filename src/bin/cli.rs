//! Ballotbox admin CLI
//!
//! Command-line tool for inspecting and managing the persisted election
//! state:
//!   ballotbox-cli status       - Show the loaded election and its tallies
//!   ballotbox-cli results      - Print chart-ready results as JSON
//!   ballotbox-cli reset        - Erase all persisted election state
//!   ballotbox-cli init-config  - Print a default configuration file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ballotbox::config::{generate_default_config, Config};
use ballotbox::results::election_results;
use ballotbox::store::{FileBackend, VoteStore};

/// Ballotbox administration tool
#[derive(Parser)]
#[command(name = "ballotbox-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and manage persisted voting-kiosk state", long_about = None)]
struct Cli {
    /// Data directory (overrides config and BALLOTBOX_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the loaded election and its tallies
    Status,
    /// Print chart-ready results as JSON
    Results,
    /// Erase all persisted election state
    Reset,
    /// Print a default configuration file
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::InitConfig = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| Config::load_default().storage.data_dir());
    let backend = FileBackend::open(&data_dir)
        .with_context(|| format!("opening data directory {:?}", data_dir))?;
    let store = VoteStore::open(backend);

    match cli.command {
        Commands::Status => status(&store),
        Commands::Results => print_results(&store)?,
        Commands::Reset => {
            store.reset();
            println!("Election state cleared.");
        }
        Commands::InitConfig => unreachable!("handled above"),
    }

    Ok(())
}

fn status(store: &VoteStore) {
    match store.current_config() {
        None => println!("No election configured."),
        Some(config) => {
            println!("Election: {}", config.title);
            if !config.description.is_empty() {
                println!("  {}", config.description);
            }
            for item in &config.voting_items {
                let total: u64 = item.options.iter().map(|o| o.count).sum();
                println!("\n  {} ({} votes)", item.question, total);
                for option in &item.options {
                    println!("    {:>6}  {}", option.count, option.label);
                }
            }
        }
    }
}

fn print_results(store: &VoteStore) -> anyhow::Result<()> {
    match store.current_config() {
        None => println!("null"),
        Some(config) => {
            let results = election_results(&config);
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}
