//! Tattoo Dashboard CLI - catalog maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the catalog indexes
//! tattoo-cli indexes
//!
//! # Insert product aggregates from a YAML file
//! tattoo-cli seed demos/seed.yaml
//!
//! # Print dashboard statistics
//! tattoo-cli stats
//! ```
//!
//! # Commands
//!
//! - `indexes` - Create `MongoDB` indexes
//! - `seed` - Insert products with variants, images and metadata
//! - `stats` - Print catalog statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tattoo-cli")]
#[command(author, version, about = "Tattoo dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create catalog indexes (idempotent)
    Indexes,
    /// Seed the catalog from a YAML file
    Seed {
        /// Path to the YAML file
        file: String,
    },
    /// Print catalog statistics
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Indexes => commands::indexes::create().await?,
        Commands::Seed { file } => commands::seed::products(&file).await?,
        Commands::Stats => commands::stats::print().await?,
    }
    Ok(())
}
