//! # packs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use packing_api::config::LoggingConfig;
use packing_api::telemetry;
use packing_cli::calculate::{run_calculate, CalculateArgs};
use packing_cli::load_config;
use packing_cli::migrate::{run_migrate, MigrateArgs};

/// Pack optimization from the command line.
///
/// Fulfils an order with whole packs: fewest items shipped first, then
/// fewest packs.
#[derive(Parser, Debug)]
#[command(name = "packs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (defaults to $CONFIG_PATH, then config.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the packs for one order.
    Calculate(CalculateArgs),

    /// Apply catalog schema migrations to the configured database.
    Migrate(MigrateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let config = load_config(cli.config.as_deref());
    let logging = match &config {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    if let Err(e) = telemetry::init(&logging, Some(level)) {
        eprintln!("failed to initialize logging: {e}");
    }

    let result = config.and_then(|config| match &cli.command {
        Commands::Calculate(args) => run_calculate(args, &config),
        Commands::Migrate(args) => run_migrate(args, &config),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
