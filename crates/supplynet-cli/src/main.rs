//! SupplyNet CLI - Generate, snapshot and query synthetic supply chain networks.
//!
//! # Commands
//!
//! - `supplynet generate` - Build one network and print a summary, JSON or a table
//! - `supplynet series` - Generate perturbed snapshots over a date grid
//! - `supplynet query` - Neighborhoods, routes and BOM explosions
//! - `supplynet completions <shell>` - Shell completions
//!
//! # Examples
//!
//! ```bash
//! # Reference network, reproducible
//! supplynet generate --nodes 126 --seed 42
//!
//! # Weekly snapshots for a year as JSON
//! supplynet series --start 2024-01-01 --end 2024-12-23 --interval-days 7 --json
//!
//! # Cheapest route from an offering to a part
//! supplynet query --seed 42 path PO_001 P_010 --cheapest
//!
//! # Settings from a file, overridden by the environment
//! SUPPLYNET__TOTAL_NODES=1026 supplynet generate --config supplynet.toml
//! ```

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod settings;

use commands::query::QueryCommand;
use commands::{generate, query, series, TableArg};
use settings::GenerationArgs;

/// SupplyNet CLI - Synthetic supply chain network generator
#[derive(Parser)]
#[command(name = "supplynet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a static supply network
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Print the network as JSON
        #[arg(long)]
        json: bool,

        /// Print one table as CSV instead of the summary
        #[arg(short, long, value_enum)]
        table: Option<TableArg>,
    },

    /// Generate perturbed snapshots on a regular date grid
    Series {
        #[command(flatten)]
        generation: GenerationArgs,

        /// First grid date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last possible grid date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Days between snapshots
        #[arg(short, long, default_value_t = 7)]
        interval_days: i64,

        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Query a generated network
    Query {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Print results as JSON
        #[arg(long, global = true)]
        json: bool,

        #[command(subcommand)]
        query: QueryCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Generate {
            generation,
            json,
            table,
        } => generate::execute(&generation, json, table),

        Commands::Series {
            generation,
            start,
            end,
            interval_days,
            json,
        } => series::execute(&generation, start, end, interval_days, json),

        Commands::Query {
            generation,
            json,
            query,
        } => query::execute(&generation, &query, json),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "supplynet",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
