//! `supplynet generate` command - Build one static network.

use std::io::{self, Write};

use colored::Colorize;
use supplynet::fabric::GeneratorConfig;
use supplynet::models::{SupplyNetwork, Tier};
use tracing::debug;

use crate::error::CliResult;
use crate::settings::GenerationArgs;

use super::{write_csv, TableArg};

/// Execute the `generate` command.
pub fn execute(args: &GenerationArgs, json: bool, table: Option<TableArg>) -> CliResult<()> {
    let config = args.resolve()?;
    let network = supplynet::generate(&config)?;
    debug!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "network ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &network, &config, json, table)
}

/// Write a network as a CSV table, JSON or a summary.
pub fn render<W: Write>(
    out: &mut W,
    network: &SupplyNetwork,
    config: &GeneratorConfig,
    json: bool,
    table: Option<TableArg>,
) -> CliResult<()> {
    match (table, json) {
        (Some(table), _) => {
            let table = match table.tier() {
                Some(tier) => network.tier_table(tier),
                None => network.edge_table(),
            };
            write_csv(out, &table)?;
        }
        (None, true) => {
            serde_json::to_writer_pretty(&mut *out, network)?;
            writeln!(out)?;
        }
        (None, false) => write_summary(out, network, config)?,
    }

    Ok(())
}

/// Write a human-readable summary of a network.
pub fn write_summary<W: Write>(
    out: &mut W,
    network: &SupplyNetwork,
    config: &GeneratorConfig,
) -> io::Result<()> {
    let stats = network.statistics();

    writeln!(out, "{} Generated supply network", "→".bright_cyan())?;
    writeln!(
        out,
        "  {} Policy: {}",
        "•".dimmed(),
        config.connection_policy.name().bright_yellow()
    )?;
    if let Some(seed) = config.seed {
        writeln!(out, "  {} Seed: {}", "•".dimmed(), seed.to_string().bright_yellow())?;
    }
    writeln!(
        out,
        "  {} Nodes: {}  Edges: {}",
        "•".dimmed(),
        stats.node_count.to_string().bright_white(),
        stats.edge_count.to_string().bright_white()
    )?;
    writeln!(out)?;

    writeln!(out, "  {:<18} {:>8} {:>12}", "Tier", "Nodes", "Demand")?;
    for tier in Tier::ALL {
        let demand = if tier.level() >= Tier::ProductOffering.level() {
            stats.demand(tier).to_string()
        } else {
            "-".to_string()
        };
        writeln!(
            out,
            "  {:<18} {:>8} {:>12}",
            tier.label(),
            stats.count(tier),
            demand
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "  Avg out-degree {:.2}, max {}, density {:.4}",
        stats.avg_out_degree, stats.max_out_degree, stats.density
    )?;
    if stats.orphan_modules > 0 || stats.orphan_parts > 0 {
        writeln!(
            out,
            "  {} {} module(s) and {} part(s) have no supplier edge",
            "⚠".yellow(),
            stats.orphan_modules,
            stats.orphan_parts
        )?;
    }

    for warning in network.warnings() {
        writeln!(out, "{} {}", "Warning:".yellow(), warning)?;
    }

    Ok(())
}
