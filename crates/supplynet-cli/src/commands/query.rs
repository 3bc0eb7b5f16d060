//! `supplynet query` command - Inspect a generated network.

use std::io::{self, Write};

use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use supplynet::models::{FlowDirection, SupplyNetwork};
use supplynet::query::{self, BomLine, Path, Subgraph};

use crate::error::CliResult;
use crate::settings::GenerationArgs;

/// Traversal direction selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Towards parts
    Downstream,
    /// Towards the business group
    Upstream,
    /// Ignore edge direction
    Both,
}

impl From<DirectionArg> for FlowDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Downstream => FlowDirection::Downstream,
            DirectionArg::Upstream => FlowDirection::Upstream,
            DirectionArg::Both => FlowDirection::Both,
        }
    }
}

/// Query subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum QueryCommand {
    /// Nodes within a number of hops of a node
    Neighborhood {
        /// Node id (e.g. PO_001)
        id: String,

        /// Maximum hop distance
        #[arg(short, long, default_value_t = 1)]
        levels: u32,

        /// Edge direction to follow
        #[arg(short, long, value_enum, default_value_t = DirectionArg::Both)]
        direction: DirectionArg,
    },

    /// Route between two nodes
    Path {
        /// Start node id
        from: String,

        /// End node id
        to: String,

        /// Minimize transportation cost instead of hop count (downstream only)
        #[arg(long)]
        cheapest: bool,

        /// Edge direction to follow for fewest-hop routes
        #[arg(short, long, value_enum, default_value_t = DirectionArg::Downstream)]
        direction: DirectionArg,
    },

    /// Bill-of-materials explosion of a node
    Explode {
        /// Node id
        id: String,
    },
}

/// Execute the `query` command.
pub fn execute(args: &GenerationArgs, command: &QueryCommand, json: bool) -> CliResult<()> {
    let config = args.resolve()?;
    let network = supplynet::generate(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&mut out, &network, command, json)
}

/// Run a query against a network and write the result.
pub fn run<W: Write>(
    out: &mut W,
    network: &SupplyNetwork,
    command: &QueryCommand,
    json: bool,
) -> CliResult<()> {
    match command {
        QueryCommand::Neighborhood {
            id,
            levels,
            direction,
        } => {
            let sub = query::neighborhood(network, id, *levels, (*direction).into())?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &sub)?;
                writeln!(out)?;
            } else {
                write_neighborhood(out, network, &sub)?;
            }
        }
        QueryCommand::Path {
            from,
            to,
            cheapest,
            direction,
        } => {
            let path = if *cheapest {
                query::cheapest_path(network, from, to)?
            } else {
                query::shortest_path(network, from, to, (*direction).into())?
            };
            if json {
                serde_json::to_writer_pretty(&mut *out, &path)?;
                writeln!(out)?;
            } else {
                write_path(out, network, &path)?;
            }
        }
        QueryCommand::Explode { id } => {
            let bom = query::explode(network, id)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &bom)?;
                writeln!(out)?;
            } else {
                write_bom(out, network, id, &bom)?;
            }
        }
    }
    Ok(())
}

fn write_neighborhood<W: Write>(
    out: &mut W,
    network: &SupplyNetwork,
    sub: &Subgraph,
) -> io::Result<()> {
    writeln!(
        out,
        "{} {} node(s), {} edge(s)",
        "→".bright_cyan(),
        sub.len().to_string().bright_white(),
        sub.edges.len().to_string().bright_white()
    )?;
    for &(index, distance) in &sub.nodes {
        if let Some(node) = network.node(index) {
            writeln!(out, "  {:>3}  {}", distance, node)?;
        }
    }
    Ok(())
}

fn write_path<W: Write>(out: &mut W, network: &SupplyNetwork, path: &Path) -> io::Result<()> {
    let ids: Vec<&str> = path
        .nodes
        .iter()
        .filter_map(|&n| network.node(n).map(|node| node.id()))
        .collect();

    writeln!(out, "{} {}", "→".bright_cyan(), ids.join(" → "))?;
    writeln!(
        out,
        "  {} {} hop(s), transportation cost {:.2}, time {:.1} days",
        "•".dimmed(),
        path.hops(),
        path.transportation_cost,
        path.transportation_time
    )?;
    Ok(())
}

fn write_bom<W: Write>(
    out: &mut W,
    network: &SupplyNetwork,
    root: &str,
    bom: &[BomLine],
) -> io::Result<()> {
    writeln!(
        out,
        "{} Bill of materials for {} ({} line(s))",
        "→".bright_cyan(),
        root.bright_white(),
        bom.len()
    )?;
    for line in bom {
        if let Some(node) = network.node(line.node) {
            writeln!(out, "  {:>10} × {}", line.quantity, node)?;
        }
    }
    Ok(())
}
