//! `supplynet series` command - Generate perturbed snapshots over a date grid.

use std::io::{self, Write};

use chrono::{Duration, NaiveDate};
use colored::Colorize;
use supplynet::models::{Tier, TimeSeries};

use crate::error::{CliError, CliResult};
use crate::settings::GenerationArgs;

/// Execute the `series` command.
pub fn execute(
    args: &GenerationArgs,
    start: NaiveDate,
    end: NaiveDate,
    interval_days: i64,
    json: bool,
) -> CliResult<()> {
    if interval_days < 1 {
        return Err(CliError::InvalidArgument(format!(
            "--interval-days must be at least 1, got {}",
            interval_days
        )));
    }

    let interval = Duration::try_days(interval_days).ok_or_else(|| {
        CliError::InvalidArgument(format!("--interval-days {} is out of range", interval_days))
    })?;

    let config = args.resolve()?;
    let series = supplynet::generate_time_series(&config, start, end, interval)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &series)?;
        writeln!(out)?;
    } else {
        write_series(&mut out, &series)?;
    }
    Ok(())
}

/// Write one line of totals per snapshot.
pub fn write_series<W: Write>(out: &mut W, series: &TimeSeries) -> io::Result<()> {
    writeln!(
        out,
        "{} {} snapshot(s) of {} nodes",
        "→".bright_cyan(),
        series.len().to_string().bright_white(),
        series.network.node_count().to_string().bright_white()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {:<10} {:>12} {:>12} {:>12} {:>10} {:>14}",
        "date", "offerings", "modules", "parts", "inventory", "transport"
    )?;

    for snapshot in series.iter() {
        writeln!(
            out,
            "  {:<10} {:>12} {:>12} {:>12} {:>10} {:>14.2}",
            snapshot.timestamp,
            snapshot.tier_demand(Tier::ProductOffering),
            snapshot.tier_demand(Tier::Module),
            snapshot.tier_demand(Tier::Part),
            snapshot.total_inventory(),
            snapshot.total_transportation_cost()
        )?;
    }

    Ok(())
}
