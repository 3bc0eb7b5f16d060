//! CLI command implementations.

pub mod generate;
pub mod query;
pub mod series;

use std::io::{self, Write};

use clap::ValueEnum;
use supplynet::models::{FieldValue, Tier, TierTable};

/// Tier selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    /// Business group table
    BusinessGroup,
    /// Product family table
    ProductFamily,
    /// Product offering table
    ProductOffering,
    /// Module table
    Module,
    /// Part table
    Part,
    /// Edge table
    Edges,
}

impl TableArg {
    /// Tier of a node table, `None` for edges.
    pub fn tier(self) -> Option<Tier> {
        match self {
            TableArg::BusinessGroup => Some(Tier::BusinessGroup),
            TableArg::ProductFamily => Some(Tier::ProductFamily),
            TableArg::ProductOffering => Some(Tier::ProductOffering),
            TableArg::Module => Some(Tier::Module),
            TableArg::Part => Some(Tier::Part),
            TableArg::Edges => None,
        }
    }
}

/// Write a table as CSV with a header row.
pub fn write_csv<W: Write>(out: &mut W, table: &TierTable) -> io::Result<()> {
    writeln!(out, "{}", table.columns.join(","))?;
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(csv_cell).collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    Ok(())
}

fn csv_cell(value: &FieldValue) -> String {
    let text = value.to_string();
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplynet::prelude::*;

    #[test]
    fn test_csv_cell_quoting() {
        assert_eq!(csv_cell(&FieldValue::Text("Kyo® C Series".into())), "Kyo® C Series");
        assert_eq!(csv_cell(&FieldValue::Text("a,b".into())), "\"a,b\"");
        assert_eq!(csv_cell(&FieldValue::Text("say \"hi\"".into())), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_cell(&FieldValue::Integer(42)), "42");
    }

    #[test]
    fn test_write_csv() {
        let network = supplynet::generate(&GeneratorConfig::default().with_seed(1)).unwrap();
        let mut out = Vec::new();
        write_csv(&mut out, &network.tier_table(Tier::ProductFamily)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "id,name,revenue");
        assert!(lines[1].starts_with("PF_001,Kyo,"));
    }

    #[test]
    fn test_table_arg_tiers() {
        assert_eq!(TableArg::Module.tier(), Some(Tier::Module));
        assert_eq!(TableArg::Edges.tier(), None);
    }
}
