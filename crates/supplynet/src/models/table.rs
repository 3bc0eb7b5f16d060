//! Flat tabular views of a network.
//!
//! Each tier becomes a uniform list of records with a stable column set, the
//! shape tabular exporters and data frame loaders expect.

use super::{Node, SupplyEdge, SupplyNetwork, Tier};
use serde::Serialize;

/// Columns of the business group and product family tables.
pub const REVENUE_COLUMNS: &[&str] = &["id", "name", "revenue"];

/// Columns of the product offering table.
pub const OFFERING_COLUMNS: &[&str] = &[
    "id",
    "name",
    "inventory",
    "demand",
    "production_cost",
    "importance_factor",
];

/// Columns of the module and part tables.
pub const COMPONENT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "inventory",
    "importance_factor",
    "demand",
    "cost",
];

/// Columns of the edge table.
pub const EDGE_COLUMNS: &[&str] = &[
    "source_id",
    "target_id",
    "quantity",
    "transportation_cost",
    "transportation_time",
];

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text cell
    Text(String),
    /// Integer cell
    Integer(u64),
    /// Floating-point cell
    Float(f64),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// A uniform table of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierTable {
    /// Tier the rows belong to; `None` for the edge table
    pub tier: Option<Tier>,
    /// Column names, in order
    pub columns: &'static [&'static str],
    /// One value per column for every row
    pub rows: Vec<Vec<FieldValue>>,
}

impl TierTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let col = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate rows as (column, value) pairs.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&'static str, &FieldValue)>> + '_ {
        self.rows
            .iter()
            .map(move |row| self.columns.iter().copied().zip(row.iter()).collect())
    }
}

impl Tier {
    /// Stable column set of this tier's table.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Tier::BusinessGroup | Tier::ProductFamily => REVENUE_COLUMNS,
            Tier::ProductOffering => OFFERING_COLUMNS,
            Tier::Module | Tier::Part => COMPONENT_COLUMNS,
        }
    }
}

impl Node {
    /// Flatten the node into a row matching [`Tier::columns`].
    pub fn record(&self) -> Vec<FieldValue> {
        use FieldValue::{Float, Integer, Text};

        match self {
            Node::BusinessGroup(n) => {
                vec![Text(n.id.clone()), Text(n.name.clone()), Float(n.revenue)]
            }
            Node::ProductFamily(n) => {
                vec![Text(n.id.clone()), Text(n.name.clone()), Float(n.revenue)]
            }
            Node::ProductOffering(n) => vec![
                Text(n.id.clone()),
                Text(n.name.clone()),
                Integer(n.inventory as u64),
                Integer(n.demand),
                Float(n.production_cost),
                Float(n.importance_factor),
            ],
            Node::Module(n) => vec![
                Text(n.id.clone()),
                Text(n.name.clone()),
                Integer(n.inventory as u64),
                Float(n.importance_factor),
                Integer(n.demand),
                Float(n.cost),
            ],
            Node::Part(n) => vec![
                Text(n.id.clone()),
                Text(n.name.clone()),
                Integer(n.inventory as u64),
                Float(n.importance_factor),
                Integer(n.demand),
                Float(n.cost),
            ],
        }
    }
}

/// Build a node table from any slice of same-tier nodes.
pub(crate) fn table_for(tier: Tier, nodes: &[Node]) -> TierTable {
    TierTable {
        tier: Some(tier),
        columns: tier.columns(),
        rows: nodes
            .iter()
            .filter(|n| n.tier() == tier)
            .map(Node::record)
            .collect(),
    }
}

/// Build an edge table, resolving endpoints to ids through `nodes`.
pub(crate) fn edge_table_for(nodes: &[Node], edges: &[SupplyEdge]) -> TierTable {
    TierTable {
        tier: None,
        columns: EDGE_COLUMNS,
        rows: edges
            .iter()
            .map(|e| {
                vec![
                    FieldValue::Text(nodes[e.source.get()].id().to_string()),
                    FieldValue::Text(nodes[e.target.get()].id().to_string()),
                    FieldValue::Integer(e.quantity as u64),
                    FieldValue::Float(e.transportation_cost),
                    FieldValue::Float(e.transportation_time),
                ]
            })
            .collect(),
    }
}

impl SupplyNetwork {
    /// Table of one tier's nodes.
    pub fn tier_table(&self, tier: Tier) -> TierTable {
        table_for(tier, self.nodes_in_tier(tier))
    }

    /// Table of all edges, endpoints given by node id.
    pub fn edge_table(&self) -> TierTable {
        edge_table_for(self.nodes(), self.edges())
    }
}
