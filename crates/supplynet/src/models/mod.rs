//! Core data models for supply chain networks.
//!
//! A network is a strictly layered directed graph. Nodes live in an arena
//! ordered by tier and are addressed by [`NodeIndex`]; edges only ever connect
//! a tier to the tier directly below it.

mod edge;
mod network;
mod node;
mod table;
mod temporal;

pub use edge::*;
pub use network::*;
pub use node::*;
pub use table::*;
pub use temporal::*;

use serde::{Deserialize, Serialize};

/// Hierarchy level of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Tier {
    /// Root of the hierarchy (exactly one per network).
    BusinessGroup = 0,
    /// Product family, child of the business group.
    ProductFamily = 1,
    /// Product offering from the static catalog.
    ProductOffering = 2,
    /// Randomly generated module.
    Module = 3,
    /// Randomly generated part (leaf tier).
    Part = 4,
}

impl Tier {
    /// All tiers in hierarchy order.
    pub const ALL: [Tier; 5] = [
        Tier::BusinessGroup,
        Tier::ProductFamily,
        Tier::ProductOffering,
        Tier::Module,
        Tier::Part,
    ];

    /// Depth in the hierarchy (0 = business group).
    pub fn level(&self) -> usize {
        *self as usize
    }

    /// The tier directly below this one.
    pub fn next(&self) -> Option<Tier> {
        Tier::ALL.get(self.level() + 1).copied()
    }

    /// The tier directly above this one.
    pub fn previous(&self) -> Option<Tier> {
        self.level().checked_sub(1).map(|l| Tier::ALL[l])
    }

    /// Check if an edge from `self` to `other` respects the layering.
    pub fn feeds(&self, other: Tier) -> bool {
        self.next() == Some(other)
    }

    /// Prefix used when building node ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Tier::BusinessGroup => "BG",
            Tier::ProductFamily => "PF",
            Tier::ProductOffering => "PO",
            Tier::Module => "M",
            Tier::Part => "P",
        }
    }

    /// Build the id of the `ordinal`-th node (1-based) of this tier.
    pub fn node_id(&self, ordinal: usize) -> String {
        format!("{}_{:03}", self.id_prefix(), ordinal)
    }

    /// Snake-case label used in tables and JSON.
    pub fn label(&self) -> &'static str {
        match self {
            Tier::BusinessGroup => "business_group",
            Tier::ProductFamily => "product_family",
            Tier::ProductOffering => "product_offering",
            Tier::Module => "module",
            Tier::Part => "part",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::BusinessGroup => write!(f, "BusinessGroup"),
            Tier::ProductFamily => write!(f, "ProductFamily"),
            Tier::ProductOffering => write!(f, "ProductOffering"),
            Tier::Module => write!(f, "Module"),
            Tier::Part => write!(f, "Part"),
        }
    }
}

/// Position of a node in the network arena.
///
/// Using a newtype prevents mixing up arena positions with other integers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new node index.
    pub const fn new(index: u32) -> Self {
        NodeIndex(index)
    }

    /// Get the arena position.
    pub const fn get(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        NodeIndex(index as u32)
    }
}

impl From<NodeIndex> for usize {
    fn from(index: NodeIndex) -> Self {
        index.0 as usize
    }
}

/// Direction of traversal along supply edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlowDirection {
    /// Follow edges from source to target (towards parts).
    #[default]
    Downstream,
    /// Follow edges from target to source (towards the business group).
    Upstream,
    /// Ignore edge direction.
    Both,
}
