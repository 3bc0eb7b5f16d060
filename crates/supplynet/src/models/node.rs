//! Node records for each tier of the hierarchy.
//!
//! Every tier has its own fixed-field record. [`Node`] tags them so the arena
//! and its collaborators can handle all tiers uniformly.

use super::Tier;
use serde::{Deserialize, Serialize};

/// Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessGroup {
    /// Node id (e.g., "BG_001")
    pub id: String,
    /// Display name
    pub name: String,
    /// Annual revenue
    pub revenue: f64,
}

/// Product family, child of the business group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFamily {
    /// Node id (e.g., "PF_001")
    pub id: String,
    /// Display name
    pub name: String,
    /// Annual revenue
    pub revenue: f64,
}

/// Product offering from the static catalog.
///
/// Offerings carry the seed demand that is propagated into modules and parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOffering {
    /// Node id (e.g., "PO_001")
    pub id: String,
    /// Display name
    pub name: String,
    /// Units on hand
    pub inventory: u32,
    /// Seed demand
    pub demand: u64,
    /// Cost to produce one unit
    pub production_cost: f64,
    /// Relative importance (0.0 - 1.0), drives fan-out
    pub importance_factor: f64,
}

/// Module assembled into product offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Node id (e.g., "M_001")
    pub id: String,
    /// Display name
    pub name: String,
    /// Units on hand
    pub inventory: u32,
    /// Relative importance (0.0 - 1.0), drives fan-out
    pub importance_factor: f64,
    /// Derived demand (sum of upstream demand × quantity)
    pub demand: u64,
    /// Unit cost
    pub cost: f64,
}

/// Part consumed by modules (leaf tier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Node id (e.g., "P_001")
    pub id: String,
    /// Display name
    pub name: String,
    /// Units on hand
    pub inventory: u32,
    /// Relative importance (0.0 - 1.0)
    pub importance_factor: f64,
    /// Derived demand (sum of upstream demand × quantity)
    pub demand: u64,
    /// Unit cost
    pub cost: f64,
}

/// A node of any tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum Node {
    /// Business group record.
    BusinessGroup(BusinessGroup),
    /// Product family record.
    ProductFamily(ProductFamily),
    /// Product offering record.
    ProductOffering(ProductOffering),
    /// Module record.
    Module(Module),
    /// Part record.
    Part(Part),
}

impl Node {
    /// Tier tag of this node.
    pub fn tier(&self) -> Tier {
        match self {
            Node::BusinessGroup(_) => Tier::BusinessGroup,
            Node::ProductFamily(_) => Tier::ProductFamily,
            Node::ProductOffering(_) => Tier::ProductOffering,
            Node::Module(_) => Tier::Module,
            Node::Part(_) => Tier::Part,
        }
    }

    /// Node id.
    pub fn id(&self) -> &str {
        match self {
            Node::BusinessGroup(n) => &n.id,
            Node::ProductFamily(n) => &n.id,
            Node::ProductOffering(n) => &n.id,
            Node::Module(n) => &n.id,
            Node::Part(n) => &n.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Node::BusinessGroup(n) => &n.name,
            Node::ProductFamily(n) => &n.name,
            Node::ProductOffering(n) => &n.name,
            Node::Module(n) => &n.name,
            Node::Part(n) => &n.name,
        }
    }

    /// Demand, for tiers that carry one.
    pub fn demand(&self) -> Option<u64> {
        match self {
            Node::ProductOffering(n) => Some(n.demand),
            Node::Module(n) => Some(n.demand),
            Node::Part(n) => Some(n.demand),
            Node::BusinessGroup(_) | Node::ProductFamily(_) => None,
        }
    }

    /// Inventory, for tiers that carry one.
    pub fn inventory(&self) -> Option<u32> {
        match self {
            Node::ProductOffering(n) => Some(n.inventory),
            Node::Module(n) => Some(n.inventory),
            Node::Part(n) => Some(n.inventory),
            Node::BusinessGroup(_) | Node::ProductFamily(_) => None,
        }
    }

    /// Importance factor, for tiers that carry one.
    pub fn importance_factor(&self) -> Option<f64> {
        match self {
            Node::ProductOffering(n) => Some(n.importance_factor),
            Node::Module(n) => Some(n.importance_factor),
            Node::Part(n) => Some(n.importance_factor),
            Node::BusinessGroup(_) | Node::ProductFamily(_) => None,
        }
    }

    /// The tier's monetary figure: revenue, production cost, or unit cost.
    pub fn cost(&self) -> f64 {
        match self {
            Node::BusinessGroup(n) => n.revenue,
            Node::ProductFamily(n) => n.revenue,
            Node::ProductOffering(n) => n.production_cost,
            Node::Module(n) => n.cost,
            Node::Part(n) => n.cost,
        }
    }

    /// Add to the derived demand of a module or part.
    ///
    /// Returns `false` (and changes nothing) for tiers whose demand is not
    /// derived.
    pub(crate) fn accumulate_demand(&mut self, amount: u64) -> bool {
        match self {
            Node::Module(n) => {
                n.demand = n.demand.saturating_add(amount);
                true
            }
            Node::Part(n) => {
                n.demand = n.demand.saturating_add(amount);
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.id(), self.name(), self.tier())
    }
}
