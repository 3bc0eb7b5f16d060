//! Supply edges between adjacent tiers.

use super::NodeIndex;
use serde::{Deserialize, Serialize};

/// A directed supply relationship from an upstream node to the node it
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyEdge {
    /// Upstream node (consumer)
    pub source: NodeIndex,
    /// Downstream node (supplied component)
    pub target: NodeIndex,
    /// Units of target per unit of source (≥ 1)
    pub quantity: u32,
    /// Cost of moving the shipment
    pub transportation_cost: f64,
    /// Lead time in days
    pub transportation_time: f64,
}

impl SupplyEdge {
    /// Create a structural edge (quantity 1, no transport cost or time).
    ///
    /// Used for business group → family and family → offering links.
    pub fn structural(source: NodeIndex, target: NodeIndex) -> Self {
        Self {
            source,
            target,
            quantity: 1,
            transportation_cost: 0.0,
            transportation_time: 0.0,
        }
    }

    /// Create a sampled supply edge.
    pub fn new(
        source: NodeIndex,
        target: NodeIndex,
        quantity: u32,
        transportation_cost: f64,
        transportation_time: f64,
    ) -> Self {
        Self {
            source,
            target,
            quantity,
            transportation_cost,
            transportation_time,
        }
    }

    /// Demand this edge pushes into its target for a given source demand.
    pub fn propagated_demand(&self, source_demand: u64) -> u64 {
        source_demand.saturating_mul(self.quantity as u64)
    }
}
