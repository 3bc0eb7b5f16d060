//! Time-indexed snapshots of a supply network.
//!
//! A snapshot copies every node and edge of the static structure with
//! perturbed numeric attributes. The topology (ids, names, endpoints,
//! quantities) is shared with the static network and never changes.

use super::table::{edge_table_for, table_for};
use super::{Node, SupplyEdge, SupplyNetwork, Tier, TierTable};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Perturbed copy of the network at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    /// Grid timestamp
    pub timestamp: NaiveDate,
    /// Position on the grid (0-based)
    pub index: usize,
    /// Nodes, same order as the static network
    pub nodes: Vec<Node>,
    /// Edges, same order as the static network
    pub edges: Vec<SupplyEdge>,
}

impl NetworkSnapshot {
    /// Node ids in arena order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(Node::id)
    }

    /// Nodes of one tier.
    pub fn nodes_in_tier(&self, tier: Tier) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.tier() == tier)
    }

    /// Summed demand of one tier.
    pub fn tier_demand(&self, tier: Tier) -> u64 {
        self.nodes_in_tier(tier)
            .filter_map(Node::demand)
            .fold(0u64, u64::saturating_add)
    }

    /// Summed inventory across all nodes.
    pub fn total_inventory(&self) -> u64 {
        self.nodes
            .iter()
            .filter_map(Node::inventory)
            .map(u64::from)
            .sum()
    }

    /// Summed transportation cost across all edges.
    pub fn total_transportation_cost(&self) -> f64 {
        self.edges.iter().map(|e| e.transportation_cost).sum()
    }

    /// Table of one tier's perturbed nodes.
    pub fn tier_table(&self, tier: Tier) -> TierTable {
        table_for(tier, &self.nodes)
    }

    /// Table of all perturbed edges.
    pub fn edge_table(&self) -> TierTable {
        edge_table_for(&self.nodes, &self.edges)
    }
}

/// Static network plus its snapshots keyed by timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    /// Unperturbed structure the snapshots derive from
    pub network: SupplyNetwork,
    /// Snapshots in timestamp order
    pub snapshots: BTreeMap<NaiveDate, NetworkSnapshot>,
}

impl TimeSeries {
    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the series has no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at an exact grid timestamp.
    pub fn at(&self, timestamp: NaiveDate) -> Option<&NetworkSnapshot> {
        self.snapshots.get(&timestamp)
    }

    /// Grid timestamps in order.
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.snapshots.keys().copied()
    }

    /// Snapshots in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkSnapshot> {
        self.snapshots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeIndex, Part};

    fn part(id: &str, inventory: u32, demand: u64) -> Node {
        Node::Part(Part {
            id: id.into(),
            name: id.into(),
            inventory,
            importance_factor: 0.5,
            demand,
            cost: 10.0,
        })
    }

    #[test]
    fn test_snapshot_totals() {
        let snapshot = NetworkSnapshot {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            index: 1,
            nodes: vec![part("P_001", 10, 100), part("P_002", 5, 40)],
            edges: vec![SupplyEdge::new(NodeIndex(0), NodeIndex(1), 1, 12.5, 1.0)],
        };

        assert_eq!(snapshot.tier_demand(Tier::Part), 140);
        assert_eq!(snapshot.tier_demand(Tier::Module), 0);
        assert_eq!(snapshot.total_inventory(), 15);
        assert_eq!(snapshot.total_transportation_cost(), 12.5);
        assert_eq!(
            snapshot.node_ids().collect::<Vec<_>>(),
            vec!["P_001", "P_002"]
        );
        assert_eq!(snapshot.tier_table(Tier::Part).len(), 2);
    }
}
