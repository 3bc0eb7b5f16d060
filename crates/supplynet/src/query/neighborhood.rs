//! Bounded breadth-first neighborhoods.

use crate::error::Result;
use crate::models::{FlowDirection, NodeIndex, SupplyEdge, SupplyNetwork};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Nodes reachable from a root within a hop limit, with the edges between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgraph {
    /// Node the search started from
    pub root: NodeIndex,
    /// (node, hop distance) in discovery order, root first
    pub nodes: Vec<(NodeIndex, u32)>,
    /// Network edges whose endpoints are both in the subgraph
    pub edges: Vec<SupplyEdge>,
}

impl Subgraph {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the subgraph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a node is part of the subgraph.
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.nodes.iter().any(|&(n, _)| n == index)
    }

    /// Hop distance of a node from the root.
    pub fn distance(&self, index: NodeIndex) -> Option<u32> {
        self.nodes
            .iter()
            .find(|&&(n, _)| n == index)
            .map(|&(_, d)| d)
    }
}

/// Collect every node within `levels` hops of `id`.
///
/// Uses a queue-based BFS with O(V + E) complexity.
pub fn neighborhood(
    network: &SupplyNetwork,
    id: &str,
    levels: u32,
    direction: FlowDirection,
) -> Result<Subgraph> {
    let root = network.index_of(id)?;

    let mut distances: HashMap<NodeIndex, u32> = HashMap::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    distances.insert(root, 0);
    order.push((root, 0));
    queue.push_back(root);

    while let Some(node) = queue.pop_front() {
        let current = distances[&node];
        if current >= levels {
            continue;
        }

        for neighbor in network.neighbors(node, direction) {
            if !distances.contains_key(&neighbor) {
                distances.insert(neighbor, current + 1);
                order.push((neighbor, current + 1));
                queue.push_back(neighbor);
            }
        }
    }

    let edges = network
        .edges()
        .iter()
        .filter(|e| distances.contains_key(&e.source) && distances.contains_key(&e.target))
        .cloned()
        .collect();

    Ok(Subgraph {
        root,
        nodes: order,
        edges,
    })
}
