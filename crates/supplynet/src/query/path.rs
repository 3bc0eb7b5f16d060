//! Fewest-hop and cheapest routes between two nodes.

use crate::error::{Result, SupplyNetError};
use crate::models::{FlowDirection, NodeIndex, SupplyEdge, SupplyNetwork};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// A route through the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    /// Nodes from start to end, inclusive
    pub nodes: Vec<NodeIndex>,
    /// Summed transportation cost of the traversed edges
    pub transportation_cost: f64,
    /// Summed transportation time of the traversed edges
    pub transportation_time: f64,
}

impl Path {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    fn from_nodes(network: &SupplyNetwork, nodes: Vec<NodeIndex>) -> Self {
        let mut transportation_cost = 0.0;
        let mut transportation_time = 0.0;
        for pair in nodes.windows(2) {
            if let Some(edge) = edge_between(network, pair[0], pair[1]) {
                transportation_cost += edge.transportation_cost;
                transportation_time += edge.transportation_time;
            }
        }
        Self {
            nodes,
            transportation_cost,
            transportation_time,
        }
    }
}

/// The edge joining two nodes, in either orientation.
fn edge_between(network: &SupplyNetwork, a: NodeIndex, b: NodeIndex) -> Option<&SupplyEdge> {
    network
        .edges_from(a)
        .find(|e| e.target == b)
        .or_else(|| network.edges_from(b).find(|e| e.target == a))
}

/// Fewest-hop path following `direction`.
pub fn shortest_path(
    network: &SupplyNetwork,
    from: &str,
    to: &str,
    direction: FlowDirection,
) -> Result<Path> {
    let source = network.index_of(from)?;
    let target = network.index_of(to)?;

    let mut parents: Vec<Option<NodeIndex>> = vec![None; network.node_count()];
    let mut visited = vec![false; network.node_count()];
    let mut queue = VecDeque::new();

    visited[source.get()] = true;
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        if node == target {
            return Ok(Path::from_nodes(network, unwind(&parents, target)));
        }
        for neighbor in network.neighbors(node, direction) {
            if !visited[neighbor.get()] {
                visited[neighbor.get()] = true;
                parents[neighbor.get()] = Some(node);
                queue.push_back(neighbor);
            }
        }
    }

    Err(no_path(from, to))
}

/// Heap entry ordered so the cheapest cost pops first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Downstream path minimizing summed transportation cost (Dijkstra).
pub fn cheapest_path(network: &SupplyNetwork, from: &str, to: &str) -> Result<Path> {
    let source = network.index_of(from)?;
    let target = network.index_of(to)?;

    let mut best = vec![f64::INFINITY; network.node_count()];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; network.node_count()];
    let mut heap = BinaryHeap::new();

    best[source.get()] = 0.0;
    heap.push(Frontier {
        cost: 0.0,
        node: source,
    });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if node == target {
            let nodes = unwind(&parents, target);
            return Ok(Path::from_nodes(network, nodes));
        }
        if cost > best[node.get()] {
            continue;
        }

        for edge in network.edges_from(node) {
            let next = cost + edge.transportation_cost;
            if next < best[edge.target.get()] {
                best[edge.target.get()] = next;
                parents[edge.target.get()] = Some(node);
                heap.push(Frontier {
                    cost: next,
                    node: edge.target,
                });
            }
        }
    }

    Err(no_path(from, to))
}

fn unwind(parents: &[Option<NodeIndex>], target: NodeIndex) -> Vec<NodeIndex> {
    let mut nodes = vec![target];
    let mut current = target;
    while let Some(parent) = parents[current.get()] {
        nodes.push(parent);
        current = parent;
    }
    nodes.reverse();
    nodes
}

fn no_path(from: &str, to: &str) -> SupplyNetError {
    SupplyNetError::NoPath {
        from: from.to_string(),
        to: to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::diamond;

    fn ids(network: &SupplyNetwork, path: &Path) -> Vec<String> {
        path.nodes
            .iter()
            .map(|&n| network.node(n).unwrap().id().to_string())
            .collect()
    }

    #[test]
    fn test_shortest_path_downstream() {
        let network = diamond();
        let path = shortest_path(&network, "BG_001", "P_002", FlowDirection::Downstream).unwrap();

        assert_eq!(ids(&network, &path), ["BG_001", "PF_001", "PO_001", "M_002", "P_002"]);
        assert_eq!(path.hops(), 4);
        assert_eq!(path.transportation_cost, 11.0);
    }

    #[test]
    fn test_shortest_path_upstream() {
        let network = diamond();
        let path = shortest_path(&network, "P_001", "PO_002", FlowDirection::Upstream).unwrap();
        assert_eq!(ids(&network, &path), ["P_001", "M_002", "PO_002"]);

        let err =
            shortest_path(&network, "P_001", "PO_001", FlowDirection::Downstream).unwrap_err();
        assert_eq!(
            err,
            SupplyNetError::NoPath {
                from: "P_001".into(),
                to: "PO_001".into()
            }
        );
    }

    #[test]
    fn test_shortest_path_to_self() {
        let network = diamond();
        let path = shortest_path(&network, "M_001", "M_001", FlowDirection::Both).unwrap();
        assert_eq!(path.hops(), 0);
        assert_eq!(path.transportation_cost, 0.0);
    }

    #[test]
    fn test_cheapest_path() {
        let network = diamond();

        // Fewest hops picks the M_001 branch, cheapest picks M_002 (10 + 50 < 100 + 10)
        let hops = shortest_path(&network, "PO_001", "P_001", FlowDirection::Downstream).unwrap();
        assert_eq!(ids(&network, &hops), ["PO_001", "M_001", "P_001"]);
        assert_eq!(hops.transportation_cost, 110.0);

        let cheap = cheapest_path(&network, "PO_001", "P_001").unwrap();
        assert_eq!(ids(&network, &cheap), ["PO_001", "M_002", "P_001"]);
        assert_eq!(cheap.transportation_cost, 60.0);
        assert_eq!(cheap.transportation_time, 4.0);
    }

    #[test]
    fn test_cheapest_path_errors() {
        let network = diamond();
        assert!(cheapest_path(&network, "P_002", "PO_001").is_err());
        assert!(cheapest_path(&network, "PO_404", "P_001").unwrap_err().is_not_found());
    }
}
