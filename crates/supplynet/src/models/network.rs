//! Supply network arena.
//!
//! The network is a layered directed graph where:
//! - Nodes = business group, families, offerings, modules, parts
//! - Edges = supply relationships between adjacent tiers
//!
//! Nodes are stored contiguously in tier order, so every tier is a slice of
//! the arena. Adjacency lists are kept in both directions for traversal.

use super::{FlowDirection, Node, NodeIndex, SupplyEdge, Tier};
use crate::error::{Result, SupplyNetError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Degenerate condition found while sampling a tier transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    /// One side of a sampled transition had no nodes, so no edges were made.
    EmptyTier {
        /// Upstream tier of the transition.
        upstream: Tier,
        /// Downstream tier of the transition.
        downstream: Tier,
        /// The tier that was empty.
        empty: Tier,
    },
}

impl std::fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationWarning::EmptyTier {
                upstream,
                downstream,
                empty,
            } => write!(
                f,
                "{} tier is empty; no {} -> {} edges were generated",
                empty, upstream, downstream
            ),
        }
    }
}

/// Statistics about the supply network.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkStatistics {
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
    /// Nodes per tier, indexed by tier level
    pub tier_counts: [usize; 5],
    /// Summed demand per tier, indexed by tier level
    pub tier_demand: [u64; 5],
    /// Average out-degree over non-leaf nodes
    pub avg_out_degree: f64,
    /// Maximum out-degree
    pub max_out_degree: usize,
    /// Edges / possible tier-adjacent pairs
    pub density: f64,
    /// Modules nothing feeds into
    pub orphan_modules: usize,
    /// Parts nothing feeds into
    pub orphan_parts: usize,
    /// Number of recorded generation warnings
    pub warning_count: usize,
}

impl NetworkStatistics {
    /// Node count of a tier.
    pub fn count(&self, tier: Tier) -> usize {
        self.tier_counts[tier.level()]
    }

    /// Total demand of a tier.
    pub fn demand(&self, tier: Tier) -> u64 {
        self.tier_demand[tier.level()]
    }
}

/// The complete supply network graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SupplyNetwork {
    /// Nodes in tier order
    nodes: Vec<Node>,
    /// Edges in insertion order
    edges: Vec<SupplyEdge>,
    /// Degenerate conditions recorded during generation
    warnings: Vec<GenerationWarning>,

    /// Nodes per tier, indexed by tier level
    #[serde(skip)]
    tier_counts: [usize; 5],
    /// Node id to arena position
    #[serde(skip)]
    index: HashMap<String, NodeIndex>,
    /// For each node, list of (target, edge_index)
    #[serde(skip)]
    adjacency_out: Vec<Vec<(NodeIndex, usize)>>,
    /// For each node, list of (source, edge_index)
    #[serde(skip)]
    adjacency_in: Vec<Vec<(NodeIndex, usize)>>,
}

impl SupplyNetwork {
    /// Create a new empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            index: HashMap::with_capacity(nodes),
            adjacency_out: Vec::with_capacity(nodes),
            adjacency_in: Vec::with_capacity(nodes),
            ..Default::default()
        }
    }

    /// Add a node to the network.
    ///
    /// Nodes must arrive in tier order and ids must be unique.
    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex> {
        let tier = node.tier();
        if let Some(last) = self.nodes.last() {
            if last.tier() > tier {
                return Err(SupplyNetError::config(format!(
                    "node {} ({}) added after {} nodes",
                    node.id(),
                    tier,
                    last.tier()
                )));
            }
        }
        if self.index.contains_key(node.id()) {
            return Err(SupplyNetError::config(format!(
                "duplicate node id {}",
                node.id()
            )));
        }

        let index = NodeIndex::from(self.nodes.len());
        self.index.insert(node.id().to_string(), index);
        self.tier_counts[tier.level()] += 1;
        self.adjacency_out.push(Vec::new());
        self.adjacency_in.push(Vec::new());
        self.nodes.push(node);
        Ok(index)
    }

    /// Add an edge and push demand into its target.
    ///
    /// The target's derived demand grows by the source's demand at insertion
    /// time times the edge quantity, so an upstream tier must be fully
    /// connected before its outbound edges are added.
    pub fn add_edge(&mut self, edge: SupplyEdge) -> Result<usize> {
        let (source, target) = (edge.source.get(), edge.target.get());
        let (source_tier, target_tier) = match (self.nodes.get(source), self.nodes.get(target)) {
            (Some(s), Some(t)) => (s.tier(), t.tier()),
            _ => {
                return Err(SupplyNetError::config(format!(
                    "edge {} -> {} references a missing node",
                    source, target
                )))
            }
        };
        if !source_tier.feeds(target_tier) {
            return Err(SupplyNetError::config(format!(
                "edge {} -> {} connects {} to {}",
                self.nodes[source].id(),
                self.nodes[target].id(),
                source_tier,
                target_tier
            )));
        }
        if self.adjacency_out[source]
            .iter()
            .any(|&(t, _)| t == edge.target)
        {
            return Err(SupplyNetError::config(format!(
                "duplicate edge {} -> {}",
                self.nodes[source].id(),
                self.nodes[target].id()
            )));
        }

        let source_demand = self.nodes[source].demand().unwrap_or(0);
        self.nodes[target].accumulate_demand(edge.propagated_demand(source_demand));

        let edge_index = self.edges.len();
        self.adjacency_out[source].push((edge.target, edge_index));
        self.adjacency_in[target].push((edge.source, edge_index));
        self.edges.push(edge);
        Ok(edge_index)
    }

    /// Record a degenerate generation condition.
    pub fn push_warning(&mut self, warning: GenerationWarning) {
        self.warnings.push(warning);
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in tier order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[SupplyEdge] {
        &self.edges
    }

    /// Recorded generation warnings.
    pub fn warnings(&self) -> &[GenerationWarning] {
        &self.warnings
    }

    /// Get node by arena position.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.get())
    }

    /// Find a node position by id.
    pub fn index_of(&self, id: &str) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| SupplyNetError::NotFound(id.to_string()))
    }

    /// Find a node by id.
    pub fn node_by_id(&self, id: &str) -> Result<&Node> {
        let index = self.index_of(id)?;
        Ok(&self.nodes[index.get()])
    }

    /// Check whether a node id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Arena positions occupied by a tier.
    pub fn tier_range(&self, tier: Tier) -> Range<usize> {
        let start: usize = self.tier_counts[..tier.level()].iter().sum();
        start..start + self.tier_counts[tier.level()]
    }

    /// Nodes of a tier.
    pub fn nodes_in_tier(&self, tier: Tier) -> &[Node] {
        &self.nodes[self.tier_range(tier)]
    }

    /// Arena positions of a tier's nodes.
    pub fn indices_in_tier(&self, tier: Tier) -> impl Iterator<Item = NodeIndex> {
        self.tier_range(tier).map(NodeIndex::from)
    }

    /// Edges leaving a node.
    pub fn edges_from(&self, index: NodeIndex) -> impl Iterator<Item = &SupplyEdge> + '_ {
        self.adjacency_out
            .get(index.get())
            .into_iter()
            .flatten()
            .map(move |&(_, e)| &self.edges[e])
    }

    /// Edges entering a node.
    pub fn edges_into(&self, index: NodeIndex) -> impl Iterator<Item = &SupplyEdge> + '_ {
        self.adjacency_in
            .get(index.get())
            .into_iter()
            .flatten()
            .map(move |&(_, e)| &self.edges[e])
    }

    /// Number of edges leaving a node.
    pub fn out_degree(&self, index: NodeIndex) -> usize {
        self.adjacency_out.get(index.get()).map_or(0, Vec::len)
    }

    /// Number of edges entering a node.
    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.adjacency_in.get(index.get()).map_or(0, Vec::len)
    }

    /// Get neighbors of a node.
    pub fn neighbors(&self, index: NodeIndex, direction: FlowDirection) -> Vec<NodeIndex> {
        let idx = index.get();
        if idx >= self.nodes.len() {
            return Vec::new();
        }

        match direction {
            FlowDirection::Downstream => self.adjacency_out[idx].iter().map(|&(t, _)| t).collect(),
            FlowDirection::Upstream => self.adjacency_in[idx].iter().map(|&(s, _)| s).collect(),
            FlowDirection::Both => {
                let mut result = self.neighbors(index, FlowDirection::Upstream);
                result.extend(self.neighbors(index, FlowDirection::Downstream));
                result
            }
        }
    }

    /// Distribution of node degrees: degree -> number of nodes.
    pub fn degree_histogram(&self, direction: FlowDirection) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for i in 0..self.nodes.len() {
            let index = NodeIndex::from(i);
            let degree = match direction {
                FlowDirection::Downstream => self.out_degree(index),
                FlowDirection::Upstream => self.in_degree(index),
                FlowDirection::Both => self.out_degree(index) + self.in_degree(index),
            };
            *histogram.entry(degree).or_insert(0) += 1;
        }
        histogram
    }

    /// Compute network statistics.
    pub fn statistics(&self) -> NetworkStatistics {
        let mut tier_demand = [0u64; 5];
        for node in &self.nodes {
            let slot = &mut tier_demand[node.tier().level()];
            *slot = slot.saturating_add(node.demand().unwrap_or(0));
        }

        let non_leaf = self.nodes.len() - self.tier_counts[Tier::Part.level()];
        let avg_out_degree = if non_leaf > 0 {
            self.edges.len() as f64 / non_leaf as f64
        } else {
            0.0
        };

        let max_out_degree = self.adjacency_out.iter().map(Vec::len).max().unwrap_or(0);

        // Density over the only pairs the layering allows
        let possible: usize = self
            .tier_counts
            .windows(2)
            .map(|pair| pair[0] * pair[1])
            .sum();
        let density = if possible > 0 {
            self.edges.len() as f64 / possible as f64
        } else {
            0.0
        };

        let orphans = |tier: Tier| {
            self.indices_in_tier(tier)
                .filter(|&i| self.in_degree(i) == 0)
                .count()
        };

        NetworkStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            tier_counts: self.tier_counts,
            tier_demand,
            avg_out_degree,
            max_out_degree,
            density,
            orphan_modules: orphans(Tier::Module),
            orphan_parts: orphans(Tier::Part),
            warning_count: self.warnings.len(),
        }
    }
}
