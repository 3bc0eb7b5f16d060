//! Temporal variant generator.
//!
//! Produces perturbed copies of a static network on a regular date grid.
//! Ids, names, quantities and topology pass through unchanged; numeric
//! attributes get bounded noise plus a seasonal demand term.

use super::PerturbationConfig;
use crate::error::{Result, SupplyNetError};
use crate::models::{Node, NetworkSnapshot, SupplyEdge, SupplyNetwork};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::f64::consts::PI;

/// Dates `start`, `start + interval`, ... up to and including `end`.
///
/// The interval must be a positive whole number of days and `start` must not
/// be after `end`.
pub fn time_grid(start: NaiveDate, end: NaiveDate, interval: Duration) -> Result<Vec<NaiveDate>> {
    let days = interval.num_days();
    if days < 1 || interval != Duration::days(days) {
        return Err(SupplyNetError::config(format!(
            "snapshot interval must be a positive whole number of days, got {}",
            interval
        )));
    }
    if start > end {
        return Err(SupplyNetError::config(format!(
            "series start {} is after end {}",
            start, end
        )));
    }

    let mut grid = Vec::new();
    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= end) {
        grid.push(date);
        current = date.checked_add_signed(interval);
    }
    Ok(grid)
}

/// Seasonal demand multiplier `1 + A·sin(2π·index/total)`.
pub fn seasonal_factor(amplitude: f64, index: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    1.0 + amplitude * (2.0 * PI * index as f64 / total as f64).sin()
}

/// Applies [`PerturbationConfig`] rules to nodes and edges.
#[derive(Debug, Clone)]
pub struct Perturber<'a> {
    rules: &'a PerturbationConfig,
}

impl<'a> Perturber<'a> {
    /// Create a perturber over a set of rules.
    pub fn new(rules: &'a PerturbationConfig) -> Self {
        Self { rules }
    }

    /// Perturbed copy of the whole network at one grid point.
    pub fn snapshot<R: Rng + ?Sized>(
        &self,
        network: &SupplyNetwork,
        timestamp: NaiveDate,
        index: usize,
        total: usize,
        rng: &mut R,
    ) -> NetworkSnapshot {
        let seasonal = seasonal_factor(self.rules.seasonal_amplitude, index, total);
        let nodes = network
            .nodes()
            .iter()
            .map(|n| self.node(n, seasonal, rng))
            .collect();
        let edges = network
            .edges()
            .iter()
            .map(|e| self.edge(e, rng))
            .collect();

        NetworkSnapshot {
            timestamp,
            index,
            nodes,
            edges,
        }
    }

    /// Perturbed copy of one node.
    pub fn node<R: Rng + ?Sized>(&self, node: &Node, seasonal: f64, rng: &mut R) -> Node {
        let mut node = node.clone();
        match &mut node {
            Node::BusinessGroup(n) => n.revenue = self.cost(n.revenue, rng),
            Node::ProductFamily(n) => n.revenue = self.cost(n.revenue, rng),
            Node::ProductOffering(n) => {
                n.inventory = self.inventory(n.inventory, rng);
                n.demand = self.demand(n.demand, seasonal, rng);
                n.production_cost = self.cost(n.production_cost, rng);
                n.importance_factor = self.importance(n.importance_factor, rng);
            }
            Node::Module(n) => {
                n.inventory = self.inventory(n.inventory, rng);
                n.importance_factor = self.importance(n.importance_factor, rng);
                n.demand = self.demand(n.demand, seasonal, rng);
                n.cost = self.cost(n.cost, rng);
            }
            Node::Part(n) => {
                n.inventory = self.inventory(n.inventory, rng);
                n.importance_factor = self.importance(n.importance_factor, rng);
                n.demand = self.demand(n.demand, seasonal, rng);
                n.cost = self.cost(n.cost, rng);
            }
        }
        node
    }

    /// Perturbed copy of one edge.
    pub fn edge<R: Rng + ?Sized>(&self, edge: &SupplyEdge, rng: &mut R) -> SupplyEdge {
        SupplyEdge {
            transportation_cost: edge.transportation_cost * self.rules.transport_jitter.sample(rng),
            transportation_time: edge.transportation_time * self.rules.transport_jitter.sample(rng),
            ..edge.clone()
        }
    }

    fn inventory<R: Rng + ?Sized>(&self, value: u32, rng: &mut R) -> u32 {
        let d = self.rules.inventory_delta as i64;
        let delta = rng.gen_range(-d..=d);
        (value as i64 + delta).clamp(0, u32::MAX as i64) as u32
    }

    fn demand<R: Rng + ?Sized>(&self, value: u64, seasonal: f64, rng: &mut R) -> u64 {
        let jitter = self.rules.demand_jitter.sample(rng);
        (value as f64 * seasonal * jitter).max(0.0) as u64
    }

    fn cost<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) -> f64 {
        value * self.rules.cost_jitter.sample(rng)
    }

    fn importance<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) -> f64 {
        let noise = self.rules.importance_noise;
        (value + rng.gen_range(-noise..=noise)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::{build_structure, connect_tiers, GeneratorConfig};
    use crate::models::Tier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn network(seed: u64) -> SupplyNetwork {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut network = build_structure(&config, &mut rng).unwrap();
        connect_tiers(&mut network, &config, &mut rng).unwrap();
        network
    }

    #[test]
    fn test_time_grid_inclusive() {
        let grid = time_grid(date(2024, 1, 1), date(2024, 1, 15), Duration::days(7)).unwrap();
        assert_eq!(grid, vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]);

        let grid = time_grid(date(2024, 1, 1), date(2024, 1, 14), Duration::days(7)).unwrap();
        assert_eq!(grid.len(), 2);

        let grid = time_grid(date(2024, 3, 1), date(2024, 3, 1), Duration::days(1)).unwrap();
        assert_eq!(grid, vec![date(2024, 3, 1)]);
    }

    #[test]
    fn test_time_grid_weekly_year() {
        let start = date(2024, 1, 1);
        let end = start + Duration::weeks(51);
        let grid = time_grid(start, end, Duration::weeks(1)).unwrap();
        assert_eq!(grid.len(), 52);
    }

    #[test]
    fn test_time_grid_rejects_bad_input() {
        let start = date(2024, 1, 1);
        assert!(time_grid(start, date(2024, 2, 1), Duration::zero()).is_err());
        assert!(time_grid(start, date(2024, 2, 1), Duration::days(-7)).is_err());
        assert!(time_grid(start, date(2024, 2, 1), Duration::hours(12)).is_err());
        assert!(time_grid(date(2024, 2, 1), start, Duration::days(1)).is_err());
    }

    #[test]
    fn test_seasonal_factor() {
        assert_eq!(seasonal_factor(0.2, 0, 52), 1.0);
        assert!((seasonal_factor(0.2, 13, 52) - 1.2).abs() < 1e-12);
        assert!((seasonal_factor(0.2, 39, 52) - 0.8).abs() < 1e-12);
        assert_eq!(seasonal_factor(0.2, 3, 0), 1.0);
    }

    #[test]
    fn test_snapshot_preserves_structure() {
        let network = network(42);
        let rules = PerturbationConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let snapshot = Perturber::new(&rules).snapshot(&network, date(2024, 1, 1), 0, 52, &mut rng);

        assert_eq!(snapshot.nodes.len(), network.node_count());
        assert_eq!(snapshot.edges.len(), network.edge_count());
        for (before, after) in network.nodes().iter().zip(&snapshot.nodes) {
            assert_eq!(before.id(), after.id());
            assert_eq!(before.name(), after.name());
            assert_eq!(before.tier(), after.tier());
        }
        for (before, after) in network.edges().iter().zip(&snapshot.edges) {
            assert_eq!(before.source, after.source);
            assert_eq!(before.target, after.target);
            assert_eq!(before.quantity, after.quantity);
        }
    }

    #[test]
    fn test_perturbation_bounds() {
        let network = network(8);
        let rules = PerturbationConfig::default();
        let perturber = Perturber::new(&rules);
        let mut rng = StdRng::seed_from_u64(2);

        for index in 0..12 {
            let snapshot = perturber.snapshot(&network, date(2024, 1, 1), index, 12, &mut rng);
            let seasonal = seasonal_factor(rules.seasonal_amplitude, index, 12);

            for (before, after) in network.nodes().iter().zip(&snapshot.nodes) {
                if let (Some(b), Some(a)) = (before.inventory(), after.inventory()) {
                    assert!((a as i64 - b as i64).abs() <= 10);
                }
                let importance = (before.importance_factor(), after.importance_factor());
                if let (Some(b), Some(a)) = importance {
                    assert!((a - b).abs() <= 0.05 + 1e-12);
                    assert!((0.0..=1.0).contains(&a));
                }
                if let (Some(b), Some(a)) = (before.demand(), after.demand()) {
                    let high = b as f64 * seasonal * 1.1;
                    assert!(a as f64 <= high + 1e-9);
                    assert!(a as f64 >= (b as f64 * seasonal * 0.9).floor() - 1.0);
                }
                let ratio = after.cost() / before.cost();
                assert!((0.95 - 1e-12..=1.05 + 1e-12).contains(&ratio));
            }
            for (before, after) in network.edges().iter().zip(&snapshot.edges) {
                if before.transportation_cost > 0.0 {
                    let ratio = after.transportation_cost / before.transportation_cost;
                    assert!((0.9 - 1e-12..=1.2 + 1e-12).contains(&ratio));
                } else {
                    assert_eq!(after.transportation_cost, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_no_perturbation_is_identity() {
        let network = network(3);
        let rules = PerturbationConfig::none();
        let mut rng = StdRng::seed_from_u64(4);
        let snapshot = Perturber::new(&rules).snapshot(&network, date(2024, 6, 1), 5, 10, &mut rng);

        assert_eq!(snapshot.nodes, network.nodes());
        assert_eq!(snapshot.edges, network.edges());
        assert_eq!(
            snapshot.tier_demand(Tier::Part),
            network.statistics().demand(Tier::Part)
        );
    }
}
