//! Edge sampler and demand propagator.
//!
//! Connects offerings to modules, then modules to parts, using the configured
//! [`ConnectionPolicy`]. Every sampled edge pushes `source.demand × quantity`
//! into its target as it is added, so the module tier is fully accumulated
//! before any module → part edge is drawn.

use super::{ConnectionPolicy, GeneratorConfig};
use crate::error::{Result, SupplyNetError};
use crate::models::{GenerationWarning, NodeIndex, SupplyEdge, SupplyNetwork, Tier};
use rand::seq::index;
use rand::Rng;
use tracing::{debug, warn};

/// Tier transitions whose edges are sampled, in the order they are processed.
pub const SAMPLED_TRANSITIONS: [(Tier, Tier); 2] = [
    (Tier::ProductOffering, Tier::Module),
    (Tier::Module, Tier::Part),
];

impl ConnectionPolicy {
    /// Pick target positions (0-based within the downstream tier) for one
    /// source.
    ///
    /// Always returns at least one target when `candidates > 0`, and never
    /// repeats a target.
    pub fn select_targets<R: Rng + ?Sized>(
        &self,
        upstream: Tier,
        importance_factor: f64,
        candidates: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        if candidates == 0 {
            return Vec::new();
        }

        match *self {
            ConnectionPolicy::ImportanceScaled { scale } => {
                let k = fan_out(importance_factor, scale).min(candidates);
                index::sample(rng, candidates, k).into_vec()
            }
            ConnectionPolicy::Bernoulli {
                offering_to_module,
                module_to_part,
            } => {
                let p = if upstream == Tier::Module {
                    module_to_part
                } else {
                    offering_to_module
                };
                let mut targets: Vec<usize> =
                    (0..candidates).filter(|_| rng.gen_bool(p)).collect();
                if targets.is_empty() {
                    targets.push(rng.gen_range(0..candidates));
                }
                targets
            }
        }
    }
}

/// Importance-scaled fan-out, never below one.
pub fn fan_out(importance_factor: f64, scale: f64) -> usize {
    ((importance_factor * scale).floor() as usize).max(1)
}

/// Sample every transition in [`SAMPLED_TRANSITIONS`] and propagate demand.
pub fn connect_tiers<R: Rng + ?Sized>(
    network: &mut SupplyNetwork,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<()> {
    for (upstream, downstream) in SAMPLED_TRANSITIONS {
        let added = connect_transition(network, config, upstream, downstream, rng)?;
        debug!(%upstream, %downstream, edges = added, "sampled transition");
    }
    Ok(())
}

/// Sample one tier transition. Returns the number of edges added.
pub fn connect_transition<R: Rng + ?Sized>(
    network: &mut SupplyNetwork,
    config: &GeneratorConfig,
    upstream: Tier,
    downstream: Tier,
    rng: &mut R,
) -> Result<usize> {
    let sources = network.tier_range(upstream);
    let targets = network.tier_range(downstream);

    if sources.is_empty() || targets.is_empty() {
        if config.fail_on_empty_tier {
            return Err(SupplyNetError::EmptyTier {
                upstream,
                downstream,
            });
        }
        let empty = if sources.is_empty() {
            upstream
        } else {
            downstream
        };
        let warning = GenerationWarning::EmptyTier {
            upstream,
            downstream,
            empty,
        };
        warn!("{}", warning);
        network.push_warning(warning);
        return Ok(0);
    }

    let mut added = 0;
    for source in sources {
        let importance = network
            .node(NodeIndex::from(source))
            .and_then(|n| n.importance_factor())
            .unwrap_or(0.0);
        let chosen =
            config
                .connection_policy
                .select_targets(upstream, importance, targets.len(), rng);

        for offset in chosen {
            let edge = SupplyEdge::new(
                NodeIndex::from(source),
                NodeIndex::from(targets.start + offset),
                config.quantity.sample(rng),
                config.transportation_cost.sample(rng),
                config.transportation_time.sample(rng),
            );
            network.add_edge(edge)?;
            added += 1;
        }
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::build_structure;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn sampled(config: &GeneratorConfig, seed: u64) -> SupplyNetwork {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut network = build_structure(config, &mut rng).unwrap();
        connect_tiers(&mut network, config, &mut rng).unwrap();
        network
    }

    #[test]
    fn test_importance_fan_out() {
        let policy = ConnectionPolicy::default();
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(policy.select_targets(Tier::ProductOffering, 0.05, 33, &mut rng).len(), 1);
        assert_eq!(policy.select_targets(Tier::ProductOffering, 0.37, 33, &mut rng).len(), 3);
        assert_eq!(policy.select_targets(Tier::ProductOffering, 1.0, 33, &mut rng).len(), 10);
        // Capped to the tier size
        assert_eq!(policy.select_targets(Tier::ProductOffering, 1.0, 4, &mut rng).len(), 4);
        assert!(policy.select_targets(Tier::Module, 0.9, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_targets_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        for policy in [ConnectionPolicy::default(), ConnectionPolicy::bernoulli()] {
            for _ in 0..200 {
                let targets = policy.select_targets(Tier::Module, 0.8, 12, &mut rng);
                let unique: HashSet<_> = targets.iter().collect();
                assert_eq!(unique.len(), targets.len());
                assert!(!targets.is_empty());
                assert!(targets.iter().all(|&t| t < 12));
            }
        }
    }

    #[test]
    fn test_bernoulli_forces_one_target() {
        let policy = ConnectionPolicy::Bernoulli {
            offering_to_module: 0.0,
            module_to_part: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert_eq!(policy.select_targets(Tier::ProductOffering, 0.5, 30, &mut rng).len(), 1);
        }

        let policy = ConnectionPolicy::Bernoulli {
            offering_to_module: 1.0,
            module_to_part: 0.0,
        };
        assert_eq!(policy.select_targets(Tier::ProductOffering, 0.5, 30, &mut rng).len(), 30);
        assert_eq!(policy.select_targets(Tier::Module, 0.5, 30, &mut rng).len(), 1);
    }

    #[test]
    fn test_demand_propagation() {
        let network = sampled(&GeneratorConfig::default(), 42);

        for tier in [Tier::Module, Tier::Part] {
            for index in network.indices_in_tier(tier) {
                let expected: u64 = network
                    .edges_into(index)
                    .map(|e| {
                        let source = network.node(e.source).unwrap().demand().unwrap();
                        e.propagated_demand(source)
                    })
                    .sum();
                assert_eq!(network.node(index).unwrap().demand(), Some(expected));
            }
        }
    }

    #[test]
    fn test_every_source_fans_out() {
        let network = sampled(&GeneratorConfig::default(), 42);

        for tier in [Tier::ProductOffering, Tier::Module] {
            for index in network.indices_in_tier(tier) {
                assert!(network.out_degree(index) >= 1);
            }
        }
        assert!(network.warnings().is_empty());
    }

    #[test]
    fn test_edge_attributes_in_range() {
        let config = GeneratorConfig::default();
        let network = sampled(&config, 9);

        for edge in network.edges().iter().skip(25) {
            assert!(config.quantity.contains(edge.quantity));
            assert!(config.transportation_cost.contains(edge.transportation_cost));
            assert!(config.transportation_time.contains(edge.transportation_time));
        }
    }

    #[test]
    fn test_empty_tier_warns() {
        let config = GeneratorConfig::default().with_total_nodes(26);
        let network = sampled(&config, 1);

        assert_eq!(network.edge_count(), 25);
        assert_eq!(
            network.warnings()[0],
            GenerationWarning::EmptyTier {
                upstream: Tier::ProductOffering,
                downstream: Tier::Module,
                empty: Tier::Module,
            }
        );
        assert_eq!(network.warnings().len(), 2);
    }

    #[test]
    fn test_empty_tier_fails_when_strict() {
        let config = GeneratorConfig::default()
            .with_total_nodes(26)
            .with_fail_on_empty_tier(true);
        let mut rng = StdRng::seed_from_u64(1);
        let mut network = build_structure(&config, &mut rng).unwrap();

        let err = connect_tiers(&mut network, &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SupplyNetError::EmptyTier {
                upstream: Tier::ProductOffering,
                downstream: Tier::Module,
            }
        );
    }

    #[test]
    fn test_all_modules_leaves_parts_empty() {
        let config = GeneratorConfig::default().with_module_ratio(1.0);
        let network = sampled(&config, 4);

        assert_eq!(network.nodes_in_tier(Tier::Part).len(), 0);
        assert_eq!(network.warnings().len(), 1);
        assert_eq!(network.statistics().demand(Tier::Part), 0);
    }
}
