//! Property tests over randomly chosen generator configurations.

use proptest::prelude::*;
use supplynet::prelude::*;

fn arb_policy() -> impl Strategy<Value = ConnectionPolicy> {
    prop_oneof![
        (1.0f64..20.0).prop_map(|scale| ConnectionPolicy::ImportanceScaled { scale }),
        (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(offering_to_module, module_to_part)| {
            ConnectionPolicy::Bernoulli {
                offering_to_module,
                module_to_part,
            }
        }),
    ]
}

fn arb_config() -> impl Strategy<Value = GeneratorConfig> {
    (26usize..400, 0.0f64..=1.0, any::<u64>(), arb_policy()).prop_map(
        |(total_nodes, module_ratio, seed, policy)| {
            GeneratorConfig::default()
                .with_total_nodes(total_nodes)
                .with_module_ratio(module_ratio)
                .with_seed(seed)
                .with_policy(policy)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Node counts always match the budget split.
    #[test]
    fn node_counts_match_budget(config in arb_config()) {
        let network = supplynet::generate(&config).unwrap();
        let stats = network.statistics();

        prop_assert_eq!(stats.node_count, config.total_nodes);
        prop_assert_eq!(stats.count(Tier::Module), config.module_count());
        prop_assert_eq!(stats.count(Tier::Part), config.part_count());
    }

    /// Edges go one tier down, never repeat, and carry exact derived demand.
    #[test]
    fn structural_invariants_hold(config in arb_config()) {
        let network = supplynet::generate(&config).unwrap();

        let mut seen = std::collections::HashSet::new();
        for edge in network.edges() {
            let source = network.node(edge.source).unwrap().tier();
            let target = network.node(edge.target).unwrap().tier();
            prop_assert!(source.feeds(target));
            prop_assert!(seen.insert((edge.source, edge.target)));
        }

        for tier in [Tier::Module, Tier::Part] {
            for index in network.indices_in_tier(tier) {
                let expected: u64 = network
                    .edges_into(index)
                    .map(|e| network.node(e.source).unwrap().demand().unwrap() * e.quantity as u64)
                    .sum();
                prop_assert_eq!(network.node(index).unwrap().demand(), Some(expected));
            }
        }
    }

    /// Every offering and module fans out whenever its downstream tier is populated.
    #[test]
    fn sources_fan_out(config in arb_config()) {
        let network = supplynet::generate(&config).unwrap();

        for (upstream, downstream) in [
            (Tier::ProductOffering, Tier::Module),
            (Tier::Module, Tier::Part),
        ] {
            let populated = !network.nodes_in_tier(downstream).is_empty();
            for index in network.indices_in_tier(upstream) {
                prop_assert_eq!(network.out_degree(index) >= 1, populated);
            }
        }
    }

    /// Same seed, same bytes.
    #[test]
    fn seeded_generation_is_deterministic(config in arb_config()) {
        let a = serde_json::to_string(&supplynet::generate(&config).unwrap()).unwrap();
        let b = serde_json::to_string(&supplynet::generate(&config).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Budgets below the catalog size are rejected.
    #[test]
    fn small_budgets_rejected(total_nodes in 0usize..26) {
        let config = GeneratorConfig::default().with_total_nodes(total_nodes);
        prop_assert!(supplynet::generate(&config).unwrap_err().is_configuration());
    }
}
