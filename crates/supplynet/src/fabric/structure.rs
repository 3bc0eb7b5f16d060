//! Static structure builder.
//!
//! Instantiates the catalog tiers verbatim and samples the module and part
//! tiers to fill the node budget. Only structural edges (business group →
//! family → offering) are added here; sampled edges come from the edge
//! sampler afterwards.

use super::GeneratorConfig;
use crate::error::Result;
use crate::models::{
    BusinessGroup, Module, Node, Part, ProductFamily, ProductOffering, SupplyEdge, SupplyNetwork,
    Tier,
};
use rand::Rng;
use tracing::debug;

/// Build every node of the hierarchy plus the structural edges.
///
/// Fails with a configuration error when the budget is below the catalog
/// size or any range is invalid.
pub fn build_structure<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<SupplyNetwork> {
    config.validate()?;

    let catalog = &config.catalog;
    let modules = config.module_count();
    let parts = config.part_count();
    debug!(
        fixed = catalog.fixed_node_count(),
        modules, parts, "building static structure"
    );

    // Structural edges: one per family plus one per offering
    let mut network = SupplyNetwork::with_capacity(
        config.total_nodes,
        catalog.family_count() + catalog.offering_count(),
    );

    let group = network.add_node(Node::BusinessGroup(BusinessGroup {
        id: Tier::BusinessGroup.node_id(1),
        name: catalog.business_group.clone(),
        revenue: config.cost.sample(rng),
    }))?;

    let mut families = Vec::with_capacity(catalog.family_count());
    for (i, family) in catalog.families.iter().enumerate() {
        families.push(network.add_node(Node::ProductFamily(ProductFamily {
            id: Tier::ProductFamily.node_id(i + 1),
            name: family.name.clone(),
            revenue: config.cost.sample(rng),
        }))?);
    }

    // Offering ids count across families in catalog order
    let mut offerings = Vec::with_capacity(catalog.offering_count());
    for (i, (family, name)) in catalog.offerings().enumerate() {
        let index = network.add_node(Node::ProductOffering(ProductOffering {
            id: Tier::ProductOffering.node_id(i + 1),
            name: name.to_string(),
            inventory: config.inventory.sample(rng),
            demand: config.demand.sample(rng),
            production_cost: config.cost.sample(rng),
            importance_factor: config.importance_factor.sample(rng),
        }))?;
        offerings.push((families[family], index));
    }

    for i in 1..=modules {
        network.add_node(Node::Module(Module {
            id: Tier::Module.node_id(i),
            name: format!("Module_{}", i),
            inventory: config.inventory.sample(rng),
            importance_factor: config.importance_factor.sample(rng),
            demand: 0,
            cost: config.cost.sample(rng),
        }))?;
    }

    for i in 1..=parts {
        network.add_node(Node::Part(Part {
            id: Tier::Part.node_id(i),
            name: format!("Part_{}", i),
            inventory: config.inventory.sample(rng),
            importance_factor: config.importance_factor.sample(rng),
            demand: 0,
            cost: config.cost.sample(rng),
        }))?;
    }

    for &family in &families {
        network.add_edge(SupplyEdge::structural(group, family))?;
    }
    for (family, offering) in offerings {
        network.add_edge(SupplyEdge::structural(family, offering))?;
    }

    Ok(network)
}
