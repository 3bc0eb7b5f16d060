//! Bill-of-materials explosion.

use crate::error::Result;
use crate::models::{NodeIndex, SupplyNetwork};
use serde::Serialize;

/// Total requirement of one downstream node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BomLine {
    /// Required node
    pub node: NodeIndex,
    /// Units needed per unit of the root
    pub quantity: u64,
}

/// Explode a node into everything it transitively consumes.
///
/// Each line's quantity is the sum over all paths from the root of the product
/// of edge quantities. Lines are ordered by tier, then arena position.
pub fn explode(network: &SupplyNetwork, id: &str) -> Result<Vec<BomLine>> {
    let root = network.index_of(id)?;

    // Edges only point to the next tier and the arena is tier-ordered, so a
    // single forward sweep visits every node after all its sources.
    let mut required = vec![0u64; network.node_count()];
    required[root.get()] = 1;

    for position in root.get()..network.node_count() {
        let units = required[position];
        if units == 0 {
            continue;
        }
        for edge in network.edges_from(NodeIndex::from(position)) {
            let slot = &mut required[edge.target.get()];
            *slot = slot.saturating_add(units.saturating_mul(edge.quantity as u64));
        }
    }

    Ok(required
        .iter()
        .enumerate()
        .skip(root.get() + 1)
        .filter(|&(_, &quantity)| quantity > 0)
        .map(|(position, &quantity)| BomLine {
            node: NodeIndex::from(position),
            quantity,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::diamond;

    fn lines(network: &SupplyNetwork, id: &str) -> Vec<(String, u64)> {
        explode(network, id)
            .unwrap()
            .into_iter()
            .map(|l| (network.node(l.node).unwrap().id().to_string(), l.quantity))
            .collect()
    }

    #[test]
    fn test_explode_offering() {
        let network = diamond();
        // P_001: 2·4 + 3·1, P_002: 3·5
        assert_eq!(
            lines(&network, "PO_001"),
            vec![
                ("M_001".to_string(), 2),
                ("M_002".to_string(), 3),
                ("P_001".to_string(), 11),
                ("P_002".to_string(), 15),
            ]
        );
    }

    #[test]
    fn test_explode_family() {
        let network = diamond();
        let bom = lines(&network, "PF_001");

        assert_eq!(bom[0], ("PO_001".to_string(), 1));
        assert_eq!(bom[1], ("PO_002".to_string(), 1));
        // M_002: 3 via PO_001 + 1 via PO_002
        assert_eq!(bom[3], ("M_002".to_string(), 4));
        // P_002: 4·5
        assert_eq!(bom[5], ("P_002".to_string(), 20));
    }

    #[test]
    fn test_explode_leaf() {
        let network = diamond();
        assert!(explode(&network, "P_001").unwrap().is_empty());
        assert!(explode(&network, "P_404").unwrap_err().is_not_found());
    }
}
