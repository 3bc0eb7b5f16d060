//! Static catalog of the fixed hierarchy tiers.
//!
//! The catalog names the business group, its product families, and each
//! family's product offerings. These tiers are always generated in full,
//! whatever the node budget.

use serde::{Deserialize, Serialize};

/// A product family and the offerings it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDefinition {
    /// Family name
    pub name: String,
    /// Offering names, in catalog order
    pub offerings: Vec<String>,
}

impl FamilyDefinition {
    /// Create a new family definition.
    pub fn new<I, S>(name: impl Into<String>, offerings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            offerings: offerings.into_iter().map(Into::into).collect(),
        }
    }
}

/// The fixed top of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Business group name
    pub business_group: String,
    /// Families in catalog order
    pub families: Vec<FamilyDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::etch()
    }
}

impl Catalog {
    /// Create a catalog from a business group and its families.
    pub fn new(business_group: impl Into<String>, families: Vec<FamilyDefinition>) -> Self {
        Self {
            business_group: business_group.into(),
            families,
        }
    }

    /// The Etch product line: 4 families, 21 offerings.
    pub fn etch() -> Self {
        Self::new(
            "Etch",
            vec![
                FamilyDefinition::new(
                    "Kyo",
                    [
                        "Versys® Kyo®",
                        "Versys® Kyo® C Series",
                        "Kyo® C Series",
                        "Kyo® E Series",
                        "Kyo® F Series",
                        "Kyo® G Series",
                    ],
                ),
                FamilyDefinition::new("Coronus", ["Coronus®", "Coronus® HP", "Coronus® DX"]),
                FamilyDefinition::new(
                    "Flex",
                    [
                        "Exelan® Flex®",
                        "Exelan® Flex45™",
                        "Flex® D Series",
                        "Flex® E Series",
                        "Flex® F Series",
                        "Flex® G Series",
                        "Flex® H Series",
                    ],
                ),
                FamilyDefinition::new(
                    "Versys Metal",
                    [
                        "Versys® Metal",
                        "Versys® Metal45™",
                        "Versys® Metal L",
                        "Versys® Metal M",
                        "Versys® Metal N",
                    ],
                ),
            ],
        )
    }

    /// Number of families.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Number of offerings across all families.
    pub fn offering_count(&self) -> usize {
        self.families.iter().map(|f| f.offerings.len()).sum()
    }

    /// Nodes the fixed tiers always occupy (business group + families + offerings).
    ///
    /// This is the minimum valid node budget.
    pub fn fixed_node_count(&self) -> usize {
        1 + self.family_count() + self.offering_count()
    }

    /// Offerings paired with the position of their owning family, in catalog order.
    pub fn offerings(&self) -> impl Iterator<Item = (usize, &str)> {
        self.families
            .iter()
            .enumerate()
            .flat_map(|(f, family)| family.offerings.iter().map(move |o| (f, o.as_str())))
    }

    /// Validate the catalog.
    pub fn validate(&self) -> Result<(), String> {
        if self.business_group.trim().is_empty() {
            return Err("catalog business group name is empty".to_string());
        }
        if self.families.is_empty() {
            return Err("catalog has no product families".to_string());
        }
        for family in &self.families {
            if family.offerings.is_empty() {
                return Err(format!("product family '{}' has no offerings", family.name));
            }
        }
        Ok(())
    }
}
