//! # SupplyNet
//!
//! Synthetic multi-tier supply chain networks with demand propagation.
//!
//! The generator builds a strictly layered hierarchy:
//!
//! ```text
//! ┌────────────────┐   ┌────────────────┐   ┌──────────────────┐   ┌──────────┐   ┌──────────┐
//! │ Business Group │──▶│ Product Family │──▶│ Product Offering │──▶│  Module  │──▶│   Part   │
//! │   (catalog)    │   │   (catalog)    │   │    (catalog)     │   │ (random) │   │ (random) │
//! └────────────────┘   └────────────────┘   └──────────────────┘   └──────────┘   └──────────┘
//!                                              seed demand ──────▶ demand × qty ──▶ demand × qty
//! ```
//!
//! The top three tiers come from a fixed [`Catalog`](fabric::Catalog). Modules
//! and parts are sampled to fill the requested node budget, connected by a
//! configurable [`ConnectionPolicy`](fabric::ConnectionPolicy), and receive
//! demand as the sum of upstream demand times edge quantity.
//!
//! ## Quick Start
//!
//! ```rust
//! use supplynet::prelude::*;
//!
//! let config = GeneratorConfig::default().with_total_nodes(126).with_seed(42);
//! let network = supplynet::generate(&config)?;
//!
//! assert_eq!(network.node_count(), 126);
//! assert_eq!(network.nodes_in_tier(Tier::Module).len(), 33);
//! # Ok::<(), supplynet::SupplyNetError>(())
//! ```
//!
//! ## Time Series
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use supplynet::prelude::*;
//!
//! let config = GeneratorConfig::default().with_seed(7);
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//!
//! let series = supplynet::generate_time_series(&config, start, end, Duration::days(7))?;
//! assert_eq!(series.len(), 13);
//! # Ok::<(), supplynet::SupplyNetError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fabric;
pub mod models;
pub mod query;

pub use error::{Result, SupplyNetError};
pub use fabric::{generate, generate_time_series, SupplyChainGenerator};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, SupplyNetError};

    pub use crate::models::{
        // Tiers and nodes
        BusinessGroup, Module, Node, NodeIndex, Part, ProductFamily, ProductOffering, Tier,
        // Edges and the network arena
        FlowDirection, GenerationWarning, NetworkStatistics, SupplyEdge, SupplyNetwork,
        // Tabular views
        FieldValue, TierTable,
        // Temporal
        NetworkSnapshot, TimeSeries,
    };

    pub use crate::fabric::{
        Catalog, ConnectionPolicy, FamilyDefinition, GeneratorConfig, PerturbationConfig,
        SupplyChainGenerator, ValueRange,
    };

    pub use crate::query::{
        cheapest_path, explode, neighborhood, shortest_path, BomLine, Path, Subgraph,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
