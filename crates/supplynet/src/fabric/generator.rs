//! Supply chain generator facade.

use super::{build_structure, connect_tiers, time_grid, GeneratorConfig, Perturber};
use crate::error::Result;
use crate::models::{SupplyNetwork, TimeSeries};
use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info_span};

/// Generates static supply networks and their time series.
///
/// The random source is owned by the generator, so repeated calls continue
/// the same stream. Two generators built from the same seeded configuration
/// produce identical output.
#[derive(Debug, Clone)]
pub struct SupplyChainGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl SupplyChainGenerator<StdRng> {
    /// Create a generator seeded from `config.seed`, or fresh entropy when unset.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SupplyChainGenerator<R> {
    /// Create a generator over a caller-supplied random source.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the static structure, sample edges and propagate demand.
    pub fn generate(&mut self) -> Result<SupplyNetwork> {
        let span = info_span!(
            "generate",
            nodes = self.config.total_nodes,
            policy = self.config.connection_policy.name()
        );
        let _enter = span.enter();

        let mut network = build_structure(&self.config, &mut self.rng)?;
        connect_tiers(&mut network, &self.config, &mut self.rng)?;

        debug!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            warnings = network.warnings().len(),
            "network generated"
        );
        Ok(network)
    }

    /// Generate one static network plus a perturbed snapshot per grid date.
    pub fn generate_time_series(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        interval: Duration,
    ) -> Result<TimeSeries> {
        let grid = time_grid(start, end, interval)?;
        let network = self.generate()?;

        let span = info_span!("time_series", %start, %end, snapshots = grid.len());
        let _enter = span.enter();

        let perturber = Perturber::new(&self.config.perturbation);
        let total = grid.len();
        let snapshots: BTreeMap<_, _> = grid
            .into_iter()
            .enumerate()
            .map(|(index, timestamp)| {
                let snapshot = perturber.snapshot(&network, timestamp, index, total, &mut self.rng);
                (timestamp, snapshot)
            })
            .collect();

        debug!(snapshots = snapshots.len(), "time series generated");
        Ok(TimeSeries { network, snapshots })
    }
}

/// Generate a static network from a configuration.
pub fn generate(config: &GeneratorConfig) -> Result<SupplyNetwork> {
    SupplyChainGenerator::new(config.clone())?.generate()
}

/// Generate a static network and its snapshots from a configuration.
pub fn generate_time_series(
    config: &GeneratorConfig,
    start: NaiveDate,
    end: NaiveDate,
    interval: Duration,
) -> Result<TimeSeries> {
    SupplyChainGenerator::new(config.clone())?.generate_time_series(start, end, interval)
}
