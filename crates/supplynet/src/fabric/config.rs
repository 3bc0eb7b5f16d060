//! Generator configuration.
//!
//! Every field has a serde default, so a TOML file only needs to name the
//! values it overrides.

use super::Catalog;
use crate::error::{Result, SupplyNetError};
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive numeric range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    /// Lower bound (inclusive)
    pub min: T,
    /// Upper bound (inclusive)
    pub max: T,
}

impl<T> ValueRange<T> {
    /// Create a new range.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: SampleUniform + PartialOrd + Copy> ValueRange<T> {
    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }

    /// Check whether a value lies within the bounds.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn check_order(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(SupplyNetError::config(format!(
                "{} range has min greater than max",
                name
            )));
        }
        Ok(())
    }
}

impl ValueRange<f64> {
    fn check_float(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SupplyNetError::config(format!(
                "{} range bounds must be finite",
                name
            )));
        }
        self.check_order(name)
    }

    fn check_within(&self, name: &str, low: f64, high: f64) -> Result<()> {
        self.check_float(name)?;
        if self.min < low || self.max > high {
            return Err(SupplyNetError::config(format!(
                "{} range must lie within [{}, {}]",
                name, low, high
            )));
        }
        Ok(())
    }
}

/// How sampled tier transitions pick their targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectionPolicy {
    /// Each source draws `max(1, floor(importance_factor × scale))` distinct
    /// targets.
    ImportanceScaled {
        /// Multiplier applied to the importance factor
        #[serde(default = "default_scale")]
        scale: f64,
    },
    /// Each (source, target) pair is connected independently.
    Bernoulli {
        /// Edge probability for offering → module pairs
        #[serde(default = "default_offering_to_module")]
        offering_to_module: f64,
        /// Edge probability for module → part pairs
        #[serde(default = "default_module_to_part")]
        module_to_part: f64,
    },
}

fn default_scale() -> f64 {
    10.0
}

fn default_offering_to_module() -> f64 {
    0.3
}

fn default_module_to_part() -> f64 {
    0.2
}

impl Default for ConnectionPolicy {
    fn default() -> Self {
        ConnectionPolicy::ImportanceScaled {
            scale: default_scale(),
        }
    }
}

impl ConnectionPolicy {
    /// Bernoulli policy with the default probabilities.
    pub fn bernoulli() -> Self {
        ConnectionPolicy::Bernoulli {
            offering_to_module: default_offering_to_module(),
            module_to_part: default_module_to_part(),
        }
    }

    /// Short name used in logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionPolicy::ImportanceScaled { .. } => "importance",
            ConnectionPolicy::Bernoulli { .. } => "bernoulli",
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            ConnectionPolicy::ImportanceScaled { scale } => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err(SupplyNetError::config(format!(
                        "importance scale must be positive, got {}",
                        scale
                    )));
                }
            }
            ConnectionPolicy::Bernoulli {
                offering_to_module,
                module_to_part,
            } => {
                for (name, p) in [
                    ("offering_to_module", offering_to_module),
                    ("module_to_part", module_to_part),
                ] {
                    if !(0.0..=1.0).contains(&p) {
                        return Err(SupplyNetError::config(format!(
                            "{} probability must be in [0, 1], got {}",
                            name, p
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Per-snapshot perturbation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerturbationConfig {
    /// Largest absolute inventory change per snapshot
    #[serde(default = "default_inventory_delta")]
    pub inventory_delta: u32,
    /// Amplitude of the seasonal demand term
    #[serde(default = "default_seasonal_amplitude")]
    pub seasonal_amplitude: f64,
    /// Multiplicative demand noise
    #[serde(default = "default_demand_jitter")]
    pub demand_jitter: ValueRange<f64>,
    /// Multiplicative noise on cost, revenue and production cost
    #[serde(default = "default_cost_jitter")]
    pub cost_jitter: ValueRange<f64>,
    /// Largest absolute importance change
    #[serde(default = "default_importance_noise")]
    pub importance_noise: f64,
    /// Multiplicative noise on transportation cost and time
    #[serde(default = "default_transport_jitter")]
    pub transport_jitter: ValueRange<f64>,
}

fn default_inventory_delta() -> u32 {
    10
}

fn default_seasonal_amplitude() -> f64 {
    0.2
}

fn default_demand_jitter() -> ValueRange<f64> {
    ValueRange::new(0.9, 1.1)
}

fn default_cost_jitter() -> ValueRange<f64> {
    ValueRange::new(0.95, 1.05)
}

fn default_importance_noise() -> f64 {
    0.05
}

fn default_transport_jitter() -> ValueRange<f64> {
    ValueRange::new(0.9, 1.2)
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            inventory_delta: default_inventory_delta(),
            seasonal_amplitude: default_seasonal_amplitude(),
            demand_jitter: default_demand_jitter(),
            cost_jitter: default_cost_jitter(),
            importance_noise: default_importance_noise(),
            transport_jitter: default_transport_jitter(),
        }
    }
}

impl PerturbationConfig {
    /// Perturbation that leaves every value unchanged.
    pub fn none() -> Self {
        Self {
            inventory_delta: 0,
            seasonal_amplitude: 0.0,
            demand_jitter: ValueRange::new(1.0, 1.0),
            cost_jitter: ValueRange::new(1.0, 1.0),
            importance_noise: 0.0,
            transport_jitter: ValueRange::new(1.0, 1.0),
        }
    }

    /// Validate the perturbation bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.seasonal_amplitude.is_finite() || self.seasonal_amplitude < 0.0 {
            return Err(SupplyNetError::config(
                "seasonal amplitude must be a non-negative number",
            ));
        }
        if !(0.0..=1.0).contains(&self.importance_noise) {
            return Err(SupplyNetError::config(format!(
                "importance noise must be in [0, 1], got {}",
                self.importance_noise
            )));
        }
        self.demand_jitter
            .check_within("demand jitter", 0.0, f64::MAX)?;
        self.cost_jitter.check_within("cost jitter", 0.0, f64::MAX)?;
        self.transport_jitter
            .check_within("transport jitter", 0.0, f64::MAX)?;
        Ok(())
    }
}

/// Configuration for the supply chain generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Target total node count, fixed tiers included
    #[serde(default = "default_total_nodes")]
    pub total_nodes: usize,
    /// Share of the variable budget that becomes modules
    #[serde(default = "default_module_ratio")]
    pub module_ratio: f64,

    /// Inventory of offerings, modules and parts
    #[serde(default = "default_inventory")]
    pub inventory: ValueRange<u32>,
    /// Seed demand of offerings
    #[serde(default = "default_demand")]
    pub demand: ValueRange<u64>,
    /// Revenue, production cost and component cost
    #[serde(default = "default_cost")]
    pub cost: ValueRange<f64>,
    /// Importance factor of offerings, modules and parts
    #[serde(default = "default_importance")]
    pub importance_factor: ValueRange<f64>,
    /// Units per sampled edge
    #[serde(default = "default_quantity")]
    pub quantity: ValueRange<u32>,
    /// Transportation cost per sampled edge
    #[serde(default = "default_transportation_cost")]
    pub transportation_cost: ValueRange<f64>,
    /// Transportation time per sampled edge, in days
    #[serde(default = "default_transportation_time")]
    pub transportation_time: ValueRange<f64>,

    /// Target selection strategy
    #[serde(default)]
    pub connection_policy: ConnectionPolicy,
    /// Fail instead of warning when a sampled transition has an empty side
    #[serde(default)]
    pub fail_on_empty_tier: bool,
    /// Snapshot perturbation rules
    #[serde(default)]
    pub perturbation: PerturbationConfig,
    /// Fixed business group, families and offerings
    #[serde(default)]
    pub catalog: Catalog,

    /// Random seed for reproducibility (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_total_nodes() -> usize {
    126
}

fn default_module_ratio() -> f64 {
    1.0 / 3.0
}

fn default_inventory() -> ValueRange<u32> {
    ValueRange::new(50, 1000)
}

fn default_demand() -> ValueRange<u64> {
    ValueRange::new(10, 200)
}

fn default_cost() -> ValueRange<f64> {
    ValueRange::new(100.0, 10_000.0)
}

fn default_importance() -> ValueRange<f64> {
    ValueRange::new(0.1, 1.0)
}

fn default_quantity() -> ValueRange<u32> {
    ValueRange::new(1, 20)
}

fn default_transportation_cost() -> ValueRange<f64> {
    ValueRange::new(10.0, 1000.0)
}

fn default_transportation_time() -> ValueRange<f64> {
    ValueRange::new(1.0, 30.0)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            total_nodes: default_total_nodes(),
            module_ratio: default_module_ratio(),
            inventory: default_inventory(),
            demand: default_demand(),
            cost: default_cost(),
            importance_factor: default_importance(),
            quantity: default_quantity(),
            transportation_cost: default_transportation_cost(),
            transportation_time: default_transportation_time(),
            connection_policy: ConnectionPolicy::default(),
            fail_on_empty_tier: false,
            perturbation: PerturbationConfig::default(),
            catalog: Catalog::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Set the target node count.
    pub fn with_total_nodes(mut self, total_nodes: usize) -> Self {
        self.total_nodes = total_nodes;
        self
    }

    /// Set the module share of the variable budget.
    pub fn with_module_ratio(mut self, module_ratio: f64) -> Self {
        self.module_ratio = module_ratio;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the connection policy.
    pub fn with_policy(mut self, policy: ConnectionPolicy) -> Self {
        self.connection_policy = policy;
        self
    }

    /// Set the perturbation rules.
    pub fn with_perturbation(mut self, perturbation: PerturbationConfig) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Use a custom catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Fail on empty sampled tiers instead of warning.
    pub fn with_fail_on_empty_tier(mut self, fail: bool) -> Self {
        self.fail_on_empty_tier = fail;
        self
    }

    /// Nodes left for modules and parts.
    pub fn variable_budget(&self) -> usize {
        self.total_nodes
            .saturating_sub(self.catalog.fixed_node_count())
    }

    /// Number of modules the budget yields.
    pub fn module_count(&self) -> usize {
        (self.variable_budget() as f64 * self.module_ratio).floor() as usize
    }

    /// Number of parts the budget yields.
    pub fn part_count(&self) -> usize {
        self.variable_budget() - self.module_count()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate().map_err(SupplyNetError::Configuration)?;

        let fixed = self.catalog.fixed_node_count();
        if self.total_nodes < fixed {
            return Err(SupplyNetError::config(format!(
                "total_nodes must be at least {} (the fixed catalog size), got {}",
                fixed, self.total_nodes
            )));
        }
        if self.total_nodes > u32::MAX as usize {
            return Err(SupplyNetError::config(format!(
                "total_nodes must be at most {}, got {}",
                u32::MAX,
                self.total_nodes
            )));
        }
        if !(0.0..=1.0).contains(&self.module_ratio) {
            return Err(SupplyNetError::config(format!(
                "module_ratio must be in [0, 1], got {}",
                self.module_ratio
            )));
        }

        self.inventory.check_order("inventory")?;
        self.demand.check_order("demand")?;
        self.quantity.check_order("quantity")?;
        if self.quantity.min < 1 {
            return Err(SupplyNetError::config("quantity must be at least 1"));
        }
        self.cost.check_within("cost", 0.0, f64::MAX)?;
        self.importance_factor
            .check_within("importance_factor", 0.0, 1.0)?;
        self.transportation_cost
            .check_within("transportation_cost", 0.0, f64::MAX)?;
        self.transportation_time
            .check_within("transportation_time", 0.0, f64::MAX)?;

        self.connection_policy.validate()?;
        self.perturbation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_nodes, 126);
        assert_eq!(config.variable_budget(), 100);
        assert_eq!(config.module_count(), 33);
        assert_eq!(config.part_count(), 67);
    }

    #[test]
    fn test_config_validation() {
        let config = GeneratorConfig::default().with_total_nodes(25);
        assert!(config.validate().unwrap_err().is_configuration());

        let config = GeneratorConfig::default().with_total_nodes(26);
        assert!(config.validate().is_ok());
        assert_eq!(config.module_count(), 0);
        assert_eq!(config.part_count(), 0);

        let config = GeneratorConfig::default().with_module_ratio(1.5);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.importance_factor = ValueRange::new(0.5, 1.5);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.quantity = ValueRange::new(0, 5);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.cost = ValueRange::new(500.0, 100.0);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.transportation_time = ValueRange::new(f64::NAN, 3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_node_budget_fits_index() {
        let config = GeneratorConfig::default().with_total_nodes(u32::MAX as usize);
        assert!(config.validate().is_ok());

        let config = GeneratorConfig::default().with_total_nodes(u32::MAX as usize + 1);
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_policy_validation() {
        let config = GeneratorConfig::default().with_policy(ConnectionPolicy::Bernoulli {
            offering_to_module: 1.2,
            module_to_part: 0.2,
        });
        assert!(config.validate().is_err());

        let config = GeneratorConfig::default()
            .with_policy(ConnectionPolicy::ImportanceScaled { scale: 0.0 });
        assert!(config.validate().is_err());

        let config = GeneratorConfig::default().with_policy(ConnectionPolicy::bernoulli());
        assert!(config.validate().is_ok());
        assert_eq!(config.connection_policy.name(), "bernoulli");
    }

    #[test]
    fn test_perturbation_validation() {
        let mut perturbation = PerturbationConfig::default();
        assert!(perturbation.validate().is_ok());
        assert!(PerturbationConfig::none().validate().is_ok());

        perturbation.cost_jitter = ValueRange::new(-0.5, 1.0);
        assert!(perturbation.validate().is_err());

        let mut perturbation = PerturbationConfig::default();
        perturbation.importance_noise = 1.0;
        assert!(perturbation.validate().is_ok());
        for noise in [1.5, 1e308, f64::NAN, -0.1] {
            perturbation.importance_noise = noise;
            assert!(perturbation.validate().is_err(), "noise {} accepted", noise);
        }
    }

    #[test]
    fn test_range_sampling() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = ValueRange::new(1u32, 20);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }

        let point = ValueRange::new(2.5f64, 2.5);
        assert_eq!(point.sample(&mut rng), 2.5);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{"total_nodes": 500, "seed": 9, "connection_policy": {"kind": "bernoulli"}}"#,
        )
        .unwrap();

        assert_eq!(config.total_nodes, 500);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.connection_policy, ConnectionPolicy::bernoulli());
        assert_eq!(config.quantity, ValueRange::new(1, 20));
        assert_eq!(config.catalog, Catalog::etch());
    }
}
