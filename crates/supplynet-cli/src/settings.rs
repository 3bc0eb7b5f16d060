//! Generator settings from files, environment and flags.
//!
//! Sources are layered lowest to highest: serde defaults, an optional TOML
//! file, `SUPPLYNET__*` environment variables, then command line flags.
//!
//! ```toml
//! total_nodes = 500
//! module_ratio = 0.4
//! seed = 42
//!
//! [connection_policy]
//! kind = "bernoulli"
//! offering_to_module = 0.25
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use config::{Config, Environment, File};
use supplynet::fabric::{ConnectionPolicy, GeneratorConfig};

use crate::error::{CliError, CliResult};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SUPPLYNET";

/// Connection policy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Importance-scaled top-k targets
    Importance,
    /// Independent per-pair edges
    Bernoulli,
}

/// Flags shared by every command that generates a network.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerationArgs {
    /// TOML file with generator settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Total node count, catalog tiers included
    #[arg(short, long, global = true)]
    pub nodes: Option<usize>,

    /// Share of the variable budget that becomes modules (0-1)
    #[arg(long, global = true)]
    pub module_ratio: Option<f64>,

    /// Random seed for reproducible output
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Edge sampling policy
    #[arg(short, long, value_enum, global = true)]
    pub policy: Option<PolicyArg>,

    /// Fail when a sampled tier is empty instead of warning
    #[arg(long, global = true)]
    pub strict: bool,
}

impl GenerationArgs {
    /// Resolve the final configuration and validate it.
    pub fn resolve(&self) -> CliResult<GeneratorConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(nodes) = self.nodes {
            config.total_nodes = nodes;
        }
        if let Some(ratio) = self.module_ratio {
            config.module_ratio = ratio;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(policy) = self.policy {
            config.connection_policy = apply_policy(config.connection_policy, policy);
        }
        if self.strict {
            config.fail_on_empty_tier = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Switch policy kind, keeping configured parameters when the kind matches.
fn apply_policy(current: ConnectionPolicy, requested: PolicyArg) -> ConnectionPolicy {
    match (requested, current) {
        (PolicyArg::Importance, ConnectionPolicy::ImportanceScaled { .. })
        | (PolicyArg::Bernoulli, ConnectionPolicy::Bernoulli { .. }) => current,
        (PolicyArg::Importance, _) => ConnectionPolicy::default(),
        (PolicyArg::Bernoulli, _) => ConnectionPolicy::bernoulli(),
    }
}

/// Load a generator configuration from an optional file plus the environment.
pub fn load_config(path: Option<&Path>) -> CliResult<GeneratorConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(CliError::InvalidArgument(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        builder = builder.add_source(File::from(path));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config: GeneratorConfig = builder.build()?.try_deserialize()?;
    tracing::debug!(
        total_nodes = config.total_nodes,
        policy = config.connection_policy.name(),
        "loaded generator configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_sources() {
        let config = GenerationArgs::default().resolve().unwrap();
        assert_eq!(config.total_nodes, 126);
        assert_eq!(config.connection_policy, ConnectionPolicy::default());
    }

    #[test]
    fn test_toml_file_and_flags() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
total_nodes = 300
seed = 9

[connection_policy]
kind = "bernoulli"
offering_to_module = 0.25

[quantity]
min = 2
max = 4
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.total_nodes, 300);
        assert_eq!(config.seed, Some(9));
        assert_eq!(
            config.connection_policy,
            ConnectionPolicy::Bernoulli {
                offering_to_module: 0.25,
                module_to_part: 0.2,
            }
        );
        assert_eq!(config.quantity.min, 2);

        let args = GenerationArgs {
            config: Some(file.path().to_path_buf()),
            nodes: Some(126),
            policy: Some(PolicyArg::Bernoulli),
            strict: true,
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.total_nodes, 126);
        assert!(config.fail_on_empty_tier);
        // Same kind keeps the file's probabilities
        assert_eq!(config.connection_policy.name(), "bernoulli");
        assert_eq!(
            config.connection_policy,
            ConnectionPolicy::Bernoulli {
                offering_to_module: 0.25,
                module_to_part: 0.2,
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/supplynet.toml"))).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = GenerationArgs {
            nodes: Some(10),
            ..Default::default()
        };
        assert!(matches!(args.resolve(), Err(CliError::SupplyNet(_))));
    }

    #[test]
    fn test_policy_switch() {
        let bernoulli = ConnectionPolicy::bernoulli();
        assert_eq!(
            apply_policy(bernoulli, PolicyArg::Importance),
            ConnectionPolicy::default()
        );
        assert_eq!(apply_policy(bernoulli, PolicyArg::Bernoulli), bernoulli);
    }
}
