//! Data fabric for synthetic supply chain generation.
//!
//! The fabric turns a [`GeneratorConfig`] into a populated network: the
//! catalog tiers, sampled modules and parts, sampled edges with demand
//! propagation, and optionally a time series of perturbed snapshots.

mod catalog;
mod config;
mod generator;
mod sampler;
mod structure;
mod variants;

pub use catalog::*;
pub use config::*;
pub use generator::*;
pub use sampler::*;
pub use structure::*;
pub use variants::*;
