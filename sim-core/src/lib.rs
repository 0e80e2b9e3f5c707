//! Core 3-D Brownian tree growth library.
//!
//! Nodes are placed one shell offset away from a randomly chosen parent and
//! kept only if they respect a minimum clearance from everything placed so
//! far. Each root grows as its own front; a node burns out after spawning
//! a fixed number of children.
//!
//! Main components:
//! - [`shell`]: precomputed offset directions.
//! - [`clearance`]: two-phase accept/reject test for candidates.
//! - [`front`]: per-root set of nodes that may still reproduce.
//! - [`engine`]: a single growth step for a single front.
//! - [`scheduler`]: round-robin stepping of all fronts.
//! - [`simulation`]: owner of registry, fronts, engine and rng.
//! - [`registry`]: append-only store of every placed node.
//! - [`config`] / [`layout`]: user parameters and starting layouts.
//! - [`sink`]: output stream of accepted nodes.
//! - [`error`] / [`types`]: configuration errors and shared ids.

pub mod clearance;
pub mod config;
pub mod engine;
pub mod error;
pub mod front;
pub mod layout;
pub mod registry;
pub mod scheduler;
pub mod shell;
pub mod simulation;
pub mod sink;
pub mod types;

pub use config::{CerebellumLobes, ColorScheme, GrowthParams, SimulationConfig, Topology};
pub use error::ConfigError;
pub use simulation::Simulation;
pub use sink::{NodeEvent, NodeSink};
