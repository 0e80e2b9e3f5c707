//! Error types for the growth core.
//!
//! Only configuration can fail. Everything that happens during growth
//! (rejected candidates, burned-out fronts) is reported as an outcome value,
//! not as an error.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::config::SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Node size must be a finite, strictly positive number.
    #[error("node size must be positive and finite, got {0}")]
    NonPositiveNodeSize(f32),

    /// Node size so small that no shell offset survives rounding.
    #[error("node size {0} is too small to produce any growth direction")]
    NodeSizeTooSmall(f32),

    /// Root separation for the two-root topology must be positive and finite.
    #[error("root separation must be positive and finite, got {0}")]
    NonPositiveSeparation(f32),

    /// A cap of zero would burn out every root before it could grow.
    #[error("reproduction cap must be at least 1")]
    ZeroReproductionCap,

    /// IO error while reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file was not valid TOML or named an unknown topology/scheme.
    #[error("Parse error: {0}")]
    Parse(String),
}
