//! Simulation configuration.
//!
//! [`SimulationConfig`] is the only input the core consumes. It is read once
//! at start (from a TOML file or built in code), validated, and then turned
//! into [`GrowthParams`] and a set of seeded fronts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, shell};

/// Ratio between the user-facing node size and the growth radius.
const SIZE_TO_RADIUS: f32 = 1.5;

/// Multiplier applied to the radius to get the extra crowding margin.
const CROWDING_FACTOR: f32 = 1.8;

/// How many roots the cerebellum layout starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CerebellumLobes {
    #[default]
    Four,
    Five,
}

impl CerebellumLobes {
    pub fn count(self) -> usize {
        match self {
            CerebellumLobes::Four => 4,
            CerebellumLobes::Five => 5,
        }
    }
}

/// Starting layout of the growth fronts (one root per front).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// One root at the origin.
    #[default]
    Single,
    /// Two roots on the x axis, `separation` apart, centered on the origin.
    Pair { separation: f32 },
    /// Fixed four- or five-root layout modelled on cerebellar anchoring centers.
    Cerebellum { lobes: CerebellumLobes },
}

/// How front colors are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Fixed gray shades.
    #[default]
    Gray,
    /// An independent random color per front.
    Random,
    /// The five-color red/green/blue/yellow/white categorical palette.
    Palette,
}

/// User-facing simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Visual node size; the growth radius is derived from it.
    pub node_size: f32,
    pub topology: Topology,
    pub color_scheme: ColorScheme,
    /// Number of children a node may spawn before it burns out.
    pub reproduction_cap: u32,
    /// Seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            node_size: 5.0,
            topology: Topology::Single,
            color_scheme: ColorScheme::Gray,
            reproduction_cap: 2,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reads and validates a TOML config file.
    ///
    /// ### Parameters
    /// - `path` - Location of the TOML file.
    ///
    /// ### Returns
    /// The parsed config, or a [`ConfigError`] if the file cannot be read,
    /// does not parse, or fails [`SimulationConfig::validate`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks that the config describes a runnable simulation.
    ///
    /// A radius too large for the available space is not an error; such a
    /// run simply stalls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.node_size.is_finite() && self.node_size > 0.0) {
            return Err(ConfigError::NonPositiveNodeSize(self.node_size));
        }
        if self.growth_params().radius <= shell::MIN_RADIUS {
            return Err(ConfigError::NodeSizeTooSmall(self.node_size));
        }
        if let Topology::Pair { separation } = self.topology
            && !(separation.is_finite() && separation > 0.0)
        {
            return Err(ConfigError::NonPositiveSeparation(separation));
        }
        if self.reproduction_cap == 0 {
            return Err(ConfigError::ZeroReproductionCap);
        }
        Ok(())
    }

    /// Derives the growth parameters used by the shell and the oracle.
    pub fn growth_params(&self) -> GrowthParams {
        GrowthParams::from_node_size(self.node_size, self.reproduction_cap)
    }
}

/// Numeric parameters that drive growth, derived from [`SimulationConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthParams {
    /// Length of every shell offset, and the basis of the clearance.
    pub radius: f32,
    /// Margin added to the clearance for the crowding check.
    pub extra_clearance: i64,
    pub reproduction_cap: u32,
}

impl GrowthParams {
    pub fn from_node_size(node_size: f32, reproduction_cap: u32) -> Self {
        let radius = node_size / SIZE_TO_RADIUS;
        Self {
            radius,
            extra_clearance: (CROWDING_FACTOR * radius).round_ties_even() as i64,
            reproduction_cap,
        }
    }

    /// Minimum integer distance a candidate must keep from every other node.
    #[inline]
    pub fn clearance(&self) -> i64 {
        self.radius.trunc() as i64
    }

    /// Distance the 6th-nearest distinct neighbor of a parent must reach.
    #[inline]
    pub fn crowding_threshold(&self) -> i64 {
        self.clearance() + self.extra_clearance
    }
}
