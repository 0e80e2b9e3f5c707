//! Starting layout: one root position and one color per front.

use glam::Vec3;
use rand::Rng;

use crate::{
    config::{ColorScheme, SimulationConfig, Topology},
    types::Color,
};

/// Root positions of the cerebellum layout, after the anchoring-center
/// arrangement described by Sudarov & Joyner (2007). The four-root variant
/// uses the first four.
pub const CEREBELLUM_ROOTS: [Vec3; 5] = [
    Vec3::new(-25.0, 0.0, 0.0),
    Vec3::new(25.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 13.0),
    Vec3::new(0.0, 0.0, -17.0),
    Vec3::new(-25.0, 0.0, -17.0),
];

/// Red, green, blue, yellow, white.
pub const PALETTE: [Color; 5] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(0.0, 0.5, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 1.0, 0.0),
    Color::rgb(1.0, 1.0, 1.0),
];

/// Root position and color tag for one front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontSeed {
    pub pos: Vec3,
    pub color: Color,
}

/// Root positions for a topology, in front registration order.
pub fn root_positions(topology: &Topology) -> Vec<Vec3> {
    match *topology {
        Topology::Single => vec![Vec3::ZERO],
        Topology::Pair { separation } => {
            let half = separation / 2.0;
            vec![Vec3::new(-half, 0.0, 0.0), Vec3::new(half, 0.0, 0.0)]
        }
        Topology::Cerebellum { lobes } => CEREBELLUM_ROOTS[..lobes.count()].to_vec(),
    }
}

/// A color whose channels are drawn from `{0.00, 0.01, ..., 1.00}`.
pub fn random_color(rng: &mut (impl Rng + ?Sized)) -> Color {
    let mut channel = || rng.random_range(0..=100u32) as f32 / 100.0;
    Color::rgb(channel(), channel(), channel())
}

/// One color per front for the given scheme.
///
/// ### Parameters
/// - `scheme` - Which family of colors to draw from.
/// - `fronts` - Number of fronts.
/// - `ordered_palette` - Assign palette entries in order instead of at
///   random. The cerebellum layout uses this so each lobe gets a distinct
///   color.
/// - `rng` - Used by the random and unordered palette schemes.
pub fn front_colors(
    scheme: ColorScheme,
    fronts: usize,
    ordered_palette: bool,
    rng: &mut (impl Rng + ?Sized),
) -> Vec<Color> {
    match scheme {
        ColorScheme::Gray => gray_shades(fronts),
        ColorScheme::Random => (0..fronts).map(|_| random_color(rng)).collect(),
        ColorScheme::Palette if ordered_palette => {
            PALETTE.iter().copied().cycle().take(fronts).collect()
        }
        ColorScheme::Palette => (0..fronts)
            .map(|_| PALETTE[rng.random_range(0..PALETTE.len())])
            .collect(),
    }
}

fn gray_shades(fronts: usize) -> Vec<Color> {
    match fronts {
        1 => vec![Color::gray(0.4)],
        2 => vec![Color::gray(0.4), Color::gray(0.6)],
        n => (0..n)
            .map(|i| Color::gray(((3 + i) as f32 / 10.0).min(1.0)))
            .collect(),
    }
}

/// Root positions and colors for every front the config describes.
pub fn seed_fronts(cfg: &SimulationConfig, rng: &mut (impl Rng + ?Sized)) -> Vec<FrontSeed> {
    let positions = root_positions(&cfg.topology);
    let ordered = matches!(cfg.topology, Topology::Cerebellum { .. });
    let colors = front_colors(cfg.color_scheme, positions.len(), ordered, rng);

    positions
        .into_iter()
        .zip(colors)
        .map(|(pos, color)| FrontSeed { pos, color })
        .collect()
}
