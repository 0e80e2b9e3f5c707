use serde::{Deserialize, Serialize};

/// Identifier for a node in a [`crate::registry::Registry`].
///
/// This is an index into the registry's node sequence. Indices are stable:
/// the registry is append-only, so an id stays valid for the lifetime of
/// the registry that issued it.
pub type NodeId = usize;

/// Identifier for a [`crate::front::GrowthFront`], equal to its
/// registration order in the [`crate::scheduler::Scheduler`].
pub type FrontId = usize;

/// Opaque RGBA color tag attached to every node a front spawns.
///
/// The core never interprets it; it is fixed when the front is created and
/// copied verbatim onto each node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}
