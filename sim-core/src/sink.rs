//! Output side of the core: one event per accepted node.
//!
//! Events are delivered in acceptance order across all fronts. A sink only
//! observes; it cannot reject or modify a node.

use crate::{
    registry::Node,
    types::{Color, FrontId, NodeId},
};
use glam::Vec3;

/// A node that has just been added to the registry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeEvent {
    pub id: NodeId,
    pub pos: Vec3,
    pub color: Color,
    pub front: FrontId,
}

impl NodeEvent {
    pub fn new(id: NodeId, node: &Node) -> Self {
        Self {
            id,
            pos: node.pos,
            color: node.color,
            front: node.front,
        }
    }
}

/// Receiver for accepted nodes (typically a renderer).
pub trait NodeSink {
    fn node_added(&mut self, event: NodeEvent);
}

/// Collects events in order.
impl NodeSink for Vec<NodeEvent> {
    fn node_added(&mut self, event: NodeEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NodeSink for NullSink {
    fn node_added(&mut self, _event: NodeEvent) {}
}

impl<S: NodeSink + ?Sized> NodeSink for &mut S {
    fn node_added(&mut self, event: NodeEvent) {
        (**self).node_added(event);
    }
}
