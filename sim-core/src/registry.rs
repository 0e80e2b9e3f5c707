use crate::types::{Color, FrontId, NodeId};
use glam::Vec3;

/// A placed node. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub pos: Vec3,
    pub front: FrontId,
    pub color: Color,
    /// The node this one was spawned from; `None` for roots.
    pub parent: Option<NodeId>,
}

/// Append-only store of every node across all fronts.
///
/// Insertion order is creation order and a [`NodeId`] is the insertion
/// index. Nothing is ever removed or moved, so ids held by fronts stay valid.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<Node>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, pos: Vec3, front: FrontId, color: Color) -> NodeId {
        self.push(Node {
            pos,
            front,
            color,
            parent: None,
        })
    }

    pub fn add_child(&mut self, parent: NodeId, pos: Vec3, front: FrontId, color: Color) -> NodeId {
        self.push(Node {
            pos,
            front,
            color,
            parent: Some(parent),
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Integer-truncated distances from `pos` to every node except `skip`.
    pub fn truncated_distances(
        &self,
        pos: Vec3,
        skip: NodeId,
    ) -> impl Iterator<Item = i64> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |&(id, _)| id != skip)
            .map(move |(_, n)| n.pos.distance(pos).trunc() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Color = Color::gray(0.4);

    #[test]
    fn ids_follow_insertion_order() {
        let mut reg = Registry::new();
        let root = reg.add_root(Vec3::ZERO, 0, GRAY);
        let child = reg.add_child(root, Vec3::new(5.0, 0.0, 0.0), 0, GRAY);

        assert_eq!(root, 0);
        assert_eq!(child, 1);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(child).unwrap().parent, Some(root));
        assert_eq!(reg.get(root).unwrap().parent, None);
        assert!(reg.get(2).is_none());
    }

    #[test]
    fn truncated_distances_skip_the_given_node() {
        let mut reg = Registry::new();
        reg.add_root(Vec3::ZERO, 0, GRAY);
        reg.add_root(Vec3::new(3.0, 4.0, 0.0), 1, GRAY);
        reg.add_root(Vec3::new(0.0, 0.0, 7.9), 2, GRAY);

        let d: Vec<i64> = reg.truncated_distances(Vec3::ZERO, 0).collect();
        // 5.0 exactly, and 7.9 truncated to 7.
        assert_eq!(d, vec![5, 7]);
    }

    #[test]
    fn empty_registry_has_no_distances() {
        let reg = Registry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.truncated_distances(Vec3::ONE, 0).count(), 0);
    }
}
