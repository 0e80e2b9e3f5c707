use crate::types::{Color, FrontId, NodeId};

/// One entry of a front's active sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    node: NodeId,
    children: u32,
}

/// Per-front counters. Rejections are expected steady-state outcomes,
/// so these exist only to make stalls visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrontStats {
    /// Candidates evaluated.
    pub attempts: u64,
    pub accepted: u64,
    pub too_close: u64,
    pub crowded: u64,
    /// Ticks on which the front had no active parent left.
    pub exhausted_ticks: u64,
    /// Ticks on which no candidate could be formed (empty shell).
    pub stalled: u64,
}

/// Mutable growth state of one root: the nodes that may still reproduce
/// and how many children each of them has spawned.
///
/// A front holds registry ids only; it never owns nodes. Entries leave the
/// active sequence once their counter reaches the reproduction cap and
/// never come back.
#[derive(Debug)]
pub struct GrowthFront {
    id: FrontId,
    root: NodeId,
    color: Color,
    reproduction_cap: u32,
    active: Vec<Slot>,
    burned_out: usize,
    stats: FrontStats,
}

impl GrowthFront {
    /// Creates a front whose only active parent is `root`.
    pub fn new(id: FrontId, root: NodeId, color: Color, reproduction_cap: u32) -> Self {
        Self {
            id,
            root,
            color,
            reproduction_cap,
            active: vec![Slot {
                node: root,
                children: 0,
            }],
            burned_out: 0,
            stats: FrontStats::default(),
        }
    }

    /// A front with nothing left to grow.
    #[cfg(test)]
    pub(crate) fn exhausted(id: FrontId, color: Color) -> Self {
        Self {
            id,
            root: 0,
            color,
            reproduction_cap: 2,
            active: Vec::new(),
            burned_out: 1,
            stats: FrontStats::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> FrontId {
        self.id
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Color stamped on every node this front spawns.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn reproduction_cap(&self) -> u32 {
        self.reproduction_cap
    }

    /// Ids of the nodes that may still reproduce, in insertion order.
    pub fn active_parents(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.active.iter().map(|s| s.node)
    }

    /// Number of active parents.
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// `true` once every node of the front has burned out.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Node id stored at position `slot` of the active sequence.
    #[inline]
    pub fn parent_at(&self, slot: usize) -> Option<NodeId> {
        self.active.get(slot).map(|s| s.node)
    }

    /// Current child count of `node`, or `None` if it is not active.
    pub fn reproduction_count(&self, node: NodeId) -> Option<u32> {
        self.active
            .iter()
            .find(|s| s.node == node)
            .map(|s| s.children)
    }

    /// Number of nodes that have been pruned from this front.
    #[inline]
    pub fn burned_out(&self) -> usize {
        self.burned_out
    }

    #[inline]
    pub fn stats(&self) -> &FrontStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut FrontStats {
        &mut self.stats
    }

    /// Registers `child` as spawned by the parent at `slot`.
    ///
    /// The child joins the end of the active sequence with a zero counter
    /// and the parent's counter goes up by one.
    ///
    /// ### Parameters
    /// - `slot` - Position of the parent in the active sequence.
    /// - `child` - Registry id of the new node.
    ///
    /// ### Panics
    /// Panics if `slot` is out of bounds.
    pub fn record_child(&mut self, slot: usize, child: NodeId) {
        self.active[slot].children += 1;
        self.active.push(Slot {
            node: child,
            children: 0,
        });
    }

    /// Removes the parent at `slot` if it has reached the reproduction cap.
    ///
    /// ### Returns
    /// `true` if the parent was removed.
    pub fn prune_if_exhausted(&mut self, slot: usize) -> bool {
        match self.active.get(slot) {
            Some(s) if s.children >= self.reproduction_cap => {
                self.active.remove(slot);
                self.burned_out += 1;
                true
            }
            _ => false,
        }
    }
}
