//! Two-phase accept/reject test for candidate node positions.
//!
//! 1. **Clearance**: the candidate must be at least `trunc(radius)` away
//!    (integer-truncated distance) from every node other than its parent.
//! 2. **Crowding**: looking at the *parent*, collect the distinct truncated
//!    distances to every other node. A parent with at most five distinct
//!    distances is never crowded. Otherwise the 6th-smallest distinct
//!    distance must reach `trunc(radius) + extra_clearance`.
//!
//! Both phases are a full scan over the registry.

use crate::{config::GrowthParams, registry::Registry, types::NodeId};
use glam::Vec3;

/// Number of distinct neighbor distances a parent may have before the
/// crowding threshold applies.
pub const SPARSE_NEIGHBORHOOD: usize = 5;

/// Result of evaluating one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// The candidate is within the clearance of some other node.
    RejectTooClose,
    /// The parent sits in a dense neighborhood.
    RejectCrowded,
}

#[derive(Clone, Copy, Debug)]
pub struct ClearanceOracle {
    clearance: i64,
    crowding_threshold: i64,
}

impl ClearanceOracle {
    pub fn new(params: &GrowthParams) -> Self {
        Self {
            clearance: params.clearance(),
            crowding_threshold: params.crowding_threshold(),
        }
    }

    /// Decides whether a node may be placed at `candidate` as a child of `parent`.
    ///
    /// Pure: reads `registry` as it is at call time and mutates nothing.
    ///
    /// ### Parameters
    /// - `candidate` - Proposed position of the new node.
    /// - `parent` - Node the candidate would be spawned from. It is excluded
    ///   from both scans.
    /// - `registry` - Every node placed so far, across all fronts.
    ///
    /// ### Returns
    /// [`Verdict::Accept`], or the reason for rejection. Phase 2 only runs
    /// if phase 1 passes.
    pub fn evaluate(&self, candidate: Vec3, parent: NodeId, registry: &Registry) -> Verdict {
        if let Some(nearest) = registry.truncated_distances(candidate, parent).min()
            && nearest < self.clearance
        {
            return Verdict::RejectTooClose;
        }

        // Unknown parent: there is no neighborhood to measure.
        let Some(parent_node) = registry.get(parent) else {
            return Verdict::Accept;
        };

        let mut neighbors: Vec<i64> = registry
            .truncated_distances(parent_node.pos, parent)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();

        match neighbors.get(SPARSE_NEIGHBORHOOD) {
            None => Verdict::Accept,
            Some(&sixth) if sixth >= self.crowding_threshold => Verdict::Accept,
            Some(_) => Verdict::RejectCrowded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const C: Color = Color::gray(0.5);

    /// radius 5, extra clearance 9: clearance 5, crowding threshold 14.
    fn oracle() -> ClearanceOracle {
        ClearanceOracle::new(&GrowthParams {
            radius: 5.0,
            extra_clearance: 9,
            reproduction_cap: 2,
        })
    }

    /// Parent at the origin plus five neighbors at distinct distances
    /// 6..=10 along -x, all inside the crowding threshold.
    fn five_neighbor_registry() -> (Registry, NodeId) {
        let mut reg = Registry::new();
        let parent = reg.add_root(Vec3::ZERO, 0, C);
        for d in 6..=10 {
            reg.add_root(Vec3::new(-(d as f32), 0.0, 0.0), 0, C);
        }
        (reg, parent)
    }

    #[test]
    fn lone_parent_accepts_any_candidate() {
        let mut reg = Registry::new();
        let parent = reg.add_root(Vec3::ZERO, 0, C);
        assert_eq!(
            oracle().evaluate(Vec3::new(5.0, 0.0, 0.0), parent, &reg),
            Verdict::Accept
        );
    }

    #[test]
    fn rejects_candidate_too_close_to_another_node() {
        let mut reg = Registry::new();
        let parent = reg.add_root(Vec3::ZERO, 0, C);
        reg.add_root(Vec3::new(9.0, 0.0, 0.0), 1, C);

        // Distance 4 to the second root.
        assert_eq!(
            oracle().evaluate(Vec3::new(5.0, 0.0, 0.0), parent, &reg),
            Verdict::RejectTooClose
        );
    }

    #[test]
    fn clearance_compares_truncated_distances() {
        let mut reg = Registry::new();
        let parent = reg.add_root(Vec3::ZERO, 0, C);
        // 4.9 away from the candidate: truncates to 4, rejected.
        reg.add_root(Vec3::new(9.9, 0.0, 0.0), 1, C);
        assert_eq!(
            oracle().evaluate(Vec3::new(5.0, 0.0, 0.0), parent, &reg),
            Verdict::RejectTooClose
        );

        // Exactly 5 away: accepted.
        let mut reg = Registry::new();
        let parent = reg.add_root(Vec3::ZERO, 0, C);
        reg.add_root(Vec3::new(10.0, 0.0, 0.0), 1, C);
        assert_eq!(
            oracle().evaluate(Vec3::new(5.0, 0.0, 0.0), parent, &reg),
            Verdict::Accept
        );
    }

    #[test]
    fn parent_itself_is_ignored_by_clearance() {
        let mut reg = Registry::new();
        let parent = reg.add_root(Vec3::ZERO, 0, C);
        // Candidate only 3 from the parent; the parent does not count.
        assert_eq!(
            oracle().evaluate(Vec3::new(3.0, 0.0, 0.0), parent, &reg),
            Verdict::Accept
        );
    }

    #[test]
    fn sparse_neighborhood_bypasses_crowding_check() {
        let (reg, parent) = five_neighbor_registry();
        let candidate = Vec3::new(5.0, 0.0, 0.0);

        assert!(reg.truncated_distances(candidate, parent).all(|d| d >= 5));
        assert_eq!(oracle().evaluate(candidate, parent, &reg), Verdict::Accept);
    }

    #[test]
    fn sixth_close_neighbor_makes_parent_crowded() {
        let (mut reg, parent) = five_neighbor_registry();
        reg.add_root(Vec3::new(0.0, -11.0, 0.0), 0, C);
        let candidate = Vec3::new(5.0, 0.0, 0.0);

        assert!(reg.truncated_distances(candidate, parent).all(|d| d >= 5));
        assert_eq!(
            oracle().evaluate(candidate, parent, &reg),
            Verdict::RejectCrowded
        );
    }

    #[test]
    fn sixth_neighbor_at_threshold_is_not_crowded() {
        let (mut reg, parent) = five_neighbor_registry();
        reg.add_root(Vec3::new(0.0, -14.0, 0.0), 0, C);
        assert_eq!(
            oracle().evaluate(Vec3::new(5.0, 0.0, 0.0), parent, &reg),
            Verdict::Accept
        );
    }

    #[test]
    fn repeated_distances_count_once() {
        let (mut reg, parent) = five_neighbor_registry();
        // Another neighbor at distance 8: still five distinct distances.
        reg.add_root(Vec3::new(0.0, 0.0, -8.0), 0, C);
        assert_eq!(
            oracle().evaluate(Vec3::new(5.0, 0.0, 0.0), parent, &reg),
            Verdict::Accept
        );
    }

    #[test]
    fn crowding_is_measured_from_the_parent_not_the_candidate() {
        let (mut reg, parent) = five_neighbor_registry();
        reg.add_root(Vec3::new(0.0, -11.0, 0.0), 0, C);
        // Far away candidate, still rejected because the parent is crowded.
        assert_eq!(
            oracle().evaluate(Vec3::new(100.0, 100.0, 100.0), parent, &reg),
            Verdict::RejectCrowded
        );
    }
}
