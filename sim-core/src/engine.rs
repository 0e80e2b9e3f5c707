//! One growth step for one front.
//!
//! A step is a single attempt: pick a random active parent, pick a random
//! shell offset, ask the [`ClearanceOracle`] about the resulting position,
//! and commit the node only on [`Verdict::Accept`]. A rejected step leaves
//! every structure untouched; the next tick simply tries again with fresh
//! random choices. There is no retry cap.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::{
    clearance::{ClearanceOracle, Verdict},
    config::GrowthParams,
    front::GrowthFront,
    registry::Registry,
    shell::DirectionShell,
    sink::{NodeEvent, NodeSink},
    types::NodeId,
};

/// What a single [`AggregationEngine::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new node was placed.
    Spawned {
        parent: NodeId,
        child: NodeId,
        /// The parent hit the reproduction cap on this step and left the
        /// active sequence.
        parent_burned_out: bool,
    },
    /// The candidate was refused; nothing changed.
    Rejected(Verdict),
    /// The shell has no offsets to offer, so no candidate can be formed.
    Stalled,
    /// The front has no active parents left.
    FrontExhausted,
}

impl StepOutcome {
    #[inline]
    pub fn spawned(&self) -> Option<NodeId> {
        match self {
            StepOutcome::Spawned { child, .. } => Some(*child),
            _ => None,
        }
    }
}

/// Shell plus oracle: everything a front needs to grow, shared by all fronts.
#[derive(Clone, Debug)]
pub struct AggregationEngine {
    shell: DirectionShell,
    oracle: ClearanceOracle,
}

impl AggregationEngine {
    /// Builds the shell and oracle for the given parameters.
    pub fn new(params: &GrowthParams) -> Self {
        Self::with_parts(
            DirectionShell::build(params.radius),
            ClearanceOracle::new(params),
        )
    }

    pub fn with_parts(shell: DirectionShell, oracle: ClearanceOracle) -> Self {
        Self { shell, oracle }
    }

    pub fn shell(&self) -> &DirectionShell {
        &self.shell
    }

    /// Runs one growth attempt for `front`.
    ///
    /// 1. An empty front reports [`StepOutcome::FrontExhausted`].
    /// 2. Picks a parent uniformly from the front's active sequence and an
    ///    offset uniformly from the shell.
    /// 3. Evaluates `parent.pos + offset` against the whole registry.
    /// 4. On acceptance appends the node (tagged with the front's color) to
    ///    `registry`, records it in `front`, emits it to `sink`, and prunes
    ///    the parent if it reached the cap.
    ///
    /// At most one candidate is evaluated per call.
    ///
    /// ### Parameters
    /// - `front` - Front to grow.
    /// - `registry` - Shared registry; read in full, appended on success.
    /// - `rng` - Source of the parent and offset choices.
    /// - `sink` - Receives the new node, if any.
    pub fn step<R, S>(
        &self,
        front: &mut GrowthFront,
        registry: &mut Registry,
        rng: &mut R,
        sink: &mut S,
    ) -> StepOutcome
    where
        R: Rng + ?Sized,
        S: NodeSink + ?Sized,
    {
        if front.is_empty() {
            front.stats_mut().exhausted_ticks += 1;
            return StepOutcome::FrontExhausted;
        }
        if self.shell.is_empty() {
            front.stats_mut().stalled += 1;
            return StepOutcome::Stalled;
        }

        let slot = rng.random_range(0..front.len());
        let offset_idx = rng.random_range(0..self.shell.len());
        let (Some(parent), Some(offset)) = (front.parent_at(slot), self.shell.get(offset_idx))
        else {
            front.stats_mut().stalled += 1;
            return StepOutcome::Stalled;
        };

        let candidate = registry.nodes()[parent].pos + offset.as_vec3();
        front.stats_mut().attempts += 1;

        let verdict = self.oracle.evaluate(candidate, parent, registry);
        match verdict {
            Verdict::Accept => {}
            Verdict::RejectTooClose => {
                front.stats_mut().too_close += 1;
                trace!(front = front.id(), parent, ?candidate, "candidate too close");
                return StepOutcome::Rejected(verdict);
            }
            Verdict::RejectCrowded => {
                front.stats_mut().crowded += 1;
                trace!(front = front.id(), parent, "parent crowded");
                return StepOutcome::Rejected(verdict);
            }
        }

        let child = registry.add_child(parent, candidate, front.id(), front.color());
        front.record_child(slot, child);
        front.stats_mut().accepted += 1;
        sink.node_added(NodeEvent::new(child, &registry.nodes()[child]));
        debug!(front = front.id(), parent, child, pos = ?candidate, "node placed");

        let parent_burned_out = front.prune_if_exhausted(slot);
        if front.is_empty() {
            info!(
                front = front.id(),
                burned_out = front.burned_out(),
                "front exhausted"
            );
        }

        StepOutcome::Spawned {
            parent,
            child,
            parent_burned_out,
        }
    }
}
