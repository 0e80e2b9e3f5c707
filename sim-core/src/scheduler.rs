//! Cooperative round-robin driver for the growth fronts.
//!
//! Every registered front is stepped exactly once per tick, in registration
//! order. Each step runs to completion before the next front's turn, so a
//! front sees every node accepted earlier in the same tick. The scheduler
//! never stops on its own; an exhausted front keeps getting polled (as a
//! no-op) until the host deregisters it.

use rand::Rng;

use crate::{
    engine::{AggregationEngine, StepOutcome},
    front::GrowthFront,
    registry::Registry,
    sink::NodeSink,
    types::{FrontId, NodeId},
};

/// Whether a front can still grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrontStatus {
    Continue,
    Exhausted,
}

impl From<StepOutcome> for FrontStatus {
    fn from(outcome: StepOutcome) -> Self {
        match outcome {
            StepOutcome::FrontExhausted => FrontStatus::Exhausted,
            _ => FrontStatus::Continue,
        }
    }
}

/// Per-front results of one tick, in polling order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub outcomes: Vec<(FrontId, StepOutcome)>,
}

impl TickReport {
    /// Nodes placed during the tick, in acceptance order.
    pub fn spawned(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outcomes.iter().filter_map(|(_, o)| o.spawned())
    }

    pub fn status(&self, front: FrontId) -> Option<FrontStatus> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == front)
            .map(|(_, o)| FrontStatus::from(*o))
    }

    /// `true` if at least one front was polled and every polled front
    /// reported [`FrontStatus::Exhausted`]. A tick with no registered fronts
    /// reports `false`.
    pub fn all_exhausted(&self) -> bool {
        !self.outcomes.is_empty()
            && self
                .outcomes
                .iter()
                .all(|(_, o)| FrontStatus::from(*o) == FrontStatus::Exhausted)
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    fronts: Vec<GrowthFront>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a front to the end of the polling order.
    pub fn register(&mut self, front: GrowthFront) {
        self.fronts.push(front);
    }

    /// Stops polling the front with the given id and hands it back.
    pub fn deregister(&mut self, id: FrontId) -> Option<GrowthFront> {
        let idx = self.fronts.iter().position(|f| f.id() == id)?;
        Some(self.fronts.remove(idx))
    }

    pub fn fronts(&self) -> &[GrowthFront] {
        &self.fronts
    }

    pub fn front(&self, id: FrontId) -> Option<&GrowthFront> {
        self.fronts.iter().find(|f| f.id() == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }

    /// `true` if no registered front has an active parent left.
    pub fn all_exhausted(&self) -> bool {
        self.fronts.iter().all(GrowthFront::is_empty)
    }

    /// Steps every registered front once.
    ///
    /// ### Parameters
    /// - `engine` - Shared shell and oracle.
    /// - `registry` - Shared node registry.
    /// - `rng` - Random source for all fronts.
    /// - `sink` - Receives accepted nodes in acceptance order.
    ///
    /// ### Returns
    /// A [`TickReport`] with one outcome per polled front.
    pub fn tick<R, S>(
        &mut self,
        engine: &AggregationEngine,
        registry: &mut Registry,
        rng: &mut R,
        sink: &mut S,
    ) -> TickReport
    where
        R: Rng + ?Sized,
        S: NodeSink + ?Sized,
    {
        let outcomes = self
            .fronts
            .iter_mut()
            .map(|front| (front.id(), engine.step(front, registry, rng, sink)))
            .collect();
        TickReport { outcomes }
    }
}
