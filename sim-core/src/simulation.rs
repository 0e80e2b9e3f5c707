//! One-stop owner of a running simulation.
//!
//! [`Simulation`] bundles the registry, the shared engine, the scheduler and
//! the random source, so a host only has to call [`Simulation::tick`] once
//! per frame and feed a [`NodeSink`].

use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::{
    config::{GrowthParams, SimulationConfig},
    engine::AggregationEngine,
    error::ConfigError,
    front::GrowthFront,
    layout::{self, FrontSeed},
    registry::Registry,
    scheduler::{Scheduler, TickReport},
    sink::{NodeEvent, NodeSink},
    types::FrontId,
};

#[derive(Debug)]
pub struct Simulation {
    params: GrowthParams,
    registry: Registry,
    engine: AggregationEngine,
    scheduler: Scheduler,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    /// Validates `cfg` and builds the fronts it describes.
    ///
    /// ### Returns
    /// A simulation at tick 0 with one root per front in the registry, or the
    /// [`ConfigError`] that made the config unusable.
    pub fn new(cfg: &SimulationConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let seeds = layout::seed_fronts(cfg, &mut rng);

        Ok(Self::from_seeds(cfg.growth_params(), &seeds, rng))
    }

    /// Builds a simulation from explicit parameters and roots.
    ///
    /// Front ids follow the order of `seeds`.
    pub fn from_seeds(params: GrowthParams, seeds: &[FrontSeed], rng: StdRng) -> Self {
        let engine = AggregationEngine::new(&params);
        let mut registry = Registry::new();
        let mut scheduler = Scheduler::new();

        for (id, seed) in seeds.iter().enumerate() {
            let root = registry.add_root(seed.pos, id, seed.color);
            scheduler.register(GrowthFront::new(
                id,
                root,
                seed.color,
                params.reproduction_cap,
            ));
        }

        info!(
            fronts = scheduler.len(),
            radius = params.radius,
            clearance = params.clearance(),
            crowding_threshold = params.crowding_threshold(),
            shell_offsets = engine.shell().len(),
            "simulation ready"
        );

        Self {
            params,
            registry,
            engine,
            scheduler,
            rng,
            ticks: 0,
        }
    }

    /// Advances every registered front by one step.
    pub fn tick<S: NodeSink + ?Sized>(&mut self, sink: &mut S) -> TickReport {
        self.ticks += 1;
        self.scheduler
            .tick(&self.engine, &mut self.registry, &mut self.rng, sink)
    }

    /// Runs `n` ticks and returns how many nodes were placed.
    pub fn run_ticks<S: NodeSink + ?Sized>(&mut self, n: usize, sink: &mut S) -> usize {
        let mut placed = 0;
        for _ in 0..n {
            placed += self.tick(sink).spawned().count();
        }
        placed
    }

    /// Root nodes as events, for a renderer that starts after construction.
    pub fn root_events(&self) -> impl Iterator<Item = NodeEvent> + '_ {
        self.scheduler.fronts().iter().filter_map(|f| {
            let root = f.root();
            self.registry.get(root).map(|n| NodeEvent::new(root, n))
        })
    }

    /// Stops polling a front. Its nodes stay in the registry.
    pub fn deregister(&mut self, front: FrontId) -> Option<GrowthFront> {
        self.scheduler.deregister(front)
    }

    pub fn all_exhausted(&self) -> bool {
        self.scheduler.all_exhausted()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn fronts(&self) -> &[GrowthFront] {
        self.scheduler.fronts()
    }

    pub fn front(&self, id: FrontId) -> Option<&GrowthFront> {
        self.scheduler.front(id)
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
