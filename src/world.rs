use std::time::Instant;

use crate::{
    collision::burst::{Burst, BurstBuffer},
    config::{Result, SimulationConfig},
    core::{
        population,
        soa::BodyStore,
        types::{ExternalBody, SystemSnapshot},
    },
    dynamics::{
        integrator::{HeaviestBody, Integrator},
        interaction::InteractionEngine,
        partition::Partitioner,
    },
    utils::{
        logging::warn_if_step_budget_exceeded,
        math::sanitize_dt,
        profiling::{PhaseTimer, StepProfiler},
    },
};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

/// Central simulation container orchestrating the body store, partitioner,
/// interaction engine, and burst sink.
///
/// Callers serialize `ingest` → `step` → `commit` once per tick; none of the
/// three may overlap.
pub struct GravitySystem {
    config: SimulationConfig,
    store: BodyStore,
    partitioner: Partitioner,
    engine: InteractionEngine,
    integrator: Integrator,
    bursts: BurstBuffer,
    profiler: StepProfiler,
    total_mass: f32,
    established: bool,
    heaviest: Option<HeaviestBody>,
    last_merges: usize,
    step_count: u64,
    total_bursts: u64,
}

impl GravitySystem {
    /// Empty system with all buffers sized to `config.population`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let capacity = config.population;

        log::info!(
            "gravity system: capacity {capacity}, target core {}, core radius [{}, {}]",
            config.target_core_size(),
            config.min_core_radius,
            config.max_core_radius
        );

        Ok(Self {
            store: BodyStore::with_capacity(capacity),
            partitioner: Partitioner::new(&config, capacity),
            engine: InteractionEngine::new(&config),
            integrator: Integrator::new(&config),
            bursts: BurstBuffer::with_capacity(capacity),
            profiler: StepProfiler::default(),
            total_mass: 0.0,
            established: false,
            heaviest: None,
            last_merges: 0,
            step_count: 0,
            total_bursts: 0,
            config,
        })
    }

    /// System populated from caller-provided bodies.
    pub fn with_bodies(config: SimulationConfig, bodies: &[ExternalBody]) -> Result<Self> {
        let mut system = Self::new(config)?;
        system.ingest(bodies);
        Ok(system)
    }

    /// System populated with a reproducible generated population.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let bodies = population::generate(&config, &mut rng);
        log::info!(
            "seeded {} bodies (seed {seed}, radius {:.2})",
            bodies.len(),
            population::system_radius(&config)
        );
        Self::with_bodies(config, &bodies)
    }

    /// Loads this tick's body state. The first non-empty ingest fixes the
    /// total mass and the initial core centre.
    pub fn ingest(&mut self, bodies: &[ExternalBody]) -> usize {
        let count = self.store.ingest(bodies);
        if !self.established {
            self.establish();
        }
        count
    }

    fn establish(&mut self) {
        let mut weighted = Vec3::ZERO;
        let mut mass = 0.0;
        for body in self.store.iter_living() {
            weighted += body.position() * body.mass();
            mass += body.mass();
        }
        if mass <= 0.0 {
            return;
        }

        self.total_mass = mass;
        self.partitioner.reset_center(weighted / mass);
        self.heaviest = Integrator::heaviest(&self.store);
        self.established = true;
        log::debug!("population established: total mass {mass:.4}");
    }

    /// Advances the ingested state by `dt`. Negative or non-finite `dt` counts as zero.
    pub fn step(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        let start = Instant::now();
        self.profiler.reset();
        self.bursts.clear();

        {
            let _phase = PhaseTimer::new("partition", &mut self.profiler.partition_time);
            self.partitioner.partition(&self.store, dt);
        }
        let merges = {
            let _phase = PhaseTimer::new("interaction::core", &mut self.profiler.core_time);
            self.engine.resolve_core(
                &mut self.store,
                self.partitioner.core(),
                dt,
                &mut self.bursts,
            )
        };
        {
            let _phase = PhaseTimer::new("interaction::halo", &mut self.profiler.halo_time);
            self.engine.apply_halo_field(
                &mut self.store,
                self.partitioner.halo(),
                self.partitioner.core_center(),
                self.partitioner.core_mass(),
                dt,
            );
        }
        {
            let _phase = PhaseTimer::new("integrator", &mut self.profiler.integrator_time);
            self.integrator.finish(&mut self.store, dt);
            self.heaviest = Integrator::heaviest(&self.store);
        }

        self.last_merges = merges;
        self.step_count += 1;
        self.total_bursts += self.bursts.len() as u64;

        let elapsed = start.elapsed();
        self.profiler.total_step_time = elapsed;
        self.profiler.core_count = self.partitioner.core().len();
        self.profiler.halo_count = self.partitioner.halo().len();
        self.profiler.living_count = self.profiler.core_count + self.profiler.halo_count - merges;
        self.profiler.burst_count = self.bursts.len();
        self.profiler.report();

        if let Some(budget) = self.config.step_budget_ms {
            warn_if_step_budget_exceeded(elapsed, budget);
        }
    }

    /// Writes the canonical state into `out`. Returns the number of records written.
    pub fn commit(&mut self, out: &mut [ExternalBody]) -> usize {
        if self.config.refresh_lifetimes {
            self.store.refresh_lifetimes();
        }
        self.store.commit(out)
    }

    /// Allocating copy of every ingested slot, for initial hand-off to a renderer.
    pub fn export_bodies(&self) -> Vec<ExternalBody> {
        (0..self.store.len())
            .map(|i| self.store.to_external(i))
            .collect()
    }

    /// Merge events produced by the last step.
    pub fn bursts(&self) -> &[Burst] {
        self.bursts.as_slice()
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        let heaviest = self.heaviest;
        SystemSnapshot {
            total_mass: self.total_mass,
            mass_center: self.partitioner.mass_center(),
            core_center: self.partitioner.core_center(),
            core_radius: self.partitioner.core_radius(),
            core_mass: self.partitioner.core_mass(),
            core_size: self.partitioner.core().len() - self.last_merges,
            halo_size: self.partitioner.halo().len(),
            heaviest_body_position: heaviest.map_or(Vec3::ZERO, |h| h.position),
            heaviest_body_mass: heaviest.map_or(0.0, |h| h.mass),
            heaviest_body_slot: heaviest.map(|h| h.slot),
            living_count: self.store.living_count(),
            body_count: self.store.len(),
        }
    }

    pub fn total_mass(&self) -> f32 {
        self.total_mass
    }

    pub fn core_radius(&self) -> f32 {
        self.partitioner.core_radius()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Bursts emitted since construction.
    pub fn total_bursts(&self) -> u64 {
        self.total_bursts
    }
}
