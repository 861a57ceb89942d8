//! Stellar Burst – core/halo gravitational N-body engine for Rust.
//!
//! Bodies inside an adaptively sized core interact pairwise and merge when
//! they overlap; bodies outside it (the halo) feel the core as a single
//! point mass. Every merge emits a [`Burst`] event for effect collaborators.
//!
//! Per tick the driver calls [`GravitySystem::ingest`], [`GravitySystem::step`]
//! and [`GravitySystem::commit`] in that order, or lets [`Simulation`] do it.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod utils;
pub mod world;

pub use glam::Vec3;

pub use crate::collision::{Burst, BurstBuffer};
pub use crate::config::{ConfigError, EnergyModel, SimulationConfig, TargetCoreSize};
pub use crate::core::{
    soa::{BodyRef, BodyStore},
    types::{ExternalBody, SystemSnapshot},
};
pub use crate::dynamics::{HeaviestBody, InteractionEngine, Integrator, NewtonianGravity, Partitioner};
pub use crate::world::GravitySystem;

/// High-level convenience wrapper that owns a [`GravitySystem`] together with
/// the external body array it exchanges state with.
pub struct Simulation {
    system: GravitySystem,
    bodies: Vec<ExternalBody>,
}

impl Simulation {
    /// Wraps caller-provided bodies.
    pub fn new(config: SimulationConfig, bodies: Vec<ExternalBody>) -> config::Result<Self> {
        let system = GravitySystem::with_bodies(config, &bodies)?;
        Ok(Self { system, bodies })
    }

    /// Generates a reproducible population of `config.population` bodies.
    pub fn seeded(config: SimulationConfig, seed: u64) -> config::Result<Self> {
        let system = GravitySystem::seeded(config, seed)?;
        let bodies = system.export_bodies();
        Ok(Self { system, bodies })
    }

    /// Runs one ingest → step → commit cycle and returns the merges it produced.
    pub fn tick(&mut self, dt: f32) -> &[Burst] {
        self.system.ingest(&self.bodies);
        self.system.step(dt);
        self.system.commit(&mut self.bodies);
        self.system.bursts()
    }

    pub fn bodies(&self) -> &[ExternalBody] {
        &self.bodies
    }

    /// Between ticks the driver may edit records in place; slots must not be added or removed.
    pub fn bodies_mut(&mut self) -> &mut [ExternalBody] {
        &mut self.bodies
    }

    pub fn bursts(&self) -> &[Burst] {
        self.system.bursts()
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        self.system.snapshot()
    }

    pub fn system(&self) -> &GravitySystem {
        &self.system
    }
}
