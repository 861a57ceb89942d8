//! Core/halo classification with an adaptive core radius.
//!
//! Each tick every living body is tested against the previous tick's core
//! centre. The radius then moves proportionally towards the size that would
//! hold the target population, one bounded step per tick, which keeps the
//! quadratic core pass bounded as clustering changes.

use crate::config::SimulationConfig;
use crate::core::soa::BodyStore;
use glam::Vec3;

#[derive(Debug, Clone)]
pub struct Partitioner {
    min_radius: f32,
    max_radius: f32,
    change_rate: f32,
    target_core_size: usize,

    core_radius: f32,
    core_center: Vec3,
    core_mass: f32,
    mass_center: Vec3,
    living_mass: f32,

    core: Vec<usize>,
    halo: Vec<usize>,
}

impl Partitioner {
    /// Index buffers are sized to `capacity` and reused every tick.
    pub fn new(config: &SimulationConfig, capacity: usize) -> Self {
        Self {
            min_radius: config.min_core_radius,
            max_radius: config.max_core_radius,
            change_rate: config.core_change_rate,
            target_core_size: config.target_core_size(),
            core_radius: config.min_core_radius,
            core_center: Vec3::ZERO,
            core_mass: 0.0,
            mass_center: Vec3::ZERO,
            living_mass: 0.0,
            core: Vec::with_capacity(capacity),
            halo: Vec::with_capacity(capacity),
        }
    }

    /// Places both centres at `center`, used once the population is known.
    pub fn reset_center(&mut self, center: Vec3) {
        self.core_center = center;
        self.mass_center = center;
    }

    /// Reclassifies living bodies, recomputes centres, and adapts the radius.
    pub fn partition(&mut self, store: &BodyStore, dt: f32) {
        self.core.clear();
        self.halo.clear();

        let previous_center = self.core_center;
        let radius_sq = self.core_radius * self.core_radius;

        let mut weighted_position = Vec3::ZERO;
        let mut living_mass = 0.0;
        let mut core_weighted_position = Vec3::ZERO;
        let mut core_mass = 0.0;

        for i in 0..store.len() {
            if !store.is_alive(i) {
                continue;
            }
            let mass = store.masses[i];
            let position = store.positions[i];

            weighted_position += position * mass;
            living_mass += mass;

            if (position - previous_center).length_squared() < radius_sq {
                self.core.push(i);
                core_weighted_position += position * mass;
                core_mass += mass;
            } else {
                self.halo.push(i);
            }
        }

        self.living_mass = living_mass;
        if living_mass > 0.0 {
            self.mass_center = weighted_position / living_mass;
        }

        if self.core.is_empty() {
            self.core_mass = 0.0;
            self.core_center = self.mass_center;
        } else {
            self.core_mass = core_mass;
            self.core_center = core_weighted_position / core_mass;
        }

        self.adapt_radius(dt);
    }

    fn adapt_radius(&mut self, dt: f32) {
        let delta = dt * self.change_rate * self.core_radius;
        self.core_radius = if self.core.len() > self.target_core_size {
            (self.core_radius - delta).max(self.min_radius)
        } else {
            (self.core_radius + delta).min(self.max_radius)
        };
    }

    pub fn core(&self) -> &[usize] {
        &self.core
    }

    pub fn halo(&self) -> &[usize] {
        &self.halo
    }

    pub fn core_radius(&self) -> f32 {
        self.core_radius
    }

    pub fn core_center(&self) -> Vec3 {
        self.core_center
    }

    pub fn core_mass(&self) -> f32 {
        self.core_mass
    }

    pub fn mass_center(&self) -> Vec3 {
        self.mass_center
    }

    /// Sum of living masses seen by the last partition.
    pub fn living_mass(&self) -> f32 {
        self.living_mass
    }

    pub fn target_core_size(&self) -> usize {
        self.target_core_size
    }
}
