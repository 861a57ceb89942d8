use glam::Vec3;

use crate::config::SimulationConfig;
use crate::core::soa::BodyStore;
use crate::utils::math::clamp_speed;

/// Heaviest living body found by [`Integrator::heaviest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaviestBody {
    pub slot: usize,
    pub mass: f32,
    pub position: Vec3,
}

/// Post-interaction pass: speed limit, optional drift, heaviest-body scan.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub max_speed: f32,
    pub advance_positions: bool,
}

impl Integrator {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            advance_positions: config.advance_positions,
        }
    }

    /// Clamps every living body's speed, then drifts it by `velocity * dt`
    /// when position integration is enabled.
    pub fn finish(&self, store: &mut BodyStore, dt: f32) {
        for i in 0..store.len() {
            if !store.is_alive(i) {
                continue;
            }
            let velocity = clamp_speed(store.velocities[i], self.max_speed);
            store.velocities[i] = velocity;
            if self.advance_positions {
                store.positions[i] += velocity * dt;
            }
        }
    }

    /// First living body with the largest mass.
    pub fn heaviest(store: &BodyStore) -> Option<HeaviestBody> {
        let mut best: Option<HeaviestBody> = None;
        for body in store.iter_living() {
            if best.map_or(true, |b| body.mass() > b.mass) {
                best = Some(HeaviestBody {
                    slot: body.index(),
                    mass: body.mass(),
                    position: body.position(),
                });
            }
        }
        best
    }
}
