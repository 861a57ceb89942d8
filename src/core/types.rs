use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Per-body record exchanged with the renderer at ingest and commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    /// Seconds until the renderer retires the particle. Zeroed when the body is absorbed.
    pub remaining_lifetime: f32,
    pub start_lifetime: f32,
}

impl Default for ExternalBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius: 0.0,
            remaining_lifetime: 0.0,
            start_lifetime: 0.0,
        }
    }
}

impl ExternalBody {
    pub fn new(position: Vec3, velocity: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            remaining_lifetime: 1.0,
            start_lifetime: 1.0,
        }
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.remaining_lifetime = lifetime;
        self.start_lifetime = lifetime;
        self
    }
}

/// Read-only system telemetry captured after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub total_mass: f32,
    pub mass_center: Vec3,
    pub core_center: Vec3,
    pub core_radius: f32,
    pub core_mass: f32,
    /// Core members still alive after the step's merges.
    pub core_size: usize,
    pub halo_size: usize,
    pub heaviest_body_position: Vec3,
    pub heaviest_body_mass: f32,
    pub heaviest_body_slot: Option<usize>,
    pub living_count: usize,
    pub body_count: usize,
}
