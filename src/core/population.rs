//! Initial population: a sphere of bodies spinning about the Y axis.

use crate::config::SimulationConfig;
use crate::core::types::ExternalBody;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Radius of the seeding sphere for `population` bodies.
pub fn system_radius(config: &SimulationConfig) -> f32 {
    config.system_radius_scale * (config.population as f32 * 3.0 / (4.0 * PI)).sqrt()
}

/// Generates `config.population` bodies.
///
/// Positions are uniform inside the seeding sphere. Each body gets a
/// tangential velocity in the XZ plane whose magnitude grows with the square
/// root of its horizontal distance from the axis.
pub fn generate<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Vec<ExternalBody> {
    let radius = system_radius(config);
    (0..config.population)
        .map(|_| {
            let position = sample_in_sphere(rng) * radius;

            let horizontal = Vec3::new(position.x, 0.0, position.z);
            let boost = (horizontal.length() * 0.1).sqrt();
            let outward = horizontal.normalize_or_zero();
            let tangent = Vec3::new(outward.z, 0.0, -outward.x);
            let speed = sample_range(rng, config.min_start_speed, config.max_start_speed);

            let body_radius = sample_range(rng, config.min_start_radius, config.max_start_radius);

            ExternalBody::new(position, tangent * speed * boost, body_radius)
                .with_lifetime(config.start_lifetime)
        })
        .collect()
}

fn sample_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn sample_in_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // Rejection sampling from the unit cube.
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
