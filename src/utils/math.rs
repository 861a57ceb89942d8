//! Additional math helpers layered on top of `glam`.

use glam::Vec3;
use std::f32::consts::PI;

/// Mass of a uniform-density sphere of the given radius, `4/3 π r³`.
#[inline]
pub fn mass_from_radius(radius: f32) -> f32 {
    4.0 / 3.0 * PI * radius * radius * radius
}

/// Inverse of [`mass_from_radius`], `cbrt(3 m / 4π)`.
#[inline]
pub fn radius_from_mass(mass: f32) -> f32 {
    (3.0 * mass / (4.0 * PI)).cbrt()
}

/// Rescales `velocity` to `max_speed` along the same direction when it is faster.
#[inline]
pub fn clamp_speed(velocity: Vec3, max_speed: f32) -> Vec3 {
    if velocity.length_squared() > max_speed * max_speed {
        velocity.normalize_or_zero() * max_speed
    } else {
        velocity
    }
}

/// Replaces negative or non-finite timesteps with zero.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn radius_and_mass_are_inverse() {
        for radius in [0.01_f32, 0.3, 1.0, 7.5] {
            assert_relative_eq!(radius_from_mass(mass_from_radius(radius)), radius, max_relative = 1e-5);
        }
    }

    #[test]
    fn clamp_preserves_direction() {
        let clamped = clamp_speed(Vec3::new(3.0, 4.0, 0.0), 1.0);
        assert_relative_eq!(clamped.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(clamped.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(clamped.y, 0.8, epsilon = 1e-6);

        let slow = Vec3::new(0.1, 0.0, 0.0);
        assert_eq!(clamp_speed(slow, 1.0), slow);
    }

    #[test]
    fn bad_timesteps_become_zero() {
        assert_eq!(sanitize_dt(-0.5), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
        assert_eq!(sanitize_dt(0.02), 0.02);
    }
}
