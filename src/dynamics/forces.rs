use glam::Vec3;

/// Newtonian attraction without softening.
///
/// Close approaches are handled by merging, so no softening term is applied;
/// a zero separation yields no force instead of a singularity.
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub gravitational_constant: f32,
}

impl NewtonianGravity {
    pub fn new(gravitational_constant: f32) -> Self {
        Self {
            gravitational_constant,
        }
    }

    /// Force on the body at the origin of `difference`, pulled towards its tip:
    /// `G m_a m_b / |d|² · d̂`.
    #[inline]
    pub fn pair_force(&self, mass_a: f32, mass_b: f32, difference: Vec3) -> Vec3 {
        let distance_sq = difference.length_squared();
        if distance_sq <= 0.0 {
            return Vec3::ZERO;
        }
        let magnitude = self.gravitational_constant * mass_a * mass_b / distance_sq;
        difference * (magnitude / distance_sq.sqrt())
    }

    /// Force on a body of `mass` from a point mass `source_mass` located at
    /// `difference` relative to it. An empty source exerts nothing.
    #[inline]
    pub fn field_force(&self, mass: f32, source_mass: f32, difference: Vec3) -> Vec3 {
        if source_mass <= 0.0 {
            return Vec3::ZERO;
        }
        self.pair_force(mass, source_mass, difference)
    }
}
