//! Inelastic merge resolution.
//!
//! The larger body absorbs the smaller one. Mass and momentum are conserved;
//! the absorbed slot is left dead (zero mass, radius, velocity, lifetime).

use crate::collision::burst::Burst;
use crate::config::EnergyModel;
use crate::core::soa::BodyStore;
use crate::utils::math::radius_from_mass;

/// Orders a colliding pair as `(survivor, absorbed)`.
///
/// The larger radius survives; on equal radii the lower slot index does.
#[inline]
pub fn pick_survivor(store: &BodyStore, a: usize, b: usize) -> (usize, usize) {
    let (ra, rb) = (store.radii[a], store.radii[b]);
    if ra > rb || (ra == rb && a < b) {
        (a, b)
    } else {
        (b, a)
    }
}

impl EnergyModel {
    /// Intensity value for a merge.
    ///
    /// `speed_*` and `mass_*` describe the two bodies before the merge,
    /// `merged_speed` the survivor afterwards.
    pub fn released_energy(
        &self,
        mass_survivor: f32,
        speed_survivor: f32,
        mass_absorbed: f32,
        speed_absorbed: f32,
        radius_absorbed: f32,
        merged_speed: f32,
    ) -> f32 {
        match *self {
            EnergyModel::LostKinetic => {
                let mass = mass_survivor + mass_absorbed;
                let before = mass_survivor * speed_survivor + mass_absorbed * speed_absorbed;
                let after = mass * merged_speed;
                let lost = before - after;
                lost * lost / (2.0 * mass)
            }
            EnergyModel::AbsorbedRadius { scale } => scale * radius_absorbed,
            EnergyModel::AbsorbedMass => mass_absorbed,
        }
    }
}

/// Merges `absorbed` into `survivor` and describes the event.
///
/// Both slots must be alive.
pub fn resolve_merge(
    store: &mut BodyStore,
    survivor: usize,
    absorbed: usize,
    energy_model: &EnergyModel,
) -> Burst {
    let mass_s = store.masses[survivor];
    let mass_a = store.masses[absorbed];
    let velocity_s = store.velocities[survivor];
    let velocity_a = store.velocities[absorbed];
    let radius_a = store.radii[absorbed];

    let mass = mass_s + mass_a;
    let velocity = (velocity_s * mass_s + velocity_a * mass_a) / mass;
    let difference = store.positions[absorbed] - store.positions[survivor];
    let position = store.positions[survivor] + (mass_a / mass) * difference;

    store.masses[survivor] = mass;
    store.velocities[survivor] = velocity;
    store.positions[survivor] = position;
    store.radii[survivor] = radius_from_mass(mass);
    store.kill(absorbed);

    let released_energy = energy_model.released_energy(
        mass_s,
        velocity_s.length(),
        mass_a,
        velocity_a.length(),
        radius_a,
        velocity.length(),
    );

    Burst {
        position,
        released_energy,
        velocity,
        mass,
        survivor,
        absorbed,
    }
}
