//! Pairwise core integration with merging, and the halo point-mass field.

use crate::collision::{
    burst::BurstBuffer,
    contact::is_merge_contact,
    merge::{pick_survivor, resolve_merge},
};
use crate::config::{EnergyModel, SimulationConfig};
use crate::core::soa::BodyStore;
use crate::dynamics::forces::NewtonianGravity;
use glam::Vec3;

#[derive(Debug, Clone)]
pub struct InteractionEngine {
    pub gravity: NewtonianGravity,
    pub collision_factor: f32,
    pub energy_model: EnergyModel,
}

impl InteractionEngine {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            gravity: NewtonianGravity::new(config.gravitational_constant),
            collision_factor: config.collision_factor,
            energy_model: config.energy_model,
        }
    }

    /// Visits every ordered core pair `i < j` once, merging overlapping pairs
    /// and exchanging equal and opposite impulses otherwise.
    ///
    /// Returns the number of merges performed.
    pub fn resolve_core(
        &self,
        store: &mut BodyStore,
        core: &[usize],
        dt: f32,
        bursts: &mut BurstBuffer,
    ) -> usize {
        let mut merges = 0;

        for (ci, &i) in core.iter().enumerate() {
            if !store.is_alive(i) {
                continue;
            }

            for &j in &core[ci + 1..] {
                if !store.is_alive(j) {
                    continue;
                }

                let difference = store.positions[j] - store.positions[i];

                if is_merge_contact(difference, store.radii[i], store.radii[j], self.collision_factor) {
                    let (survivor, absorbed) = pick_survivor(store, i, j);
                    let burst = resolve_merge(store, survivor, absorbed, &self.energy_model);
                    if !bursts.push(burst) {
                        log::warn!("burst buffer full, dropping merge event {survivor} <- {absorbed}");
                    }
                    merges += 1;

                    if absorbed == i {
                        break;
                    }
                    continue;
                }

                let mass_i = store.masses[i];
                let mass_j = store.masses[j];
                let impulse = self.gravity.pair_force(mass_i, mass_j, difference) * dt;
                store.velocities[i] += impulse / mass_i;
                store.velocities[j] -= impulse / mass_j;
            }
        }

        merges
    }

    /// Pulls each halo body towards a point mass `core_mass` at `core_center`.
    /// Halo bodies never interact with one another.
    pub fn apply_halo_field(
        &self,
        store: &mut BodyStore,
        halo: &[usize],
        core_center: Vec3,
        core_mass: f32,
        dt: f32,
    ) {
        if core_mass <= 0.0 {
            return;
        }

        for &i in halo {
            if !store.is_alive(i) {
                continue;
            }
            let mass = store.masses[i];
            let difference = core_center - store.positions[i];
            let force = self.gravity.field_force(mass, core_mass, difference);
            store.velocities[i] += force * dt / mass;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ExternalBody;
    use approx::assert_relative_eq;

    fn engine() -> InteractionEngine {
        InteractionEngine::new(&SimulationConfig {
            gravitational_constant: 1.0,
            collision_factor: 0.3,
            ..SimulationConfig::default()
        })
    }

    fn store_of(bodies: &[ExternalBody]) -> BodyStore {
        let mut store = BodyStore::with_capacity(bodies.len());
        store.ingest(bodies);
        store
    }

    fn at(x: f32, radius: f32) -> ExternalBody {
        ExternalBody::new(Vec3::new(x, 0.0, 0.0), Vec3::ZERO, radius)
    }

    #[test]
    fn core_pair_attracts_symmetrically() {
        let mut store = store_of(&[at(0.0, 0.1), at(2.0, 0.2)]);
        let mut bursts = BurstBuffer::with_capacity(2);

        let merges = engine().resolve_core(&mut store, &[0, 1], 0.1, &mut bursts);

        assert_eq!(merges, 0);
        assert!(store.velocities[0].x > 0.0);
        assert!(store.velocities[1].x < 0.0);
        let momentum = store.velocities[0] * store.masses[0] + store.velocities[1] * store.masses[1];
        assert!(momentum.length() < 1e-7);
    }

    #[test]
    fn absorbed_outer_body_stops_scanning() {
        // Slot 0 is small and gets absorbed by slot 1; slot 2 must not see slot 0 again.
        let mut store = store_of(&[at(0.0, 0.1), at(0.01, 0.5), at(0.02, 0.1)]);
        let mut bursts = BurstBuffer::with_capacity(3);

        let merges = engine().resolve_core(&mut store, &[0, 1, 2], 0.1, &mut bursts);

        assert_eq!(merges, 2);
        assert_eq!(store.living_count(), 1);
        assert!(store.is_alive(1));
        assert_eq!(bursts.as_slice()[0].absorbed, 0);
        assert_eq!(bursts.as_slice()[1].absorbed, 2);
    }

    #[test]
    fn survivor_keeps_scanning_with_updated_state() {
        let mut store = store_of(&[at(0.0, 0.5), at(0.01, 0.1), at(0.03, 0.1)]);
        let total = store.living_mass();
        let mut bursts = BurstBuffer::with_capacity(3);

        engine().resolve_core(&mut store, &[0, 1, 2], 0.1, &mut bursts);

        assert_eq!(bursts.len(), 2);
        assert!(bursts.as_slice().iter().all(|b| b.survivor == 0));
        assert_relative_eq!(store.masses[0], total, max_relative = 1e-6);
    }

    #[test]
    fn halo_body_falls_towards_core() {
        let mut store = store_of(&[at(10.0, 0.1)]);
        engine().apply_halo_field(&mut store, &[0], Vec3::ZERO, 8.0, 0.5);

        assert_relative_eq!(store.velocities[0].x, -8.0 / 100.0 * 0.5, max_relative = 1e-5);
    }

    #[test]
    fn tiny_halo_body_gets_finite_acceleration() {
        let mut store = store_of(&[at(5.0, 1.0e-12)]);
        assert!(store.is_alive(0));

        engine().apply_halo_field(&mut store, &[0], Vec3::ZERO, 8.0, 0.5);

        assert!(store.velocities[0].is_finite());
        assert_relative_eq!(store.velocities[0].x, -8.0 / 25.0 * 0.5, max_relative = 1e-4);
    }

    #[test]
    fn empty_core_exerts_no_field() {
        let mut store = store_of(&[at(3.0, 0.1)]);
        engine().apply_halo_field(&mut store, &[0], Vec3::ZERO, 0.0, 1.0);
        assert_eq!(store.velocities[0], Vec3::ZERO);
    }
}
