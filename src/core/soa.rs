use crate::core::types::ExternalBody;
use crate::utils::math::mass_from_radius;
use glam::Vec3;

/// Structure-of-Arrays storage for the simulated bodies.
///
/// Slots are addressed by plain indices that stay stable for the whole run:
/// a body absorbed in a merge keeps its slot with zero mass and radius.
/// Every column is allocated once at construction and never grows.
#[derive(Debug, Clone)]
pub struct BodyStore {
    capacity: usize,
    len: usize,
    max_body_mass: f32,

    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub radii: Vec<f32>,
    /// Mass cache derived from `radii` at ingest and kept in sync by merges.
    pub masses: Vec<f32>,
    pub remaining_lifetimes: Vec<f32>,
    pub start_lifetimes: Vec<f32>,
}

impl BodyStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            len: 0,
            max_body_mass: max_body_mass(capacity),
            positions: vec![Vec3::ZERO; capacity],
            velocities: vec![Vec3::ZERO; capacity],
            radii: vec![0.0; capacity],
            masses: vec![0.0; capacity],
            remaining_lifetimes: vec![0.0; capacity],
            start_lifetimes: vec![0.0; capacity],
        }
    }

    /// Copies up to `capacity` external records into the store, deriving masses.
    ///
    /// Excess records are ignored. Records with a non-finite position or
    /// velocity, or a radius whose mass is not a normal float within
    /// [`BodyStore::max_body_mass`], become dead slots.
    pub fn ingest(&mut self, bodies: &[ExternalBody]) -> usize {
        let count = bodies.len().min(self.capacity);
        if bodies.len() > self.capacity {
            log::warn!(
                "ingest truncated {} bodies to store capacity {}",
                bodies.len(),
                self.capacity
            );
        }

        for (i, body) in bodies.iter().take(count).enumerate() {
            self.write_at(i, body);
        }
        self.len = count;
        count
    }

    fn write_at(&mut self, i: usize, body: &ExternalBody) {
        let position_ok = body.position.is_finite();
        let mass = mass_from_radius(body.radius);
        let alive = position_ok
            && body.velocity.is_finite()
            && body.radius.is_finite()
            && body.radius > 0.0
            && mass.is_normal()
            && mass <= self.max_body_mass;

        self.positions[i] = if position_ok {
            body.position
        } else {
            Vec3::ZERO
        };
        self.remaining_lifetimes[i] = body.remaining_lifetime;
        self.start_lifetimes[i] = body.start_lifetime;

        if alive {
            self.velocities[i] = body.velocity;
            self.radii[i] = body.radius;
            self.masses[i] = mass;
        } else {
            self.velocities[i] = Vec3::ZERO;
            self.radii[i] = 0.0;
            self.masses[i] = 0.0;
        }
    }

    /// Writes the canonical state back out. Returns the number of records written.
    pub fn commit(&self, out: &mut [ExternalBody]) -> usize {
        let count = self.len.min(out.len());
        for (i, record) in out.iter_mut().take(count).enumerate() {
            record.position = self.positions[i];
            record.velocity = self.velocities[i];
            record.radius = self.radii[i];
            record.remaining_lifetime = self.remaining_lifetimes[i];
            record.start_lifetime = self.start_lifetimes[i];
        }
        count
    }

    /// Logically destroys slot `i`; the slot itself is retained.
    pub fn kill(&mut self, i: usize) {
        self.masses[i] = 0.0;
        self.radii[i] = 0.0;
        self.velocities[i] = Vec3::ZERO;
        self.remaining_lifetimes[i] = 0.0;
    }

    /// Resets remaining lifetimes of living bodies to their start lifetimes.
    pub fn refresh_lifetimes(&mut self) {
        for i in 0..self.len {
            if self.is_alive(i) {
                self.remaining_lifetimes[i] = self.start_lifetimes[i];
            }
        }
    }

    #[inline]
    pub fn is_alive(&self, i: usize) -> bool {
        self.masses[i] > 0.0 && self.radii[i] > 0.0
    }

    /// Number of slots ingested this tick.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest mass a single body may carry. Summing every slot at this
    /// mass, or multiplying two of them, stays finite.
    pub fn max_body_mass(&self) -> f32 {
        self.max_body_mass
    }

    pub fn living_count(&self) -> usize {
        (0..self.len).filter(|&i| self.is_alive(i)).count()
    }

    pub fn living_mass(&self) -> f32 {
        (0..self.len)
            .filter(|&i| self.is_alive(i))
            .map(|i| self.masses[i])
            .sum()
    }

    pub fn get(&self, index: usize) -> Option<BodyRef<'_>> {
        if index < self.len {
            Some(BodyRef { store: self, index })
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = BodyRef<'_>> {
        (0..self.len).map(move |index| BodyRef { store: self, index })
    }

    pub fn iter_living(&self) -> impl Iterator<Item = BodyRef<'_>> {
        self.iter().filter(|body| body.is_alive())
    }

    /// Snapshot of slot `i` in the external record shape.
    pub fn to_external(&self, i: usize) -> ExternalBody {
        ExternalBody {
            position: self.positions[i],
            velocity: self.velocities[i],
            radius: self.radii[i],
            remaining_lifetime: self.remaining_lifetimes[i],
            start_lifetime: self.start_lifetimes[i],
        }
    }
}

fn max_body_mass(capacity: usize) -> f32 {
    f32::MAX.sqrt() / capacity.max(1) as f32
}

/// Read-only view of one slot.
pub struct BodyRef<'a> {
    store: &'a BodyStore,
    index: usize,
}

impl<'a> BodyRef<'a> {
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn position(&self) -> Vec3 {
        self.store.positions[self.index]
    }
    pub fn velocity(&self) -> Vec3 {
        self.store.velocities[self.index]
    }
    pub fn radius(&self) -> f32 {
        self.store.radii[self.index]
    }
    pub fn mass(&self) -> f32 {
        self.store.masses[self.index]
    }
    pub fn is_alive(&self) -> bool {
        self.store.is_alive(self.index)
    }
    pub fn momentum(&self) -> Vec3 {
        self.velocity() * self.mass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body(x: f32, radius: f32) -> ExternalBody {
        ExternalBody::new(Vec3::new(x, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), radius).with_lifetime(5.0)
    }

    #[test]
    fn ingest_derives_mass_from_radius() {
        let mut store = BodyStore::with_capacity(4);
        assert_eq!(store.ingest(&[body(0.0, 1.0), body(1.0, 0.5)]), 2);

        assert_relative_eq!(store.masses[0], mass_from_radius(1.0));
        assert_relative_eq!(store.masses[1], mass_from_radius(0.5));
        assert_eq!(store.len(), 2);
        assert_eq!(store.living_count(), 2);
    }

    #[test]
    fn ingest_truncates_to_capacity() {
        let mut store = BodyStore::with_capacity(2);
        let count = store.ingest(&[body(0.0, 1.0), body(1.0, 1.0), body(2.0, 1.0)]);
        assert_eq!(count, 2);
        assert_eq!(store.capacity(), 2);
        assert!(store.get(2).is_none());
    }

    #[test]
    fn malformed_records_become_dead_slots() {
        let mut store = BodyStore::with_capacity(4);
        let mut nan_velocity = body(2.0, 1.0);
        nan_velocity.velocity = Vec3::new(f32::NAN, 0.0, 0.0);
        let mut inf_position = body(3.0, 1.0);
        inf_position.position = Vec3::new(f32::INFINITY, 0.0, 0.0);

        store.ingest(&[body(0.0, 0.0), body(1.0, -2.0), nan_velocity, inf_position]);

        assert_eq!(store.living_count(), 0);
        for i in 0..4 {
            assert_eq!(store.masses[i], 0.0);
            assert_eq!(store.radii[i], 0.0);
            assert_eq!(store.velocities[i], Vec3::ZERO);
            assert!(store.positions[i].is_finite());
        }
    }

    #[test]
    fn radii_with_unrepresentable_mass_become_dead_slots() {
        let mut store = BodyStore::with_capacity(4);
        store.ingest(&[
            body(0.0, 1.0e13),
            body(1.0, 1.0e-15),
            body(2.0, 1.0e7),
            body(3.0, 0.1),
        ]);

        assert!(mass_from_radius(1.0e13).is_infinite());
        assert!(mass_from_radius(1.0e-15).is_subnormal());
        for i in 0..3 {
            assert!(!store.is_alive(i), "slot {i} should be dead");
            assert_eq!(store.masses[i], 0.0);
            assert_eq!(store.radii[i], 0.0);
        }
        assert!(store.is_alive(3));
        assert!(store.living_mass().is_finite());
    }

    #[test]
    fn max_body_mass_keeps_sums_and_products_finite() {
        let store = BodyStore::with_capacity(1000);
        let limit = store.max_body_mass();
        assert!((limit * 1000.0).is_finite());
        assert!((limit * limit).is_finite());
        assert!(mass_from_radius(1.0e4) <= limit);
    }

    #[test]
    fn commit_round_trips_living_bodies() {
        let input = [body(0.0, 1.0), body(4.0, 0.25)];
        let mut store = BodyStore::with_capacity(8);
        store.ingest(&input);

        let mut out = [ExternalBody::default(); 2];
        assert_eq!(store.commit(&mut out), 2);
        assert_eq!(out, input);
    }

    #[test]
    fn kill_keeps_slot_but_zeroes_state() {
        let mut store = BodyStore::with_capacity(2);
        store.ingest(&[body(0.0, 1.0), body(1.0, 1.0)]);
        store.kill(1);

        assert_eq!(store.len(), 2);
        assert!(!store.is_alive(1));
        assert_eq!(store.remaining_lifetimes[1], 0.0);
        assert_eq!(store.iter_living().count(), 1);
        assert_relative_eq!(store.living_mass(), mass_from_radius(1.0));
    }
}
