use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Event emitted when two bodies merge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    /// Survivor position after the merge.
    pub position: Vec3,
    /// Effect intensity, see [`crate::config::EnergyModel`].
    pub released_energy: f32,
    /// Survivor velocity after the merge.
    pub velocity: Vec3,
    /// Combined mass of the survivor.
    pub mass: f32,
    pub survivor: usize,
    pub absorbed: usize,
}

/// Fixed-capacity event sink filled during a step and read after it.
///
/// Capacity equals the body store capacity: a step can merge at most `n - 1`
/// times, so pushes never reallocate.
#[derive(Debug, Clone)]
pub struct BurstBuffer {
    events: Vec<Burst>,
    capacity: usize,
    dropped: usize,
}

impl BurstBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Records `burst`. Returns `false` if the buffer is full and the event was dropped.
    pub fn push(&mut self, burst: Burst) -> bool {
        if self.events.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.events.push(burst);
        true
    }

    pub fn as_slice(&self) -> &[Burst] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events rejected since the last [`clear`](Self::clear).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn total_energy(&self) -> f32 {
        self.events.iter().map(|b| b.released_energy).sum()
    }
}
