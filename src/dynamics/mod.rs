//! Simulation dynamics: partitioning, gravitational interaction, and integration.

pub mod forces;
pub mod integrator;
pub mod interaction;
pub mod partition;

pub use forces::NewtonianGravity;
pub use integrator::{HeaviestBody, Integrator};
pub use interaction::InteractionEngine;
pub use partition::Partitioner;
