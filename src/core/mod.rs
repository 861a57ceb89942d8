//! Core body storage, shared records, and population seeding.

pub mod population;
pub mod soa;
pub mod types;

pub use soa::{BodyRef, BodyStore};
pub use types::{ExternalBody, SystemSnapshot};
