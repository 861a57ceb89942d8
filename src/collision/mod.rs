//! Merge detection, resolution, and the burst event sink.

pub mod burst;
pub mod contact;
pub mod merge;

pub use burst::{Burst, BurstBuffer};
pub use contact::is_merge_contact;
pub use merge::{pick_survivor, resolve_merge};
