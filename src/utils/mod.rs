//! Utility helpers: math extensions, step-budget logging, and phase profiling.

pub mod logging;
pub mod math;
pub mod profiling;

pub use math::*;
pub use profiling::StepProfiler;
