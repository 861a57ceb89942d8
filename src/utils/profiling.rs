use std::time::{Duration, Instant};

/// Per-step timing and population counters, reset at the start of every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub partition_time: Duration,
    pub core_time: Duration,
    pub halo_time: Duration,
    pub integrator_time: Duration,
    pub total_step_time: Duration,

    pub living_count: usize,
    pub core_count: usize,
    pub halo_count: usize,
    pub burst_count: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Writes the breakdown to the `debug` log level.
    pub fn report(&self) {
        let total_us = self.total_step_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "step: {:.3} ms | living {} core {} halo {} bursts {}",
            self.total_step_time.as_secs_f32() * 1000.0,
            self.living_count,
            self.core_count,
            self.halo_count,
            self.burst_count
        );
        log::debug!(
            "  partition {:.1}% core {:.1}% halo {:.1}% integrate {:.1}%",
            share(self.partition_time, total_us),
            share(self.core_time, total_us),
            share(self.halo_time, total_us),
            share(self.integrator_time, total_us)
        );
    }
}

fn share(part: Duration, total_us: f32) -> f32 {
    part.as_micros() as f32 / total_us * 100.0
}

/// Adds the elapsed time to `output` when dropped and traces the phase.
pub struct PhaseTimer<'a> {
    label: &'static str,
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(label: &'static str, output: &'a mut Duration) -> Self {
        Self {
            label,
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.output += elapsed;
        log::trace!("{} took {} µs", self.label, elapsed.as_micros());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_timer_accumulates_into_its_slot() {
        let mut profiler = StepProfiler::default();
        {
            let _phase = PhaseTimer::new("core", &mut profiler.core_time);
            std::thread::sleep(Duration::from_millis(2));
        }
        let first = profiler.core_time;
        assert!(first >= Duration::from_millis(2));

        {
            let _phase = PhaseTimer::new("core", &mut profiler.core_time);
        }
        assert!(profiler.core_time >= first);
        assert_eq!(profiler.halo_time, Duration::ZERO);
    }

    #[test]
    fn reset_clears_counts_and_times() {
        let mut profiler = StepProfiler {
            core_count: 3,
            burst_count: 1,
            total_step_time: Duration::from_millis(4),
            ..StepProfiler::default()
        };
        profiler.reset();
        assert_eq!(profiler.core_count, 0);
        assert_eq!(profiler.total_step_time, Duration::ZERO);
    }
}
