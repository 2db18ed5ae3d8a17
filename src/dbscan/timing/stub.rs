use super::Pass;
use std::time::Duration;

/// Dummy timer when `timing` is disabled (zero-sized).
pub struct Timer;

impl Timer {
    #[inline(always)]
    pub fn start() -> Self {
        Self
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        Duration::ZERO
    }
}

/// Dummy timings when `timing` is disabled (zero-sized).
#[derive(Debug, Clone, Copy, Default)]
pub struct PassTimings;

impl PassTimings {
    #[inline(always)]
    pub fn report(&self, _n_tracks: usize, _n_vertices: usize) {}
}

/// Dummy builder when `timing` is disabled (zero-sized).
#[derive(Default)]
pub struct TimingBuilder;

impl TimingBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }

    #[inline(always)]
    pub fn record(&mut self, _pass: Pass, _d: Duration) {}

    #[inline(always)]
    pub fn finish(self) -> PassTimings {
        PassTimings
    }
}
