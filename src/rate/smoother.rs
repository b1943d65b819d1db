//! Continuous smoother
//!
//! Moves the published rate toward the target rate with exponential decay.
//! The decay is expressed as a half-time so the result only depends on the
//! total elapsed time, not on how it was split into ticks.

/// Damp `current` toward `target`, closing half the distance every
/// `half_time` units of `elapsed`.
///
/// Returns `current` unchanged when the two are already equal or `elapsed`
/// is not a positive number, and never overshoots.
#[inline]
pub fn damp_continuously(current: f64, target: f64, half_time: f64, elapsed: f64) -> f64 {
    if elapsed.is_nan() || elapsed <= 0.0 || current == target {
        return current;
    }
    let remaining = 0.5_f64.powf(elapsed / half_time);
    target + (current - target) * remaining
}

/// Frame-rate independent exponential smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSmoother {
    half_time: f64,
}

impl RateSmoother {
    pub fn new(half_time: f64) -> Self {
        Self { half_time }
    }

    pub fn half_time(&self) -> f64 {
        self.half_time
    }

    /// Next published rate after `elapsed` time.
    pub fn step(&self, published: f64, target: f64, elapsed: f64) -> f64 {
        damp_continuously(published, target, self.half_time, elapsed)
    }
}
