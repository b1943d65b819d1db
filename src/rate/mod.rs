// Rate module - judgement-driven playback rate estimation
//
// Pipeline: judged event -> RateEstimator (local rate into RateHistory,
// target = mean) -> RateSmoother (published rate damped toward target
// every tick).

pub mod estimator;
pub mod history;
pub mod smoother;

pub use estimator::{local_rate, RateBounds, RateEstimator};
pub use history::RateHistory;
pub use smoother::{damp_continuously, RateSmoother};

/// Slowest local rate a single judgement may imply.
///
/// Wider than the initial-rate setting so extreme starting rates still have
/// room to adapt.
pub const SLOWEST_RATE: f64 = 0.4;

/// Fastest local rate a single judgement may imply.
pub const FASTEST_RATE: f64 = 2.5;

/// Number of recent local rates averaged into the target rate.
pub const AVERAGE_COUNT: usize = 6;

/// Half-time of the published rate's approach to the target, in milliseconds.
pub const DAMPING_HALF_TIME_MS: f64 = 50.0;
