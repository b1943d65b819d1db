// Configuration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Configuration error code constants
///
/// Error code range: 3001-3004
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Initial rate is outside the accepted range or not finite
    pub const INITIAL_RATE_INVALID: i32 = 3001;

    /// History length (average count) is zero
    pub const AVERAGE_COUNT_ZERO: i32 = 3002;

    /// Slowest/fastest rate bounds are unusable
    pub const RATE_BOUNDS_INVALID: i32 = 3003;

    /// Damping half-time is not a positive finite number
    pub const HALF_TIME_INVALID: i32 = 3004;
}

/// Log a configuration error with structured context
pub fn log_config_error(err: &ConfigError, context: &str) {
    error!(
        "Config error in {}: code={}, component=AdaptiveSpeedConfig, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Configuration-related errors
///
/// Raised by `AdaptiveSpeedConfig::validate` before an engine is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Initial rate must be finite and within [min, max]
    InitialRateInvalid { rate: f64, min: f64, max: f64 },

    /// At least one recent rate must be averaged
    AverageCountZero,

    /// Rate bounds must be positive, finite and ordered
    RateBoundsInvalid { slowest: f64, fastest: f64 },

    /// Damping half-time must be positive and finite
    HalfTimeInvalid { half_time: f64 },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::InitialRateInvalid { .. } => ConfigErrorCodes::INITIAL_RATE_INVALID,
            ConfigError::AverageCountZero => ConfigErrorCodes::AVERAGE_COUNT_ZERO,
            ConfigError::RateBoundsInvalid { .. } => ConfigErrorCodes::RATE_BOUNDS_INVALID,
            ConfigError::HalfTimeInvalid { .. } => ConfigErrorCodes::HALF_TIME_INVALID,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::InitialRateInvalid { rate, min, max } => {
                format!("Initial rate must be within [{}, {}] (got {})", min, max, rate)
            }
            ConfigError::AverageCountZero => {
                "Average count must be at least 1".to_string()
            }
            ConfigError::RateBoundsInvalid { slowest, fastest } => {
                format!(
                    "Rate bounds must satisfy 0 < slowest < fastest (got slowest={}, fastest={})",
                    slowest, fastest
                )
            }
            ConfigError::HalfTimeInvalid { half_time } => {
                format!("Damping half-time must be positive (got {})", half_time)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
