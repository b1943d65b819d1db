//! Configuration management for the adaptive speed engine
//!
//! This module provides runtime configuration loading from JSON files so the
//! user-facing settings (initial rate, pitch adjustment) and the estimator
//! tunables can be changed without recompilation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::rate::{RateBounds, AVERAGE_COUNT, DAMPING_HALF_TIME_MS, FASTEST_RATE, SLOWEST_RATE};

/// Lowest accepted initial rate
pub const MIN_INITIAL_RATE: f64 = 0.5;
/// Highest accepted initial rate
pub const MAX_INITIAL_RATE: f64 = 2.0;
/// Initial rate granularity
pub const INITIAL_RATE_PRECISION: f64 = 0.01;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub adaptive_speed: AdaptiveSpeedConfig,
}

/// Adaptive speed settings and estimator tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveSpeedConfig {
    /// Starting speed of the track
    #[serde(default = "default_initial_rate")]
    pub initial_rate: f64,
    /// Whether pitch follows speed (frequency) or is preserved (tempo)
    #[serde(default = "default_adjust_pitch")]
    pub adjust_pitch: bool,
    /// Number of recent local rates averaged into the target rate
    #[serde(default = "default_average_count")]
    pub average_count: usize,
    /// Lower clamp for a single local rate
    #[serde(default = "default_slowest_rate")]
    pub slowest_rate: f64,
    /// Upper clamp for a single local rate
    #[serde(default = "default_fastest_rate")]
    pub fastest_rate: f64,
    /// Half-time of the published rate's approach to the target (ms)
    #[serde(default = "default_damping_half_time")]
    pub damping_half_time: f64,
}

fn default_initial_rate() -> f64 {
    1.0
}

fn default_adjust_pitch() -> bool {
    true
}

fn default_average_count() -> usize {
    AVERAGE_COUNT
}

fn default_slowest_rate() -> f64 {
    SLOWEST_RATE
}

fn default_fastest_rate() -> f64 {
    FASTEST_RATE
}

fn default_damping_half_time() -> f64 {
    DAMPING_HALF_TIME_MS
}

impl Default for AdaptiveSpeedConfig {
    fn default() -> Self {
        Self {
            initial_rate: default_initial_rate(),
            adjust_pitch: default_adjust_pitch(),
            average_count: default_average_count(),
            slowest_rate: default_slowest_rate(),
            fastest_rate: default_fastest_rate(),
            damping_half_time: default_damping_half_time(),
        }
    }
}

impl AdaptiveSpeedConfig {
    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_initial_rate(self.initial_rate)?;

        if self.average_count == 0 {
            return Err(ConfigError::AverageCountZero);
        }

        let bounds_ok = self.slowest_rate.is_finite()
            && self.fastest_rate.is_finite()
            && self.slowest_rate > 0.0
            && self.slowest_rate < self.fastest_rate;
        if !bounds_ok {
            return Err(ConfigError::RateBoundsInvalid {
                slowest: self.slowest_rate,
                fastest: self.fastest_rate,
            });
        }

        if !self.damping_half_time.is_finite() || self.damping_half_time <= 0.0 {
            return Err(ConfigError::HalfTimeInvalid {
                half_time: self.damping_half_time,
            });
        }

        Ok(())
    }

    pub fn bounds(&self) -> RateBounds {
        RateBounds {
            slowest: self.slowest_rate,
            fastest: self.fastest_rate,
        }
    }
}

/// Validate an initial rate and snap it to the setting's precision.
pub fn validate_initial_rate(rate: f64) -> Result<f64, ConfigError> {
    if !rate.is_finite() || !(MIN_INITIAL_RATE..=MAX_INITIAL_RATE).contains(&rate) {
        return Err(ConfigError::InitialRateInvalid {
            rate,
            min: MIN_INITIAL_RATE,
            max: MAX_INITIAL_RATE,
        });
    }
    let steps = (1.0 / INITIAL_RATE_PRECISION).round();
    let snapped = (rate * steps).round() / steps;
    Ok(snapped.clamp(MIN_INITIAL_RATE, MAX_INITIAL_RATE))
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file is missing or
    /// its JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default asset location
    pub fn load() -> Self {
        Self::load_from_file("assets/adaptive_speed.json")
    }
}
