//! Engine module housing the adaptive speed core.
//!
//! `AdaptiveSpeedEngine` is the single host-facing entry point: it owns the
//! timing index, rate estimator, smoother and adjustment router for one
//! attached timeline.

pub mod core;

pub use core::{AdaptiveSpeedEngine, EngineSnapshot};
