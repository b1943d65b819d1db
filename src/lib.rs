// Adaptive Speed - judgement-driven playback rate engine
// Retargets the audio rate from how early or late recent events were hit,
// with exact undo for replay rewind.

// Module declarations
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod judgement;
pub mod rate;
pub mod replay;
pub mod timeline;

// Re-exports for convenience
pub use audio::{AdjustableProperty, AdjustmentTarget, RateHandle, TrackAdjustments};
pub use config::{AdaptiveSpeedConfig, AppConfig};
pub use engine::{AdaptiveSpeedEngine, EngineSnapshot};
pub use judgement::{HitResult, JudgementResult};
pub use timeline::{EventId, TimedEvent, Timeline};
