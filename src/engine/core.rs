//! AdaptiveSpeedEngine: judgement-driven playback rate.
//!
//! The host drives the engine through explicit calls on one timeline thread:
//! `apply`/`revert` when a judgement is made or undone, and `tick` once per
//! frame. The published rate lives in a `RateHandle` that the audio side
//! observes directly, so nothing here runs on the audio thread.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::audio::{AdjustableProperty, AdjustmentRouter, AdjustmentTarget, RateHandle};
use crate::config::{validate_initial_rate, AdaptiveSpeedConfig};
use crate::error::{log_config_error, ConfigError};
use crate::judgement::JudgementResult;
use crate::rate::{RateEstimator, RateSmoother};
use crate::timeline::{BaselineIndex, EventId, TimedEvent};

/// Point-in-time view of the engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub published_rate: f64,
    pub target_rate: f64,
    pub initial_rate: f64,
    pub property: AdjustableProperty,
    pub recent_rates: Vec<f64>,
    pub pending: usize,
}

/// Adaptive playback-rate engine for one attached timeline.
pub struct AdaptiveSpeedEngine {
    config: AdaptiveSpeedConfig,
    initial_rate: f64,
    estimator: RateEstimator,
    smoother: RateSmoother,
    published: RateHandle,
    router: AdjustmentRouter,
}

impl AdaptiveSpeedEngine {
    /// Attach to a timeline: build the timing index and seed the history
    /// with the configured initial rate.
    ///
    /// Event end times must be finite; see `Timeline::new` for a checked
    /// construction path.
    pub fn attach(
        events: &[TimedEvent],
        mut config: AdaptiveSpeedConfig,
    ) -> Result<Self, ConfigError> {
        let initial_rate = config
            .validate()
            .and_then(|()| validate_initial_rate(config.initial_rate))
            .map_err(|err| {
                log_config_error(&err, "attach");
                err
            })?;
        config.initial_rate = initial_rate;

        let baselines = BaselineIndex::build(events);
        let estimator = RateEstimator::new(
            baselines,
            config.average_count,
            initial_rate,
            config.bounds(),
        );
        let published = RateHandle::new(initial_rate);
        let router = AdjustmentRouter::new(published.clone(), config.adjust_pitch);

        log::debug!(
            "[AdaptiveSpeedEngine] attached: {} rated events, initial_rate={}, property={:?}",
            estimator.baselines().len(),
            initial_rate,
            router.property()
        );

        Ok(Self {
            smoother: RateSmoother::new(config.damping_half_time),
            config,
            initial_rate,
            estimator,
            published,
            router,
        })
    }

    /// Re-attach to a new event set, keeping settings and track bindings.
    pub fn reattach(&mut self, events: &[TimedEvent]) {
        let baselines = BaselineIndex::build(events);
        self.estimator.rebuild(baselines, self.initial_rate);
        self.published.set(self.initial_rate);
        log::debug!(
            "[AdaptiveSpeedEngine] reattached: {} rated events",
            self.estimator.baselines().len()
        );
    }

    // ========================================================================
    // AUDIO BINDING
    // ========================================================================

    /// Bind the published rate to the music track under the current mode.
    pub fn bind_track(&mut self, track: Arc<dyn AdjustmentTarget>) {
        self.router.bind(track);
    }

    /// Bind the published rate to a sample (always as frequency).
    pub fn bind_sample(&self, sample: &dyn AdjustmentTarget) {
        self.router.bind_sample(sample);
    }

    /// Switch between pitch (frequency) and tempo adjustment.
    pub fn set_adjust_pitch(&mut self, adjust_pitch: bool) {
        self.config.adjust_pitch = adjust_pitch;
        self.router.set_adjust_pitch(adjust_pitch);
    }

    /// Re-apply the initial rate: published and target rates jump to it and
    /// the history is reseeded.
    pub fn set_initial_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        let rate = validate_initial_rate(rate).map_err(|err| {
            log_config_error(&err, "set_initial_rate");
            err
        })?;
        self.initial_rate = rate;
        self.config.initial_rate = rate;
        self.estimator.reset(rate);
        self.published.set(rate);
        log::debug!("[AdaptiveSpeedEngine] initial rate set to {}", rate);
        Ok(())
    }

    /// Base-rate contribution of the configured initial rate.
    pub fn apply_to_rate(&self, rate: f64) -> f64 {
        rate * self.initial_rate
    }

    // ========================================================================
    // JUDGEMENTS
    // ========================================================================

    /// Record a judgement. Returns whether it changed the target rate.
    ///
    /// Duplicate, non-counting and unrated events are ignored.
    pub fn apply(
        &mut self,
        event: EventId,
        result_time: f64,
        counts_for_accuracy: bool,
        is_hit: bool,
    ) -> bool {
        self.estimator
            .apply(
                event,
                result_time,
                counts_for_accuracy,
                is_hit,
                self.published.get(),
            )
            .is_some()
    }

    /// Undo a recorded judgement. Returns whether it changed the target rate.
    pub fn revert(&mut self, event: EventId, counts_for_accuracy: bool, is_hit: bool) -> bool {
        self.estimator.revert(event, counts_for_accuracy, is_hit)
    }

    pub fn apply_result(&mut self, result: &JudgementResult) -> bool {
        self.apply(
            result.event,
            result.time_absolute,
            result.affects_accuracy(),
            result.is_hit(),
        )
    }

    pub fn revert_result(&mut self, result: &JudgementResult) -> bool {
        self.revert(result.event, result.affects_accuracy(), result.is_hit())
    }

    // ========================================================================
    // PER-FRAME UPDATE
    // ========================================================================

    /// Advance the published rate toward the target by `elapsed` ms.
    pub fn tick(&mut self, elapsed: f64) {
        let next = self
            .smoother
            .step(self.published.get(), self.estimator.target_rate(), elapsed);
        self.published.set(next);
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    pub fn published_rate(&self) -> f64 {
        self.published.get()
    }

    pub fn target_rate(&self) -> f64 {
        self.estimator.target_rate()
    }

    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }

    pub fn adjust_pitch(&self) -> bool {
        self.router.adjust_pitch()
    }

    pub fn property(&self) -> AdjustableProperty {
        self.router.property()
    }

    /// Handle observed by the audio side.
    pub fn rate_handle(&self) -> RateHandle {
        self.published.clone()
    }

    pub fn recent_rates(&self) -> Vec<f64> {
        self.estimator.history().to_vec()
    }

    pub fn pending_len(&self) -> usize {
        self.estimator.pending_len()
    }

    pub fn config(&self) -> &AdaptiveSpeedConfig {
        &self.config
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            published_rate: self.published_rate(),
            target_rate: self.target_rate(),
            initial_rate: self.initial_rate,
            property: self.property(),
            recent_rates: self.recent_rates(),
            pending: self.pending_len(),
        }
    }

    /// Release the track binding and drop the engine.
    pub fn detach(mut self) {
        self.router.unbind();
        log::debug!("[AdaptiveSpeedEngine] detached");
    }
}
