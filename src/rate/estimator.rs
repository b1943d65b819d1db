//! Rate estimator
//!
//! Turns each counted judgement into a local rate (how much faster or slower
//! than expected the event was reached since its baseline), feeds it into the
//! rate history and keeps the target rate at the history mean. Every apply
//! records what it evicted so a later revert restores the exact prior state.

use std::collections::HashMap;

use crate::timeline::{BaselineIndex, EventId};

use super::history::RateHistory;

/// Hard bounds for a single local rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBounds {
    pub slowest: f64,
    pub fastest: f64,
}

impl RateBounds {
    /// Clamp into `[slowest, fastest]`. NaN maps to `slowest`.
    pub fn clamp(&self, rate: f64) -> f64 {
        if rate.is_nan() {
            return self.slowest;
        }
        rate.clamp(self.slowest, self.fastest)
    }
}

impl Default for RateBounds {
    fn default() -> Self {
        Self {
            slowest: super::SLOWEST_RATE,
            fastest: super::FASTEST_RATE,
        }
    }
}

/// Local rate implied by reaching an event at `result_time`.
///
/// `published_rate` is the rate the audio is currently playing at, so the
/// estimate compounds on top of the adaptation already applied.
pub fn local_rate(
    end_time: f64,
    baseline: f64,
    result_time: f64,
    published_rate: f64,
    bounds: RateBounds,
) -> f64 {
    bounds.clamp((end_time - baseline) / (result_time - baseline) * published_rate)
}

/// Judgement-driven target rate state.
#[derive(Debug, Clone)]
pub struct RateEstimator {
    baselines: BaselineIndex,
    history: RateHistory,
    /// Value evicted from `history` by each applied, not yet reverted event
    pending: HashMap<EventId, Option<f64>>,
    target_rate: f64,
    bounds: RateBounds,
}

impl RateEstimator {
    pub fn new(baselines: BaselineIndex, capacity: usize, initial_rate: f64, bounds: RateBounds) -> Self {
        Self {
            baselines,
            history: RateHistory::filled(capacity, initial_rate),
            pending: HashMap::new(),
            target_rate: initial_rate,
            bounds,
        }
    }

    /// Reseed the history with `initial_rate` and forget all pending undo data.
    pub fn reset(&mut self, initial_rate: f64) {
        self.history.reset(initial_rate);
        self.pending.clear();
        self.target_rate = initial_rate;
    }

    /// Replace the timing index (new timeline) and reseed.
    pub fn rebuild(&mut self, baselines: BaselineIndex, initial_rate: f64) {
        self.baselines = baselines;
        self.reset(initial_rate);
    }

    /// Record a judgement. Returns the local rate that was pushed, or `None`
    /// when the judgement is ignored.
    ///
    /// Ignored: already applied, not a hit, not counted for accuracy, or the
    /// event has no baseline.
    pub fn apply(
        &mut self,
        event: EventId,
        result_time: f64,
        counts_for_accuracy: bool,
        is_hit: bool,
        published_rate: f64,
    ) -> Option<f64> {
        if self.pending.contains_key(&event) {
            return None;
        }
        if !is_hit || !counts_for_accuracy {
            return None;
        }
        let entry = self.baselines.get(event)?;

        let rate = local_rate(
            entry.end_time,
            entry.baseline,
            result_time,
            published_rate,
            self.bounds,
        );

        let evicted = self.history.push(rate);
        self.pending.insert(event, evicted);
        self.refresh_target();

        log::trace!(
            "[RateEstimator] apply {}: local={:.4} target={:.4}",
            event,
            rate,
            self.target_rate
        );
        Some(rate)
    }

    /// Undo a previously applied judgement. Returns whether anything changed.
    pub fn revert(&mut self, event: EventId, counts_for_accuracy: bool, is_hit: bool) -> bool {
        if !self.pending.contains_key(&event) {
            return false;
        }
        if !is_hit || !counts_for_accuracy || !self.baselines.contains(event) {
            return false;
        }
        let Some(evicted) = self.pending.remove(&event) else {
            return false;
        };

        self.history.undo_push(evicted);
        self.refresh_target();

        log::trace!(
            "[RateEstimator] revert {}: target={:.4}",
            event,
            self.target_rate
        );
        true
    }

    fn refresh_target(&mut self) {
        if let Some(mean) = self.history.mean() {
            self.target_rate = mean;
        }
    }

    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    pub fn history(&self) -> &RateHistory {
        &self.history
    }

    pub fn baselines(&self) -> &BaselineIndex {
        &self.baselines
    }

    pub fn bounds(&self) -> RateBounds {
        self.bounds
    }

    pub fn is_pending(&self, event: EventId) -> bool {
        self.pending.contains_key(&event)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
