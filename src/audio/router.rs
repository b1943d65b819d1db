//! Adjustment router
//!
//! Binds the published-rate handle to the track as either a frequency or a
//! tempo adjustment. Switching modes removes the old binding and adds the new
//! one around the same handle, so the rate is applied exactly once at all
//! times. Per-tick updates go through the handle, not the router.

use std::sync::Arc;

use super::adjustment::{AdjustableProperty, AdjustmentTarget};
use super::rate_handle::RateHandle;

pub struct AdjustmentRouter {
    handle: RateHandle,
    adjust_pitch: bool,
    track: Option<Arc<dyn AdjustmentTarget>>,
}

impl AdjustmentRouter {
    pub fn new(handle: RateHandle, adjust_pitch: bool) -> Self {
        Self {
            handle,
            adjust_pitch,
            track: None,
        }
    }

    /// Property the track is currently adjusted through.
    pub fn property(&self) -> AdjustableProperty {
        AdjustableProperty::for_pitch_setting(self.adjust_pitch)
    }

    pub fn adjust_pitch(&self) -> bool {
        self.adjust_pitch
    }

    pub fn handle(&self) -> &RateHandle {
        &self.handle
    }

    pub fn is_bound(&self) -> bool {
        self.track.is_some()
    }

    /// Bind to `track` under the current mode, releasing any previous track.
    pub fn bind(&mut self, track: Arc<dyn AdjustmentTarget>) {
        self.unbind();
        track.add_adjustment(self.property(), self.handle.clone());
        self.track = Some(track);
    }

    /// Samples always follow the rate through frequency.
    pub fn bind_sample(&self, sample: &dyn AdjustmentTarget) {
        sample.add_adjustment(AdjustableProperty::Frequency, self.handle.clone());
    }

    /// Switch between pitch and tempo adjustment. No-op when unchanged.
    pub fn set_adjust_pitch(&mut self, adjust_pitch: bool) {
        if adjust_pitch == self.adjust_pitch {
            return;
        }
        let old = self.property();
        self.adjust_pitch = adjust_pitch;
        let new = self.property();

        if let Some(track) = &self.track {
            track.remove_adjustment(old, &self.handle);
            track.add_adjustment(new, self.handle.clone());
        }
        log::debug!("[AdjustmentRouter] switched {:?} -> {:?}", old, new);
    }

    /// Release the track binding.
    pub fn unbind(&mut self) {
        if let Some(track) = self.track.take() {
            track.remove_adjustment(self.property(), &self.handle);
        }
    }
}
