//! Audio adjustment targets
//!
//! An adjustment target is anything whose playback can be scaled by a bound
//! rate: the music track, or individual samples. Targets multiply together
//! every handle bound to a property.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::rate_handle::RateHandle;

/// Which playback property a rate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustableProperty {
    /// Resampling: speed and pitch change together
    Frequency,
    /// Time-stretching: speed changes, pitch is preserved
    Tempo,
}

impl AdjustableProperty {
    /// Property selected by the "adjust pitch" setting.
    pub fn for_pitch_setting(adjust_pitch: bool) -> Self {
        if adjust_pitch {
            AdjustableProperty::Frequency
        } else {
            AdjustableProperty::Tempo
        }
    }
}

/// Trait implemented by host audio objects that accept rate adjustments.
pub trait AdjustmentTarget: Send + Sync {
    fn add_adjustment(&self, property: AdjustableProperty, handle: RateHandle);

    /// Remove one binding of `handle` for `property`. Unknown bindings are ignored.
    fn remove_adjustment(&self, property: AdjustableProperty, handle: &RateHandle);
}

/// In-memory adjustment target that records its bindings.
///
/// Reference implementation for hosts and the replay runner.
#[derive(Debug, Default)]
pub struct TrackAdjustments {
    bindings: Mutex<Vec<(AdjustableProperty, RateHandle)>>,
}

impl TrackAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    fn aggregate(&self, property: AdjustableProperty) -> f64 {
        let bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        bindings
            .iter()
            .filter(|(bound, _)| *bound == property)
            .map(|(_, handle)| handle.get())
            .product()
    }

    /// Combined frequency multiplier (1.0 when nothing is bound).
    pub fn frequency(&self) -> f64 {
        self.aggregate(AdjustableProperty::Frequency)
    }

    /// Combined tempo multiplier (1.0 when nothing is bound).
    pub fn tempo(&self) -> f64 {
        self.aggregate(AdjustableProperty::Tempo)
    }

    /// Overall playback speed.
    pub fn effective_rate(&self) -> f64 {
        self.frequency() * self.tempo()
    }

    /// Number of handles bound to `property`.
    pub fn bindings(&self, property: AdjustableProperty) -> usize {
        let bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        bindings.iter().filter(|(bound, _)| *bound == property).count()
    }
}

impl AdjustmentTarget for TrackAdjustments {
    fn add_adjustment(&self, property: AdjustableProperty, handle: RateHandle) {
        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        bindings.push((property, handle));
    }

    fn remove_adjustment(&self, property: AdjustableProperty, handle: &RateHandle) {
        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = bindings
            .iter()
            .position(|(bound, h)| *bound == property && h.same_binding(handle))
        {
            bindings.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_for_pitch_setting() {
        assert_eq!(
            AdjustableProperty::for_pitch_setting(true),
            AdjustableProperty::Frequency
        );
        assert_eq!(
            AdjustableProperty::for_pitch_setting(false),
            AdjustableProperty::Tempo
        );
    }

    #[test]
    fn test_unbound_track_plays_at_unit_rate() {
        let track = TrackAdjustments::new();
        assert_eq!(track.frequency(), 1.0);
        assert_eq!(track.tempo(), 1.0);
        assert_eq!(track.effective_rate(), 1.0);
    }

    #[test]
    fn test_bound_handles_multiply() {
        let track = TrackAdjustments::new();
        let rate = RateHandle::new(1.5);
        let other = RateHandle::new(0.5);
        track.add_adjustment(AdjustableProperty::Frequency, rate.clone());
        track.add_adjustment(AdjustableProperty::Tempo, other);

        assert_eq!(track.frequency(), 1.5);
        assert_eq!(track.effective_rate(), 0.75);

        rate.set(2.0);
        assert_eq!(track.effective_rate(), 1.0);
    }

    #[test]
    fn test_remove_only_matching_binding() {
        let track = TrackAdjustments::new();
        let rate = RateHandle::new(1.2);
        track.add_adjustment(AdjustableProperty::Tempo, rate.clone());

        track.remove_adjustment(AdjustableProperty::Frequency, &rate);
        track.remove_adjustment(AdjustableProperty::Tempo, &RateHandle::new(1.2));
        assert_eq!(track.bindings(AdjustableProperty::Tempo), 1);

        track.remove_adjustment(AdjustableProperty::Tempo, &rate);
        assert_eq!(track.bindings(AdjustableProperty::Tempo), 0);
    }
}
