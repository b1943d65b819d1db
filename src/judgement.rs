//! Judgement results delivered by the host
//!
//! A judgement is reported once when the event is judged and, possibly, a
//! second time when that judgement is undone (replay rewind). Both
//! directions carry the same `JudgementResult`.

use serde::{Deserialize, Serialize};

use crate::timeline::EventId;

/// Outcome of judging a timed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitResult {
    /// Not judged yet
    #[default]
    None,
    Miss,
    Meh,
    Ok,
    Good,
    Great,
    Perfect,
    SmallTickMiss,
    SmallTickHit,
    LargeTickMiss,
    LargeTickHit,
    SmallBonus,
    LargeBonus,
    IgnoreMiss,
    IgnoreHit,
}

impl HitResult {
    /// Whether this result counts as a successful hit.
    pub fn is_hit(self) -> bool {
        !matches!(
            self,
            HitResult::None
                | HitResult::Miss
                | HitResult::SmallTickMiss
                | HitResult::LargeTickMiss
                | HitResult::IgnoreMiss
        )
    }

    /// Whether this result contributes to accuracy.
    ///
    /// Bonus and ignore results are scored separately and never do.
    pub fn affects_accuracy(self) -> bool {
        matches!(
            self,
            HitResult::Miss
                | HitResult::Meh
                | HitResult::Ok
                | HitResult::Good
                | HitResult::Great
                | HitResult::Perfect
                | HitResult::SmallTickMiss
                | HitResult::SmallTickHit
                | HitResult::LargeTickMiss
                | HitResult::LargeTickHit
        )
    }
}

/// A judgement notification for one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JudgementResult {
    pub event: EventId,
    /// Absolute time at which the event was judged, in milliseconds
    pub time_absolute: f64,
    pub result: HitResult,
}

impl JudgementResult {
    pub fn new(event: EventId, time_absolute: f64, result: HitResult) -> Self {
        Self {
            event,
            time_absolute,
            result,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.result.is_hit()
    }

    pub fn affects_accuracy(&self) -> bool {
        self.result.affects_accuracy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_classification() {
        assert!(HitResult::Great.is_hit());
        assert!(HitResult::SmallTickHit.is_hit());
        assert!(HitResult::IgnoreHit.is_hit());
        assert!(!HitResult::Miss.is_hit());
        assert!(!HitResult::LargeTickMiss.is_hit());
        assert!(!HitResult::None.is_hit());
    }

    #[test]
    fn test_accuracy_classification() {
        assert!(HitResult::Meh.affects_accuracy());
        assert!(HitResult::Miss.affects_accuracy());
        assert!(HitResult::LargeTickHit.affects_accuracy());
        assert!(!HitResult::SmallBonus.affects_accuracy());
        assert!(!HitResult::IgnoreHit.affects_accuracy());
        assert!(!HitResult::None.affects_accuracy());
    }

    #[test]
    fn test_result_json_names() {
        let json = serde_json::to_string(&HitResult::LargeTickHit).unwrap();
        assert_eq!(json, "\"large_tick_hit\"");

        let judgement: JudgementResult =
            serde_json::from_str(r#"{"event": 3, "time_absolute": 1200.5, "result": "great"}"#)
                .unwrap();
        assert_eq!(judgement.event, EventId(3));
        assert!(judgement.is_hit() && judgement.affects_accuracy());
    }
}
