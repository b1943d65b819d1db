//! Event timing index
//!
//! The local rate for a judged event is measured against the end time of the
//! nearest strictly-earlier distinct event. Those baselines are computed once
//! per attached timeline with a sort + binary search and never touched again
//! while judging.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{applicable_events, EventId, TimedEvent};

/// Per-event timing data used by the rate estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineEntry {
    /// The event's own end time
    pub end_time: f64,
    /// End time of the previous distinct event
    pub baseline: f64,
}

/// Immutable map from event to its baseline end time.
///
/// Events without an earlier distinct end time have no entry and are
/// excluded from rate computation.
#[derive(Debug, Clone, Default)]
pub struct BaselineIndex {
    entries: HashMap<EventId, BaselineEntry>,
}

impl BaselineIndex {
    /// Build the index from the full event set (nested events included,
    /// unjudgeable events excluded).
    ///
    /// End times must be finite. `Timeline::new` enforces that for hosts
    /// that want the check.
    pub fn build(events: &[TimedEvent]) -> Self {
        let applicable = applicable_events(events);

        let mut end_times: Vec<f64> = applicable.iter().map(|e| e.end_time).collect();
        end_times.sort_by(compare_times);
        end_times.dedup();

        let mut entries = HashMap::with_capacity(applicable.len());
        for event in applicable {
            // Exact match expected; otherwise fall back to the next larger position
            let index = end_times
                .binary_search_by(|probe| compare_times(probe, &event.end_time))
                .unwrap_or_else(|insert_at| insert_at);

            if let Some(previous) = index.checked_sub(1) {
                entries.insert(
                    event.id,
                    BaselineEntry {
                        end_time: event.end_time,
                        baseline: end_times[previous],
                    },
                );
            }
        }

        log::debug!(
            "[BaselineIndex] {} distinct end times, {} events with a baseline",
            end_times.len(),
            entries.len()
        );

        Self { entries }
    }

    pub fn get(&self, event: EventId) -> Option<&BaselineEntry> {
        self.entries.get(&event)
    }

    pub fn baseline(&self, event: EventId) -> Option<f64> {
        self.entries.get(&event).map(|entry| entry.baseline)
    }

    pub fn contains(&self, event: EventId) -> bool {
        self.entries.contains_key(&event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compare_times(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_has_no_baseline() {
        let index = BaselineIndex::build(&[
            TimedEvent::new(1, 1000.0),
            TimedEvent::new(2, 1500.0),
            TimedEvent::new(3, 2000.0),
        ]);

        assert!(!index.contains(EventId(1)));
        assert_eq!(index.baseline(EventId(2)), Some(1000.0));
        assert_eq!(index.baseline(EventId(3)), Some(1500.0));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_unsorted_input() {
        let index = BaselineIndex::build(&[
            TimedEvent::new(1, 3000.0),
            TimedEvent::new(2, 1000.0),
            TimedEvent::new(3, 2000.0),
        ]);

        assert_eq!(index.baseline(EventId(1)), Some(2000.0));
        assert_eq!(index.baseline(EventId(2)), None);
        assert_eq!(index.baseline(EventId(3)), Some(1000.0));
    }

    #[test]
    fn test_simultaneous_events_share_previous_distinct_time() {
        let index = BaselineIndex::build(&[
            TimedEvent::new(1, 500.0),
            TimedEvent::new(2, 1000.0),
            TimedEvent::new(3, 1000.0),
        ]);

        assert_eq!(index.baseline(EventId(2)), Some(500.0));
        assert_eq!(index.baseline(EventId(3)), Some(500.0));
    }

    #[test]
    fn test_simultaneous_first_events_have_no_baseline() {
        let index = BaselineIndex::build(&[TimedEvent::new(1, 0.0), TimedEvent::new(2, 0.0)]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_nested_events_participate() {
        let index = BaselineIndex::build(&[TimedEvent::new(1, 1000.0)
            .with_nested(vec![TimedEvent::new(2, 400.0), TimedEvent::new(3, 700.0)])]);

        assert_eq!(index.baseline(EventId(2)), None);
        assert_eq!(index.baseline(EventId(3)), Some(400.0));
        assert_eq!(index.baseline(EventId(1)), Some(700.0));
    }

    #[test]
    fn test_unjudgeable_events_are_not_baselines() {
        let index = BaselineIndex::build(&[
            TimedEvent::new(1, 100.0).with_empty_windows(),
            TimedEvent::new(2, 200.0),
            TimedEvent::new(3, 300.0),
        ]);

        assert!(!index.contains(EventId(1)));
        assert_eq!(index.baseline(EventId(2)), None);
        assert_eq!(index.baseline(EventId(3)), Some(200.0));
    }

    #[test]
    fn test_entry_keeps_end_time() {
        let index = BaselineIndex::build(&[TimedEvent::new(1, 100.0), TimedEvent::new(2, 350.0)]);
        let entry = index.get(EventId(2)).copied().unwrap();
        assert_eq!(
            entry,
            BaselineEntry {
                end_time: 350.0,
                baseline: 100.0
            }
        );
    }
}
