//! Timeline - timed events and their lookup structures
//!
//! The host owns event scheduling; this module only models what the engine
//! needs to read: an explicit identifier, an end time, whether the event can
//! be judged at all, and any nested sub-events.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

pub mod baseline;

pub use baseline::{BaselineEntry, BaselineIndex};

/// Stable identifier for a timed event.
///
/// All event-keyed state is keyed by this handle, never by address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Judgement window kind of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitWindows {
    /// Regular judgeable event
    #[default]
    Standard,
    /// Event that is never judged (e.g. a container whose children carry the judgements)
    Empty,
}

/// A discrete occurrence on the timeline with a defined end time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub id: EventId,
    /// End time in milliseconds
    pub end_time: f64,
    #[serde(default)]
    pub hit_windows: HitWindows,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TimedEvent>,
}

impl TimedEvent {
    pub fn new(id: u32, end_time: f64) -> Self {
        Self {
            id: EventId(id),
            end_time,
            hit_windows: HitWindows::Standard,
            nested: Vec::new(),
        }
    }

    /// Mark this event as unjudgeable.
    pub fn with_empty_windows(mut self) -> Self {
        self.hit_windows = HitWindows::Empty;
        self
    }

    pub fn with_nested(mut self, nested: Vec<TimedEvent>) -> Self {
        self.nested = nested;
        self
    }

    pub fn is_judgeable(&self) -> bool {
        self.hit_windows != HitWindows::Empty
    }
}

/// Visit every event and nested event, parents before their children.
pub fn walk<'a>(events: &'a [TimedEvent], visit: &mut impl FnMut(&'a TimedEvent)) {
    for event in events {
        visit(event);
        walk(&event.nested, visit);
    }
}

/// Collect all events that take part in rate estimation.
///
/// Events with empty judgement windows are skipped, but their nested
/// events are still considered.
pub fn applicable_events(events: &[TimedEvent]) -> Vec<&TimedEvent> {
    let mut out = Vec::new();
    walk(events, &mut |event| {
        if event.is_judgeable() {
            out.push(event);
        }
    });
    out
}

/// A validated set of top-level events.
///
/// Construction rejects non-finite end times and duplicate identifiers,
/// which the engine itself assumes never happen.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<TimedEvent>,
    ids: HashSet<EventId>,
}

impl Timeline {
    pub fn new(events: Vec<TimedEvent>) -> Result<Self, TimelineError> {
        let mut ids = HashSet::new();
        let mut failure = None;

        walk(&events, &mut |event| {
            if failure.is_some() {
                return;
            }
            if !event.end_time.is_finite() {
                failure = Some(TimelineError::NonFiniteEndTime { id: event.id });
            } else if !ids.insert(event.id) {
                failure = Some(TimelineError::DuplicateEventId { id: event.id });
            }
        });

        match failure {
            Some(err) => Err(err),
            None => Ok(Self { events, ids }),
        }
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.ids.contains(&id)
    }

    /// Total number of events, nested ones included.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
