// Timeline error types and constants

use crate::error::ErrorCode;
use crate::timeline::EventId;
use log::error;
use std::fmt;

/// Timeline error code constants
///
/// Error code range: 4001-4003
pub struct TimelineErrorCodes {}

impl TimelineErrorCodes {
    /// An event's end time is NaN or infinite
    pub const NON_FINITE_END_TIME: i32 = 4001;

    /// Two events share the same identifier
    pub const DUPLICATE_EVENT_ID: i32 = 4002;

    /// A judgement references an event missing from the timeline
    pub const UNKNOWN_EVENT: i32 = 4003;
}

/// Log a timeline error with structured context
pub fn log_timeline_error(err: &TimelineError, context: &str) {
    error!(
        "Timeline error in {}: code={}, component=Timeline, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Timeline-related errors
///
/// These are host-side checks. The engine assumes a well-formed event set
/// and never raises them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// End time is NaN or infinite
    NonFiniteEndTime { id: EventId },

    /// Identifier used by more than one event (nested events included)
    DuplicateEventId { id: EventId },

    /// Referenced identifier not present in the timeline
    UnknownEvent { id: EventId },
}

impl ErrorCode for TimelineError {
    fn code(&self) -> i32 {
        match self {
            TimelineError::NonFiniteEndTime { .. } => TimelineErrorCodes::NON_FINITE_END_TIME,
            TimelineError::DuplicateEventId { .. } => TimelineErrorCodes::DUPLICATE_EVENT_ID,
            TimelineError::UnknownEvent { .. } => TimelineErrorCodes::UNKNOWN_EVENT,
        }
    }

    fn message(&self) -> String {
        match self {
            TimelineError::NonFiniteEndTime { id } => {
                format!("Event {} has a non-finite end time", id)
            }
            TimelineError::DuplicateEventId { id } => {
                format!("Event id {} appears more than once", id)
            }
            TimelineError::UnknownEvent { id } => {
                format!("Event {} is not part of the timeline", id)
            }
        }
    }
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimelineError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for TimelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_error_codes() {
        assert_eq!(
            TimelineError::NonFiniteEndTime { id: EventId(1) }.code(),
            TimelineErrorCodes::NON_FINITE_END_TIME
        );
        assert_eq!(
            TimelineError::DuplicateEventId { id: EventId(1) }.code(),
            TimelineErrorCodes::DUPLICATE_EVENT_ID
        );
        assert_eq!(
            TimelineError::UnknownEvent { id: EventId(1) }.code(),
            TimelineErrorCodes::UNKNOWN_EVENT
        );
    }

    #[test]
    fn test_timeline_error_messages() {
        let err = TimelineError::DuplicateEventId { id: EventId(12) };
        assert_eq!(err.message(), "Event id #12 appears more than once");

        let err = TimelineError::UnknownEvent { id: EventId(3) };
        assert!(format!("{}", err).contains("4003"));
    }
}
