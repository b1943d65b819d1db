// Error types for the adaptive speed engine
//
// The engine's judgement and tick paths never fail; these errors cover the
// places where a host hands us data: configuration and timeline loading.

mod config;
mod timeline;

pub use config::{log_config_error, ConfigError, ConfigErrorCodes};
pub use timeline::{log_timeline_error, TimelineError, TimelineErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so hosts can map failures without matching
/// on every variant.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_trait_objects() {
        let config_err: &dyn ErrorCode = &ConfigError::AverageCountZero;
        assert_eq!(config_err.code(), ConfigErrorCodes::AVERAGE_COUNT_ZERO);

        let timeline_err: &dyn ErrorCode = &TimelineError::UnknownEvent {
            id: crate::timeline::EventId(7),
        };
        assert_eq!(timeline_err.code(), TimelineErrorCodes::UNKNOWN_EVENT);
    }

    #[test]
    fn test_error_propagation() {
        fn may_fail() -> Result<(), ConfigError> {
            Err(ConfigError::AverageCountZero)
        }

        fn caller() -> Result<(), ConfigError> {
            may_fail()?;
            Ok(())
        }

        assert!(caller().is_err());
    }
}
