//! Error types for babycal.

use thiserror::Error;

/// Errors that can occur while loading periods or rendering a calendar.
#[derive(Error, Debug)]
pub enum BabycalError {
    #[error("Could not load periods: {0}")]
    Load(String),

    #[error("Unsupported output format '{0}' (expected 'json' or 'ical')")]
    UnsupportedFormat(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for babycal operations.
pub type BabycalResult<T> = Result<T, BabycalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = BabycalError::UnsupportedFormat("pdf".into());
        assert_eq!(
            err.to_string(),
            "Unsupported output format 'pdf' (expected 'json' or 'ical')"
        );

        let err = BabycalError::Cache("/tmp/x: Permission denied".into());
        assert_eq!(err.to_string(), "Cache error: /tmp/x: Permission denied");
    }
}
