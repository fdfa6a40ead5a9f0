//! Error types for sort runs.

use thiserror::Error;

/// Result type alias for pixelsort operations.
pub type Result<T> = std::result::Result<T, PixelsortError>;

/// Error type for pixelsort operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PixelsortError {
    /// A `SortConfig` field is out of its accepted range.
    #[error("Invalid configuration '{parameter}': {reason}")]
    InvalidConfig {
        /// The offending field
        parameter: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// A textual option could not be parsed.
    #[error("Invalid {kind} '{value}'")]
    InvalidValue {
        /// What was being parsed, e.g. "sorting mode"
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl PixelsortError {
    pub(crate) fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        PixelsortError::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn value(kind: &'static str, value: impl Into<String>) -> Self {
        PixelsortError::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let error = PixelsortError::config("section_length", "must be >= 1");
        let msg = format!("{}", error);
        assert!(msg.contains("'section_length'"));
        assert!(msg.contains("must be >= 1"));
    }

    #[test]
    fn test_invalid_value_message() {
        let error = PixelsortError::value("sorting mode", "luminance");
        assert_eq!(error.to_string(), "Invalid sorting mode 'luminance'");
    }
}
