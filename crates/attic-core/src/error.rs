//! Error types for the Attic plugin core.

use thiserror::Error;

/// Errors that can occur in the plugin core.
///
/// None of these are fatal to the host. Each is either recovered locally
/// (clamped, ignored) or surfaced to the caller as a typed failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    /// A parameter was addressed by an id that was never declared.
    #[error("Invalid parameter id: {0}")]
    InvalidParameterId(String),

    /// A parameter id was declared more than once.
    #[error("Duplicate parameter id: {0}")]
    DuplicateParameterId(String),

    /// A persisted state document could not be recognized.
    ///
    /// Existing parameter values are retained when this is returned.
    #[error("State format mismatch: {0}")]
    StateFormatMismatch(String),

    /// A value fell outside its declared range and was clamped.
    ///
    /// Recovered locally. Used for diagnostics, never returned from `set`.
    #[error("Parameter '{id}' out of range: {value}")]
    ParameterOutOfRange {
        /// Parameter id.
        id: String,
        /// The rejected (pre-clamp) value.
        value: f64,
    },

    /// The audio configuration passed to `prepare` is unusable.
    ///
    /// The previous processing state is left untouched.
    #[error("Prepare failed: {0}")]
    PrepareError(String),
}

/// Result type for plugin core operations.
pub type PluginResult<T> = Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PluginError::InvalidParameterId("cutOff".into());
        assert_eq!(err.to_string(), "Invalid parameter id: cutOff");

        let err = PluginError::ParameterOutOfRange {
            id: "mode".into(),
            value: 7.0,
        };
        assert_eq!(err.to_string(), "Parameter 'mode' out of range: 7");
    }
}
