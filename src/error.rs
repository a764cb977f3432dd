//! Error types for sprintsim.
//!
//! Library functions return `Result<T, SimError>` instead of panicking.
//! Configuration problems surface when a simulation is constructed, never
//! part-way through a run.

use thiserror::Error;

/// Result type alias for sprintsim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all sprintsim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Check if this error means the configuration was rejected.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::YamlParse(_) | Self::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_config() {
        let err = SimError::config("iterations must be at least 1");
        assert!(err.is_configuration_error());
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("iterations must be at least 1"));
    }

    #[test]
    fn test_error_serialization() {
        let err = SimError::serialization("failed to serialize");
        assert!(!err.is_configuration_error());
        let msg = err.to_string();
        assert!(msg.contains("Serialization error"));
        assert!(msg.contains("failed to serialize"));
    }

    #[test]
    fn test_error_io() {
        let err = SimError::io("file not found");
        assert!(!err.is_configuration_error());
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_error_yaml_is_configuration_error() {
        let parse: Result<u32, _> = serde_yaml::from_str("[not, a, number");
        let err = SimError::from(parse.unwrap_err());
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("YAML parsing error"));
    }

    #[test]
    fn test_error_debug() {
        let err = SimError::config("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
    }
}
