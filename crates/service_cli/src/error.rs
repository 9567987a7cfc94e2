//! Error types for the hedgelab CLI.

use thiserror::Error;

use pricer_core::types::PricingError;

use crate::config::ConfigError;

/// Errors surfaced by `hedgelab` subcommands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing engine rejected the inputs
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Command-line argument outside its domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        CliError::InvalidArgument(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_converts() {
        let err: CliError = PricingError::invalid("spot", "must be positive, got -1").into();
        assert!(matches!(err, CliError::Pricing(_)));
        assert!(err.to_string().contains("spot"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: CliError = ConfigError::Validation(vec!["n_paths must be positive".into()]).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = CliError::invalid_argument("--layers exceeds --steps");
        assert_eq!(err.to_string(), "Invalid argument: --layers exceeds --steps");
    }
}
