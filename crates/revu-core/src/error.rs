//! Error types for the core crate.

use thiserror::Error;

/// Errors from parsing server configuration payloads.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The server payload was not valid JSON for the config model.
    #[error("malformed server config: {source}")]
    Parse {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_includes_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ConfigError::from(source);
        assert!(err.to_string().starts_with("malformed server config:"));
    }
}
