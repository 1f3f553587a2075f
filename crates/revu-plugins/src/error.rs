//! Plugin injection error types.
//!
//! These never cross the subsystem boundary as failure state: the loader
//! logs them per URL and moves on, so a broken plugin cannot take the
//! others down with it.

use thiserror::Error;

/// Errors from fetching or evaluating a single plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin URL could not be fetched.
    #[error("failed to fetch plugin {url}: {message}")]
    Fetch {
        /// The URL that failed.
        url: String,
        /// Transport-level failure description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("plugin {url} returned HTTP {status}")]
    HttpStatus {
        /// The URL that failed.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The fetched plugin body failed to evaluate.
    #[error("failed to evaluate plugin {url}: {message}")]
    Evaluate {
        /// The URL whose body failed.
        url: String,
        /// Evaluation failure description.
        message: String,
    },
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
