//! Error types exposed by the dashboard API layer.

use thiserror::Error;

/// Errors surfaced while configuring the dashboard or talking to the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// Networking failed while calling the backend.
    #[error("network error talking to the crawler API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The backend answered with a non-success status code.
    #[error("crawler API returned status {status}: {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("could not decode crawler API response: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The terminal UI failed to start or crashed.
    #[error("terminal UI error: {message}")]
    Terminal {
        /// Error detail reported by the TUI runtime.
        message: String,
    },
}

impl DashboardError {
    /// Returns true when the failure happened before a response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
