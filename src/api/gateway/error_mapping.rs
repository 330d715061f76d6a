//! Error mapping helpers for the reqwest gateway.

use http::StatusCode;

use crate::api::error::DashboardError;

/// Maps a reqwest failure raised before a usable response arrived.
pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> DashboardError {
    if error.is_decode() {
        return DashboardError::Decode {
            message: format!("{operation}: {error}"),
        };
    }

    if error.is_builder() {
        return DashboardError::Configuration {
            message: format!("{operation}: {error}"),
        };
    }

    DashboardError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success HTTP status into an API error.
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> DashboardError {
    let message = maybe_message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    });
    DashboardError::Api {
        status: status.as_u16(),
        message: format!("{operation} failed: {message}"),
    }
}

/// Maps a JSON decoding failure.
pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> DashboardError {
    DashboardError::Decode {
        message: format!("{operation}: {error}"),
    }
}
