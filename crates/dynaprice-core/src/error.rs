//! Dashboard error types.

use dynaprice_fetch::FetchError;
use thiserror::Error;

/// Errors that can occur in dashboard operations.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The request failed in transport or the server returned non-2xx.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response was JSON but not the shape the endpoint promises.
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// User-entered input was rejected before dispatch.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export requested with no products loaded.
    #[error("No products loaded. Load products first.")]
    EmptyExport,

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Settings could not be read or persisted.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Filesystem failure while writing an export.
    #[error("I/O error: {0}")]
    Io(String),
}

impl DashboardError {
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        DashboardError::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Short label for the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Fetch(e) if e.status().is_some() => "status",
            DashboardError::Fetch(_) => "transport",
            DashboardError::Decode { .. } => "decode",
            DashboardError::Validation(_) => "validation",
            DashboardError::EmptyExport => "empty",
            DashboardError::Csv(_) => "csv",
            DashboardError::Settings(_) => "settings",
            DashboardError::Io(_) => "io",
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Csv(e.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self {
        DashboardError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_distinguishes_status_from_transport() {
        let status: DashboardError = FetchError::HttpError {
            status: 503,
            message: "Service unavailable".into(),
        }
        .into();
        let transport: DashboardError = FetchError::RequestError("refused".into()).into();
        assert_eq!(status.kind(), "status");
        assert_eq!(transport.kind(), "transport");
        assert_eq!(DashboardError::EmptyExport.kind(), "empty");
    }

    #[test]
    fn test_fetch_message_is_transparent() {
        let err: DashboardError = FetchError::HttpError {
            status: 404,
            message: "Product not found".into(),
        }
        .into();
        assert_eq!(err.to_string(), "API Error: 404: Product not found");
    }
}
