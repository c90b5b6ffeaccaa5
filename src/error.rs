//! Error types for the dashboard worker
//!
//! Uses thiserror for ergonomic error definitions.
//! All errors are non-panicking for production safety.

use thiserror::Error;

use crate::types::ProviderKind;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard worker errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider unavailable (network failure, bad status, shape mismatch)
    #[error("{provider} provider unavailable: {reason}")]
    Provider {
        provider: ProviderKind,
        reason: String,
    },

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: retry after {0} seconds")]
    RateLimit(u64),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DashboardError {
    /// Shorthand for the collapsed "provider unavailable" category
    pub fn provider(provider: ProviderKind, reason: impl Into<String>) -> Self {
        DashboardError::Provider {
            provider,
            reason: reason.into(),
        }
    }
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::provider(ProviderKind::Derivatives, "HTTP 502");
        assert!(err.to_string().contains("derivatives"));
        assert!(err.to_string().contains("HTTP 502"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
    }
}
