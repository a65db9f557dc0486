//! Unified error handling for the grid tracker.
//!
//! Layer-local errors (config, API, ledger) stay with their modules; this
//! type ties them together for callers that cross layers, with helpers to
//! classify failures for logging and retry decisions.

use std::io;

use crate::clients::coingecko::ApiError;
use crate::config::ConfigError;
use crate::core::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Asset catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("File read error: {0}")]
    FileRead(String),

    #[error("File write error: {0}")]
    FileWrite(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    /// Error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            TrackerError::Config(_) => "config",
            TrackerError::Ledger(_) => "ledger",
            TrackerError::Api(_) => "api",
            TrackerError::CatalogUnavailable(_) => "catalog",
            TrackerError::FileNotFound(_)
            | TrackerError::FileRead(_)
            | TrackerError::FileWrite(_)
            | TrackerError::Json(_) => "io",
            TrackerError::Internal(_) => "internal",
        }
    }

    /// Whether waiting for the next tick can plausibly fix this
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TrackerError::Api(ApiError::Network(_))
                | TrackerError::Api(ApiError::Timeout(_))
                | TrackerError::Api(ApiError::Http(_))
                | TrackerError::Api(ApiError::PriceUnavailable { .. })
                | TrackerError::CatalogUnavailable(_)
        )
    }
}

// Conversion implementations for common error types

impl From<io::Error> for TrackerError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => TrackerError::FileNotFound(err.to_string()),
            io::ErrorKind::PermissionDenied => TrackerError::FileRead(err.to_string()),
            _ => TrackerError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError::Api(ApiError::from(err))
    }
}

/// Result type alias using TrackerError
pub type TrackerResult<T> = Result<T, TrackerError>;
