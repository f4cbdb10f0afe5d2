//! Centralized error types for the burndown service.

use std::time::Duration;
use thiserror::Error;

/// Main error type for burndown operations.
#[derive(Error, Debug)]
pub enum BurndownError {
    #[error("Remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote service returned {status} for {endpoint}")]
    RemoteStatus { status: u16, endpoint: String },

    #[error("List not found on board: {0}")]
    ListNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for burndown operations.
pub type BurndownResult<T> = Result<T, BurndownError>;

impl BurndownError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
