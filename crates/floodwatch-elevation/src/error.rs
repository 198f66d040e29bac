//! Elevation-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElevationError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Result shape mismatch: expected {expected} samples, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ElevationError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { status, .. } if *status >= 500 => {
                "The elevation service is experiencing issues. Please try again later.".to_string()
            }
            Self::ApiError { .. } => "Elevation request failed. Please try again.".to_string(),
            Self::Parse(_) | Self::ShapeMismatch { .. } => {
                "Received an unexpected elevation response.".to_string()
            }
            Self::Network(e) if e.is_timeout() => {
                "Elevation service timed out (server busy). Please try again.".to_string()
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::ApiError { status: 500..=599, .. }
        )
    }
}
