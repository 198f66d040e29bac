//! Satellite-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatelliteError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limited by imagery service")]
    RateLimited,

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid scene data: {0}")]
    InvalidScene(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SatelliteError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(_) => {
                "Sentinel Hub sign-in failed. Check your client credentials.".to_string()
            }
            Self::RateLimited => {
                "Imagery request quota exceeded. Please wait and try again.".to_string()
            }
            Self::ApiError { status, .. } if *status >= 500 => {
                "The imagery service is experiencing issues. Please try again later.".to_string()
            }
            Self::ApiError { .. } => "Imagery request failed. Please try again.".to_string(),
            Self::InvalidScene(msg) => format!("Invalid scene: {msg}"),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Network(_) | Self::ApiError { status: 500..=599, .. }
        )
    }
}
