//! Weather-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidApiKey => {
                "Weather API key invalid or not activated yet. New keys can take 10 minutes to activate."
                    .to_string()
            }
            Self::RateLimited(secs) => {
                format!("Too many weather requests. Please wait {secs} seconds.")
            }
            Self::ApiError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later.".to_string()
            }
            Self::ApiError { .. } => "Weather request failed. Please try again.".to_string(),
            Self::Parse(_) => "Received an unexpected weather response.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Network(_) | Self::ApiError { status: 500..=599, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_message_mentions_activation() {
        assert!(WeatherError::InvalidApiKey
            .user_message()
            .contains("10 minutes"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(WeatherError::RateLimited(60).is_retryable());
        assert!(!WeatherError::InvalidApiKey.is_retryable());
        assert!(!WeatherError::Parse("bad json".into()).is_retryable());
    }
}
