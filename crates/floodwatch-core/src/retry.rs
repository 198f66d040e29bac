//! Retry utilities for HTTP operations with exponential backoff.
//!
//! This module provides retry logic for transient network failures:
//! - Timeouts
//! - 5xx server errors
//! - Connection resets
//!
//! It does NOT retry:
//! - 4xx client errors (bad requests, not found, etc.)
//! - Authentication failures (401, 403)

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};

/// Default retry configuration
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 100;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5000;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay between retries (doubles each attempt)
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    /// Calculate the delay for a given attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Exponential backoff: initial_delay * 2^attempt
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = self.initial_delay.as_millis() as u64 * factor;
        let capped = delay_ms.min(self.max_delay.as_millis() as u64);
        Duration::from_millis(capped)
    }
}

/// Error classification for retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Should retry the request
    Retry,
    /// Should not retry - permanent failure
    NoRetry,
}

/// Check if a reqwest error is retryable
pub fn is_retryable_error(error: &reqwest::Error) -> RetryDecision {
    // Timeout errors are retryable
    if error.is_timeout() {
        tracing::debug!("Request timed out, will retry");
        return RetryDecision::Retry;
    }

    // Connection errors (reset, refused) are retryable
    if error.is_connect() {
        tracing::debug!("Connection error, will retry");
        return RetryDecision::Retry;
    }

    // Request errors (body issues) are not retryable
    if error.is_request() {
        tracing::debug!("Request error, not retryable");
        return RetryDecision::NoRetry;
    }

    // Status code errors need further inspection
    if let Some(status) = error.status() {
        return is_retryable_status(status);
    }

    // Default: don't retry unknown errors
    RetryDecision::NoRetry
}

/// Check if a status code is retryable
pub fn is_retryable_status(status: StatusCode) -> RetryDecision {
    // 5xx server errors are retryable
    if status.is_server_error() {
        tracing::debug!("Server error ({}), will retry", status);
        return RetryDecision::Retry;
    }

    // 429 Too Many Requests - should retry with backoff
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::debug!("Rate limited (429), will retry");
        return RetryDecision::Retry;
    }

    // 408 Request Timeout - retryable
    if status == StatusCode::REQUEST_TIMEOUT {
        tracing::debug!("Request timeout (408), will retry");
        return RetryDecision::Retry;
    }

    // Everything else (4xx client errors, success) - no retry
    RetryDecision::NoRetry
}

/// Execute an HTTP request with retry logic.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation` - Async closure that performs the HTTP request
///
/// # Returns
/// The response (the final one, if its status was retryable but attempts
/// ran out) or the last error after all retries are exhausted.
///
/// # Example
/// ```ignore
/// let response = with_retry(
///     RetryConfig::default(),
///     || async { client.get(url).send().await }
/// ).await?;
/// ```
pub async fn with_retry<F, Fut>(
    config: RetryConfig,
    operation: F,
) -> Result<Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Response, reqwest::Error>>,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = config.delay_for_attempt(attempt - 1);
            tracing::info!(
                "Retry attempt {} of {}, waiting {:?}",
                attempt,
                config.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        match operation().await {
            Ok(response) => {
                let status = response.status();

                if is_retryable_status(status) == RetryDecision::Retry
                    && attempt < config.max_retries
                {
                    tracing::warn!(
                        "Request returned retryable status {}, attempt {} of {}",
                        status,
                        attempt + 1,
                        config.max_retries + 1
                    );
                    attempt += 1;
                    continue;
                }

                // Success or non-retryable status
                if attempt > 0 {
                    tracing::info!("Request succeeded after {} retries", attempt);
                }
                return Ok(response);
            }
            Err(e) => {
                if is_retryable_error(&e) == RetryDecision::NoRetry {
                    tracing::debug!("Non-retryable error: {}", e);
                    return Err(e);
                }

                if attempt >= config.max_retries {
                    tracing::error!("All {} retry attempts exhausted", config.max_retries + 1);
                    return Err(e);
                }

                tracing::warn!(
                    "Retryable error on attempt {} of {}: {}",
                    attempt + 1,
                    config.max_retries + 1,
                    e
                );
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(100));
        assert_eq!(config.max_delay, Duration::from_millis(5000));
    }

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig::new(3, 100, 5000);

        // First retry: 100ms
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        // Second retry: 200ms
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        // Third retry: 400ms
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
        // Fourth retry: 800ms
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(800));
    }

    #[test]
    fn test_delay_capped_at_max() {
        let config = RetryConfig::new(10, 100, 1000);

        // With 100ms initial and max 1000ms, 2^4 * 100 = 1600 > 1000
        assert_eq!(config.delay_for_attempt(4), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(1000));
    }

    #[test]
    fn test_retryable_status_codes() {
        // Server errors should retry
        assert_eq!(
            is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR),
            RetryDecision::Retry
        );
        assert_eq!(
            is_retryable_status(StatusCode::BAD_GATEWAY),
            RetryDecision::Retry
        );
        assert_eq!(
            is_retryable_status(StatusCode::SERVICE_UNAVAILABLE),
            RetryDecision::Retry
        );

        // Rate limiting should retry
        assert_eq!(
            is_retryable_status(StatusCode::TOO_MANY_REQUESTS),
            RetryDecision::Retry
        );

        // Client errors should NOT retry
        assert_eq!(
            is_retryable_status(StatusCode::BAD_REQUEST),
            RetryDecision::NoRetry
        );
        assert_eq!(
            is_retryable_status(StatusCode::UNAUTHORIZED),
            RetryDecision::NoRetry
        );
        assert_eq!(
            is_retryable_status(StatusCode::NOT_FOUND),
            RetryDecision::NoRetry
        );

        // Success should NOT retry
        assert_eq!(is_retryable_status(StatusCode::OK), RetryDecision::NoRetry);
    }

    #[tokio::test]
    async fn test_with_retry_eventual_success() {
        let mock_server = MockServer::start().await;

        // First two calls fail with 503, third succeeds
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/flaky", mock_server.uri());

        let response = with_retry(RetryConfig::new(3, 1, 10), || {
            let client = client.clone();
            let url = url.clone();
            async move { client.get(&url).send().await }
        })
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_on_client_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/forbidden", mock_server.uri());

        let response = with_retry(RetryConfig::new(3, 1, 10), || {
            let client = client.clone();
            let url = url.clone();
            async move { client.get(&url).send().await }
        })
        .await
        .unwrap();

        // 403 is returned as-is, not retried
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
