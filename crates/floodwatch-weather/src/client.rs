//! OpenWeatherMap One Call API client.

use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use floodwatch_core::config::WeatherConfig;
use floodwatch_core::retry::{with_retry, RetryConfig};
use floodwatch_location::Location;

use crate::error::WeatherError;
use crate::types::{Forecast, ForecastDay};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct ApiOneCall {
    daily: Vec<ApiDaily>,
}

#[derive(Debug, Deserialize)]
struct ApiDaily {
    dt: i64,
    temp: ApiTemp,
    humidity: f64,
    #[serde(default)]
    rain: f64,
}

#[derive(Debug, Deserialize)]
struct ApiTemp {
    day: f64,
}

pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    retry: RetryConfig,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            retry: RetryConfig::default(),
        })
    }

    /// Fetch the daily forecast for a location, truncated to `days`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        location: &Location,
        days: u32,
    ) -> Result<Forecast, WeatherError> {
        let url = format!("{}/data/3.0/onecall", self.base_url);

        let response = with_retry(self.retry.clone(), || {
            self.client
                .get(&url)
                .query(&[
                    ("lat", location.latitude.to_string()),
                    ("lon", location.longitude.to_string()),
                    ("appid", self.api_key.clone()),
                    ("units", "metric".to_string()),
                    ("exclude", "minutely,hourly,alerts".to_string()),
                ])
                .send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => WeatherError::InvalidApiKey,
                429 => {
                    let retry_after = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(60);
                    WeatherError::RateLimited(retry_after)
                }
                code => {
                    let text = response.text().await.unwrap_or_default();
                    WeatherError::ApiError {
                        status: code,
                        message: text,
                    }
                }
            });
        }

        let body: ApiOneCall = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("JSON parse error: {e}")))?;

        let forecast_days = body
            .daily
            .into_iter()
            .take(days as usize)
            .map(|day| {
                let date = DateTime::from_timestamp(day.dt, 0)
                    .ok_or_else(|| WeatherError::Parse(format!("bad timestamp: {}", day.dt)))?
                    .date_naive();
                Ok(ForecastDay {
                    date,
                    rainfall_mm: day.rain,
                    temperature_c: day.temp.day,
                    humidity: day.humidity,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        tracing::info!("Fetched {}-day forecast", forecast_days.len());
        Ok(Forecast {
            days: forecast_days,
            source: "OpenWeatherMap".to_string(),
        })
    }
}
