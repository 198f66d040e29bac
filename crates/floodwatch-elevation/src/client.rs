//! Open-Elevation API client.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

use floodwatch_core::config::ElevationConfig;
use floodwatch_core::retry::{with_retry, RetryConfig};
use floodwatch_location::Location;

use crate::error::ElevationError;
use crate::grid::SampleGrid;
use crate::types::ElevationProfile;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct LookupRequest {
    locations: Vec<LookupPoint>,
}

#[derive(Debug, Serialize)]
struct LookupPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}

pub struct ElevationClient {
    client: reqwest::Client,
    base_url: String,
    radius_km: f64,
    resolution: u32,
    retry: RetryConfig,
}

impl ElevationClient {
    pub fn new(config: &ElevationConfig) -> Result<Self, ElevationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            radius_km: config.radius_km,
            resolution: config.resolution,
            retry: RetryConfig::default(),
        })
    }

    /// Fetch an elevation profile for the area around the location.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_profile(
        &self,
        location: &Location,
    ) -> Result<ElevationProfile, ElevationError> {
        let grid = SampleGrid::build(location, self.radius_km, self.resolution);
        let points = grid.points();

        tracing::info!("Fetching elevation data for {} points", points.len());

        let request = LookupRequest {
            locations: points
                .iter()
                .map(|(lat, lon)| LookupPoint {
                    latitude: *lat,
                    longitude: *lon,
                })
                .collect(),
        };

        let url = format!("{}/api/v1/lookup", self.base_url);
        let response = with_retry(self.retry.clone(), || {
            self.client.post(&url).json(&request).send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ElevationError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| ElevationError::Parse(format!("JSON parse error: {e}")))?;

        let elevations: Vec<f64> = body.results.into_iter().map(|r| r.elevation).collect();
        let profile = ElevationProfile::from_samples(&grid, elevations, "Open-Elevation API")?;

        tracing::info!(
            "Elevation data retrieved, center elevation: {:.1}m",
            profile.center_elevation
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> ElevationConfig {
        ElevationConfig {
            base_url: base_url.into(),
            radius_km: 5.0,
            resolution: 3,
        }
    }

    fn lookup_body(count: usize) -> serde_json::Value {
        let results: Vec<_> = (0..count)
            .map(|i| serde_json::json!({"latitude": 0.0, "longitude": 0.0, "elevation": 10.0 + i as f64}))
            .collect();
        serde_json::json!({ "results": results })
    }

    #[tokio::test]
    async fn test_fetch_profile() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/lookup"))
            .and(body_string_contains("locations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lookup_body(9)))
            .mount(&mock_server)
            .await;

        let client = ElevationClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(40.0, -74.0).unwrap();
        let profile = client.fetch_profile(&location).await.unwrap();

        assert_eq!(profile.resolution, 3);
        assert_eq!(profile.elevations.len(), 9);
        assert_eq!(profile.min_elevation, 10.0);
        assert_eq!(profile.max_elevation, 18.0);
        // Center of a 3x3 grid is index 4
        assert_eq!(profile.center_elevation, 14.0);
        assert_eq!(profile.source, "Open-Elevation API");
    }

    #[tokio::test]
    async fn test_shape_mismatch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/lookup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lookup_body(5)))
            .mount(&mock_server)
            .await;

        let client = ElevationClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(40.0, -74.0).unwrap();
        let result = client.fetch_profile(&location).await;

        assert!(matches!(
            result,
            Err(ElevationError::ShapeMismatch {
                expected: 9,
                got: 5
            })
        ));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/lookup"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let client = ElevationClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(40.0, -74.0).unwrap();
        let result = client.fetch_profile(&location).await;

        assert!(matches!(
            result,
            Err(ElevationError::ApiError { status: 400, .. })
        ));
    }
}
