//! Sentinel Hub Process API client.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use floodwatch_core::config::SatelliteConfig;
use floodwatch_core::retry::{with_retry, RetryConfig};
use floodwatch_location::Location;

use crate::error::SatelliteError;
use crate::types::{Scene, SceneSource};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const SCENE_SIZE: u32 = 512;
const LOOKBACK_DAYS: i64 = 30;

/// True-color render: 2.5x gain on the visible bands.
const EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
  return {
    input: ["B04", "B03", "B02"],
    output: { bands: 3 }
  };
}
function evaluatePixel(sample) {
  return [2.5 * sample.B04, 2.5 * sample.B03, 2.5 * sample.B02];
}
"#;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        // 60s slack so a token never expires mid-request
        Utc::now() + ChronoDuration::seconds(60) >= self.expires_at
    }
}

pub struct SentinelClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    base_url: String,
    retry: RetryConfig,
    token: Mutex<Option<CachedToken>>,
}

impl SentinelClient {
    pub fn new(config: &SatelliteConfig) -> Result<Self, SatelliteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            base_url: config.base_url.clone(),
            retry: RetryConfig::default(),
            token: Mutex::new(None),
        })
    }

    /// Fetch an OAuth access token via the client-credentials grant,
    /// reusing a cached token while it is still valid.
    async fn token(&self) -> Result<String, SatelliteError> {
        if let Some(cached) = self.token.lock().as_ref() {
            if !cached.is_expired() {
                return Ok(cached.access_token.clone());
            }
        }

        let url = format!("{}/oauth/token", self.base_url);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self.client.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SatelliteError::Auth(format!(
                "token endpoint returned {status}: {text}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SatelliteError::Auth(format!("token parse error: {e}")))?;

        let cached = CachedToken {
            access_token: body.access_token.clone(),
            expires_at: Utc::now() + ChronoDuration::seconds(body.expires_in),
        };
        *self.token.lock() = Some(cached);

        tracing::debug!("Obtained Sentinel Hub access token");
        Ok(body.access_token)
    }

    fn invalidate_token(&self) {
        *self.token.lock() = None;
    }

    /// Fetch a recent true-color scene around the location.
    ///
    /// Requests a 512x512 render of `sentinel-2-l2a` over the last 30
    /// days. A stale token is refreshed once; a second 401 surfaces as an
    /// auth error.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_scene(
        &self,
        location: &Location,
        radius_km: f64,
    ) -> Result<Scene, SatelliteError> {
        let bbox = bounding_box(location, radius_km);
        let payload = self.process_payload(bbox);
        let url = format!("{}/api/v1/process", self.base_url);

        let mut refreshed = false;
        loop {
            let token = self.token().await?;

            let response = with_retry(self.retry.clone(), || {
                self.client
                    .post(&url)
                    .bearer_auth(&token)
                    .json(&payload)
                    .send()
            })
            .await?;

            let status = response.status();

            if status.is_success() {
                let bytes = response.bytes().await?;
                tracing::info!("Fetched scene ({} bytes)", bytes.len());
                return Ok(Scene {
                    width: SCENE_SIZE,
                    height: SCENE_SIZE,
                    pixels: None,
                    image: bytes.to_vec(),
                    bbox,
                    acquired: Utc::now(),
                    // Cloud statistics would need a separate request
                    cloud_cover: 0,
                    resolution: "10m".to_string(),
                    bands: vec!["B04".into(), "B03".into(), "B02".into()],
                    source: SceneSource::SentinelL2A,
                });
            }

            if status.as_u16() == 401 && !refreshed {
                tracing::debug!("Access token rejected, refreshing once");
                self.invalidate_token();
                refreshed = true;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => SatelliteError::Auth(format!("{status}: {text}")),
                429 => SatelliteError::RateLimited,
                code => SatelliteError::ApiError {
                    status: code,
                    message: text,
                },
            });
        }
    }

    fn process_payload(&self, bbox: [f64; 4]) -> serde_json::Value {
        let now = Utc::now();
        let from = now - ChronoDuration::days(LOOKBACK_DAYS);

        serde_json::json!({
            "input": {
                "bounds": {
                    "bbox": bbox,
                    "properties": {"crs": "http://www.opengis.net/def/crs/OGC/1.3/CRS84"}
                },
                "data": [{
                    "type": "sentinel-2-l2a",
                    "dataFilter": {
                        "timeRange": {
                            "from": from.format("%Y-%m-%dT00:00:00Z").to_string(),
                            "to": now.format("%Y-%m-%dT23:59:59Z").to_string()
                        }
                    }
                }]
            },
            "output": {
                "width": SCENE_SIZE,
                "height": SCENE_SIZE,
                "responses": [{
                    "identifier": "default",
                    "format": {"type": "image/png"}
                }]
            },
            "evalscript": EVALSCRIPT
        })
    }
}

/// Bounding box around a coordinate as [min_lon, min_lat, max_lon, max_lat].
/// Uses the rough 111 km-per-degree conversion the imagery request needs.
pub fn bounding_box(location: &Location, radius_km: f64) -> [f64; 4] {
    let size = radius_km / 111.0;
    [
        location.longitude - size,
        location.latitude - size,
        location.longitude + size,
        location.latitude + size,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> SatelliteConfig {
        SatelliteConfig {
            client_id: "test-id".into(),
            client_secret: "test-secret".into(),
            base_url: base_url.into(),
        }
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "sentinel-token",
                "expires_in": 3600
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_scene() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/process"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(vec![0x89u8, 0x50, 0x4e, 0x47]),
            )
            .mount(&mock_server)
            .await;

        let client = SentinelClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(40.7128, -74.0060).unwrap();
        let scene = client.fetch_scene(&location, 5.0).await.unwrap();

        assert_eq!(scene.source, SceneSource::SentinelL2A);
        assert_eq!(scene.width, 512);
        assert_eq!(scene.image, vec![0x89u8, 0x50, 0x4e, 0x47]);
        assert!(scene.pixels.is_none());
    }

    #[tokio::test]
    async fn test_token_failure_is_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = SentinelClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(0.0, 0.0).unwrap();
        let result = client.fetch_scene(&location, 5.0).await;

        assert!(matches!(result, Err(SatelliteError::Auth(_))));
    }

    #[tokio::test]
    async fn test_stale_token_refreshed_once() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server).await;

        // Process endpoint always rejects the token
        Mock::given(method("POST"))
            .and(path("/api/v1/process"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = SentinelClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(0.0, 0.0).unwrap();
        let result = client.fetch_scene(&location, 5.0).await;

        // One refresh attempt, then the auth error surfaces
        assert!(matches!(result, Err(SatelliteError::Auth(_))));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/process"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = SentinelClient::new(&test_config(&mock_server.uri())).unwrap();
        let location = Location::new(0.0, 0.0).unwrap();
        let result = client.fetch_scene(&location, 5.0).await;

        assert!(matches!(result, Err(SatelliteError::RateLimited)));
    }

    #[test]
    fn test_bounding_box_centered() {
        let location = Location::new(10.0, 20.0).unwrap();
        let bbox = bounding_box(&location, 111.0);

        assert!((bbox[0] - 19.0).abs() < 1e-9);
        assert!((bbox[1] - 9.0).abs() < 1e-9);
        assert!((bbox[2] - 21.0).abs() < 1e-9);
        assert!((bbox[3] - 11.0).abs() < 1e-9);
    }
}
