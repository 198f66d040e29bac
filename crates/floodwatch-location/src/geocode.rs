//! Forward and reverse geocoding: convert place names to coordinates and
//! back. Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::types::{GeocodeError, Location};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "FloodWatch/0.1.0 (https://github.com/floodwatch)";

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
    #[allow(dead_code)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    #[serde(rename = "state_district")]
    state_district: Option<String>,
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

/// Forward geocoder with an injectable base URL for testing.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new() -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: NOMINATIM_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn new_with_base_url(base_url: &str) -> Result<Self, GeocodeError> {
        let mut geocoder = Self::new()?;
        geocoder.base_url = base_url.to_string();
        Ok(geocoder)
    }

    /// Look up a place name and return its coordinate.
    ///
    /// The first search hit wins, matching what a user expects from a
    /// city-name search box.
    pub async fn geocode(&self, query: &str) -> Result<Location, GeocodeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;

        if response.status().as_u16() == 429 {
            return Err(GeocodeError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "search returned status {}",
                response.status()
            )));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::ApiError(format!("parse error: {e}")))?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let latitude: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::ApiError(format!("bad latitude: {}", hit.lat)))?;
        let longitude: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::ApiError(format!("bad longitude: {}", hit.lon)))?;

        let mut location = Location::new(latitude, longitude)?;
        if let Some(name) = hit.display_name {
            location = location.with_name(name);
        }

        tracing::info!(
            "Geocoded '{}' to {:.4}, {:.4}",
            query,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}

/// Reverse geocode coordinates to a human-readable place name (e.g. "Seattle, WA").
/// Returns `None` on failure or timeout; the caller can fall back to coordinates.
pub async fn reverse_geocode(location: &Location) -> Option<String> {
    reverse_geocode_at(NOMINATIM_URL, location).await
}

pub(crate) async fn reverse_geocode_at(base_url: &str, location: &Location) -> Option<String> {
    if location.name.is_some() {
        return location.name.clone();
    }

    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geocoding client: {}", e);
            return None;
        }
    };

    let url = format!(
        "{}/reverse?lat={}&lon={}&format=json&addressdetails=1&layer=address&zoom=10",
        base_url, location.latitude, location.longitude
    );

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Reverse geocode request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: NominatimResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Reverse geocode parse error: {}", e);
            return None;
        }
    };

    let addr = body.address?;

    // Capture state/country before the place chain consumes them
    let state = addr.state.clone();
    let country = addr.country.clone();

    // Prefer city > town > village > municipality for the primary place name
    let place = addr
        .city
        .or(addr.town)
        .or(addr.village)
        .or(addr.municipality)
        .or(addr.state_district)
        .or(addr.county)
        .or(addr.state)
        .or(addr.country)?;

    // Add state/country for disambiguation when different from place
    let suffix = state
        .as_ref()
        .filter(|s| !s.is_empty() && s.as_str() != place)
        .map(String::as_str)
        .or_else(|| {
            country
                .as_ref()
                .filter(|c| !c.is_empty() && c.as_str() != place)
                .map(String::as_str)
        });

    let result = match suffix {
        Some(s) if !s.is_empty() && s != place => format!("{}, {}", place, s),
        _ => place,
    };

    tracing::info!("Reverse geocoded to: {}", result);
    Some(result)
}
