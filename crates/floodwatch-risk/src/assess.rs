//! Assessment orchestration: fetch from each enabled data source,
//! degrade to mock data on failure (recording provenance), then run the
//! blended model.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use floodwatch_core::{Config, Sensitivity};
use floodwatch_elevation::{mock_profile, ElevationClient, ElevationProfile};
use floodwatch_location::Location;
use floodwatch_satellite::{analyze_water, mock_scene, SentinelClient};
use floodwatch_weather::{
    mock_forecast, mock_rainfall_history, mock_storm_alert, Forecast, WeatherClient,
};

use crate::factors;
use crate::model::build_assessment;
use crate::types::{
    AssessmentReport, FactorKind, FactorScore, Provenance, SourceStatus,
};

/// Imagery bounding-box radius around the target coordinate.
const SATELLITE_RADIUS_KM: f64 = 5.0;

/// Days of rainfall history attached to the report.
const HISTORY_DAYS: u32 = 30;

/// Per-assessment options.
#[derive(Debug, Clone)]
pub struct AssessOptions {
    /// Forecast horizon in days (1-7)
    pub days: u32,
    pub sensitivity: Sensitivity,
    pub use_satellite: bool,
    pub use_weather: bool,
    pub use_elevation: bool,
    pub use_historical: bool,
}

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            days: 3,
            sensitivity: Sensitivity::Medium,
            use_satellite: true,
            use_weather: true,
            use_elevation: true,
            use_historical: true,
        }
    }
}

/// Runs assessments against the configured data sources.
///
/// Sources whose credentials are missing start in mock mode; sources
/// whose live fetch fails degrade to mock for that assessment. Either
/// way the substitution is recorded in the report's `SourceStatus` and
/// logged - an assessment never aborts because a third-party API is
/// down.
pub struct Assessor {
    config: Arc<Config>,
    satellite: Option<SentinelClient>,
    weather: Option<WeatherClient>,
    elevation: Option<ElevationClient>,
    seed: Option<u64>,
}

impl Assessor {
    pub fn new(config: Arc<Config>) -> Self {
        let satellite = if config.satellite.is_configured() {
            match SentinelClient::new(&config.satellite) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to build satellite client: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("Sentinel Hub not configured, satellite data will be mocked");
            None
        };

        let weather = if config.weather.is_configured() {
            match WeatherClient::new(&config.weather) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to build weather client: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("OpenWeatherMap not configured, weather data will be mocked");
            None
        };

        let elevation = match ElevationClient::new(&config.elevation) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Failed to build elevation client: {}", e);
                None
            }
        };

        Self {
            config,
            satellite,
            weather,
            elevation,
            seed: None,
        }
    }

    /// Seed the mock-data RNG for reproducible assessments (tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run one assessment.
    pub async fn assess(&self, location: &Location, options: &AssessOptions) -> AssessmentReport {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut sources = SourceStatus {
            satellite: Provenance::Disabled,
            weather: Provenance::Disabled,
            elevation: Provenance::Disabled,
            historical: Provenance::Disabled,
        };
        let mut factors = Vec::new();

        // Satellite imagery
        let water = if options.use_satellite {
            let (scene, provenance) = match &self.satellite {
                Some(client) => match client.fetch_scene(location, SATELLITE_RADIUS_KM).await {
                    Ok(scene) => (scene, Provenance::Live),
                    Err(e) => {
                        tracing::warn!("Satellite fetch failed, using mock scene: {}", e);
                        (
                            mock_scene(location, SATELLITE_RADIUS_KM, &mut rng),
                            Provenance::Mock {
                                reason: e.user_message(),
                            },
                        )
                    }
                },
                None => (
                    mock_scene(location, SATELLITE_RADIUS_KM, &mut rng),
                    Provenance::Mock {
                        reason: "Sentinel Hub not configured".to_string(),
                    },
                ),
            };
            sources.satellite = provenance;

            let analysis = analyze_water(&scene, &mut rng);
            factors.push(FactorScore {
                kind: FactorKind::Satellite,
                score: factors::satellite_risk(&analysis),
            });
            Some(analysis)
        } else {
            None
        };

        // Weather forecast
        let (forecast, rainfall_history, storm_alert) = if options.use_weather {
            let (forecast, provenance): (Forecast, Provenance) = match &self.weather {
                Some(client) => match client.fetch_forecast(location, options.days).await {
                    Ok(forecast) => (forecast, Provenance::Live),
                    Err(e) => {
                        tracing::warn!("Weather fetch failed, using mock forecast: {}", e);
                        (
                            mock_forecast(options.days, &mut rng),
                            Provenance::Mock {
                                reason: e.user_message(),
                            },
                        )
                    }
                },
                None => (
                    mock_forecast(options.days, &mut rng),
                    Provenance::Mock {
                        reason: "OpenWeatherMap not configured".to_string(),
                    },
                ),
            };
            sources.weather = provenance;

            factors.push(FactorScore {
                kind: FactorKind::Weather,
                score: factors::weather_risk(&forecast),
            });
            // History and alerts sit behind a premium upstream tier:
            // always synthesized
            (
                Some(forecast),
                Some(mock_rainfall_history(HISTORY_DAYS, &mut rng)),
                mock_storm_alert(&mut rng),
            )
        } else {
            (None, None, None)
        };

        // Elevation profile
        let (elevation, terrain) = if options.use_elevation {
            let (profile, provenance): (ElevationProfile, Provenance) = match &self.elevation {
                Some(client) => match client.fetch_profile(location).await {
                    Ok(profile) => (profile, Provenance::Live),
                    Err(e) => {
                        tracing::warn!("Elevation fetch failed, using mock profile: {}", e);
                        (
                            mock_profile(
                                location,
                                self.config.elevation.radius_km,
                                self.config.elevation.resolution,
                                &mut rng,
                            ),
                            Provenance::Mock {
                                reason: e.user_message(),
                            },
                        )
                    }
                },
                None => (
                    mock_profile(
                        location,
                        self.config.elevation.radius_km,
                        self.config.elevation.resolution,
                        &mut rng,
                    ),
                    Provenance::Mock {
                        reason: "elevation client unavailable".to_string(),
                    },
                ),
            };
            sources.elevation = provenance;

            factors.push(FactorScore {
                kind: FactorKind::Terrain,
                score: factors::terrain_risk(&profile),
            });
            let terrain = floodwatch_elevation::terrain_risk(&profile);
            (Some(profile), Some(terrain))
        } else {
            (None, None)
        };

        // Historical exposure
        if options.use_historical {
            sources.historical = Provenance::Mock {
                reason: "historical flood records are synthesized".to_string(),
            };
            factors.push(FactorScore {
                kind: FactorKind::Historical,
                score: factors::historical_risk(location),
            });
        }

        let assessment = build_assessment(factors, options.sensitivity, forecast.as_ref());

        AssessmentReport {
            location: location.clone(),
            assessment,
            water,
            forecast,
            rainfall_history,
            elevation,
            terrain,
            storm_alert,
            sources,
        }
    }
}
