//! Per-source sub-score rules. Each returns a value in [0, 100].

use std::hash::{Hash, Hasher};

use floodwatch_elevation::ElevationProfile;
use floodwatch_location::Location;
use floodwatch_satellite::WaterAnalysis;
use floodwatch_weather::Forecast;

/// Score satellite-observed water coverage.
pub fn satellite_risk(analysis: &WaterAnalysis) -> f64 {
    let mut risk: f64 = 0.0;

    if analysis.water_percentage >= 30.0 {
        risk += 40.0;
    } else if analysis.water_percentage >= 20.0 {
        risk += 25.0;
    } else if analysis.water_percentage >= 10.0 {
        risk += 10.0;
    }

    if analysis.change > 5.0 {
        risk += 20.0;
    } else if analysis.change > 0.0 {
        risk += 10.0;
    }

    risk += analysis.risk_count() as f64 * 5.0;

    risk.min(100.0)
}

/// Score forecast rainfall and humidity.
pub fn weather_risk(forecast: &Forecast) -> f64 {
    let total_rainfall = forecast.total_rainfall();
    let avg_humidity = forecast.avg_humidity();

    // Risk increases with rainfall and humidity
    let mut risk: f64 = 0.0;

    if total_rainfall > 100.0 {
        risk += 40.0;
    } else if total_rainfall > 50.0 {
        risk += 25.0;
    } else if total_rainfall > 20.0 {
        risk += 10.0;
    }

    if avg_humidity > 80.0 {
        risk += 15.0;
    } else if avg_humidity > 70.0 {
        risk += 8.0;
    }

    // Check for heavy rain in a single day
    let max_daily = forecast.max_daily_rainfall();
    if max_daily > 50.0 {
        risk += 20.0;
    } else if max_daily > 30.0 {
        risk += 10.0;
    }

    risk.min(100.0)
}

/// Score elevation and slope.
pub fn terrain_risk(profile: &ElevationProfile) -> f64 {
    let center = profile.center_elevation;
    let slope = profile.slope.average;

    let mut risk: f64 = 0.0;

    // Low elevation
    if center < 50.0 {
        risk += 35.0;
    } else if center < 100.0 {
        risk += 15.0;
    }

    // Flat terrain
    if slope < 2.0 {
        risk += 30.0;
    } else if slope < 5.0 {
        risk += 15.0;
    }

    risk.min(100.0)
}

/// Score historical flood exposure.
///
/// There is no flood-event database behind this; the score is a stable
/// pseudo-random value in [10, 40) derived from the rounded coordinate,
/// so repeated assessments of the same place agree.
pub fn historical_risk(location: &Location) -> f64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    // Round to ~11m so nearby queries share a history
    ((location.latitude * 10_000.0).round() as i64).hash(&mut hasher);
    ((location.longitude * 10_000.0).round() as i64).hash(&mut hasher);
    let hash = hasher.finish();

    10.0 + (hash % 30_000) as f64 / 1_000.0
}
