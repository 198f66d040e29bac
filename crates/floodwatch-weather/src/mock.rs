//! Synthesized forecasts, rainfall history, and storm alerts.
//!
//! All generators take an explicit RNG so callers can seed them and keep
//! the pipeline reproducible. The historical-rainfall endpoint upstream
//! sits behind a premium tier, so history is always synthesized.

use chrono::{Duration, Utc};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::types::{AlertLevel, Forecast, ForecastDay, RainfallHistory, StormAlert};

fn normal_jitter<R: Rng>(rng: &mut R, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * std_dev
}

/// Build a mock daily forecast: a base rainfall level with day-to-day
/// jitter, mild temperatures, and moderate humidity.
pub fn mock_forecast<R: Rng>(days: u32, rng: &mut R) -> Forecast {
    let today = Utc::now().date_naive();
    let base_rainfall = rng.random_range(0.0..20.0);

    let days = (0..days as i64)
        .map(|i| ForecastDay {
            date: today + Duration::days(i),
            rainfall_mm: (base_rainfall + normal_jitter(rng, 10.0)).max(0.0),
            temperature_c: 20.0 + normal_jitter(rng, 5.0),
            humidity: (60.0 + normal_jitter(rng, 15.0)).clamp(0.0, 100.0),
        })
        .collect();

    Forecast {
        days,
        source: "Mock Data".to_string(),
    }
}

/// Build mock rainfall history for the past `days_back` days.
pub fn mock_rainfall_history<R: Rng>(days_back: u32, rng: &mut R) -> RainfallHistory {
    let today = Utc::now().date_naive();

    let days = (1..=days_back as i64)
        .rev()
        .map(|i| {
            let rainfall = (10.0 + normal_jitter(rng, 8.0)).max(0.0);
            (today - Duration::days(i), rainfall)
        })
        .collect();

    RainfallHistory {
        days,
        source: "Mock Data".to_string(),
    }
}

/// Roll for an active storm alert: 30% chance, severe above 0.9.
pub fn mock_storm_alert<R: Rng>(rng: &mut R) -> Option<StormAlert> {
    let chance: f64 = rng.random();
    if chance <= 0.7 {
        return None;
    }

    let now = Utc::now();
    Some(StormAlert {
        level: if chance > 0.9 {
            AlertLevel::Severe
        } else {
            AlertLevel::Moderate
        },
        description: "Heavy rainfall expected in the next 48 hours".to_string(),
        issued: now,
        expires: now + Duration::days(2),
    })
}
