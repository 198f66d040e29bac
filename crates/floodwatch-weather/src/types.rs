use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of forecast data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    /// Relative humidity (0-100)
    pub humidity: f64,
}

/// Daily forecast bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
    pub source: String,
}

impl Forecast {
    /// Total expected rainfall over the horizon, in mm.
    pub fn total_rainfall(&self) -> f64 {
        self.days.iter().map(|d| d.rainfall_mm).sum()
    }

    /// Heaviest single-day rainfall, in mm.
    pub fn max_daily_rainfall(&self) -> f64 {
        self.days
            .iter()
            .map(|d| d.rainfall_mm)
            .fold(0.0, f64::max)
    }

    /// Mean relative humidity across the horizon.
    pub fn avg_humidity(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.days.iter().map(|d| d.humidity).sum::<f64>() / self.days.len() as f64
    }
}

/// Historical rainfall observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainfallHistory {
    /// (date, rainfall_mm) pairs, oldest first
    pub days: Vec<(NaiveDate, f64)>,
    pub source: String,
}

impl RainfallHistory {
    pub fn average(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.total() / self.days.len() as f64
    }

    pub fn max(&self) -> f64 {
        self.days.iter().map(|(_, mm)| *mm).fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.days.iter().map(|(_, mm)| *mm).sum()
    }
}

/// Storm alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Moderate,
    Severe,
}

/// An active storm/flood alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormAlert {
    pub level: AlertLevel,
    pub description: String,
    pub issued: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}
