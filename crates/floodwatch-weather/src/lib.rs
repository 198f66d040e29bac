//! Weather data for FloodWatch
//!
//! Fetches daily forecasts from the OpenWeatherMap One Call API and
//! synthesizes mock forecasts, rainfall history, and storm alerts when
//! the API is not configured or a fetch fails.

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use mock::{mock_forecast, mock_rainfall_history, mock_storm_alert};
pub use types::{AlertLevel, Forecast, ForecastDay, RainfallHistory, StormAlert};
