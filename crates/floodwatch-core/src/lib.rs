pub mod app;
pub mod config;
pub mod error;
pub mod retry;

pub use app::App;
pub use config::{
    Config, ElevationConfig, RiskConfig, SatelliteConfig, Sensitivity, WeatherConfig,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
pub use retry::{with_retry, RetryConfig};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("FloodWatch core initialized");
    Ok(())
}
