use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Risk sensitivity preference. Scales the blended score before the
/// level thresholds are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    /// Multiplier applied to the blended risk score.
    pub fn multiplier(self) -> f64 {
        match self {
            Sensitivity::Low => 0.8,
            Sensitivity::Medium => 1.0,
            Sensitivity::High => 1.2,
        }
    }
}

impl std::str::FromStr for Sensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Sensitivity::Low),
            "medium" => Ok(Sensitivity::Medium),
            "high" => Ok(Sensitivity::High),
            other => Err(format!("unknown sensitivity: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Sentinel Hub imagery settings
    #[serde(default)]
    pub satellite: SatelliteConfig,

    /// OpenWeatherMap settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Open-Elevation sampling settings
    #[serde(default)]
    pub elevation: ElevationConfig,

    /// Risk model settings
    #[serde(default)]
    pub risk: RiskConfig,
}

/// Sentinel Hub OAuth credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteConfig {
    /// OAuth client ID
    /// Create at: https://apps.sentinel-hub.com/dashboard
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// API base URL (token and process endpoints share it)
    #[serde(default = "default_satellite_base_url")]
    pub base_url: String,
}

fn default_satellite_base_url() -> String {
    "https://services.sentinel-hub.com".to_string()
}

impl SatelliteConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.client_id.starts_with("YOUR_")
            && !self.client_secret.starts_with("YOUR_")
    }
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            client_id: "YOUR_SENTINEL_CLIENT_ID".to_string(),
            client_secret: "YOUR_SENTINEL_CLIENT_SECRET".to_string(),
            base_url: default_satellite_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key (free tier, 1000 calls/day)
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Forecast horizon in days (1-7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_forecast_days() -> u32 {
    3
}

impl WeatherConfig {
    /// Check if the API key is configured (not a placeholder)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_OPENWEATHER_API_KEY".to_string(),
            base_url: default_weather_base_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationConfig {
    /// API base URL (Open-Elevation, no key required)
    #[serde(default = "default_elevation_base_url")]
    pub base_url: String,
    /// Sampling radius around the target coordinate in kilometers
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    /// Points per grid side. Capped at 10 so a full grid fits in a
    /// single 100-location batch request.
    #[serde(default = "default_resolution")]
    pub resolution: u32,
}

fn default_elevation_base_url() -> String {
    "https://api.open-elevation.com".to_string()
}

fn default_radius_km() -> f64 {
    5.0
}

fn default_resolution() -> u32 {
    10
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            base_url: default_elevation_base_url(),
            radius_km: default_radius_km(),
            resolution: default_resolution(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RiskConfig {
    /// Risk sensitivity preference
    #[serde(default)]
    pub sensitivity: Sensitivity,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("floodwatch");

        Self {
            config_dir,
            satellite: SatelliteConfig::default(),
            weather: WeatherConfig::default(),
            elevation: ElevationConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let mut config = Self::default();
            config.save()?;
            config.apply_env_overrides();
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply credential overrides from the environment. Environment wins
    /// over the config file so keys never have to be written to disk.
    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("SENTINEL_CLIENT_ID") {
            if !id.is_empty() {
                self.satellite.client_id = id;
            }
        }
        if let Ok(secret) = std::env::var("SENTINEL_CLIENT_SECRET") {
            if !secret.is_empty() {
                self.satellite.client_secret = secret;
            }
        }
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
            if !key.is_empty() {
                self.weather.api_key = key;
            }
        }
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.satellite.base_url, "satellite.base_url", &mut result);
        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_url(&self.elevation.base_url, "elevation.base_url", &mut result);

        // Validate forecast horizon
        if self.weather.forecast_days == 0 || self.weather.forecast_days > 7 {
            result.add_error(
                "weather.forecast_days",
                "Forecast horizon must be between 1 and 7 days",
            );
        }

        // Validate elevation sampling
        if self.elevation.radius_km <= 0.0 {
            result.add_error("elevation.radius_km", "Radius must be greater than 0");
        } else if self.elevation.radius_km > 50.0 {
            result.add_warning(
                "elevation.radius_km",
                "Sampling radius is unusually large (>50 km)",
            );
        }

        if self.elevation.resolution < 2 {
            result.add_error("elevation.resolution", "Resolution must be at least 2");
        } else if self.elevation.resolution > 10 {
            result.add_error(
                "elevation.resolution",
                "Resolution above 10 exceeds the elevation API batch limit",
            );
        }

        // Unconfigured credentialed sources degrade to mock data (warn only)
        if !self.satellite.is_configured() {
            result.add_warning(
                "satellite",
                "Sentinel Hub not configured - mock satellite data will be used",
            );
        }
        if !self.weather.is_configured() {
            result.add_warning(
                "weather",
                "OpenWeatherMap not configured - mock weather data will be used",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("floodwatch");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.elevation.base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_forecast_days_out_of_range() {
        let mut config = Config::default();
        config.weather.forecast_days = 0;
        assert!(!config.validate().is_valid());

        config.weather.forecast_days = 8;
        assert!(!config.validate().is_valid());

        config.weather.forecast_days = 7;
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_resolution_exceeding_batch_limit() {
        let mut config = Config::default();
        config.elevation.resolution = 11;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "elevation.resolution"));
    }

    #[test]
    fn test_unconfigured_sources_are_warnings() {
        let config = Config::default();
        let result = config.validate();
        // Placeholder credentials should warn, not error
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "satellite"));
        assert!(result.warnings.iter().any(|w| w.field == "weather"));
    }

    #[test]
    fn test_configured_detection() {
        let mut sat = SatelliteConfig::default();
        assert!(!sat.is_configured());
        sat.client_id = "abc123".to_string();
        sat.client_secret = "shh".to_string();
        assert!(sat.is_configured());
    }

    #[test]
    fn test_sensitivity_multiplier() {
        assert_eq!(Sensitivity::Low.multiplier(), 0.8);
        assert_eq!(Sensitivity::Medium.multiplier(), 1.0);
        assert_eq!(Sensitivity::High.multiplier(), 1.2);
    }

    #[test]
    fn test_sensitivity_parse() {
        assert_eq!("HIGH".parse::<Sensitivity>(), Ok(Sensitivity::High));
        assert!("extreme".parse::<Sensitivity>().is_err());
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
