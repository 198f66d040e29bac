use serde::{Deserialize, Serialize};

/// Geographic location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

impl Location {
    /// Create a location, rejecting out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeocodeError> {
        if !(-90.0..=90.0).contains(&latitude) || !latitude.is_finite() {
            return Err(GeocodeError::InvalidCoordinate(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
            return Err(GeocodeError::InvalidCoordinate(format!(
                "longitude {longitude} out of range [-180, 180]"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            name: None,
        })
    }

    /// Attach a display name (e.g. from geocoding).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to formatted coordinates.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.4}, {:.4}", self.latitude, self.longitude),
        }
    }
}

/// Geocoding errors
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Place not found: {0}")]
    NotFound(String),

    #[error("Rate limited by geocoding service")]
    RateLimited,

    #[error("Geocoding API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GeocodeError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCoordinate(msg) => format!("Invalid coordinate: {msg}"),
            Self::NotFound(place) => {
                format!("Could not find '{place}'. Try being more specific (e.g., 'Paris, France')")
            }
            Self::RateLimited => {
                "Too many requests. Please wait 60 seconds before searching again.".to_string()
            }
            Self::ApiError(_) => "Geocoding service error. Please try again.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(Location::new(40.7128, -74.0060).is_ok());
        assert!(Location::new(-90.0, 180.0).is_ok());
        assert!(Location::new(90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_latitude() {
        let err = Location::new(91.0, 0.0);
        assert!(matches!(err, Err(GeocodeError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_out_of_range_longitude() {
        let err = Location::new(0.0, -181.0);
        assert!(matches!(err, Err(GeocodeError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Location::new(f64::NAN, 0.0).is_err());
        assert!(Location::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_coordinates() {
        let loc = Location::new(40.7128, -74.0060).unwrap();
        assert_eq!(loc.display_name(), "40.7128, -74.0060");

        let named = loc.with_name("New York");
        assert_eq!(named.display_name(), "New York");
    }

    #[test]
    fn test_not_found_message_suggests_specificity() {
        let err = GeocodeError::NotFound("Springfield".into());
        assert!(err.user_message().contains("more specific"));
    }
}
