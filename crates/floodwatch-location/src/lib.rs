//! Location handling for FloodWatch
//!
//! Provides the `Location` coordinate type plus forward and reverse
//! geocoding via Nominatim (OpenStreetMap) - free, no API key required.

pub mod geocode;
pub mod types;

pub use geocode::{Geocoder, reverse_geocode};
pub use types::{GeocodeError, Location};
