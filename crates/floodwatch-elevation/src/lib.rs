//! Elevation and terrain analysis for FloodWatch
//!
//! Samples a grid of points around the target coordinate from the
//! Open-Elevation API (free, no API key required), derives slope
//! statistics, and scores terrain-driven flood risk. Synthesizes a mock
//! profile when the API is unreachable.

pub mod client;
pub mod error;
pub mod grid;
pub mod mock;
pub mod terrain;
pub mod types;

pub use client::ElevationClient;
pub use error::ElevationError;
pub use grid::SampleGrid;
pub use mock::mock_profile;
pub use terrain::{analyze_slope, classify_terrain, terrain_risk};
pub use types::{
    ElevationProfile, SlopeAnalysis, SlopeRisk, TerrainRisk, TerrainRiskLevel, TerrainType,
};
