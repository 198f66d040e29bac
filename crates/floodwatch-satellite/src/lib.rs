//! Satellite imagery for FloodWatch
//!
//! Fetches recent Sentinel-2 scenes via the Sentinel Hub Process API
//! (OAuth2 client-credentials) and derives water-coverage statistics used
//! by the risk model. Synthesizes a mock scene when the API is not
//! configured or a fetch fails.

pub mod analysis;
pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use analysis::{analyze_water, ndwi};
pub use client::SentinelClient;
pub use error::SatelliteError;
pub use mock::mock_scene;
pub use types::{Scene, SceneSource, WaterAnalysis};
