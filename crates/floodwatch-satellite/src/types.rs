use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a scene came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneSource {
    /// Sentinel-2 L2A via the Process API
    SentinelL2A,
    /// Locally synthesized stand-in
    Mock,
}

impl SceneSource {
    pub fn label(&self) -> &'static str {
        match self {
            SceneSource::SentinelL2A => "Sentinel-2 L2A",
            SceneSource::Mock => "Mock Data",
        }
    }
}

/// A rendered true-color scene around a target coordinate.
///
/// Live scenes carry the encoded image bytes returned by the API;
/// synthesized scenes carry a decoded RGB pixel grid instead, which the
/// water analysis can read directly.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    /// Decoded RGB8 pixels, row-major, 3 bytes per pixel. Present for
    /// synthesized scenes.
    pub pixels: Option<Vec<u8>>,
    /// Encoded image bytes as returned by the API. Empty for mock scenes.
    pub image: Vec<u8>,
    /// Bounding box as [min_lon, min_lat, max_lon, max_lat]
    pub bbox: [f64; 4],
    pub acquired: DateTime<Utc>,
    /// Cloud coverage percentage (0-100)
    pub cloud_cover: u8,
    pub resolution: String,
    pub bands: Vec<String>,
    pub source: SceneSource,
}

impl Scene {
    /// RGB triple at (x, y), if decoded pixels are available.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let pixels = self.pixels.as_ref()?;
        let idx = ((y * self.width + x) * 3) as usize;
        let chunk = pixels.get(idx..idx + 3)?;
        Some([chunk[0], chunk[1], chunk[2]])
    }
}

/// Water-coverage statistics derived from a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterAnalysis {
    /// Percentage of the scene classified as water (0-100)
    pub water_percentage: f64,
    /// Change vs the previous month, percentage points
    pub change: f64,
    /// Risk indicators detected during analysis
    pub indicators: Vec<String>,
    /// Human-readable summary
    pub summary: String,
    /// Analysis confidence (0-1)
    pub confidence: f64,
    /// Label of the scene the analysis was computed from
    pub source: String,
}

impl WaterAnalysis {
    /// Number of risk indicators detected.
    pub fn risk_count(&self) -> usize {
        self.indicators.len()
    }
}
