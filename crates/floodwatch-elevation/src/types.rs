use serde::{Deserialize, Serialize};

/// Slope-driven risk bucket. Flat terrain accumulates water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlopeRisk {
    High,
    Medium,
    Low,
}

/// Terrain slope statistics for a sampled grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlopeAnalysis {
    /// Mean gradient magnitude across the grid
    pub average: f64,
    /// Steepest gradient magnitude
    pub max: f64,
    pub risk_factor: SlopeRisk,
}

/// Terrain classification by slope and elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    CoastalPlain,
    FlatLowland,
    RollingHills,
    Hilly,
    Mountainous,
}

impl TerrainType {
    pub fn label(&self) -> &'static str {
        match self {
            TerrainType::CoastalPlain => "Coastal Plain",
            TerrainType::FlatLowland => "Flat Lowland",
            TerrainType::RollingHills => "Rolling Hills",
            TerrainType::Hilly => "Hilly Terrain",
            TerrainType::Mountainous => "Mountainous",
        }
    }
}

/// Terrain-based risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TerrainRiskLevel {
    High,
    Medium,
    Low,
}

/// Terrain-driven flood risk report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainRisk {
    /// Additive rule score, capped at 100
    pub score: f64,
    pub level: TerrainRiskLevel,
    /// Named contributing factors
    pub factors: Vec<String>,
    pub terrain_type: TerrainType,
    pub source: String,
}

/// Elevation samples around a coordinate.
///
/// `elevations` is row-major: row index follows `lats`, column index
/// follows `lons`, so `elevations[row * resolution + col]` is the sample
/// at `(lats[row], lons[col])`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationProfile {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub elevations: Vec<f64>,
    pub resolution: u32,
    pub center_elevation: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
    pub avg_elevation: f64,
    pub slope: SlopeAnalysis,
    pub source: String,
}

impl ElevationProfile {
    /// Assemble a profile from a sample grid and its elevations,
    /// computing summary statistics and slope.
    pub fn from_samples(
        grid: &crate::grid::SampleGrid,
        elevations: Vec<f64>,
        source: &str,
    ) -> Result<Self, crate::error::ElevationError> {
        let expected = (grid.resolution() as usize).pow(2);
        if elevations.len() != expected {
            return Err(crate::error::ElevationError::ShapeMismatch {
                expected,
                got: elevations.len(),
            });
        }
        Ok(Self::assemble(grid, elevations, source))
    }

    /// Shape-checked assembly; callers guarantee `elevations` matches the
    /// grid.
    pub(crate) fn assemble(
        grid: &crate::grid::SampleGrid,
        elevations: Vec<f64>,
        source: &str,
    ) -> Self {
        let resolution = grid.resolution();
        let center_idx = (resolution / 2) as usize;
        let center_elevation = elevations[center_idx * resolution as usize + center_idx];
        let min_elevation = elevations.iter().copied().fold(f64::INFINITY, f64::min);
        let max_elevation = elevations
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let avg_elevation = elevations.iter().sum::<f64>() / elevations.len() as f64;
        let slope = crate::terrain::analyze_slope(&elevations, resolution);

        Self {
            lats: grid.lats.clone(),
            lons: grid.lons.clone(),
            elevations,
            resolution,
            center_elevation,
            min_elevation,
            max_elevation,
            avg_elevation,
            slope,
            source: source.to_string(),
        }
    }

    /// Elevation at (row, col), if in bounds.
    pub fn at(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        self.elevations
            .get((row * self.resolution + col) as usize)
            .copied()
    }
}
