//! Slope statistics and terrain-driven flood risk.
//!
//! Higher slope means faster runoff and lower flood risk; flat terrain
//! accumulates water.

use crate::types::{
    ElevationProfile, SlopeAnalysis, SlopeRisk, TerrainRisk, TerrainRiskLevel, TerrainType,
};

/// Compute gradient-magnitude statistics over a row-major elevation grid.
///
/// Central differences in the interior, one-sided at the edges.
pub fn analyze_slope(elevations: &[f64], resolution: u32) -> SlopeAnalysis {
    let n = resolution as usize;
    if n == 0 || elevations.len() < n * n {
        return SlopeAnalysis {
            average: 0.0,
            max: 0.0,
            risk_factor: SlopeRisk::High,
        };
    }

    let at = |row: usize, col: usize| elevations[row * n + col];

    let mut sum = 0.0;
    let mut max = 0.0f64;

    for row in 0..n {
        for col in 0..n {
            let dy = if n == 1 {
                0.0
            } else if row == 0 {
                at(1, col) - at(0, col)
            } else if row == n - 1 {
                at(n - 1, col) - at(n - 2, col)
            } else {
                (at(row + 1, col) - at(row - 1, col)) / 2.0
            };

            let dx = if n == 1 {
                0.0
            } else if col == 0 {
                at(row, 1) - at(row, 0)
            } else if col == n - 1 {
                at(row, n - 1) - at(row, n - 2)
            } else {
                (at(row, col + 1) - at(row, col - 1)) / 2.0
            };

            let magnitude = (dx * dx + dy * dy).sqrt();
            sum += magnitude;
            max = max.max(magnitude);
        }
    }

    let average = sum / (n * n) as f64;

    SlopeAnalysis {
        average,
        max,
        risk_factor: if average < 2.0 {
            SlopeRisk::High
        } else if average < 5.0 {
            SlopeRisk::Medium
        } else {
            SlopeRisk::Low
        },
    }
}

/// Score terrain-driven flood risk from an elevation profile.
pub fn terrain_risk(profile: &ElevationProfile) -> TerrainRisk {
    let center = profile.center_elevation;
    let avg = profile.avg_elevation;
    let slope = profile.slope.average;

    let mut score: f64 = 0.0;
    let mut factors = Vec::new();

    // Low elevation increases risk
    if center < 50.0 {
        score += 30.0;
        factors.push(format!("Low elevation ({center:.1}m)"));
    } else if center < 100.0 {
        score += 15.0;
        factors.push(format!("Moderate elevation ({center:.1}m)"));
    }

    // Below average elevation in area
    if center < avg - 20.0 {
        score += 25.0;
        factors.push("Location is in a depression".to_string());
    }

    // Low slope = water accumulation
    if slope < 2.0 {
        score += 25.0;
        factors.push(format!("Flat terrain (slope: {slope:.1})"));
    } else if slope < 5.0 {
        score += 10.0;
        factors.push(format!("Gentle slope ({slope:.1})"));
    }

    // Near sea level
    if center < 10.0 {
        score += 20.0;
        factors.push("Near sea level (coastal flood risk)".to_string());
    }

    let score = score.min(100.0);

    TerrainRisk {
        score,
        level: if score > 50.0 {
            TerrainRiskLevel::High
        } else if score > 25.0 {
            TerrainRiskLevel::Medium
        } else {
            TerrainRiskLevel::Low
        },
        factors,
        terrain_type: classify_terrain(slope, center),
        source: profile.source.clone(),
    }
}

/// Classify terrain type from slope and elevation.
pub fn classify_terrain(slope: f64, elevation: f64) -> TerrainType {
    if elevation < 10.0 {
        TerrainType::CoastalPlain
    } else if slope < 2.0 {
        TerrainType::FlatLowland
    } else if slope < 5.0 {
        TerrainType::RollingHills
    } else if slope < 10.0 {
        TerrainType::Hilly
    } else {
        TerrainType::Mountainous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(center: f64, avg: f64, slope_avg: f64) -> ElevationProfile {
        ElevationProfile {
            lats: vec![0.0],
            lons: vec![0.0],
            elevations: vec![center],
            resolution: 1,
            center_elevation: center,
            min_elevation: center,
            max_elevation: center,
            avg_elevation: avg,
            slope: SlopeAnalysis {
                average: slope_avg,
                max: slope_avg,
                risk_factor: SlopeRisk::Low,
            },
            source: "test".into(),
        }
    }

    #[test]
    fn test_flat_grid_has_zero_slope() {
        let elevations = vec![100.0; 16];
        let slope = analyze_slope(&elevations, 4);
        assert_eq!(slope.average, 0.0);
        assert_eq!(slope.max, 0.0);
        assert_eq!(slope.risk_factor, SlopeRisk::High);
    }

    #[test]
    fn test_tilted_plane_slope() {
        // Elevation increases by 10 per column: gradient magnitude 10
        let mut elevations = Vec::new();
        for _row in 0..4 {
            for col in 0..4 {
                elevations.push(col as f64 * 10.0);
            }
        }
        let slope = analyze_slope(&elevations, 4);
        assert!((slope.average - 10.0).abs() < 1e-9);
        assert_eq!(slope.risk_factor, SlopeRisk::Low);
    }

    #[test]
    fn test_coastal_flat_terrain_scores_high() {
        // Near sea level, flat, in a depression
        let profile = profile_with(5.0, 40.0, 0.5);
        let risk = terrain_risk(&profile);

        // 30 (low) + 25 (depression) + 25 (flat) + 20 (sea level) = 100
        assert_eq!(risk.score, 100.0);
        assert_eq!(risk.level, TerrainRiskLevel::High);
        assert_eq!(risk.terrain_type, TerrainType::CoastalPlain);
        assert!(risk.factors.iter().any(|f| f.contains("sea level")));
    }

    #[test]
    fn test_highland_scores_low() {
        let profile = profile_with(500.0, 480.0, 12.0);
        let risk = terrain_risk(&profile);

        assert_eq!(risk.score, 0.0);
        assert_eq!(risk.level, TerrainRiskLevel::Low);
        assert_eq!(risk.terrain_type, TerrainType::Mountainous);
        assert!(risk.factors.is_empty());
    }

    #[test]
    fn test_moderate_terrain() {
        let profile = profile_with(80.0, 85.0, 3.0);
        let risk = terrain_risk(&profile);

        // 15 (moderate elevation) + 10 (gentle slope) = 25
        assert_eq!(risk.score, 25.0);
        assert_eq!(risk.level, TerrainRiskLevel::Low);
        assert_eq!(risk.terrain_type, TerrainType::RollingHills);
    }

    #[test]
    fn test_classify_terrain_buckets() {
        assert_eq!(classify_terrain(0.5, 5.0), TerrainType::CoastalPlain);
        assert_eq!(classify_terrain(0.5, 50.0), TerrainType::FlatLowland);
        assert_eq!(classify_terrain(3.0, 50.0), TerrainType::RollingHills);
        assert_eq!(classify_terrain(7.0, 50.0), TerrainType::Hilly);
        assert_eq!(classify_terrain(15.0, 50.0), TerrainType::Mountainous);
    }
}
