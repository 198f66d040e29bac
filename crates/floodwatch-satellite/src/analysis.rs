//! Water-coverage analysis.
//!
//! When a scene carries decoded pixels the coverage is counted directly
//! (water pixels are blue-dominant in the true-color render). Scenes
//! without decoded pixels fall back to a jittered estimate, matching the
//! unintegrated behavior of the upstream services. Month-over-month
//! change has no second scene to diff against, so it is synthesized in
//! both paths.

use rand::Rng;

use crate::types::{Scene, WaterAnalysis};

const NDWI_WATER_THRESHOLD: f64 = 0.3;
const ANALYSIS_CONFIDENCE: f64 = 0.85;

/// Normalized Difference Water Index.
///
/// NDWI = (Green - NIR) / (Green + NIR)
///
/// Values > 0.3 typically indicate water.
pub fn ndwi(green: f64, nir: f64) -> f64 {
    (green - nir) / (green + nir + 1e-10)
}

/// Whether an NDWI value classifies as water.
pub fn is_water(ndwi_value: f64) -> bool {
    ndwi_value > NDWI_WATER_THRESHOLD
}

/// Derive water-coverage statistics from a scene.
pub fn analyze_water<R: Rng>(scene: &Scene, rng: &mut R) -> WaterAnalysis {
    let water_percentage = match &scene.pixels {
        Some(_) => pixel_water_percentage(scene),
        None => rng.random_range(10.0..40.0),
    };

    let change: f64 = rng.random_range(-5.0..10.0);

    let mut indicators = Vec::new();
    if water_percentage > 30.0 {
        indicators.push("High water coverage detected".to_string());
    }
    if change > 5.0 {
        indicators.push("Significant increase in water bodies".to_string());
    }
    if scene.cloud_cover < 10 {
        indicators.push("Clear imagery - high confidence".to_string());
    }

    let mut summary = format!("Detected {water_percentage:.1}% water coverage. ");
    if change > 0.0 {
        summary.push_str(&format!(
            "Water levels increased by {change:.1}% from last month. "
        ));
    } else {
        summary.push_str(&format!(
            "Water levels decreased by {:.1}% from last month. ",
            change.abs()
        ));
    }
    if !indicators.is_empty() {
        summary.push_str("Risk indicators detected.");
    }

    WaterAnalysis {
        water_percentage,
        change,
        indicators,
        summary,
        confidence: ANALYSIS_CONFIDENCE,
        source: scene.source.label().to_string(),
    }
}

/// Percentage of blue-dominant pixels across the scene.
fn pixel_water_percentage(scene: &Scene) -> f64 {
    let mut water = 0u64;
    let mut total = 0u64;

    for y in 0..scene.height {
        for x in 0..scene.width {
            if let Some([r, g, b]) = scene.rgb_at(x, y) {
                total += 1;
                if b > r && b > g {
                    water += 1;
                }
            }
        }
    }

    if total == 0 {
        return 0.0;
    }
    water as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::mock_scene;
    use floodwatch_location::Location;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ndwi_formula() {
        assert!(ndwi(0.8, 0.2) > 0.3);
        assert!(ndwi(0.2, 0.8) < 0.0);
        // Epsilon guard keeps zero bands finite
        assert!(ndwi(0.0, 0.0).is_finite());
    }

    #[test]
    fn test_is_water_threshold() {
        assert!(is_water(0.31));
        assert!(!is_water(0.3));
        assert!(!is_water(-0.5));
    }

    #[test]
    fn test_mock_scene_coverage_is_one_third() {
        let mut rng = StdRng::seed_from_u64(1);
        let location = Location::new(40.7128, -74.0060).unwrap();
        let scene = mock_scene(&location, 5.0, &mut rng);

        let analysis = analyze_water(&scene, &mut rng);
        // Every third diagonal is water
        assert!(
            (33.0..34.0).contains(&analysis.water_percentage),
            "got {}",
            analysis.water_percentage
        );
        assert!(analysis
            .indicators
            .iter()
            .any(|i| i.contains("High water coverage")));
    }

    #[test]
    fn test_estimate_path_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let location = Location::new(0.0, 0.0).unwrap();
        let mut scene = mock_scene(&location, 5.0, &mut rng);
        scene.pixels = None;

        for _ in 0..50 {
            let analysis = analyze_water(&scene, &mut rng);
            assert!((10.0..40.0).contains(&analysis.water_percentage));
            assert!((-5.0..10.0).contains(&analysis.change));
        }
    }

    #[test]
    fn test_summary_mentions_direction_of_change() {
        let mut rng = StdRng::seed_from_u64(3);
        let location = Location::new(0.0, 0.0).unwrap();
        let scene = mock_scene(&location, 5.0, &mut rng);

        let analysis = analyze_water(&scene, &mut rng);
        if analysis.change > 0.0 {
            assert!(analysis.summary.contains("increased"));
        } else {
            assert!(analysis.summary.contains("decreased"));
        }
    }
}
