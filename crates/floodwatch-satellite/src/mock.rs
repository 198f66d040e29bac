//! Synthesized stand-in scenes for when the imagery API is unavailable.

use chrono::Utc;
use rand::Rng;

use floodwatch_location::Location;

use crate::client::bounding_box;
use crate::types::{Scene, SceneSource};

const MOCK_SIZE: u32 = 512;

/// Water pixel color in synthesized scenes (blue-dominant).
pub const MOCK_WATER_RGB: [u8; 3] = [50, 100, 200];
/// Land pixel color in synthesized scenes (green-dominant).
pub const MOCK_LAND_RGB: [u8; 3] = [100, 150, 50];

/// Build a synthetic scene: a striped water/land pattern where every
/// third diagonal is water, giving the analysis a stable ~33% coverage.
pub fn mock_scene<R: Rng>(location: &Location, radius_km: f64, rng: &mut R) -> Scene {
    let mut pixels = Vec::with_capacity((MOCK_SIZE * MOCK_SIZE * 3) as usize);

    for y in 0..MOCK_SIZE {
        for x in 0..MOCK_SIZE {
            let rgb = if (x + y) % 3 == 0 {
                MOCK_WATER_RGB
            } else {
                MOCK_LAND_RGB
            };
            pixels.extend_from_slice(&rgb);
        }
    }

    Scene {
        width: MOCK_SIZE,
        height: MOCK_SIZE,
        pixels: Some(pixels),
        image: Vec::new(),
        bbox: bounding_box(location, radius_km),
        acquired: Utc::now(),
        cloud_cover: rng.random_range(0..30),
        resolution: "10m (mock)".to_string(),
        bands: vec!["B02".into(), "B03".into(), "B04".into(), "B08".into()],
        source: SceneSource::Mock,
    }
}
