//! Synthesized elevation profiles for when the API is unreachable.

use rand::Rng;
use rand_distr::StandardNormal;

use floodwatch_location::Location;

use crate::grid::SampleGrid;
use crate::types::ElevationProfile;

/// Build a synthetic rolling-terrain profile: a sinusoidal surface with
/// per-sample jitter, floored at sea level.
pub fn mock_profile<R: Rng>(
    location: &Location,
    radius_km: f64,
    resolution: u32,
    rng: &mut R,
) -> ElevationProfile {
    let grid = SampleGrid::build(location, radius_km, resolution);

    let elevations: Vec<f64> = grid
        .points()
        .into_iter()
        .map(|(lat, lon)| {
            let jitter: f64 = rng.sample::<f64, _>(StandardNormal) * 10.0;
            let elevation = 100.0 + 50.0 * (lat * 10.0).sin() + 30.0 * (lon * 10.0).cos() + jitter;
            elevation.max(0.0)
        })
        .collect();

    ElevationProfile::assemble(&grid, elevations, "Mock Data")
}
