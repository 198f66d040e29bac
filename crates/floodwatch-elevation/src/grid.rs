//! Sample-grid construction around a target coordinate.

use floodwatch_location::Location;

/// Maximum locations the elevation API accepts per batch request.
pub const BATCH_LIMIT: usize = 100;

/// Resolution used when a requested grid would exceed the batch limit.
const FALLBACK_RESOLUTION: u32 = 10;

/// A square grid of sample coordinates.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

impl SampleGrid {
    /// Build a resolution x resolution grid spanning `radius_km` around
    /// the location. Longitude spacing is corrected by latitude so the
    /// grid stays roughly square on the ground. Grids that would exceed
    /// the API batch limit are re-sampled at a reduced resolution.
    pub fn build(location: &Location, radius_km: f64, resolution: u32) -> Self {
        let resolution = if (resolution as usize).pow(2) > BATCH_LIMIT {
            tracing::warn!(
                "Grid of {}x{} exceeds the {}-location batch limit, using {}x{}",
                resolution,
                resolution,
                BATCH_LIMIT,
                FALLBACK_RESOLUTION,
                FALLBACK_RESOLUTION
            );
            FALLBACK_RESOLUTION
        } else {
            resolution
        };

        let lat_offset = radius_km / 111.0;
        let lon_offset = radius_km / (111.0 * location.latitude.to_radians().cos());

        Self {
            lats: linspace(
                location.latitude - lat_offset,
                location.latitude + lat_offset,
                resolution,
            ),
            lons: linspace(
                location.longitude - lon_offset,
                location.longitude + lon_offset,
                resolution,
            ),
        }
    }

    /// Grid side length.
    pub fn resolution(&self) -> u32 {
        self.lats.len() as u32
    }

    /// All sample points, row-major (latitude outer, longitude inner).
    pub fn points(&self) -> Vec<(f64, f64)> {
        let mut points = Vec::with_capacity(self.lats.len() * self.lons.len());
        for lat in &self.lats {
            for lon in &self.lons {
                points.push((*lat, *lon));
            }
        }
        points
    }
}

/// Evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: u32) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.0, 1.0, 5);
        assert_eq!(values.len(), 5);
        assert!((values[0] - 0.0).abs() < 1e-12);
        assert!((values[4] - 1.0).abs() < 1e-12);
        assert!((values[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_grid_is_centered() {
        let location = Location::new(40.0, -74.0).unwrap();
        let grid = SampleGrid::build(&location, 5.0, 5);

        assert_eq!(grid.resolution(), 5);
        let mid_lat = grid.lats[2];
        let mid_lon = grid.lons[2];
        assert!((mid_lat - 40.0).abs() < 1e-9);
        assert!((mid_lon - -74.0).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_grid_reduced_to_batch_limit() {
        let location = Location::new(0.0, 0.0).unwrap();
        let grid = SampleGrid::build(&location, 5.0, 20);

        assert_eq!(grid.resolution(), 10);
        assert!(grid.points().len() <= BATCH_LIMIT);
    }

    #[test]
    fn test_points_row_major() {
        let location = Location::new(0.0, 0.0).unwrap();
        let grid = SampleGrid::build(&location, 5.0, 3);
        let points = grid.points();

        assert_eq!(points.len(), 9);
        // First row shares the first latitude
        assert_eq!(points[0].0, points[1].0);
        assert_eq!(points[1].0, points[2].0);
        // Second row starts a new latitude
        assert_ne!(points[2].0, points[3].0);
    }

    #[test]
    fn test_longitude_spacing_widens_at_high_latitude() {
        let equator = SampleGrid::build(&Location::new(0.0, 0.0).unwrap(), 5.0, 3);
        let north = SampleGrid::build(&Location::new(60.0, 0.0).unwrap(), 5.0, 3);

        let span = |lons: &[f64]| lons[lons.len() - 1] - lons[0];
        assert!(span(&north.lons) > span(&equator.lons));
    }
}
