//! Coordinate generators for sweep-style projection tests.

/// Lon/lat grid covering the globe, excluding the poles and the antimeridian.
///
/// `step` is the spacing in degrees. Points start at `-180 + step` and
/// `-90 + step` so that no sample sits on a singularity.
pub fn lon_lat_grid(step: f64) -> Vec<[f64; 2]> {
    assert!(step > 0.0, "grid step must be positive");
    let mut points = Vec::new();
    let mut lat = -90.0 + step;
    while lat < 90.0 {
        let mut lon = -180.0 + step;
        while lon < 180.0 {
            points.push([lon, lat]);
            lon += step;
        }
        lat += step;
    }
    points
}

/// Closed ring along a parallel, traced eastward from `-180°`.
pub fn parallel_ring(lat: f64, segments: usize) -> Vec<[f64; 2]> {
    let segments = segments.max(3);
    let mut ring: Vec<[f64; 2]> = (0..segments)
        .map(|i| [-180.0 + 360.0 * i as f64 / segments as f64, lat])
        .collect();
    ring.push(ring[0]);
    ring
}

/// Closed clockwise ring approximating a small circle of `radius` degrees
/// around `(lon, lat)`.
///
/// Vertices are laid out in a local tangent plane, which is accurate enough
/// for radii of a few degrees away from the poles.
pub fn small_circle_ring(lon: f64, lat: f64, radius: f64, segments: usize) -> Vec<[f64; 2]> {
    let segments = segments.max(3);
    let cos_lat = lat.to_radians().cos().max(1e-6);
    let mut ring: Vec<[f64; 2]> = (0..segments)
        .map(|i| {
            // Negative angular step gives clockwise order with north up.
            let theta = -std::f64::consts::TAU * i as f64 / segments as f64;
            [lon + radius * theta.cos() / cos_lat, lat + radius * theta.sin()]
        })
        .collect();
    ring.push(ring[0]);
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_avoids_poles() {
        let grid = lon_lat_grid(30.0);
        assert!(!grid.is_empty());
        assert!(grid.iter().all(|p| p[1].abs() < 90.0 && p[0] > -180.0));
        assert_eq!(grid.len(), 11 * 5);
    }

    #[test]
    fn test_parallel_ring_is_closed() {
        let ring = parallel_ring(-60.0, 8);
        assert_eq!(ring.len(), 9);
        assert_eq!(ring.first(), ring.last());
        assert!(ring.iter().all(|p| p[1] == -60.0));
    }

    #[test]
    fn test_small_circle_ring() {
        let ring = small_circle_ring(10.0, 0.0, 2.0, 16);
        assert_eq!(ring.len(), 17);
        assert_eq!(ring.first(), ring.last());
        // Second vertex steps south first: clockwise.
        assert!(ring[1][1] < 0.0);
    }
}
