//! Common geometry fixtures for projection and centroid tests.
//!
//! All coordinates are `[lon, lat]` in degrees. Rings are closed.

/// Polygon rings.
pub mod rings {
    /// 10°×20° box straddling the equator between 0°E and 10°E (clockwise).
    pub const EQUATOR_BOX: [[f64; 2]; 5] = [
        [0.0, -10.0],
        [0.0, 10.0],
        [10.0, 10.0],
        [10.0, -10.0],
        [0.0, -10.0],
    ];

    /// Same box as [`EQUATOR_BOX`] with a duplicated vertex.
    pub const EQUATOR_BOX_COINCIDENT: [[f64; 2]; 6] = [
        [0.0, -10.0],
        [0.0, 10.0],
        [0.0, 10.0],
        [10.0, 10.0],
        [10.0, -10.0],
        [0.0, -10.0],
    ];

    /// 1°×10° box touching the antimeridian from the west.
    pub const ANTIMERIDIAN_BOX: [[f64; 2]; 5] = [
        [-180.0, 0.0],
        [-180.0, 10.0],
        [-179.0, 10.0],
        [-179.0, 0.0],
        [-180.0, 0.0],
    ];

    /// 20°×20° box crossing the antimeridian (clockwise).
    pub const CROSSING_BOX: [[f64; 2]; 5] = [
        [170.0, -10.0],
        [170.0, 10.0],
        [-170.0, 10.0],
        [-170.0, -10.0],
        [170.0, -10.0],
    ];

    /// Lune from pole to pole, 1° wide.
    pub const POLAR_LUNE: [[f64; 2]; 5] = [
        [0.0, -90.0],
        [0.0, 0.0],
        [0.0, 90.0],
        [1.0, 0.0],
        [0.0, -90.0],
    ];

    /// A ring that retraces itself along a parallel: zero area, non-zero length.
    pub const RETRACED_PARALLEL: [[f64; 2]; 5] = [
        [1.0, 1.0],
        [2.0, 1.0],
        [3.0, 1.0],
        [2.0, 1.0],
        [1.0, 1.0],
    ];

    /// A ring collapsed onto a single position.
    pub const COLLAPSED: [[f64; 2]; 5] = [[1.0, 1.0]; 5];
}

/// Line strings.
pub mod lines {
    /// One degree along the equator.
    pub const EQUATOR_DEGREE: [[f64; 2]; 2] = [[0.0, 0.0], [1.0, 0.0]];

    /// Prime meridian from the equator to the north pole.
    pub const MERIDIAN_TO_POLE: [[f64; 2]; 2] = [[0.0, 0.0], [0.0, 90.0]];

    /// Short hop across the antimeridian.
    pub const ANTIMERIDIAN_HOP: [[f64; 2]; 2] = [[179.0, -1.0], [-179.0, 1.0]];

    /// The full equator, closed.
    pub const EQUATOR_LOOP: [[f64; 2]; 4] = [[0.0, 0.0], [120.0, 0.0], [-120.0, 0.0], [0.0, 0.0]];
}

/// Point sets.
pub mod points {
    /// Two antipodal points on the equator.
    pub const ANTIPODAL_PAIR: [[f64; 2]; 2] = [[0.0, 0.0], [180.0, 0.0]];

    /// Four points spaced evenly around the equator.
    pub const EQUATOR_QUARTERS: [[f64; 2]; 4] = [[0.0, 0.0], [90.0, 0.0], [180.0, 0.0], [-90.0, 0.0]];

    /// Points either side of the antimeridian.
    pub const ANTIMERIDIAN_PAIR: [[f64; 2]; 2] = [[179.0, 0.0], [-179.0, 0.0]];
}

/// Device-space extents as `(x0, y0, x1, y1)`.
pub mod extents {
    /// The default 960×500 viewport.
    pub const VIEWPORT: (f64, f64, f64, f64) = (0.0, 0.0, 960.0, 500.0);

    /// A small window in the top-left corner of the viewport.
    pub const TOP_LEFT: (f64, f64, f64, f64) = (0.0, 0.0, 100.0, 100.0);
}

/// Convert a fixed-size coordinate array into an owned ring.
pub fn to_vec<const N: usize>(coords: [[f64; 2]; N]) -> Vec<[f64; 2]> {
    coords.to_vec()
}
