//! Tests for fitting a projection to a viewport.

use geo_common::{Extent, Geometry};
use geo_projection::{equirectangular, mercator, Projection, ProjectionError};
use test_utils::{assert_approx_eq, extents};

fn assert_extent_approx_eq(actual: Extent, expected: Extent) {
    assert_approx_eq!(actual.min_x, expected.min_x, 1e-6);
    assert_approx_eq!(actual.min_y, expected.min_y, 1e-6);
    assert_approx_eq!(actual.max_x, expected.max_x, 1e-6);
    assert_approx_eq!(actual.max_y, expected.max_y, 1e-6);
}

/// Two corners spanning 180°×90°; projects to a 2:1 box under plate carrée.
fn corners() -> Geometry {
    Geometry::multi_point(vec![[-90.0, -45.0], [90.0, 45.0]])
}

fn plate_carree() -> Projection {
    let mut projection = equirectangular();
    projection.set_precision(0.0).unwrap();
    projection
}

// ============================================================================
// Fitting
// ============================================================================

#[test]
fn test_fit_extent_centers_along_looser_axis() {
    let mut projection = plate_carree();
    projection
        .fit_extent(Extent::new(50.0, 50.0, 950.0, 450.0), &corners())
        .unwrap();

    let bounds = projection.projected_bounds(&corners()).unwrap();
    assert_extent_approx_eq(bounds, Extent::new(100.0, 50.0, 900.0, 450.0));
}

#[test]
fn test_fit_size_is_extent_from_origin() {
    let mut projection = plate_carree();
    projection.fit_size(960.0, 500.0, &corners()).unwrap();

    let bounds = projection.projected_bounds(&corners()).unwrap();
    assert_extent_approx_eq(bounds, Extent::new(0.0, 10.0, 960.0, 490.0));
}

#[test]
fn test_fit_width_pins_top_edge() {
    let mut projection = plate_carree();
    projection.fit_width(400.0, &corners()).unwrap();

    let bounds = projection.projected_bounds(&corners()).unwrap();
    assert_extent_approx_eq(bounds, Extent::new(0.0, 0.0, 400.0, 200.0));
}

#[test]
fn test_fit_height_pins_left_edge() {
    let mut projection = plate_carree();
    projection.fit_height(300.0, &corners()).unwrap();

    let bounds = projection.projected_bounds(&corners()).unwrap();
    assert_extent_approx_eq(bounds, Extent::new(0.0, 0.0, 600.0, 300.0));
}

#[test]
fn test_fit_keeps_rotation_and_center() {
    let mut projection = plate_carree();
    projection.set_rotate(20.0, 0.0, 0.0).unwrap().set_center(5.0, 5.0).unwrap();
    projection.fit_size(960.0, 500.0, &corners()).unwrap();

    let (lambda, phi, gamma) = projection.rotate();
    assert_approx_eq!(lambda, 20.0, 1e-9);
    assert_approx_eq!(phi, 0.0, 1e-9);
    assert_approx_eq!(gamma, 0.0, 1e-9);
    let (lon, lat) = projection.center();
    assert_approx_eq!(lon, 5.0, 1e-9);
    assert_approx_eq!(lat, 5.0, 1e-9);
}

#[test]
fn test_fit_polygon_with_mercator() {
    let mut projection = mercator();
    let polygon = Geometry::polygon(vec![test_utils::to_vec(test_utils::rings::EQUATOR_BOX)]);
    projection.fit_size(960.0, 500.0, &polygon).unwrap();

    let bounds = projection.projected_bounds(&polygon).unwrap();
    // The box is taller than wide, so height is the binding axis.
    assert_approx_eq!(bounds.min_y, 0.0, 1.0);
    assert_approx_eq!(bounds.max_y, 500.0, 1.0);
    assert_approx_eq!((bounds.min_x + bounds.max_x) / 2.0, 480.0, 1.0);
}

// ============================================================================
// Clip extent handling
// ============================================================================

#[test]
fn test_fit_restores_clip_extent() {
    let (x0, y0, x1, y1) = extents::VIEWPORT;
    let viewport = Extent::new(x0, y0, x1, y1);
    let mut projection = plate_carree();
    projection.set_clip_extent(Some(viewport)).unwrap();
    projection.fit_size(960.0, 500.0, &corners()).unwrap();

    assert_eq!(projection.clip_extent(), Some(viewport));
}

#[test]
fn test_fit_ignores_clip_extent_while_measuring() {
    let mut clipped = plate_carree();
    clipped.set_clip_extent(Some(Extent::new(0.0, 0.0, 10.0, 10.0))).unwrap();
    clipped.fit_size(960.0, 500.0, &corners()).unwrap();

    let mut unclipped = plate_carree();
    unclipped.fit_size(960.0, 500.0, &corners()).unwrap();

    assert_approx_eq!(clipped.scale(), unclipped.scale(), 1e-9);
    assert_eq!(clipped.translate(), unclipped.translate());
}

// ============================================================================
// Degenerate input
// ============================================================================

#[test]
fn test_fit_single_point_is_noop() {
    let mut projection = plate_carree();
    projection.set_scale(321.0).unwrap().set_translate(12.0, 34.0).unwrap();
    projection.fit_size(960.0, 500.0, &Geometry::point(10.0, 10.0)).unwrap();

    assert_eq!(projection.scale(), 321.0);
    assert_eq!(projection.translate(), (12.0, 34.0));
}

#[test]
fn test_fit_empty_geometry_is_noop() {
    let mut projection = plate_carree();
    projection.fit_extent(Extent::new(0.0, 0.0, 100.0, 100.0), &Geometry::multi_point(Vec::new())).unwrap();

    assert_eq!(projection.scale(), 150.0);
    assert_eq!(projection.translate(), (480.0, 250.0));
}

#[test]
fn test_fit_rejects_empty_target() {
    let mut projection = plate_carree();

    assert!(matches!(
        projection.fit_size(0.0, 500.0, &corners()),
        Err(ProjectionError::InvalidExtent(_))
    ));
    assert!(projection.fit_width(-1.0, &corners()).is_err());
    assert!(projection.fit_height(f64::NAN, &corners()).is_err());
    assert_eq!(projection.scale(), 150.0);
}
