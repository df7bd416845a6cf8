//! Tests for the spherical centroid.

use geo_common::{Feature, FeatureCollection, Geometry, Position};
use geo_projection::{geo_centroid, Centroid};
use test_utils::{assert_approx_eq, assert_lonlat_approx_eq, lines, parallel_ring, points, rings, to_vec};

fn centroid(geometry: Geometry) -> Centroid {
    match geo_centroid(&geometry) {
        Some(c) => c,
        None => panic!("expected a centroid for {:?}", geometry),
    }
}

fn assert_centroid(geometry: Geometry, lon: f64, lat: f64, epsilon: f64) {
    let c = centroid(geometry);
    assert_lonlat_approx_eq!((c.lon, c.lat), (lon, lat), epsilon);
}

fn line(coords: &[Position]) -> Geometry {
    Geometry::line_string(coords.to_vec())
}

// ============================================================================
// Points
// ============================================================================

#[test]
fn test_point_is_its_own_centroid() {
    for [lon, lat] in [[0.0, 0.0], [1.0, 1.0], [2.0, 3.0], [-4.0, -5.0]] {
        assert_centroid(Geometry::point(lon, lat), lon, lat, 1e-9);
    }
}

#[test]
fn test_points_average_on_the_sphere() {
    assert_centroid(Geometry::multi_point(vec![[0.0, 0.0], [1.0, 2.0]]), 0.499847, 1.000038, 1e-5);
    assert_centroid(Geometry::multi_point(to_vec(points::ANTIMERIDIAN_PAIR)), 180.0, 0.0, 1e-9);
}

#[test]
fn test_antipodal_points_are_ambiguous() {
    assert_eq!(geo_centroid(&Geometry::multi_point(to_vec(points::ANTIPODAL_PAIR))), None);
    assert_eq!(geo_centroid(&Geometry::multi_point(to_vec(points::EQUATOR_QUARTERS))), None);
    assert_eq!(
        geo_centroid(&Geometry::multi_point(vec![[0.0, 0.0], [0.0, 90.0], [180.0, 0.0], [0.0, -90.0]])),
        None
    );
}

#[test]
fn test_empty_multi_point_is_ambiguous() {
    assert_eq!(geo_centroid(&Geometry::multi_point(Vec::new())), None);
}

// ============================================================================
// Lines
// ============================================================================

#[test]
fn test_line_centroid_weights_great_arcs() {
    assert_centroid(Geometry::line_string(to_vec(lines::EQUATOR_DEGREE)), 0.5, 0.0, 1e-6);
    assert_centroid(Geometry::line_string(to_vec(lines::MERIDIAN_TO_POLE)), 0.0, 45.0, 1e-6);
    assert_centroid(line(&[[0.0, 0.0], [0.0, 45.0], [0.0, 90.0]]), 0.0, 45.0, 1e-6);
    assert_centroid(line(&[[-1.0, -1.0], [1.0, 1.0]]), 0.0, 0.0, 1e-6);
    assert_centroid(line(&[[-60.0, -1.0], [60.0, 1.0]]), 0.0, 0.0, 1e-6);
    assert_centroid(Geometry::line_string(to_vec(lines::ANTIMERIDIAN_HOP)), 180.0, 0.0, 1e-6);
    assert_centroid(line(&[[-179.0, 0.0], [0.0, 0.0], [179.0, 0.0]]), 0.0, 0.0, 1e-6);
    assert_centroid(line(&[[-180.0, -90.0], [0.0, 0.0], [0.0, 90.0]]), 0.0, 0.0, 1e-6);
}

#[test]
fn test_arc_to_antipode_is_ambiguous() {
    assert_eq!(geo_centroid(&line(&[[180.0, 0.0], [0.0, 0.0]])), None);
    assert_eq!(
        geo_centroid(&Geometry::multi_line_string(vec![vec![[180.0, 0.0], [0.0, 0.0]]])),
        None
    );
}

#[test]
fn test_multi_line_string_centroid() {
    assert_centroid(Geometry::multi_line_string(vec![vec![[0.0, 0.0], [0.0, 2.0]]]), 0.0, 1.0, 1e-6);
}

#[test]
fn test_zero_length_line_is_treated_as_point() {
    assert_centroid(line(&[[1.0, 1.0], [1.0, 1.0]]), 1.0, 1.0, 1e-6);
}

#[test]
fn test_equator_is_ambiguous() {
    assert_eq!(geo_centroid(&Geometry::line_string(to_vec(lines::EQUATOR_LOOP))), None);
}

// ============================================================================
// Polygons
// ============================================================================

#[test]
fn test_zero_area_polygon_is_treated_as_line() {
    assert_centroid(Geometry::polygon(vec![to_vec(rings::RETRACED_PARALLEL)]), 2.0, 1.000076, 1e-5);
}

#[test]
fn test_collapsed_polygon_is_treated_as_point() {
    assert_centroid(Geometry::polygon(vec![to_vec(rings::COLLAPSED)]), 1.0, 1.0, 1e-6);
}

#[test]
fn test_polygon_centroid_is_surface_average() {
    assert_centroid(Geometry::polygon(vec![to_vec(rings::POLAR_LUNE)]), 0.5, 0.0, 1e-6);
    assert_centroid(Geometry::polygon(vec![to_vec(rings::EQUATOR_BOX)]), 5.0, 0.0, 1e-6);
    assert_centroid(Geometry::polygon(vec![to_vec(rings::EQUATOR_BOX_COINCIDENT)]), 5.0, 0.0, 1e-6);
}

#[test]
fn test_polygon_touching_antimeridian() {
    assert_centroid(Geometry::polygon(vec![to_vec(rings::ANTIMERIDIAN_BOX)]), -179.5, 4.987448, 1e-5);
}

#[test]
fn test_parallel_ring_centroid_is_its_pole() {
    let c = centroid(Geometry::polygon(vec![parallel_ring(-60.0, 360)]));
    assert_approx_eq!(c.lat, -90.0, 1e-6);
}

#[test]
fn test_sphere_is_ambiguous() {
    assert_eq!(geo_centroid(&Geometry::Sphere), None);
}

// ============================================================================
// Mixed dimensions
// ============================================================================

#[test]
fn test_feature_centroid_uses_its_geometry() {
    let feature = Feature::new(line(&[[1.0, 1.0], [1.0, 1.0]]));
    let c = geo_centroid(&feature).unwrap();
    assert_lonlat_approx_eq!((c.lon, c.lat), (1.0, 1.0), 1e-6);

    let feature = Feature::new(Geometry::polygon(vec![to_vec(rings::POLAR_LUNE)]));
    let c = geo_centroid(&feature).unwrap();
    assert_lonlat_approx_eq!((c.lon, c.lat), (0.5, 0.0), 1e-6);
}

#[test]
fn test_lines_outweigh_points() {
    let collection = FeatureCollection::new(vec![
        Feature::new(line(&[[179.0, 0.0], [180.0, 0.0]])),
        Feature::new(Geometry::point(0.0, 0.0)),
    ]);
    let c = geo_centroid(&collection).unwrap();
    assert_lonlat_approx_eq!((c.lon, c.lat), (179.5, 0.0), 1e-6);

    let geometry = Geometry::collection(vec![line(&[[179.0, 0.0], [180.0, 0.0]]), Geometry::point(0.0, 0.0)]);
    assert_centroid(geometry, 179.5, 0.0, 1e-6);
}

#[test]
fn test_surfaces_outweigh_lines_and_points_in_any_order() {
    let square = Geometry::polygon(vec![vec![
        [-180.0, 0.0],
        [-180.0, 1.0],
        [-179.0, 1.0],
        [-179.0, 0.0],
        [-180.0, 0.0],
    ]]);
    let segment = line(&[[179.0, 0.0], [180.0, 0.0]]);
    let origin = Geometry::point(0.0, 0.0);

    let forward = Geometry::collection(vec![square.clone(), segment.clone(), origin.clone()]);
    let backward = Geometry::collection(vec![origin, segment, square]);
    assert_centroid(forward, -179.5, 0.500006, 1e-5);
    assert_centroid(backward, -179.5, 0.500006, 1e-5);
}

#[test]
fn test_sphere_contributes_nothing_next_to_a_point() {
    let collection = FeatureCollection::new(vec![
        Feature::new(Geometry::Sphere),
        Feature::new(Geometry::point(1.0, 2.0)),
    ]);
    let c = geo_centroid(&collection).unwrap();
    assert_lonlat_approx_eq!((c.lon, c.lat), (1.0, 2.0), 1e-6);

    let collection = FeatureCollection::new(vec![
        Feature::new(Geometry::point(2.0, 3.0)),
        Feature::new(Geometry::Sphere),
    ]);
    let c = geo_centroid(&collection).unwrap();
    assert_lonlat_approx_eq!((c.lon, c.lat), (2.0, 3.0), 1e-6);
}
