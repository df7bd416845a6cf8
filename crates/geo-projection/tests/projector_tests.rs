//! Tests for raw projectors, composition and the sphere rotation.

use geo_projection::{
    compose, equirectangular, mercator, transverse_mercator, Identity, Mercator, Projector, Rotation,
    ScaleTranslate, TransverseMercator,
};
use test_utils::{assert_coords_approx_eq, assert_lonlat_approx_eq, lon_lat_grid};

fn rad(lon: f64, lat: f64) -> (f64, f64) {
    (lon.to_radians(), lat.to_radians())
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_identity_is_neutral_on_both_sides() {
    let left = compose(Identity, Mercator);
    let right = compose(Mercator, Identity);

    for [lon, lat] in lon_lat_grid(30.0) {
        let (lambda, phi) = rad(lon, lat);
        let (ex, ey) = Mercator.project(lambda, phi);
        let (lx, ly) = left.project(lambda, phi);
        let (rx, ry) = right.project(lambda, phi);
        assert_coords_approx_eq!((lx, ly), (ex, ey), 1e-12);
        assert_coords_approx_eq!((rx, ry), (ex, ey), 1e-12);
    }
}

#[test]
fn test_composition_applies_first_then_second() {
    let composed = compose(Mercator, ScaleTranslate::new(100.0, 10.0, 20.0));
    let (x, y) = Mercator.project(0.5, 0.25);
    let (cx, cy) = composed.project(0.5, 0.25);

    assert_coords_approx_eq!((cx, cy), (10.0 + 100.0 * x, 20.0 - 100.0 * y), 1e-12);
}

#[test]
fn test_composition_inverts_in_reverse_order() {
    let composed = compose(Mercator, ScaleTranslate::new(100.0, 10.0, 20.0));
    let (x, y) = composed.project(0.5, 0.25);
    let (lambda, phi) = composed.invert(x, y);

    assert_coords_approx_eq!((lambda, phi), (0.5, 0.25), 1e-12);
}

#[test]
fn test_composition_is_associative() {
    let rotation = Rotation::from_degrees(20.0, -10.0, 5.0);
    let st = ScaleTranslate::new(150.0, 480.0, 250.0);
    let a = compose(compose(rotation, Mercator), st);
    let b = compose(rotation, compose(Mercator, st));

    for [lon, lat] in lon_lat_grid(45.0) {
        let (lambda, phi) = rad(lon, lat);
        let (ax, ay) = a.project(lambda, phi);
        let (bx, by) = b.project(lambda, phi);
        assert_coords_approx_eq!((ax, ay), (bx, by), 1e-9);
    }
}

// ============================================================================
// Raw projector round trips
// ============================================================================

#[test]
fn test_mercator_round_trip() {
    for [lon, lat] in lon_lat_grid(15.0) {
        if lat.abs() > 80.0 {
            continue;
        }
        let (x, y) = Mercator.project(lon.to_radians(), lat.to_radians());
        let (lambda, phi) = Mercator.invert(x, y);
        assert_lonlat_approx_eq!((lambda.to_degrees(), phi.to_degrees()), (lon, lat), 1e-9);
    }
}

#[test]
fn test_transverse_mercator_round_trip() {
    for [lon, lat] in lon_lat_grid(15.0) {
        if lat.abs() > 80.0 {
            continue;
        }
        let (x, y) = TransverseMercator.project(lon.to_radians(), lat.to_radians());
        let (lambda, phi) = TransverseMercator.invert(x, y);
        assert_lonlat_approx_eq!((lambda.to_degrees(), phi.to_degrees()), (lon, lat), 1e-9);
    }
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_zero_rotation_is_identity() {
    let rotation = Rotation::from_degrees(0.0, 0.0, 0.0);
    for [lon, lat] in lon_lat_grid(30.0) {
        let (lambda, phi) = rad(lon, lat);
        let (rl, rp) = rotation.project(lambda, phi);
        assert_coords_approx_eq!((rl, rp), (lambda, phi), 1e-15);
    }
}

#[test]
fn test_full_turn_rotation_is_identity() {
    let rotation = Rotation::from_degrees(360.0, 0.0, 0.0);
    let (lambda, phi) = rotation.project(0.3, 0.2);
    assert_coords_approx_eq!((lambda, phi), (0.3, 0.2), 1e-12);
}

#[test]
fn test_rotation_round_trip() {
    let rotation = Rotation::from_degrees(30.0, -20.0, 10.0);
    for [lon, lat] in lon_lat_grid(30.0) {
        let (lambda, phi) = rad(lon, lat);
        let (rl, rp) = rotation.project(lambda, phi);
        let (il, ip) = rotation.invert(rl, rp);
        assert_lonlat_approx_eq!((il.to_degrees(), ip.to_degrees()), (lon, lat), 1e-9);
    }
}

#[test]
fn test_yaw_only_rotation_shifts_longitude() {
    let rotation = Rotation::from_degrees(90.0, 0.0, 0.0);
    let (lambda, phi) = rotation.project(120f64.to_radians(), 10f64.to_radians());

    // 120 + 90 wraps to -150.
    assert_lonlat_approx_eq!((lambda.to_degrees(), phi.to_degrees()), (-150.0, 10.0), 1e-9);
}

// ============================================================================
// Full projection round trips
// ============================================================================

#[test]
fn test_projection_round_trip_within_tolerance() {
    let mut rotated = equirectangular();
    rotated.set_rotate(30.0, -20.0, 10.0).unwrap();

    for projection in [equirectangular(), mercator(), rotated] {
        for [lon, lat] in lon_lat_grid(30.0) {
            let (x, y) = projection.project(lon, lat);
            let (ilon, ilat) = projection.invert(x, y);
            assert_lonlat_approx_eq!((ilon, ilat), (lon, lat), 1e-9);
        }
    }
}

#[test]
fn test_transverse_mercator_projection_round_trip() {
    let projection = transverse_mercator();
    for [lon, lat] in lon_lat_grid(30.0) {
        // (±90, 0) are the poles of the rolled frame.
        if lat == 0.0 && lon.abs() == 90.0 {
            continue;
        }
        let (x, y) = projection.project(lon, lat);
        let (ilon, ilat) = projection.invert(x, y);
        assert_lonlat_approx_eq!((ilon, ilat), (lon, lat), 1e-9);
    }
}
