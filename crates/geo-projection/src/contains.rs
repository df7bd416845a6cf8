//! Point-in-polygon on the sphere.

use std::f64::consts::PI;

use crate::math::{asin, cartesian, normalize_in_place, sign, Adder, EPSILON, EPSILON2, HALF_PI, QUARTER_PI, TAU};

fn longitude(point: [f64; 2]) -> f64 {
    if point[0].abs() <= PI {
        point[0]
    } else {
        sign(point[0]) * ((point[0].abs() + PI) % TAU - PI)
    }
}

/// Whether `point` lies inside `polygon`, all in radians.
///
/// Rings are open (no repeated closing vertex). The answer combines two
/// tests: whether the south pole is enclosed (from the accumulated winding
/// angle and signed area) and the parity of crossings along the meridian
/// from `point` down to the south pole.
pub fn polygon_contains(polygon: &[Vec<[f64; 2]>], point: [f64; 2]) -> bool {
    let lambda = longitude(point);
    let mut phi = point[1];
    let sin_phi = phi.sin();
    let normal = nalgebra::Vector3::new(lambda.sin(), -lambda.cos(), 0.0);
    let mut angle = 0.0;
    let mut winding: i64 = 0;
    let mut sum = Adder::new();

    if sin_phi == 1.0 {
        phi = HALF_PI + EPSILON;
    } else if sin_phi == -1.0 {
        phi = -HALF_PI - EPSILON;
    }

    for ring in polygon {
        let Some(&last) = ring.last() else {
            continue;
        };
        let mut point0 = last;
        let mut lambda0 = longitude(point0);
        let phi0 = point0[1] / 2.0 + QUARTER_PI;
        let mut sin_phi0 = phi0.sin();
        let mut cos_phi0 = phi0.cos();

        for &point1 in ring {
            let lambda1 = longitude(point1);
            let phi1 = point1[1] / 2.0 + QUARTER_PI;
            let sin_phi1 = phi1.sin();
            let cos_phi1 = phi1.cos();
            let delta = lambda1 - lambda0;
            let sign = if delta >= 0.0 { 1.0 } else { -1.0 };
            let abs_delta = sign * delta;
            let antimeridian = abs_delta > PI;
            let k = sin_phi0 * sin_phi1;

            sum.add((k * sign * abs_delta.sin()).atan2(cos_phi0 * cos_phi1 + k * abs_delta.cos()));
            angle += if antimeridian { delta + sign * TAU } else { delta };

            // Do the endpoints straddle the point's meridian?
            if antimeridian ^ (lambda0 >= lambda) ^ (lambda1 >= lambda) {
                let mut arc = cartesian(point0[0], point0[1]).cross(&cartesian(point1[0], point1[1]));
                normalize_in_place(&mut arc);
                let mut intersection = normal.cross(&arc);
                normalize_in_place(&mut intersection);
                let eastward = antimeridian ^ (delta >= 0.0);
                let phi_arc = if eastward { -1.0 } else { 1.0 } * asin(intersection.z);
                if phi > phi_arc || (phi == phi_arc && (arc.x != 0.0 || arc.y != 0.0)) {
                    winding += if eastward { 1 } else { -1 };
                }
            }

            lambda0 = lambda1;
            sin_phi0 = sin_phi1;
            cos_phi0 = cos_phi1;
            point0 = point1;
        }
    }

    let south_pole_inside = angle < -EPSILON || (angle < EPSILON && sum.value() < -EPSILON2);
    south_pole_inside ^ (winding & 1 != 0)
}
