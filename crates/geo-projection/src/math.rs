//! Numeric helpers shared by the clip, resample and centroid stages.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector3;

pub const EPSILON: f64 = 1e-6;
pub const EPSILON2: f64 = 1e-12;
pub const HALF_PI: f64 = FRAC_PI_2;
pub const QUARTER_PI: f64 = PI / 4.0;
pub const TAU: f64 = std::f64::consts::TAU;

/// `asin` that saturates instead of returning NaN for |x| slightly above 1.
pub fn asin(x: f64) -> f64 {
    if x > 1.0 {
        HALF_PI
    } else if x < -1.0 {
        -HALF_PI
    } else {
        x.asin()
    }
}

/// Sign as -1, 0 or 1.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unit vector for a `(λ, φ)` pair in radians.
pub fn cartesian(lambda: f64, phi: f64) -> Vector3<f64> {
    let cos_phi = phi.cos();
    Vector3::new(cos_phi * lambda.cos(), cos_phi * lambda.sin(), phi.sin())
}

/// `(λ, φ)` in radians for a unit vector.
pub fn spherical(v: &Vector3<f64>) -> (f64, f64) {
    (v.y.atan2(v.x), asin(v.z))
}

/// Scale `v` to unit length in place. A zero vector is left untouched.
pub fn normalize_in_place(v: &mut Vector3<f64>) {
    let l = v.norm();
    if l > 0.0 {
        *v /= l;
    }
}

/// Compensated (Shewchuk two-term) summation.
///
/// Keeps the running total as a pair so that adding many small terms of
/// alternating sign does not lose the low-order bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adder {
    s: f64,
    t: f64,
}

impl Adder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, y: f64) {
        let (s, t) = two_sum(y, self.t);
        let (s2, t2) = two_sum(s, self.s);
        self.s = s2;
        self.t = t2;
        if self.s != 0.0 {
            self.t += t;
        } else {
            self.s = t;
        }
    }

    pub fn reset(&mut self) {
        self.s = 0.0;
        self.t = 0.0;
    }

    pub fn value(&self) -> f64 {
        self.s
    }
}

fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bv = x - a;
    let av = x - bv;
    (x, (a - av) + (b - bv))
}
