//! Three-axis rotation of the sphere.
//!
//! The rotation is applied as a yaw about the polar axis (Δλ) followed by a
//! pitch (Δφ) and roll (Δγ). With all three angles zero it reduces to
//! wrapping longitudes into `[-π, π]`.

use crate::math::{asin, TAU};
use crate::projector::Projector;
use std::f64::consts::PI;

/// Rotation by `(Δλ, Δφ, Δγ)` in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    delta_lambda: f64,
    delta_phi: f64,
    delta_gamma: f64,
    cos_delta_phi: f64,
    sin_delta_phi: f64,
    cos_delta_gamma: f64,
    sin_delta_gamma: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Rotation {
    pub fn new(delta_lambda: f64, delta_phi: f64, delta_gamma: f64) -> Self {
        Self {
            delta_lambda: delta_lambda % TAU,
            delta_phi,
            delta_gamma,
            cos_delta_phi: delta_phi.cos(),
            sin_delta_phi: delta_phi.sin(),
            cos_delta_gamma: delta_gamma.cos(),
            sin_delta_gamma: delta_gamma.sin(),
        }
    }

    pub fn from_degrees(lambda: f64, phi: f64, gamma: f64) -> Self {
        Self::new(lambda.to_radians(), phi.to_radians(), gamma.to_radians())
    }

    /// `(Δλ, Δφ, Δγ)` in radians, with Δλ reduced modulo 2π.
    pub fn angles(&self) -> (f64, f64, f64) {
        (self.delta_lambda, self.delta_phi, self.delta_gamma)
    }

    fn has_phi_gamma(&self) -> bool {
        self.delta_phi != 0.0 || self.delta_gamma != 0.0
    }

    fn forward_phi_gamma(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_phi + x * self.sin_delta_phi;
        (
            (y * self.cos_delta_gamma - k * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi - z * self.sin_delta_phi),
            asin(k * self.cos_delta_gamma + y * self.sin_delta_gamma),
        )
    }

    fn inverse_phi_gamma(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_gamma - y * self.sin_delta_gamma;
        (
            (y * self.cos_delta_gamma + z * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi + k * self.sin_delta_phi),
            asin(k * self.cos_delta_phi - x * self.sin_delta_phi),
        )
    }
}

/// Wrap a longitude into `[-π, π]`, leaving in-range values untouched.
pub(crate) fn wrap_lambda(lambda: f64) -> f64 {
    if lambda.abs() > PI {
        // Half-way cases round toward +∞.
        lambda - (lambda / TAU + 0.5).floor() * TAU
    } else {
        lambda
    }
}

impl Projector for Rotation {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_lambda(lambda + self.delta_lambda);
        if self.has_phi_gamma() {
            self.forward_phi_gamma(lambda, phi)
        } else {
            (lambda, phi)
        }
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        let (lambda, phi) = if self.has_phi_gamma() {
            self.inverse_phi_gamma(x, y)
        } else {
            (x, y)
        };
        (wrap_lambda(lambda - self.delta_lambda), phi)
    }
}
