//! Spherical Mercator.
//!
//! Conformal cylindrical projection. `y` diverges at the poles, so the
//! projector declares [`ReclipPolicy::Longitudinal`] and the owning
//! projection keeps a device-space clip extent that follows scale and
//! translate.

use std::f64::consts::FRAC_PI_2;

use crate::projector::{Projector, ReclipPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mercator;

impl Projector for Mercator {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda, ((FRAC_PI_2 + phi) / 2.0).tan().ln())
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (x, 2.0 * y.exp().atan() - FRAC_PI_2)
    }

    fn reclip_policy(&self) -> ReclipPolicy {
        ReclipPolicy::Longitudinal
    }
}
