//! Transverse spherical Mercator: Mercator with the cylinder touching a
//! meridian instead of the equator.
//!
//! The raw mapping swaps the roles of the axes. Projections built with
//! [`crate::transverse_mercator`] default to a 90° roll so that north stays
//! up.

use std::f64::consts::FRAC_PI_2;

use crate::projector::{Projector, ReclipPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransverseMercator;

impl Projector for TransverseMercator {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (((FRAC_PI_2 + phi) / 2.0).tan().ln(), -lambda)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (-y, 2.0 * x.exp().atan() - FRAC_PI_2)
    }

    fn reclip_policy(&self) -> ReclipPolicy {
        ReclipPolicy::Latitudinal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let (x, y) = TransverseMercator.project(0.4, -0.3);
        let (l, p) = TransverseMercator.invert(x, y);
        assert!((l - 0.4).abs() < 1e-12);
        assert!((p + 0.3).abs() < 1e-12);
    }
}
