//! Plate carrée: longitude and latitude map straight onto x and y.

use crate::projector::Projector;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Equirectangular;

impl Projector for Equirectangular {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda, phi)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}
