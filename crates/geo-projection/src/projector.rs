//! Raw forward/inverse coordinate mappings and their composition.
//!
//! A [`Projector`] maps `(λ, φ)` in radians to an unscaled plane centred on
//! the origin, and back. Everything stateful (scale, translate, rotation,
//! clipping) lives in [`crate::Projection`]; projectors are plain values that
//! get rebuilt whenever the projection is reconfigured.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Axis along which a projector's automatic clip extent overrides a caller
/// supplied extent.
///
/// Cylindrical projections with an unbounded axis (Mercator and its
/// transverse variant) need a device-space clip that tracks scale and
/// translate so that the poles do not run off to infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclipPolicy {
    /// No automatic clip extent.
    #[default]
    None,
    /// Clamp the x axis (Mercator).
    Longitudinal,
    /// Clamp the y axis (transverse Mercator).
    Latitudinal,
}

/// A stateless forward/inverse mapping pair.
///
/// `invert(project(p)) ≈ p` must hold away from the projector's
/// singularities. Singular inputs yield non-finite output rather than
/// errors.
pub trait Projector: fmt::Debug + Send + Sync {
    /// Forward mapping, radians in.
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64);

    /// Inverse mapping, radians out.
    fn invert(&self, x: f64, y: f64) -> (f64, f64);

    fn reclip_policy(&self) -> ReclipPolicy {
        ReclipPolicy::None
    }
}

impl<P: Projector + ?Sized> Projector for Arc<P> {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (**self).project(lambda, phi)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (**self).invert(x, y)
    }

    fn reclip_policy(&self) -> ReclipPolicy {
        (**self).reclip_policy()
    }
}

impl<P: Projector + ?Sized> Projector for Box<P> {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (**self).project(lambda, phi)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (**self).invert(x, y)
    }

    fn reclip_policy(&self) -> ReclipPolicy {
        (**self).reclip_policy()
    }
}

/// The identity mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl Projector for Identity {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        (lambda, phi)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }
}

/// `A` followed by `B`.
///
/// Inversion runs the other way round: `A.invert(B.invert(p))`. The reclip
/// policy is taken from whichever side declares one, `B` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composed<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Composed<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

/// Shorthand for [`Composed::new`].
pub fn compose<A: Projector, B: Projector>(first: A, second: B) -> Composed<A, B> {
    Composed::new(first, second)
}

impl<A: Projector, B: Projector> Projector for Composed<A, B> {
    fn project(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let (x, y) = self.first.project(lambda, phi);
        self.second.project(x, y)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        let (x, y) = self.second.invert(x, y);
        self.first.invert(x, y)
    }

    fn reclip_policy(&self) -> ReclipPolicy {
        match self.second.reclip_policy() {
            ReclipPolicy::None => self.first.reclip_policy(),
            policy => policy,
        }
    }
}

/// Uniform scale `k` followed by an offset, with the y axis flipped so that
/// device y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTranslate {
    pub k: f64,
    pub dx: f64,
    pub dy: f64,
}

impl ScaleTranslate {
    pub fn new(k: f64, dx: f64, dy: f64) -> Self {
        Self { k, dx, dy }
    }
}

impl Projector for ScaleTranslate {
    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (self.dx + x * self.k, self.dy - y * self.k)
    }

    fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.dx) / self.k, (self.dy - y) / self.k)
    }
}
