//! Spherical centroid of arbitrary geometry.
//!
//! The accumulator keeps three moments, all as Cartesian sums over unit
//! vectors:
//!
//! - point moment: running mean of every vertex,
//! - line moment: segment midpoints weighted by arc length,
//! - area moment: per-segment cross products weighted by the signed area
//!   they sweep.
//!
//! The highest-dimensional moment that is not negligible wins: area, then
//! line, then point. If the winning resultant still vanishes the centroid is
//! ambiguous (two antipodal points, a great circle, the whole sphere).
//!
//! Input is in degrees and is consumed unprojected, straight from
//! [`Streamable::stream`].

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::{asin, cartesian, spherical, Adder, EPSILON, EPSILON2};
use crate::stream::{Stream, Streamable};

/// A centroid in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Point,
    LineFirst,
    Line,
    RingFirst,
    Ring,
}

/// Stream sink accumulating centroid moments.
#[derive(Debug, Clone)]
pub struct CentroidStream {
    mode: Mode,
    in_polygon: bool,

    w0: f64,
    p0: Vector3<f64>,
    w1: f64,
    p1: Vector3<f64>,
    x2: Adder,
    y2: Adder,
    z2: Adder,

    /// First vertex of the current ring, in degrees.
    ring_start: (f64, f64),
    /// Previous vertex of the current line or ring.
    prev: Vector3<f64>,
}

impl Default for CentroidStream {
    fn default() -> Self {
        Self {
            mode: Mode::Point,
            in_polygon: false,
            w0: 0.0,
            p0: Vector3::zeros(),
            w1: 0.0,
            p1: Vector3::zeros(),
            x2: Adder::new(),
            y2: Adder::new(),
            z2: Adder::new(),
            ring_start: (0.0, 0.0),
            prev: Vector3::zeros(),
        }
    }
}

impl CentroidStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_point(&mut self, v: Vector3<f64>) {
        self.w0 += 1.0;
        self.p0 += (v - self.p0) / self.w0;
    }

    fn add_line_to(&mut self, v: Vector3<f64>) -> f64 {
        let w = self.prev.cross(&v).norm().atan2(self.prev.dot(&v));
        self.add_weighted_segment(v, w);
        w
    }

    fn add_weighted_segment(&mut self, v: Vector3<f64>, w: f64) {
        self.w1 += w;
        self.p1 += (self.prev + v) * w;
        self.prev = v;
        self.add_point(v);
    }

    fn add_ring_to(&mut self, v: Vector3<f64>) {
        let c = self.prev.cross(&v);
        let m = c.norm();
        let w = asin(m);
        let k = if m == 0.0 { 0.0 } else { -w / m };
        self.x2.add(k * c.x);
        self.y2.add(k * c.y);
        self.z2.add(k * c.z);
        self.add_weighted_segment(v, w);
    }

    /// The centroid of everything streamed so far, or `None` when it is
    /// ambiguous.
    pub fn result(&self) -> Option<Centroid> {
        let mut v = Vector3::new(self.x2.value(), self.y2.value(), self.z2.value());
        let mut m = v.norm();

        if m < EPSILON2 {
            v = if self.w1 < EPSILON { self.p0 } else { self.p1 };
            m = v.norm();
            if m < EPSILON2 {
                debug!(points = self.w0, length = self.w1, "Centroid is ambiguous");
                return None;
            }
        }

        let (lambda, phi) = spherical(&(v / m));
        Some(Centroid {
            lon: lambda.to_degrees(),
            lat: phi.to_degrees(),
        })
    }
}

impl Stream for CentroidStream {
    fn point(&mut self, lon: f64, lat: f64, _z: f64) {
        let v = cartesian(lon.to_radians(), lat.to_radians());
        match self.mode {
            Mode::Point => self.add_point(v),
            Mode::LineFirst => {
                self.prev = v;
                self.add_point(v);
                self.mode = Mode::Line;
            }
            Mode::Line => {
                self.add_line_to(v);
            }
            Mode::RingFirst => {
                self.ring_start = (lon, lat);
                self.prev = v;
                self.add_point(v);
                self.mode = Mode::Ring;
            }
            Mode::Ring => self.add_ring_to(v),
        }
    }

    fn line_start(&mut self) {
        self.mode = if self.in_polygon { Mode::RingFirst } else { Mode::LineFirst };
    }

    fn line_end(&mut self) {
        if self.mode == Mode::Ring {
            let (lon, lat) = self.ring_start;
            self.add_ring_to(cartesian(lon.to_radians(), lat.to_radians()));
        }
        self.mode = Mode::Point;
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
    }
}

/// Spherical centroid of `object`, or `None` when it is ambiguous.
pub fn geo_centroid<G: Streamable + ?Sized>(object: &G) -> Option<Centroid> {
    let mut stream = CentroidStream::new();
    object.stream(&mut stream);
    stream.result()
}
