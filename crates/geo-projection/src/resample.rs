//! Adaptive resampling.
//!
//! Straight segments in sphere space become curves once projected. The
//! resampler bisects each great-arc segment, projecting the spherical
//! midpoint, until the projected polyline is within `δ` of the curve. A
//! segment is split when any of these holds:
//!
//! - the midpoint lies farther than `δ` from the projected chord,
//! - the midpoint falls too close to one end of the chord,
//! - the arc spans more than 30°.
//!
//! Recursion stops after [`MAX_DEPTH`] levels regardless.

use nalgebra::Vector3;

use crate::math::{asin, cartesian, EPSILON};
use crate::projector::Projector;
use crate::stream::Stream;

pub const MAX_DEPTH: u32 = 16;

/// `cos(30°)`.
const COS_MIN_DISTANCE: f64 = 0.866_025_403_784_438_7;

#[derive(Debug, Clone, Copy)]
struct Vertex {
    x: f64,
    y: f64,
    lambda: f64,
    v: Vector3<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Point,
    Line,
    RingFirst,
    Ring,
}

/// Stream stage projecting sphere coordinates through `P`, inserting
/// intermediate points where the projected curve bends.
///
/// With `δ² == 0` every input point is projected exactly once and nothing is
/// inserted.
pub struct Resample<P, S> {
    projector: P,
    delta2: f64,
    sink: S,
    mode: Mode,
    in_polygon: bool,
    prev: Option<Vertex>,
    ring_first: Option<Vertex>,
}

impl<P: Projector, S: Stream> Resample<P, S> {
    pub fn new(projector: P, delta2: f64, sink: S) -> Self {
        Self {
            projector,
            delta2,
            sink,
            mode: Mode::Point,
            in_polygon: false,
            prev: None,
            ring_first: None,
        }
    }

    fn project_point(&mut self, lambda: f64, phi: f64) {
        let (x, y) = self.projector.project(lambda, phi);
        self.sink.point(x, y, 0.0);
    }

    fn line_point(&mut self, lambda: f64, phi: f64) -> Vertex {
        let (x, y) = self.projector.project(lambda, phi);
        let current = Vertex {
            x,
            y,
            lambda,
            v: cartesian(lambda, phi),
        };
        if let Some(prev) = self.prev {
            self.resample_line_to(prev, current, MAX_DEPTH);
        }
        self.sink.point(x, y, 0.0);
        self.prev = Some(current);
        current
    }

    fn resample_line_to(&mut self, p0: Vertex, p1: Vertex, depth: u32) {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let d2 = dx * dx + dy * dy;
        if !(d2 > 4.0 * self.delta2) || depth == 0 {
            return;
        }
        let depth = depth - 1;

        let mut mid = p0.v + p1.v;
        let m = mid.norm();
        mid /= m;
        let phi2 = asin(mid.z);
        let lambda2 = if (mid.z.abs() - 1.0).abs() < EPSILON || (p0.lambda - p1.lambda).abs() < EPSILON {
            (p0.lambda + p1.lambda) / 2.0
        } else {
            mid.y.atan2(mid.x)
        };
        let (x2, y2) = self.projector.project(lambda2, phi2);
        let dx2 = x2 - p0.x;
        let dy2 = y2 - p0.y;
        let dz = dy * dx2 - dx * dy2;

        if dz * dz / d2 > self.delta2
            || ((dx * dx2 + dy * dy2) / d2 - 0.5).abs() > 0.3
            || p0.v.dot(&p1.v) < COS_MIN_DISTANCE
        {
            let p2 = Vertex {
                x: x2,
                y: y2,
                lambda: lambda2,
                v: mid,
            };
            self.resample_line_to(p0, p2, depth);
            self.sink.point(x2, y2, 0.0);
            self.resample_line_to(p2, p1, depth);
        }
    }
}

impl<P: Projector, S: Stream> Stream for Resample<P, S> {
    fn point(&mut self, lambda: f64, phi: f64, _z: f64) {
        if self.delta2 <= 0.0 {
            self.project_point(lambda, phi);
            return;
        }
        match self.mode {
            Mode::Point => self.project_point(lambda, phi),
            Mode::Line | Mode::Ring => {
                self.line_point(lambda, phi);
            }
            Mode::RingFirst => {
                let first = self.line_point(lambda, phi);
                self.ring_first = Some(first);
                self.mode = Mode::Ring;
            }
        }
    }

    fn line_start(&mut self) {
        self.prev = None;
        self.mode = if self.in_polygon { Mode::RingFirst } else { Mode::Line };
        self.sink.line_start();
    }

    fn line_end(&mut self) {
        if self.mode == Mode::Ring && self.delta2 > 0.0 {
            // Close the ring back to its first vertex without repeating it.
            if let (Some(prev), Some(first)) = (self.prev, self.ring_first) {
                self.resample_line_to(prev, first, MAX_DEPTH);
            }
        }
        self.mode = Mode::Point;
        self.prev = None;
        self.ring_first = None;
        self.sink.line_end();
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
        self.sink.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
        self.sink.polygon_end();
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mercator::Mercator;
    use crate::projector::{compose, ScaleTranslate};
    use crate::stream::EventRecorder;

    fn stream_line(delta2: f64, coords: &[(f64, f64)]) -> EventRecorder {
        let projector = compose(Mercator, ScaleTranslate::new(100.0, 0.0, 0.0));
        let mut recorder = EventRecorder::new();
        {
            let mut resample = Resample::new(projector, delta2, &mut recorder);
            resample.line_start();
            for &(l, p) in coords {
                resample.point(l.to_radians(), p.to_radians(), 0.0);
            }
            resample.line_end();
        }
        recorder
    }

    #[test]
    fn test_zero_precision_projects_each_point_once() {
        let recorder = stream_line(0.0, &[(0.0, 0.0), (90.0, 60.0)]);
        assert_eq!(recorder.points().len(), 2);
    }

    #[test]
    fn test_long_arc_is_subdivided() {
        let recorder = stream_line(0.5, &[(0.0, 0.0), (90.0, 60.0)]);
        assert!(recorder.points().len() > 2);
    }

    #[test]
    fn test_straight_projected_segment_is_kept() {
        // A short stretch of the equator is a straight line under Mercator.
        let recorder = stream_line(0.5, &[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(recorder.points().len(), 2);
    }

    #[test]
    fn test_endpoints_are_preserved() {
        let recorder = stream_line(0.5, &[(0.0, 0.0), (90.0, 60.0)]);
        let points = recorder.points();
        assert!(points[0][0].abs() < 1e-9);
        let last = points[points.len() - 1];
        assert!((last[0] - 100.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }
}
