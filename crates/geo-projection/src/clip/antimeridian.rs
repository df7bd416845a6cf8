//! Cutting along the ±180° meridian.
//!
//! Every point is visible; lines are split where they cross the
//! antimeridian (or pass over a pole) and polygons are rejoined along the
//! cut. The full boundary traced for the sphere sentinel runs from the south
//! pole up the western edge, across the north pole and back down the
//! eastern edge.

use std::cmp::Ordering;
use std::f64::consts::PI;

use crate::clip::rejoin::ClipBoundary;
use crate::clip::sphere::{ClipStrategy, LineClipper};
use crate::math::{EPSILON, HALF_PI};
use crate::stream::Stream;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Antimeridian;

impl ClipBoundary for Antimeridian {
    fn interpolate(&self, endpoints: Option<([f64; 2], [f64; 2])>, direction: f64, stream: &mut dyn Stream) {
        match endpoints {
            None => {
                let phi = direction * HALF_PI;
                stream.point(-PI, phi, 0.0);
                stream.point(0.0, phi, 0.0);
                stream.point(PI, phi, 0.0);
                stream.point(PI, 0.0, 0.0);
                stream.point(PI, -phi, 0.0);
                stream.point(0.0, -phi, 0.0);
                stream.point(-PI, -phi, 0.0);
                stream.point(-PI, 0.0, 0.0);
                stream.point(-PI, phi, 0.0);
            }
            Some((from, to)) if (from[0] - to[0]).abs() > EPSILON => {
                // Crossing from one side of the cut to the other goes over a pole.
                let lambda = if from[0] < to[0] { PI } else { -PI };
                let phi = direction * lambda / 2.0;
                stream.point(-lambda, phi, 0.0);
                stream.point(0.0, phi, 0.0);
                stream.point(lambda, phi, 0.0);
            }
            Some((_, to)) => stream.point(to[0], to[1], 0.0),
        }
    }

    fn compare(&self, a: &[f64; 2], b: &[f64; 2]) -> Ordering {
        boundary_position(a).total_cmp(&boundary_position(b))
    }
}

/// Distance along the cut: up the western edge, then down the eastern one.
fn boundary_position(p: &[f64; 2]) -> f64 {
    if p[0] < 0.0 {
        p[1] - HALF_PI - EPSILON
    } else {
        HALF_PI - p[1]
    }
}

impl ClipStrategy for Antimeridian {
    type Line = AntimeridianLine;

    fn point_visible(&self, _lambda: f64, _phi: f64) -> bool {
        true
    }

    fn line_clipper(&self) -> AntimeridianLine {
        AntimeridianLine::default()
    }

    fn start(&self) -> [f64; 2] {
        [-PI, -HALF_PI]
    }
}

/// Per-line state for [`Antimeridian`].
#[derive(Debug, Clone, Copy)]
pub struct AntimeridianLine {
    lambda0: f64,
    phi0: f64,
    sign0: f64,
    clean: bool,
}

impl Default for AntimeridianLine {
    fn default() -> Self {
        Self {
            lambda0: f64::NAN,
            phi0: f64::NAN,
            sign0: f64::NAN,
            clean: true,
        }
    }
}

impl LineClipper for AntimeridianLine {
    fn line_start(&mut self, sink: &mut dyn Stream) {
        sink.line_start();
        self.clean = true;
    }

    fn point(&mut self, mut lambda1: f64, phi1: f64, sink: &mut dyn Stream) {
        let sign1 = if lambda1 > 0.0 { PI } else { -PI };
        let delta = (lambda1 - self.lambda0).abs();

        if (delta - PI).abs() < EPSILON {
            // Over a pole.
            self.phi0 = if (self.phi0 + phi1) / 2.0 > 0.0 { HALF_PI } else { -HALF_PI };
            sink.point(self.lambda0, self.phi0, 0.0);
            sink.point(self.sign0, self.phi0, 0.0);
            sink.line_end();
            sink.line_start();
            sink.point(sign1, self.phi0, 0.0);
            sink.point(lambda1, self.phi0, 0.0);
            self.clean = false;
        } else if self.sign0 != sign1 && delta >= PI {
            // Across the antimeridian. Nudge endpoints sitting on the cut.
            if (self.lambda0 - self.sign0).abs() < EPSILON {
                self.lambda0 -= self.sign0 * EPSILON;
            }
            if (lambda1 - sign1).abs() < EPSILON {
                lambda1 -= sign1 * EPSILON;
            }
            self.phi0 = intersect(self.lambda0, self.phi0, lambda1, phi1);
            sink.point(self.sign0, self.phi0, 0.0);
            sink.line_end();
            sink.line_start();
            sink.point(sign1, self.phi0, 0.0);
            self.clean = false;
        }

        self.lambda0 = lambda1;
        self.phi0 = phi1;
        sink.point(lambda1, phi1, 0.0);
        self.sign0 = sign1;
    }

    fn line_end(&mut self, sink: &mut dyn Stream) {
        sink.line_end();
        self.lambda0 = f64::NAN;
        self.phi0 = f64::NAN;
    }

    fn clean(&self) -> u8 {
        // A cut ring must have its first and last fragments joined.
        if self.clean {
            1
        } else {
            2
        }
    }
}

/// Latitude at which the great arc between two points meets the antimeridian.
fn intersect(lambda0: f64, phi0: f64, lambda1: f64, phi1: f64) -> f64 {
    let sin_lambda0_lambda1 = (lambda0 - lambda1).sin();
    if sin_lambda0_lambda1.abs() > EPSILON {
        let cos_phi0 = phi0.cos();
        let cos_phi1 = phi1.cos();
        ((phi0.sin() * cos_phi1 * lambda1.sin() - phi1.sin() * cos_phi0 * lambda0.sin())
            / (cos_phi0 * cos_phi1 * sin_lambda0_lambda1))
            .atan()
    } else {
        (phi0 + phi1) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::sphere::SphereClip;
    use crate::stream::{EventRecorder, StreamEvent};

    fn rad(lon: f64, lat: f64) -> (f64, f64) {
        (lon.to_radians(), lat.to_radians())
    }

    #[test]
    fn test_line_not_crossing_is_untouched() {
        let mut recorder = EventRecorder::new();
        {
            let mut clip = SphereClip::new(Antimeridian, &mut recorder);
            clip.line_start();
            for (l, p) in [rad(10.0, 0.0), rad(20.0, 5.0)] {
                clip.point(l, p, 0.0);
            }
            clip.line_end();
        }
        assert_eq!(recorder.lines().len(), 1);
        assert_eq!(recorder.points().len(), 2);
    }

    #[test]
    fn test_line_crossing_is_split() {
        let mut recorder = EventRecorder::new();
        {
            let mut clip = SphereClip::new(Antimeridian, &mut recorder);
            clip.line_start();
            for (l, p) in [rad(170.0, 0.0), rad(-170.0, 0.0)] {
                clip.point(l, p, 0.0);
            }
            clip.line_end();
        }
        let lines = recorder.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].last().map(|p| p[0]), Some(PI));
        assert_eq!(lines[1].first().map(|p| p[0]), Some(-PI));
        assert!(lines[0][1][1].abs() < 1e-12);
    }

    #[test]
    fn test_sphere_expands_to_boundary_ring() {
        let mut recorder = EventRecorder::new();
        SphereClip::new(Antimeridian, &mut recorder).sphere();
        let events = recorder.events();
        assert_eq!(events.first(), Some(&StreamEvent::PolygonStart));
        assert_eq!(events.last(), Some(&StreamEvent::PolygonEnd));
        assert_eq!(recorder.points().len(), 9);
        assert_eq!(recorder.points()[0], [-PI, HALF_PI]);
    }

    #[test]
    fn test_boundary_order() {
        // West edge from south to north precedes the east edge from north to south.
        let a = [-PI, -1.0];
        let b = [-PI, 1.0];
        let c = [PI, 1.0];
        let d = [PI, -1.0];
        assert_eq!(Antimeridian.compare(&a, &b), Ordering::Less);
        assert_eq!(Antimeridian.compare(&b, &c), Ordering::Less);
        assert_eq!(Antimeridian.compare(&c, &d), Ordering::Less);
    }
}
