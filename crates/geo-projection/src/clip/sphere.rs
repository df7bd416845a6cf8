//! Sphere-space clipping driver.
//!
//! Points, lines and polygon rings are fed through a strategy-specific
//! [`LineClipper`]. Rings are buffered, cut into fragments and, once the
//! whole polygon has been seen, rejoined along the clip boundary. Whether
//! the boundary's start point lies inside the polygon is decided with
//! [`polygon_contains`], which lets rings that wind around a pole close up
//! correctly.

use crate::clip::buffer::ClipBuffer;
use crate::clip::rejoin::{rejoin, ClipBoundary};
use crate::contains::polygon_contains;
use crate::stream::Stream;

/// Cuts a single line wherever it leaves the visible region.
///
/// The clipper writes into whichever sink it is handed, so the same type
/// serves both plain lines and the buffered rings of a polygon.
pub trait LineClipper {
    fn line_start(&mut self, sink: &mut dyn Stream);
    fn point(&mut self, lambda: f64, phi: f64, sink: &mut dyn Stream);
    fn line_end(&mut self, sink: &mut dyn Stream);

    /// Bit 0: the last line was not cut. Bit 1: its first and last
    /// fragments should be joined.
    fn clean(&self) -> u8;
}

/// A sphere-space clip region.
pub trait ClipStrategy: ClipBoundary {
    type Line: LineClipper;

    fn point_visible(&self, lambda: f64, phi: f64) -> bool;
    fn line_clipper(&self) -> Self::Line;

    /// A point on the boundary where the full-boundary ring begins.
    fn start(&self) -> [f64; 2];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Point,
    Line,
    Ring,
}

/// Stream stage applying a [`ClipStrategy`].
pub struct SphereClip<C: ClipStrategy, S> {
    strategy: C,
    sink: S,
    line: C::Line,
    ring_clipper: C::Line,
    ring_buffer: ClipBuffer,
    mode: Mode,
    in_polygon: bool,
    polygon_started: bool,
    polygon: Vec<Vec<[f64; 2]>>,
    segments: Vec<Vec<[f64; 2]>>,
    ring: Vec<[f64; 2]>,
}

impl<C: ClipStrategy, S: Stream> SphereClip<C, S> {
    pub fn new(strategy: C, sink: S) -> Self {
        let line = strategy.line_clipper();
        let ring_clipper = strategy.line_clipper();
        Self {
            strategy,
            sink,
            line,
            ring_clipper,
            ring_buffer: ClipBuffer::new(),
            mode: Mode::Point,
            in_polygon: false,
            polygon_started: false,
            polygon: Vec::new(),
            segments: Vec::new(),
            ring: Vec::new(),
        }
    }

    fn start_polygon_output(&mut self) {
        if !self.polygon_started {
            self.sink.polygon_start();
            self.polygon_started = true;
        }
    }

    fn ring_point(&mut self, lambda: f64, phi: f64) {
        self.ring.push([lambda, phi]);
        self.ring_clipper.point(lambda, phi, &mut self.ring_buffer);
    }

    fn ring_end(&mut self) {
        let Some(&first) = self.ring.first() else {
            self.ring_clipper.line_end(&mut self.ring_buffer);
            self.ring_buffer.take();
            return;
        };
        self.ring_point(first[0], first[1]);
        self.ring_clipper.line_end(&mut self.ring_buffer);

        let clean = self.ring_clipper.clean();
        let mut ring_segments = self.ring_buffer.take();

        let mut ring = std::mem::take(&mut self.ring);
        ring.pop();
        self.polygon.push(ring);

        if ring_segments.is_empty() {
            return;
        }

        // No intersections.
        if clean & 1 != 0 {
            let segment = &ring_segments[0];
            let m = segment.len().saturating_sub(1);
            if m > 0 {
                self.start_polygon_output();
                self.sink.line_start();
                for p in &segment[..m] {
                    self.sink.point(p[0], p[1], 0.0);
                }
                self.sink.line_end();
            }
            return;
        }

        if ring_segments.len() > 1 && clean & 2 != 0 {
            if let Some(mut last) = ring_segments.pop() {
                let first = ring_segments.remove(0);
                last.extend(first);
                ring_segments.push(last);
            }
        }

        self.segments
            .extend(ring_segments.into_iter().filter(|segment| segment.len() > 1));
    }
}

impl<C: ClipStrategy, S: Stream> Stream for SphereClip<C, S> {
    fn point(&mut self, lambda: f64, phi: f64, _z: f64) {
        match self.mode {
            Mode::Point => {
                if self.strategy.point_visible(lambda, phi) {
                    self.sink.point(lambda, phi, 0.0);
                }
            }
            Mode::Line => self.line.point(lambda, phi, &mut self.sink),
            Mode::Ring => self.ring_point(lambda, phi),
        }
    }

    fn line_start(&mut self) {
        if self.in_polygon {
            self.ring_clipper.line_start(&mut self.ring_buffer);
            self.ring.clear();
            self.mode = Mode::Ring;
        } else {
            self.mode = Mode::Line;
            self.line.line_start(&mut self.sink);
        }
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            self.ring_end();
        } else {
            self.mode = Mode::Point;
            self.line.line_end(&mut self.sink);
        }
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
        self.mode = Mode::Ring;
        self.segments.clear();
        self.polygon.clear();
    }

    fn polygon_end(&mut self) {
        self.in_polygon = false;
        self.mode = Mode::Point;

        let segments = std::mem::take(&mut self.segments);
        let polygon = std::mem::take(&mut self.polygon);
        let start_inside = polygon_contains(&polygon, self.strategy.start());

        if !segments.is_empty() {
            self.start_polygon_output();
            rejoin(&segments, &self.strategy, start_inside, &mut self.sink);
        } else if start_inside {
            self.start_polygon_output();
            self.sink.line_start();
            self.strategy.interpolate(None, 1.0, &mut self.sink);
            self.sink.line_end();
        }

        // A polygon that clips away entirely still yields an empty polygon.
        self.start_polygon_output();
        self.sink.polygon_end();
        self.polygon_started = false;
    }

    fn sphere(&mut self) {
        self.sink.polygon_start();
        self.sink.line_start();
        self.strategy.interpolate(None, 1.0, &mut self.sink);
        self.sink.line_end();
        self.sink.polygon_end();
    }
}
