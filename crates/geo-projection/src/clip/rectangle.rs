//! Device-space clipping to an axis-aligned rectangle.
//!
//! Lines are clipped segment by segment with Liang–Barsky. Polygon rings are
//! buffered and the resulting fragments are closed along the rectangle's
//! edges. Coordinates are clamped to ±1e9 before clipping so that points
//! projected near a singularity still produce finite intersections.

use std::cmp::Ordering;

use geo_common::Extent;

use crate::clip::buffer::ClipBuffer;
use crate::clip::line::clip_line;
use crate::clip::rejoin::{rejoin, ClipBoundary};
use crate::math::EPSILON;
use crate::stream::Stream;

const CLIP_MAX: f64 = 1e9;
const CLIP_MIN: f64 = -CLIP_MAX;

/// The rectangle `[x0, x1] × [y0, y1]` as a clip boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleBoundary {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl RectangleBoundary {
    pub fn new(extent: &Extent) -> Self {
        Self {
            x0: extent.min_x,
            y0: extent.min_y,
            x1: extent.max_x,
            y1: extent.max_y,
        }
    }

    fn visible(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// Index of the edge a boundary point sits on, walking clockwise (on
    /// screen) from the left edge.
    fn corner(&self, p: &[f64; 2], direction: f64) -> i32 {
        let forward = direction > 0.0;
        if (p[0] - self.x0).abs() < EPSILON {
            if forward { 0 } else { 3 }
        } else if (p[0] - self.x1).abs() < EPSILON {
            if forward { 2 } else { 1 }
        } else if (p[1] - self.y0).abs() < EPSILON {
            if forward { 1 } else { 0 }
        } else if forward {
            3
        } else {
            2
        }
    }

    fn corner_point(&self, a: i32) -> [f64; 2] {
        [
            if a == 0 || a == 3 { self.x0 } else { self.x1 },
            if a > 1 { self.y1 } else { self.y0 },
        ]
    }

    /// Winding number of `polygon` around the bottom-left corner.
    fn polygon_inside(&self, polygon: &[Vec<[f64; 2]>]) -> i32 {
        let mut winding = 0;
        for ring in polygon {
            for pair in ring.windows(2) {
                let [a0, a1] = pair[0];
                let [b0, b1] = pair[1];
                if a1 <= self.y1 {
                    if b1 > self.y1 && (b0 - a0) * (self.y1 - a1) > (b1 - a1) * (self.x0 - a0) {
                        winding += 1;
                    }
                } else if b1 <= self.y1 && (b0 - a0) * (self.y1 - a1) < (b1 - a1) * (self.x0 - a0) {
                    winding -= 1;
                }
            }
        }
        winding
    }
}

impl ClipBoundary for RectangleBoundary {
    fn interpolate(&self, endpoints: Option<([f64; 2], [f64; 2])>, direction: f64, stream: &mut dyn Stream) {
        let step = if direction > 0.0 { 1 } else { 3 };
        let (mut a, a1) = match endpoints {
            None => (0, 0),
            Some((from, to)) => {
                let a = self.corner(&from, direction);
                let a1 = self.corner(&to, direction);
                let behind = (self.compare(&from, &to) == Ordering::Less) ^ (direction > 0.0);
                if a == a1 && !behind {
                    stream.point(to[0], to[1], 0.0);
                    return;
                }
                (a, a1)
            }
        };
        loop {
            let [x, y] = self.corner_point(a);
            stream.point(x, y, 0.0);
            a = (a + step) % 4;
            if a == a1 {
                break;
            }
        }
    }

    fn compare(&self, a: &[f64; 2], b: &[f64; 2]) -> Ordering {
        let ca = self.corner(a, 1.0);
        let cb = self.corner(b, 1.0);
        if ca != cb {
            return ca.cmp(&cb);
        }
        match ca {
            0 => b[1].total_cmp(&a[1]),
            1 => a[0].total_cmp(&b[0]),
            2 => a[1].total_cmp(&b[1]),
            _ => b[0].total_cmp(&a[0]),
        }
    }
}

/// Stream stage clipping to a rectangle.
///
/// A line or polygon that falls entirely outside still produces its
/// start/end pair so downstream consumers see well-formed empty geometry.
pub struct RectangleClip<S> {
    boundary: RectangleBoundary,
    sink: S,
    buffer: ClipBuffer,
    in_polygon: bool,
    in_line: bool,
    segments: Vec<Vec<[f64; 2]>>,
    polygon: Vec<Vec<[f64; 2]>>,
    first_point: [f64; 2],
    first_visible: bool,
    prev: [f64; 2],
    prev_visible: bool,
    first: bool,
    clean: bool,
    line_emitted: bool,
}

impl<S: Stream> RectangleClip<S> {
    pub fn new(extent: &Extent, sink: S) -> Self {
        Self {
            boundary: RectangleBoundary::new(extent),
            sink,
            buffer: ClipBuffer::new(),
            in_polygon: false,
            in_line: false,
            segments: Vec::new(),
            polygon: Vec::new(),
            first_point: [f64::NAN; 2],
            first_visible: false,
            prev: [f64::NAN; 2],
            prev_visible: false,
            first: true,
            clean: true,
            line_emitted: false,
        }
    }

    fn active(&mut self) -> &mut dyn Stream {
        if self.in_polygon {
            &mut self.buffer
        } else {
            self.line_emitted = true;
            &mut self.sink
        }
    }

    fn line_point(&mut self, x: f64, y: f64) {
        let v = self.boundary.visible(x, y);
        if self.in_polygon {
            if let Some(ring) = self.polygon.last_mut() {
                ring.push([x, y]);
            }
        }
        if self.first {
            self.first_point = [x, y];
            self.first_visible = v;
            self.first = false;
            if v {
                let out = self.active();
                out.line_start();
                out.point(x, y, 0.0);
            }
            self.prev = [x, y];
        } else if v && self.prev_visible {
            self.active().point(x, y, 0.0);
            self.prev = [x, y];
        } else {
            let mut a = [
                self.prev[0].clamp(CLIP_MIN, CLIP_MAX),
                self.prev[1].clamp(CLIP_MIN, CLIP_MAX),
            ];
            let mut b = [x.clamp(CLIP_MIN, CLIP_MAX), y.clamp(CLIP_MIN, CLIP_MAX)];
            let clamped = b;
            let RectangleBoundary { x0, y0, x1, y1 } = self.boundary;
            let prev_visible = self.prev_visible;
            if clip_line(&mut a, &mut b, x0, y0, x1, y1) {
                let out = self.active();
                if !prev_visible {
                    out.line_start();
                    out.point(a[0], a[1], 0.0);
                }
                out.point(b[0], b[1], 0.0);
                if !v {
                    out.line_end();
                }
                self.clean = false;
            } else if v {
                let out = self.active();
                out.line_start();
                out.point(clamped[0], clamped[1], 0.0);
                self.clean = false;
            }
            self.prev = clamped;
        }
        self.prev_visible = v;
    }
}

impl<S: Stream> Stream for RectangleClip<S> {
    fn point(&mut self, x: f64, y: f64, _z: f64) {
        if self.in_line {
            self.line_point(x, y);
        } else if self.boundary.visible(x, y) {
            self.active().point(x, y, 0.0);
        }
    }

    fn line_start(&mut self) {
        self.in_line = true;
        if self.in_polygon {
            self.polygon.push(Vec::new());
        } else {
            self.line_emitted = false;
        }
        self.first = true;
        self.prev_visible = false;
        self.prev = [f64::NAN; 2];
    }

    fn line_end(&mut self) {
        if self.in_polygon {
            let [x, y] = self.first_point;
            self.line_point(x, y);
            if self.first_visible && self.prev_visible {
                self.buffer.rejoin();
            }
            self.segments.extend(self.buffer.take());
        }
        self.in_line = false;
        if self.prev_visible {
            self.active().line_end();
        }
        if !self.in_polygon && !self.line_emitted {
            self.sink.line_start();
            self.sink.line_end();
        }
    }

    fn polygon_start(&mut self) {
        self.in_polygon = true;
        self.segments.clear();
        self.polygon.clear();
        self.clean = true;
    }

    fn polygon_end(&mut self) {
        let polygon = std::mem::take(&mut self.polygon);
        let segments = std::mem::take(&mut self.segments);
        let start_inside = self.boundary.polygon_inside(&polygon) != 0;
        let clean_inside = self.clean && start_inside;

        self.sink.polygon_start();
        if clean_inside {
            self.sink.line_start();
            self.boundary.interpolate(None, 1.0, &mut self.sink);
            self.sink.line_end();
        }
        if !segments.is_empty() {
            rejoin(&segments, &self.boundary, start_inside, &mut self.sink);
        }
        self.sink.polygon_end();

        self.in_polygon = false;
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}
