//! Planar bounding box of everything a pipeline emits.

use geo_common::Extent;

use crate::stream::Stream;

/// Accumulates the min/max of every emitted point.
#[derive(Debug, Clone, Copy)]
pub struct BoundsStream {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Default for BoundsStream {
    fn default() -> Self {
        Self {
            x0: f64::INFINITY,
            y0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y1: f64::NEG_INFINITY,
        }
    }
}

impl BoundsStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bounds seen so far, or `None` if no point has been emitted.
    pub fn result(&self) -> Option<Extent> {
        if self.x0 > self.x1 || self.y0 > self.y1 {
            None
        } else {
            Some(Extent::new(self.x0, self.y0, self.x1, self.y1))
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Stream for BoundsStream {
    fn point(&mut self, x: f64, y: f64, _z: f64) {
        if x < self.x0 {
            self.x0 = x;
        }
        if x > self.x1 {
            self.x1 = x;
        }
        if y < self.y0 {
            self.y0 = y;
        }
        if y > self.y1 {
            self.y1 = y;
        }
    }
}
