//! Axis-aligned rectangles in device space.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};

/// An axis-aligned rectangle in projected (device) coordinates.
///
/// `min_y` is the top edge on screen: device y grows downward, so the
/// rectangle spans `[min_x, max_x] × [min_y, max_y]` regardless of how it is
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Create a new extent from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a `[0, width] × [0, height]` extent.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Check that all corners are finite and the rectangle is not inverted.
    ///
    /// Zero width or height is allowed: clipping against a degenerate extent
    /// produces empty geometry, not an error.
    pub fn validate(self) -> GeoResult<Self> {
        let corners = [self.min_x, self.min_y, self.max_x, self.max_y];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(GeoError::invalid_extent(format!(
                "non-finite corner in {:?}",
                corners
            )));
        }
        if self.max_x < self.min_x || self.max_y < self.min_y {
            return Err(GeoError::invalid_extent(format!(
                "inverted extent [{}, {}] x [{}, {}]",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        Ok(self)
    }

    /// Width of the extent in device units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the extent in device units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the extent encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Check if this extent overlaps another.
    pub fn intersects(&self, other: &Extent) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Compute the overlap of two extents. Extents that only touch along an
    /// edge have no overlap.
    pub fn intersection(&self, other: &Extent) -> Option<Extent> {
        if !self.intersects(other) {
            return None;
        }

        Some(Extent {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        })
    }
}

impl FromStr for Extent {
    type Err = GeoError;

    /// Parse `"x0,y0,x1,y1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(GeoError::InvalidExtentFormat(s.to_string()));
        }

        let mut values = [0.0; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part
                .parse()
                .map_err(|_| GeoError::InvalidNumber(part.to_string()))?;
        }

        Extent::new(values[0], values[1], values[2], values[3]).validate()
    }
}
