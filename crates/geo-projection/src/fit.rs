//! Choosing scale and translate so that a geometry fills a viewport.
//!
//! Each helper projects the object once at scale 150 and translate (0, 0),
//! with any caller clip extent temporarily removed, measures the projected
//! bounds and solves for the scale and translate that fit them. Rotation,
//! center and precision are left as configured.

use geo_common::Extent;
use tracing::debug;

use crate::error::{ProjectionError, Result};
use crate::projection::{Projection, DEFAULT_SCALE};
use crate::stream::Streamable;

/// `(k, x, y)`: scale factor relative to 150 and the new translate.
type Fitted = (f64, f64, f64);

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ProjectionError::InvalidExtent(format!(
            "{} must be finite and positive, got {}",
            name, value
        )))
    }
}

impl Projection {
    fn fit<G, F>(&mut self, object: &G, fit_bounds: F) -> Result<&mut Self>
    where
        G: Streamable + ?Sized,
        F: FnOnce(&Extent) -> Fitted,
    {
        let clip = self.clip_extent();
        let (scale, (tx, ty)) = (self.scale(), self.translate());

        self.set_scale(DEFAULT_SCALE)?.set_translate(0.0, 0.0)?;
        if clip.is_some() {
            self.set_clip_extent(None)?;
        }

        let fitted = self
            .projected_bounds(object)
            .map(|bounds| fit_bounds(&bounds))
            .filter(|(k, x, y)| k.is_finite() && *k > 0.0 && x.is_finite() && y.is_finite());

        match fitted {
            Some((k, x, y)) => {
                debug!(scale = DEFAULT_SCALE * k, translate_x = x, translate_y = y, "Fitted projection");
                self.set_scale(DEFAULT_SCALE * k)?.set_translate(x, y)?;
            }
            None => {
                // Nothing visible or zero-sized bounds: there is no scale to solve for.
                debug!("Projected bounds are empty or degenerate, keeping scale and translate");
                self.set_scale(scale)?.set_translate(tx, ty)?;
            }
        }

        if clip.is_some() {
            self.set_clip_extent(clip)?;
        }
        Ok(self)
    }

    /// Fit `object` inside `extent`, centred along the looser axis.
    pub fn fit_extent<G: Streamable + ?Sized>(&mut self, extent: Extent, object: &G) -> Result<&mut Self> {
        let extent = extent
            .validate()
            .map_err(|e| ProjectionError::InvalidExtent(e.to_string()))?;
        let w = positive("extent width", extent.width())?;
        let h = positive("extent height", extent.height())?;
        self.fit(object, |b| {
            let k = (w / b.width()).min(h / b.height());
            let x = extent.min_x + (w - k * (b.max_x + b.min_x)) / 2.0;
            let y = extent.min_y + (h - k * (b.max_y + b.min_y)) / 2.0;
            (k, x, y)
        })
    }

    /// Fit `object` inside `[0, width] × [0, height]`.
    pub fn fit_size<G: Streamable + ?Sized>(&mut self, width: f64, height: f64, object: &G) -> Result<&mut Self> {
        self.fit_extent(Extent::from_size(width, height), object)
    }

    /// Fit `object` to `width`, with its top edge at y = 0.
    pub fn fit_width<G: Streamable + ?Sized>(&mut self, width: f64, object: &G) -> Result<&mut Self> {
        let w = positive("width", width)?;
        self.fit(object, |b| {
            let k = w / b.width();
            let x = (w - k * (b.max_x + b.min_x)) / 2.0;
            let y = -k * b.min_y;
            (k, x, y)
        })
    }

    /// Fit `object` to `height`, with its left edge at x = 0.
    pub fn fit_height<G: Streamable + ?Sized>(&mut self, height: f64, object: &G) -> Result<&mut Self> {
        let h = positive("height", height)?;
        self.fit(object, |b| {
            let k = h / b.height();
            let x = -k * b.min_x;
            let y = (h - k * (b.max_y + b.min_y)) / 2.0;
            (k, x, y)
        })
    }
}
