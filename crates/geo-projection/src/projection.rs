//! The stateful projection orchestrator.
//!
//! A [`Projection`] wraps a raw [`Projector`] with everything needed to go
//! from longitude/latitude in degrees to device pixels: a sphere rotation,
//! a scale, a translate point, a center, the resampling precision and the
//! pre- and post-clips.
//!
//! Every setter validates its input, commits it and eagerly recomputes the
//! derived state (see [`Projection::recenter`]). Single points go through
//! [`Projection::project`] and [`Projection::invert`]; geometry goes through
//! a stream pipeline compiled by [`Projection::bind_to`]:
//!
//! ```text
//! degrees → radians → rotate → pre-clip → resample(project + scale/translate) → post-clip → sink
//! ```
//!
//! A compiled pipeline owns copies of the derived projectors, so
//! reconfiguring the projection afterwards does not affect it.

use std::f64::consts::PI;
use std::sync::Arc;

use geo_common::{Angle, AngleExt, Extent};
use tracing::{debug, warn};

use crate::bounds::BoundsStream;
use crate::clip::{PostClip, PreClip};
use crate::equirectangular::Equirectangular;
use crate::error::{ProjectionError, Result};
use crate::math::TAU;
use crate::mercator::Mercator;
use crate::projector::{compose, Composed, Projector, ReclipPolicy, ScaleTranslate};
use crate::resample::Resample;
use crate::rotation::Rotation;
use crate::stream::{EventRecorder, Stream, StreamEvent, Streamable};
use crate::transverse_mercator::TransverseMercator;

pub const DEFAULT_SCALE: f64 = 150.0;
pub const DEFAULT_TRANSLATE: (f64, f64) = (480.0, 250.0);
/// Default squared precision, `δ = √0.5 ≈ 0.71` pixels.
pub const DEFAULT_DELTA2: f64 = 0.5;

type ProjectTransform = Composed<Arc<dyn Projector>, ScaleTranslate>;

/// Converts incoming degrees to radians.
struct TransformRadians<S> {
    sink: S,
}

impl<S: Stream> Stream for TransformRadians<S> {
    fn point(&mut self, x: f64, y: f64, z: f64) {
        self.sink.point(x.to_radians(), y.to_radians(), z);
    }

    fn line_start(&mut self) {
        self.sink.line_start();
    }

    fn line_end(&mut self) {
        self.sink.line_end();
    }

    fn polygon_start(&mut self) {
        self.sink.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.sink.polygon_end();
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}

/// Applies the sphere rotation to every point.
struct TransformRotate<S> {
    rotation: Rotation,
    sink: S,
}

impl<S: Stream> Stream for TransformRotate<S> {
    fn point(&mut self, lambda: f64, phi: f64, _z: f64) {
        let (lambda, phi) = self.rotation.project(lambda, phi);
        self.sink.point(lambda, phi, 0.0);
    }

    fn line_start(&mut self) {
        self.sink.line_start();
    }

    fn line_end(&mut self) {
        self.sink.line_end();
    }

    fn polygon_start(&mut self) {
        self.sink.polygon_start();
    }

    fn polygon_end(&mut self) {
        self.sink.polygon_end();
    }

    fn sphere(&mut self) {
        self.sink.sphere();
    }
}

/// A configurable projection from the sphere to device coordinates.
#[derive(Debug, Clone)]
pub struct Projection {
    projector: Arc<dyn Projector>,
    scale: f64,
    translate: (f64, f64),
    center_lon: Angle,
    center_lat: Angle,
    rotate_lambda: Angle,
    rotate_phi: Angle,
    rotate_gamma: Angle,
    delta2: f64,
    pre_clip: PreClip,
    /// Caller-supplied clip extent.
    clip_extent: Option<Extent>,

    // Derived by recenter.
    rotation: Rotation,
    project_transform: ProjectTransform,
    post_clip: PostClip,
}

impl Projection {
    /// Wrap `projector` with the default configuration: scale 150,
    /// translate (480, 250), center and rotation zero, `δ² = 0.5`,
    /// antimeridian pre-clip and no post-clip (or the automatic clip for
    /// projectors with a reclip policy).
    pub fn new<P: Projector + 'static>(projector: P) -> Self {
        Self::from_arc(Arc::new(projector))
    }

    pub fn from_arc(projector: Arc<dyn Projector>) -> Self {
        let mut projection = Self {
            project_transform: compose(projector.clone(), ScaleTranslate::new(DEFAULT_SCALE, 0.0, 0.0)),
            projector,
            scale: DEFAULT_SCALE,
            translate: DEFAULT_TRANSLATE,
            center_lon: Angle::ZERO,
            center_lat: Angle::ZERO,
            rotate_lambda: Angle::ZERO,
            rotate_phi: Angle::ZERO,
            rotate_gamma: Angle::ZERO,
            delta2: DEFAULT_DELTA2,
            pre_clip: PreClip::default(),
            clip_extent: None,
            rotation: Rotation::default(),
            post_clip: PostClip::NoClip,
        };
        projection.recenter();
        projection
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    pub fn projector(&self) -> &Arc<dyn Projector> {
        &self.projector
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> (f64, f64) {
        self.translate
    }

    /// Center `(lon, lat)` in degrees.
    pub fn center(&self) -> (f64, f64) {
        (self.center_lon.degrees(), self.center_lat.degrees())
    }

    /// Rotation `(λ, φ, γ)` in degrees.
    pub fn rotate(&self) -> (f64, f64, f64) {
        (
            self.rotate_lambda.degrees(),
            self.rotate_phi.degrees(),
            self.rotate_gamma.degrees(),
        )
    }

    /// Resampling precision `δ` in pixels.
    pub fn precision(&self) -> f64 {
        self.delta2.sqrt()
    }

    pub fn pre_clip(&self) -> PreClip {
        self.pre_clip
    }

    /// The post-clip actually applied, including any automatic extent.
    pub fn post_clip(&self) -> PostClip {
        self.post_clip
    }

    /// The caller-supplied clip extent, ignoring any automatic extent.
    pub fn clip_extent(&self) -> Option<Extent> {
        self.clip_extent
    }

    pub fn reclip_policy(&self) -> ReclipPolicy {
        self.projector.reclip_policy()
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    pub fn set_scale(&mut self, scale: f64) -> Result<&mut Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ProjectionError::invalid_scale(format!(
                "scale must be finite and positive, got {}",
                scale
            )));
        }
        self.scale = scale;
        self.recenter();
        Ok(self)
    }

    pub fn set_translate(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::invalid_translate(format!(
                "translate must be finite, got ({}, {})",
                x, y
            )));
        }
        self.translate = (x, y);
        self.recenter();
        Ok(self)
    }

    pub fn set_translate_x(&mut self, x: f64) -> Result<&mut Self> {
        self.set_translate(x, self.translate.1)
    }

    pub fn set_translate_y(&mut self, y: f64) -> Result<&mut Self> {
        self.set_translate(self.translate.0, y)
    }

    /// Set the geographic point, in degrees, that maps onto the translate
    /// point.
    pub fn set_center(&mut self, lon: f64, lat: f64) -> Result<&mut Self> {
        let lon = lon.deg().validate_finite("center longitude")?;
        let lat = lat.deg().validate_latitude("center latitude")?;
        self.center_lon = lon;
        self.center_lat = lat;
        self.recenter();
        Ok(self)
    }

    pub fn set_center_lon(&mut self, lon: f64) -> Result<&mut Self> {
        self.set_center(lon, self.center_lat.degrees())
    }

    pub fn set_center_lat(&mut self, lat: f64) -> Result<&mut Self> {
        self.set_center(self.center_lon.degrees(), lat)
    }

    /// Set the sphere rotation `(λ, φ, γ)` in degrees.
    pub fn set_rotate(&mut self, lambda: f64, phi: f64, gamma: f64) -> Result<&mut Self> {
        let lambda = lambda.deg().validate_finite("rotate lambda")?;
        let phi = phi.deg().validate_finite("rotate phi")?;
        let gamma = gamma.deg().validate_finite("rotate gamma")?;
        self.rotate_lambda = lambda;
        self.rotate_phi = phi;
        self.rotate_gamma = gamma;
        self.recenter();
        Ok(self)
    }

    /// Set the resampling precision `δ` in pixels. Zero disables resampling.
    pub fn set_precision(&mut self, precision: f64) -> Result<&mut Self> {
        if !precision.is_finite() || precision < 0.0 {
            return Err(ProjectionError::invalid_precision(format!(
                "precision must be finite and non-negative, got {}",
                precision
            )));
        }
        self.delta2 = precision * precision;
        self.recenter();
        Ok(self)
    }

    pub fn set_pre_clip(&mut self, pre_clip: PreClip) -> Result<&mut Self> {
        self.pre_clip = pre_clip;
        self.recenter();
        Ok(self)
    }

    /// Set the post-clip. `PostClip::Extent` is equivalent to
    /// [`Projection::set_clip_extent`].
    pub fn set_post_clip(&mut self, post_clip: PostClip) -> Result<&mut Self> {
        self.set_clip_extent(post_clip.extent())
    }

    pub fn set_clip_extent(&mut self, extent: Option<Extent>) -> Result<&mut Self> {
        if let Some(extent) = extent {
            extent
                .validate()
                .map_err(|e| ProjectionError::InvalidExtent(e.to_string()))?;
        }
        self.clip_extent = extent;
        self.recenter();
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// Rebuild the rotation and composed projector and solve for the offset
    /// that puts the (rotated) center on the translate point. Projectors with
    /// a reclip policy also get a fresh automatic clip extent.
    fn recenter(&mut self) {
        self.rotation = Rotation::new(
            self.rotate_lambda.radians(),
            self.rotate_phi.radians(),
            self.rotate_gamma.radians(),
        );
        let (lambda, phi) = self
            .rotation
            .project(self.center_lon.radians(), self.center_lat.radians());
        let (cx, cy) = self.projector.project(lambda, phi);
        let dx = self.translate.0 - cx * self.scale;
        let dy = self.translate.1 + cy * self.scale;
        self.project_transform = compose(self.projector.clone(), ScaleTranslate::new(self.scale, dx, dy));
        self.reclip();

        debug!(
            scale = self.scale,
            translate_x = self.translate.0,
            translate_y = self.translate.1,
            center_lon = self.center_lon.degrees(),
            center_lat = self.center_lat.degrees(),
            dx,
            dy,
            "Recentered projection"
        );
    }

    fn reclip(&mut self) {
        let policy = self.projector.reclip_policy();
        if policy == ReclipPolicy::None {
            self.post_clip = PostClip::from(self.clip_extent);
            return;
        }

        let k = PI * self.scale;
        let (lambda, phi) = self.rotation.invert(0.0, 0.0);
        let (t0, t1) = self.project_radians(lambda, phi);

        let extent = match self.clip_extent {
            None => Extent::new(t0 - k, t1 - k, t0 + k, t1 + k),
            Some(e) if e.is_empty() => e,
            Some(e) => {
                let (band, band_min, band_max) = if policy == ReclipPolicy::Longitudinal {
                    (Extent::new(t0 - k, e.min_y, t0 + k, e.max_y), t0 - k, t0 + k)
                } else {
                    (Extent::new(e.min_x, t1 - k, e.max_x, t1 + k), t1 - k, t1 + k)
                };
                // Disjoint from the world band: nothing is visible, so the
                // caller's rectangle stands as given.
                match band.intersection(&e) {
                    Some(merged) => merged,
                    None => {
                        warn!(?policy, band_min, band_max, "Clip extent lies outside the projected world");
                        e
                    }
                }
            }
        };
        debug!(
            ?policy,
            min_x = extent.min_x,
            min_y = extent.min_y,
            max_x = extent.max_x,
            max_y = extent.max_y,
            "Reclipped projection"
        );
        self.post_clip = PostClip::Extent(extent);
    }

    fn project_radians(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let (lambda, phi) = self.rotation.project(lambda, phi);
        self.project_transform.project(lambda, phi)
    }

    // ------------------------------------------------------------------
    // Single points
    // ------------------------------------------------------------------

    /// Project `(lon, lat)` in degrees to device coordinates.
    ///
    /// Points are neither clipped nor resampled. Singular inputs yield
    /// non-finite output.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        self.project_radians(lon.to_radians(), lat.to_radians())
    }

    /// Map device coordinates back to `(lon, lat)` in degrees.
    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        let (lambda, phi) = self.project_transform.invert(x, y);
        let (lambda, phi) = self.rotation.invert(lambda, phi);
        (lambda.to_degrees(), phi.to_degrees())
    }

    // ------------------------------------------------------------------
    // Streams
    // ------------------------------------------------------------------

    /// Compile a pipeline feeding `downstream` with the current
    /// configuration.
    pub fn bind_to<'a, S: Stream + 'a>(&self, downstream: S) -> Box<dyn Stream + 'a> {
        let post = self.post_clip.bind(downstream);
        let resample = Resample::new(self.project_transform.clone(), self.delta2, post);
        let pre = self.pre_clip.bind(resample);
        Box::new(TransformRadians {
            sink: TransformRotate {
                rotation: self.rotation,
                sink: pre,
            },
        })
    }

    /// Stream `object` through a freshly compiled pipeline.
    pub fn stream<G: Streamable + ?Sized, S: Stream>(&self, object: &G, downstream: S) {
        let mut pipeline = self.bind_to(downstream);
        object.stream(&mut pipeline);
    }

    /// The projected event sequence for `object`.
    pub fn project_events<G: Streamable + ?Sized>(&self, object: &G) -> Vec<StreamEvent> {
        let mut recorder = EventRecorder::new();
        self.stream(object, &mut recorder);
        recorder.into_events()
    }

    /// Planar bounds of `object` after projection and clipping.
    pub fn projected_bounds<G: Streamable + ?Sized>(&self, object: &G) -> Option<Extent> {
        let mut bounds = BoundsStream::new();
        self.stream(object, &mut bounds);
        bounds.result()
    }
}

/// Plate carrée with the default configuration.
pub fn equirectangular() -> Projection {
    Projection::new(Equirectangular)
}

/// Spherical Mercator. The default scale of `961 / 2π` fits the world
/// into a 960-pixel square.
pub fn mercator() -> Projection {
    let mut projection = Projection::new(Mercator);
    projection.scale = 961.0 / TAU;
    projection.recenter();
    projection
}

/// Transverse spherical Mercator, rolled 90° so north stays up.
///
/// The roll is stored as the rotation's γ angle. [`Projection::set_rotate`]
/// replaces all three angles, so pass `gamma = 90.0` to keep north up:
///
/// ```
/// let mut projection = geo_projection::transverse_mercator();
/// projection.set_rotate(-75.0, 0.0, 90.0).unwrap();
/// let (_, _, gamma) = projection.rotate();
/// assert!((gamma - 90.0).abs() < 1e-9);
/// ```
pub fn transverse_mercator() -> Projection {
    let mut projection = Projection::new(TransverseMercator);
    projection.scale = 961.0 / TAU;
    projection.rotate_gamma = 90.0_f64.deg();
    projection.recenter();
    projection
}
