//! Composable spherical projections.
//!
//! The crate is built around three pieces:
//!
//! - [`Projector`]: a raw forward/inverse mapping in radians, composable
//!   with [`Composed`].
//! - [`Stream`]: a push-based geometry visitor. Clips, the resampler and
//!   every consumer (bounds, centroid, event recorder) are stream stages.
//! - [`Projection`]: the stateful orchestrator that owns scale, translate,
//!   center, rotation, precision and clipping, and compiles them into a
//!   stream pipeline with [`Projection::bind_to`].
//!
//! ```
//! use geo_common::Geometry;
//! use geo_projection::{geo_centroid, mercator};
//!
//! let projection = mercator();
//! let (x, y) = projection.project(0.0, 0.0);
//! assert!((x - 480.0).abs() < 1e-9 && (y - 250.0).abs() < 1e-9);
//!
//! let centroid = geo_centroid(&Geometry::point(2.0, 3.0)).unwrap();
//! assert!((centroid.lon - 2.0).abs() < 1e-9);
//! ```

pub mod bounds;
pub mod centroid;
pub mod clip;
pub mod config;
pub mod contains;
pub mod equirectangular;
pub mod error;
pub mod fit;
pub mod math;
pub mod mercator;
pub mod projection;
pub mod projector;
pub mod resample;
pub mod rotation;
pub mod stream;
pub mod transverse_mercator;

pub use bounds::BoundsStream;
pub use centroid::{geo_centroid, Centroid, CentroidStream};
pub use clip::{PostClip, PreClip};
pub use config::{ProjectionConfig, ProjectorKind};
pub use equirectangular::Equirectangular;
pub use error::{ProjectionError, Result};
pub use mercator::Mercator;
pub use projection::{equirectangular, mercator, transverse_mercator, Projection};
pub use projector::{compose, Composed, Identity, Projector, ReclipPolicy, ScaleTranslate};
pub use rotation::Rotation;
pub use stream::{EventRecorder, Stream, StreamEvent, Streamable};
pub use transverse_mercator::TransverseMercator;
