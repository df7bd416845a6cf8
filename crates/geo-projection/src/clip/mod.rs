//! Clip strategies.
//!
//! A projection applies two clips: a pre-clip in sphere space (radians,
//! after rotation) and a post-clip in device space (after projection and
//! resampling). Both are plain values; binding one to a sink produces the
//! stream stage for a single traversal.

pub mod antimeridian;
pub mod buffer;
pub mod line;
pub mod rectangle;
pub mod rejoin;
pub mod sphere;

use geo_common::Extent;
use serde::{Deserialize, Serialize};

use crate::stream::Stream;

pub use antimeridian::Antimeridian;
pub use rectangle::{RectangleBoundary, RectangleClip};
pub use sphere::SphereClip;

/// Sphere-space clip applied before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreClip {
    NoClip,
    /// Cut along ±180° so that nothing wraps across the projected plane.
    #[default]
    Antimeridian,
}

impl PreClip {
    pub fn bind<'a, S: Stream + 'a>(&self, sink: S) -> Box<dyn Stream + 'a> {
        match self {
            PreClip::NoClip => Box::new(sink),
            PreClip::Antimeridian => Box::new(SphereClip::new(Antimeridian, sink)),
        }
    }
}

/// Device-space clip applied after resampling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostClip {
    #[default]
    NoClip,
    Extent(Extent),
}

impl PostClip {
    pub fn bind<'a, S: Stream + 'a>(&self, sink: S) -> Box<dyn Stream + 'a> {
        match self {
            PostClip::NoClip => Box::new(sink),
            PostClip::Extent(extent) => Box::new(RectangleClip::new(extent, sink)),
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        match self {
            PostClip::NoClip => None,
            PostClip::Extent(extent) => Some(*extent),
        }
    }
}

impl From<Option<Extent>> for PostClip {
    fn from(extent: Option<Extent>) -> Self {
        extent.map_or(PostClip::NoClip, PostClip::Extent)
    }
}
