//! Common types shared across the projection workspace.

pub mod angle;
pub mod error;
pub mod extent;
pub mod geometry;

pub use angle::{Angle, AngleExt};
pub use error::{GeoError, GeoResult};
pub use extent::Extent;
pub use geometry::{Feature, FeatureCollection, GeoJson, Geometry, Position};
