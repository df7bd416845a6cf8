//! GeoJSON-like geometry model.
//!
//! Coordinates are `[longitude, latitude]` pairs in degrees. Polygon rings
//! are closed (the last position repeats the first), the exterior ring comes
//! first and winding order is significant: a clockwise exterior ring (as
//! seen with north up) encloses the smaller of the two regions it bounds.
//!
//! Besides the standard GeoJSON types, `{"type": "Sphere"}` designates the
//! whole globe.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};

/// A `[longitude, latitude]` pair in degrees.
///
/// Parsed positions may carry extra ordinates (altitude, measure); only the
/// first two are kept.
pub type Position = [f64; 2];

/// A geometry object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(deserialize_with = "ordinates::position")]
        coordinates: Position,
    },
    MultiPoint {
        #[serde(deserialize_with = "ordinates::positions")]
        coordinates: Vec<Position>,
    },
    LineString {
        #[serde(deserialize_with = "ordinates::positions")]
        coordinates: Vec<Position>,
    },
    MultiLineString {
        #[serde(deserialize_with = "ordinates::rings")]
        coordinates: Vec<Vec<Position>>,
    },
    /// Rings: exterior first, then holes.
    Polygon {
        #[serde(deserialize_with = "ordinates::rings")]
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        #[serde(deserialize_with = "ordinates::polygons")]
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
    /// The whole sphere.
    Sphere,
}

mod ordinates {
    use std::fmt;

    use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
    use serde::Deserialize;

    use super::Position;

    struct Ordinates(Position);

    impl<'de> Deserialize<'de> for Ordinates {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(OrdinatesVisitor)
        }
    }

    struct OrdinatesVisitor;

    impl<'de> Visitor<'de> for OrdinatesVisitor {
        type Value = Ordinates;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a position of at least two numbers")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Ordinates, A::Error> {
            let lon: f64 = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            let lat: f64 = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Ordinates([lon, lat]))
        }
    }

    pub fn position<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Position, D::Error> {
        Ordinates::deserialize(deserializer).map(|o| o.0)
    }

    pub fn positions<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Position>, D::Error> {
        let line = Vec::<Ordinates>::deserialize(deserializer)?;
        Ok(line.into_iter().map(|o| o.0).collect())
    }

    pub fn rings<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<Position>>, D::Error> {
        let rings = Vec::<Vec<Ordinates>>::deserialize(deserializer)?;
        Ok(rings
            .into_iter()
            .map(|ring| ring.into_iter().map(|o| o.0).collect())
            .collect())
    }

    pub fn polygons<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<Vec<Position>>>, D::Error> {
        let polygons = Vec::<Vec<Vec<Ordinates>>>::deserialize(deserializer)?;
        Ok(polygons
            .into_iter()
            .map(|polygon| {
                polygon
                    .into_iter()
                    .map(|ring| ring.into_iter().map(|o| o.0).collect())
                    .collect()
            })
            .collect())
    }
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }

    pub fn multi_point(coordinates: Vec<Position>) -> Self {
        Geometry::MultiPoint { coordinates }
    }

    pub fn line_string(coordinates: Vec<Position>) -> Self {
        Geometry::LineString { coordinates }
    }

    pub fn multi_line_string(coordinates: Vec<Vec<Position>>) -> Self {
        Geometry::MultiLineString { coordinates }
    }

    pub fn polygon(coordinates: Vec<Vec<Position>>) -> Self {
        Geometry::Polygon { coordinates }
    }

    pub fn multi_polygon(coordinates: Vec<Vec<Vec<Position>>>) -> Self {
        Geometry::MultiPolygon { coordinates }
    }

    pub fn collection(geometries: Vec<Geometry>) -> Self {
        Geometry::GeometryCollection { geometries }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeatureType {
    Feature,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeatureCollectionType {
    FeatureCollection,
}

/// A geometry with properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: FeatureType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    /// `null` geometries are allowed and contribute nothing.
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<serde_json::Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            type_: FeatureType::Feature,
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }
}

/// An ordered list of features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: FeatureCollectionType,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            type_: FeatureCollectionType::FeatureCollection,
            features,
        }
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Any top-level GeoJSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
    Geometry(Geometry),
}

impl GeoJson {
    /// Read and parse a GeoJSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GeoResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        text.parse()
    }
}

impl FromStr for GeoJson {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        GeoJson::Geometry(geometry)
    }
}

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> Self {
        GeoJson::Feature(feature)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(collection: FeatureCollection) -> Self {
        GeoJson::FeatureCollection(collection)
    }
}
