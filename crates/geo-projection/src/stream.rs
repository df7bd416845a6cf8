//! Push-based geometry visitor.
//!
//! Geometry is walked once and pushed through a chain of [`Stream`] stages as
//! a flat sequence of events. Polygon rings arrive as `line_start` / points /
//! `line_end` inside a `polygon_start` / `polygon_end` pair, with the closing
//! coordinate omitted.

use geo_common::{Feature, FeatureCollection, GeoJson, Geometry, Position};
use serde::{Deserialize, Serialize};

/// A geometry event consumer.
///
/// Every method except [`Stream::point`] defaults to a no-op so that sinks
/// only interested in coordinates stay small.
pub trait Stream {
    fn point(&mut self, x: f64, y: f64, z: f64);

    fn line_start(&mut self) {}

    fn line_end(&mut self) {}

    fn polygon_start(&mut self) {}

    fn polygon_end(&mut self) {}

    /// The whole sphere. Only pre-clips know how to expand this.
    fn sphere(&mut self) {}
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn point(&mut self, x: f64, y: f64, z: f64) {
        (**self).point(x, y, z)
    }

    fn line_start(&mut self) {
        (**self).line_start()
    }

    fn line_end(&mut self) {
        (**self).line_end()
    }

    fn polygon_start(&mut self) {
        (**self).polygon_start()
    }

    fn polygon_end(&mut self) {
        (**self).polygon_end()
    }

    fn sphere(&mut self) {
        (**self).sphere()
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    fn point(&mut self, x: f64, y: f64, z: f64) {
        (**self).point(x, y, z)
    }

    fn line_start(&mut self) {
        (**self).line_start()
    }

    fn line_end(&mut self) {
        (**self).line_end()
    }

    fn polygon_start(&mut self) {
        (**self).polygon_start()
    }

    fn polygon_end(&mut self) {
        (**self).polygon_end()
    }

    fn sphere(&mut self) {
        (**self).sphere()
    }
}

/// Anything that can replay itself as stream events.
pub trait Streamable {
    fn stream<S: Stream + ?Sized>(&self, stream: &mut S);
}

fn stream_line<S: Stream + ?Sized>(coordinates: &[Position], closed: bool, stream: &mut S) {
    let n = if closed {
        coordinates.len().saturating_sub(1)
    } else {
        coordinates.len()
    };
    stream.line_start();
    for position in &coordinates[..n] {
        stream.point(position[0], position[1], 0.0);
    }
    stream.line_end();
}

fn stream_polygon<S: Stream + ?Sized>(rings: &[Vec<Position>], stream: &mut S) {
    stream.polygon_start();
    for ring in rings {
        stream_line(ring, true, stream);
    }
    stream.polygon_end();
}

impl Streamable for Geometry {
    fn stream<S: Stream + ?Sized>(&self, stream: &mut S) {
        match self {
            Geometry::Point { coordinates } => stream.point(coordinates[0], coordinates[1], 0.0),
            Geometry::MultiPoint { coordinates } => {
                for position in coordinates {
                    stream.point(position[0], position[1], 0.0);
                }
            }
            Geometry::LineString { coordinates } => stream_line(coordinates, false, stream),
            Geometry::MultiLineString { coordinates } => {
                for line in coordinates {
                    stream_line(line, false, stream);
                }
            }
            Geometry::Polygon { coordinates } => stream_polygon(coordinates, stream),
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    stream_polygon(polygon, stream);
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.stream(stream);
                }
            }
            Geometry::Sphere => stream.sphere(),
        }
    }
}

impl Streamable for Feature {
    fn stream<S: Stream + ?Sized>(&self, stream: &mut S) {
        if let Some(geometry) = &self.geometry {
            geometry.stream(stream);
        }
    }
}

impl Streamable for FeatureCollection {
    fn stream<S: Stream + ?Sized>(&self, stream: &mut S) {
        for feature in &self.features {
            feature.stream(stream);
        }
    }
}

impl Streamable for GeoJson {
    fn stream<S: Stream + ?Sized>(&self, stream: &mut S) {
        match self {
            GeoJson::Feature(feature) => feature.stream(stream),
            GeoJson::FeatureCollection(collection) => collection.stream(stream),
            GeoJson::Geometry(geometry) => geometry.stream(stream),
        }
    }
}

impl<T: Streamable> Streamable for [T] {
    fn stream<S: Stream + ?Sized>(&self, stream: &mut S) {
        for item in self {
            item.stream(stream);
        }
    }
}

/// One recorded stream event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StreamEvent {
    Point { x: f64, y: f64 },
    LineStart,
    LineEnd,
    PolygonStart,
    PolygonEnd,
    Sphere,
}

/// Sink that records every event it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecorder {
    events: Vec<StreamEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StreamEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<StreamEvent> {
        self.events
    }

    /// Coordinates of every recorded point, in order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.events
            .iter()
            .filter_map(|event| match event {
                StreamEvent::Point { x, y } => Some([*x, *y]),
                _ => None,
            })
            .collect()
    }

    /// Points grouped by the line (or ring) they were emitted in.
    pub fn lines(&self) -> Vec<Vec<[f64; 2]>> {
        let mut lines = Vec::new();
        let mut current: Option<Vec<[f64; 2]>> = None;
        for event in &self.events {
            match event {
                StreamEvent::LineStart => current = Some(Vec::new()),
                StreamEvent::LineEnd => lines.extend(current.take()),
                StreamEvent::Point { x, y } => {
                    if let Some(line) = current.as_mut() {
                        line.push([*x, *y]);
                    }
                }
                _ => {}
            }
        }
        lines
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Stream for EventRecorder {
    fn point(&mut self, x: f64, y: f64, _z: f64) {
        self.events.push(StreamEvent::Point { x, y });
    }

    fn line_start(&mut self) {
        self.events.push(StreamEvent::LineStart);
    }

    fn line_end(&mut self) {
        self.events.push(StreamEvent::LineEnd);
    }

    fn polygon_start(&mut self) {
        self.events.push(StreamEvent::PolygonStart);
    }

    fn polygon_end(&mut self) {
        self.events.push(StreamEvent::PolygonEnd);
    }

    fn sphere(&mut self) {
        self.events.push(StreamEvent::Sphere);
    }
}
