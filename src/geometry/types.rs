//! Feature Data Types
//!
//! Typed counterparts of the GeoJSON objects produced by the conversion step.
//! Only the six simple geometry kinds are representable; anything else is
//! rejected when a [`Feature`] is constructed.

use super::bbox::{BoundingBox, bounding_box};
use crate::error::GeometryError;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open attribute record of a feature, in source order.
pub type Attributes = serde_json::Map<String, Value>;

/// Names of the geometry kinds that can be indexed.
pub const SUPPORTED_KINDS: [&str; 6] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
];

/// A single coordinate. Ordinates past the second (altitude, measure) are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinates = Vec::<f64>::deserialize(deserializer)?;
        match ordinates.as_slice() {
            [x, y, ..] => Ok(Position { x: *x, y: *y }),
            _ => Err(de::Error::custom(format!(
                "position needs at least two ordinates, got {}",
                ordinates.len()
            ))),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.end()
    }
}

/// Geometry of a feature, tagged by its GeoJSON `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    /// Parses a GeoJSON geometry object, distinguishing missing, unsupported
    /// and malformed input.
    pub fn from_value(value: &Value) -> Result<Self, GeometryError> {
        if value.is_null() {
            return Err(GeometryError::Missing);
        }
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeometryError::Missing)?;

        if !SUPPORTED_KINDS.contains(&kind) {
            return Err(GeometryError::UnsupportedType(kind.to_string()));
        }

        serde_json::from_value(value.clone()).map_err(|e| GeometryError::Malformed {
            kind: kind.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }

    /// Iterates every position at the nesting depth of this geometry kind.
    pub fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point { coordinates } => Box::new(std::iter::once(coordinates)),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                Box::new(coordinates.iter())
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                Box::new(coordinates.iter().flatten())
            }
            Geometry::MultiPolygon { coordinates } => {
                Box::new(coordinates.iter().flatten().flatten())
            }
        }
    }
}

/// One geometry plus its attribute record.
///
/// The bounding box is computed on construction, so every `Feature` value is
/// known to have a non-empty, well-formed geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    geometry: Geometry,
    properties: Attributes,
    #[serde(skip)]
    bbox: BoundingBox,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Attributes) -> Result<Self, GeometryError> {
        let bbox = bounding_box(&geometry)?;
        Ok(Self {
            geometry,
            properties,
            bbox,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn properties(&self) -> &Attributes {
        &self.properties
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// The search reference of this feature: its `id_property` value as text.
    ///
    /// `None` when the attribute is absent or null.
    pub fn reference(&self, id_property: &str) -> Option<String> {
        match self.properties.get(id_property)? {
            Value::Null => None,
            value => Some(value_to_text(value)),
        }
    }
}

/// Ordered, immutable sequence of features.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The representative feature whose keys define the indexed fields.
    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Stringifies an attribute value: strings verbatim, null as empty text,
/// everything else as its JSON representation.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
