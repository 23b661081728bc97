use super::types::{Geometry, Position};
use crate::error::GeometryError;

/// Axis-aligned rectangle enclosing a geometry, `min`/`max` as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    fn at(position: &Position) -> Self {
        Self {
            min: [position.x, position.y],
            max: [position.x, position.y],
        }
    }

    fn include(mut self, position: &Position) -> Self {
        self.min[0] = self.min[0].min(position.x);
        self.min[1] = self.min[1].min(position.y);
        self.max[0] = self.max[0].max(position.x);
        self.max[1] = self.max[1].max(position.y);
        self
    }

    /// Arithmetic midpoint of the box.
    pub fn centroid(&self) -> Position {
        Position::new(
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        )
    }

    /// The box as `[south, north, west, east]`.
    pub fn to_extent(&self) -> [f64; 4] {
        [self.min[1], self.max[1], self.min[0], self.max[0]]
    }
}

/// Computes the bounding box over every coordinate of `geometry`.
///
/// Fails with [`GeometryError::Empty`] when the geometry holds no positions.
pub fn bounding_box(geometry: &Geometry) -> Result<BoundingBox, GeometryError> {
    let mut positions = geometry.positions();
    let first = positions.next().ok_or(GeometryError::Empty)?;
    Ok(positions.fold(BoundingBox::at(first), BoundingBox::include))
}
