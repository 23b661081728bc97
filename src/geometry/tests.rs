//! Geometry Module Tests
//!
//! ## Test Scopes
//! - **Parsing**: GeoJSON geometry objects into the typed union.
//! - **Bounding boxes**: Per-kind traversal and the per-axis min/max fold.
//! - **References**: Stringification of id attribute values.

#[cfg(test)]
mod tests {
    use crate::error::GeometryError;
    use crate::geometry::{Attributes, Feature, Geometry, Position, bounding_box};
    use serde_json::json;

    fn geometry(value: serde_json::Value) -> Geometry {
        Geometry::from_value(&value).expect("valid geometry")
    }

    // ============================================================
    // PARSING
    // ============================================================

    #[test]
    fn test_parse_point() {
        let g = geometry(json!({"type": "Point", "coordinates": [10.0, 20.0]}));
        assert_eq!(
            g,
            Geometry::Point {
                coordinates: Position::new(10.0, 20.0)
            }
        );
    }

    #[test]
    fn test_parse_ignores_altitude() {
        let g = geometry(json!({"type": "Point", "coordinates": [1.5, 2.5, 300.0]}));
        assert_eq!(g.positions().next(), Some(&Position::new(1.5, 2.5)));
    }

    #[test]
    fn test_parse_rejects_geometry_collection() {
        let err = Geometry::from_value(&json!({"type": "GeometryCollection", "geometries": []}))
            .unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedType("GeometryCollection".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_null_geometry() {
        let err = Geometry::from_value(&serde_json::Value::Null).unwrap_err();
        assert_eq!(err, GeometryError::Missing);
    }

    #[test]
    fn test_parse_rejects_short_position() {
        let err = Geometry::from_value(&json!({"type": "Point", "coordinates": [1.0]})).unwrap_err();
        assert!(matches!(err, GeometryError::Malformed { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_nesting() {
        // A Polygon needs rings of positions, not positions.
        let err = Geometry::from_value(&json!({"type": "Polygon", "coordinates": [[0.0, 0.0]]}))
            .unwrap_err();
        assert!(matches!(err, GeometryError::Malformed { .. }));
    }

    // ============================================================
    // BOUNDING BOXES
    // ============================================================

    #[test]
    fn test_point_box_is_degenerate() {
        let g = geometry(json!({"type": "Point", "coordinates": [10.0, 20.0]}));
        let bbox = bounding_box(&g).unwrap();

        assert_eq!(bbox.min, [10.0, 20.0]);
        assert_eq!(bbox.max, [10.0, 20.0]);
        assert_eq!(bbox.to_extent(), [20.0, 20.0, 10.0, 10.0]);
    }

    #[test]
    fn test_line_string_box_uses_max_for_upper_bound() {
        let g = geometry(json!({
            "type": "LineString",
            "coordinates": [[3.0, -1.0], [-2.0, 4.0], [5.0, 0.5]]
        }));
        let bbox = bounding_box(&g).unwrap();

        assert_eq!(bbox.min, [-2.0, -1.0]);
        assert_eq!(bbox.max, [5.0, 4.0]);
    }

    #[test]
    fn test_polygon_box_spans_all_rings() {
        let g = geometry(json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                [[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]
            ]
        }));
        let bbox = bounding_box(&g).unwrap();

        assert_eq!(bbox.min, [0.0, 0.0]);
        assert_eq!(bbox.max, [10.0, 10.0]);
        assert_eq!(bbox.centroid(), Position::new(5.0, 5.0));
    }

    #[test]
    fn test_multi_polygon_box_spans_all_polygons() {
        let g = geometry(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[-10.0, -5.0], [-8.0, -5.0], [-8.0, -3.0], [-10.0, -5.0]]],
                [[[20.0, 30.0], [22.0, 30.0], [22.0, 31.0], [20.0, 30.0]]]
            ]
        }));
        let bbox = bounding_box(&g).unwrap();

        assert_eq!(bbox.to_extent(), [-5.0, 31.0, -10.0, 22.0]);
    }

    #[test]
    fn test_multi_line_string_box() {
        let g = geometry(json!({
            "type": "MultiLineString",
            "coordinates": [[[1.0, 1.0], [2.0, 2.0]], [[-1.0, 7.0]]]
        }));
        let bbox = bounding_box(&g).unwrap();

        assert_eq!(bbox.min, [-1.0, 1.0]);
        assert_eq!(bbox.max, [2.0, 7.0]);
    }

    #[test]
    fn test_box_min_never_exceeds_max() {
        let g = geometry(json!({
            "type": "MultiPoint",
            "coordinates": [[9.0, -9.0], [-4.0, 12.0], [0.0, 0.0], [7.5, 3.0]]
        }));
        let bbox = bounding_box(&g).unwrap();

        assert!(bbox.min[0] <= bbox.max[0]);
        assert!(bbox.min[1] <= bbox.max[1]);
    }

    #[test]
    fn test_empty_multi_point_is_an_error() {
        let g = geometry(json!({"type": "MultiPoint", "coordinates": []}));
        assert_eq!(bounding_box(&g), Err(GeometryError::Empty));
    }

    // ============================================================
    // FEATURES
    // ============================================================

    fn attributes(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_feature_reference_from_string_and_number() {
        let point = geometry(json!({"type": "Point", "coordinates": [0.0, 0.0]}));

        let f = Feature::new(point.clone(), attributes(json!({"id": "abc"}))).unwrap();
        assert_eq!(f.reference("id"), Some("abc".to_string()));

        let f = Feature::new(point.clone(), attributes(json!({"id": 42}))).unwrap();
        assert_eq!(f.reference("id"), Some("42".to_string()));

        let f = Feature::new(point, attributes(json!({"id": null}))).unwrap();
        assert_eq!(f.reference("id"), None);
        assert_eq!(f.reference("other"), None);
    }

    #[test]
    fn test_feature_rejects_empty_geometry() {
        let empty = geometry(json!({"type": "LineString", "coordinates": []}));
        assert_eq!(
            Feature::new(empty, Attributes::new()).unwrap_err(),
            GeometryError::Empty
        );
    }

    #[test]
    fn test_feature_serializes_as_geojson() {
        let point = geometry(json!({"type": "Point", "coordinates": [1.0, 2.0]}));
        let f = Feature::new(point, attributes(json!({"name": "Alpha"}))).unwrap();

        let value = serde_json::to_value(&f).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                "properties": {"name": "Alpha"}
            })
        );
    }
}
