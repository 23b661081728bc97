//! Ingestion Module Tests
//!
//! ## Test Scopes
//! - **Parsing**: Feature collection payloads, including per-feature rejection.
//! - **Loading**: Stream accumulation, converter failures and the timeout.

#[cfg(test)]
mod tests {
    use crate::error::IngestionError;
    use crate::ingestion::testing::{StaticConverter, point_collection};
    use crate::ingestion::{GeoJsonFileConverter, Ogr2OgrConverter, load_features, parse_collection};
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;

    // ============================================================
    // PARSING
    // ============================================================

    #[test]
    fn test_parse_feature_collection() {
        let payload = point_collection(&[
            (10.0, 20.0, json!({"id": "1", "name": "Alpha"})),
            (1.0, 2.0, json!({"id": "2", "name": "Beta"})),
        ]);

        let collection = parse_collection("mem", payload.as_bytes()).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features()[1].properties()["name"], json!("Beta"));
    }

    #[test]
    fn test_parse_preserves_attribute_order() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},
             "properties":{"zeta":1,"alpha":2,"mid":3}}]}"#;

        let collection = parse_collection("mem", payload.as_bytes()).unwrap();
        let keys: Vec<&String> = collection.features()[0].properties().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_drops_unsupported_and_null_geometry() {
        let payload = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "GeometryCollection", "geometries": []}, "properties": {"id": "a"}},
                {"type": "Feature", "geometry": null, "properties": {"id": "b"}},
                {"type": "Feature", "geometry": {"type": "MultiPoint", "coordinates": []}, "properties": {"id": "c"}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {"id": "d"}}
            ]
        })
        .to_string();

        let collection = parse_collection("mem", payload.as_bytes()).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.features()[0].reference("id"), Some("d".to_string()));
    }

    #[test]
    fn test_parse_null_properties_as_empty() {
        let payload = r#"{"features":[{"geometry":{"type":"Point","coordinates":[0,0]},"properties":null}]}"#;
        let collection = parse_collection("mem", payload.as_bytes()).unwrap();
        assert!(collection.features()[0].properties().is_empty());
    }

    #[test]
    fn test_parse_empty_collection() {
        let collection =
            parse_collection("mem", br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_collection() {
        let err = parse_collection("mem", b"not json").unwrap_err();
        assert!(matches!(err, IngestionError::Parse { .. }));

        let err = parse_collection("mem", br#"{"type":"Feature"}"#).unwrap_err();
        assert!(matches!(err, IngestionError::Parse { .. }));
    }

    // ============================================================
    // LOADING
    // ============================================================

    #[tokio::test]
    async fn test_load_from_converter() {
        let converter = StaticConverter::new().with(
            "towns",
            point_collection(&[(3.0, 4.0, json!({"id": 1}))]),
        );

        let collection = load_features(&converter, "towns", None).await.unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn test_load_propagates_stream_failure() {
        let converter = StaticConverter::new();
        let err = load_features(&converter, "missing", None).await.unwrap_err();
        assert!(matches!(err, IngestionError::Stream { .. }));
    }

    #[tokio::test]
    async fn test_load_times_out() {
        let converter = StaticConverter::new()
            .with("slow", point_collection(&[]))
            .with_delay("slow", Duration::from_millis(500));

        let err = load_features(&converter, "slow", Some(Duration::from_millis(20)))
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_geojson_file_converter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(point_collection(&[(1.0, 1.0, json!({"id": "x"}))]).as_bytes())
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let collection = load_features(&GeoJsonFileConverter, &path, None).await.unwrap();
        assert_eq!(collection.features()[0].reference("id"), Some("x".to_string()));
    }

    #[tokio::test]
    async fn test_geojson_file_converter_missing_file() {
        let err = load_features(&GeoJsonFileConverter, "/no/such/file.geojson", None)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::Stream { .. }));
    }

    #[tokio::test]
    async fn test_ogr2ogr_missing_program() {
        let converter = Ogr2OgrConverter::new("/nonexistent/ogr2ogr-binary");
        let err = load_features(&converter, "data.shp", None).await.unwrap_err();
        assert!(matches!(err, IngestionError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ogr2ogr_failing_program() {
        // `false` ignores its arguments and exits 1 without output.
        let converter = Ogr2OgrConverter::new("false");
        let err = load_features(&converter, "data.shp", None).await.unwrap_err();
        assert!(matches!(err, IngestionError::ConverterFailed { .. }));
    }
}
