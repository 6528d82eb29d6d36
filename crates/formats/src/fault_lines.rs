use serde_json::Value;

use crate::geojson::{GeoJsonError, feature_array};

/// Plate-boundary geometry, kept exactly as read.
///
/// Only the FeatureCollection envelope is checked. Individual features and
/// their geometries are left for the renderer, which draws what it knows and
/// skips the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultLineGeometry {
    raw: Value,
    feature_count: usize,
}

impl FaultLineGeometry {
    pub fn from_value(value: Value) -> Result<Self, GeoJsonError> {
        let feature_count = feature_array(&value)?.len();
        Ok(Self {
            raw: value,
            feature_count,
        })
    }

    pub fn empty() -> Self {
        Self {
            raw: serde_json::json!({ "type": "FeatureCollection", "features": [] }),
            feature_count: 0,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn as_geojson(&self) -> &Value {
        &self.raw
    }

    pub fn into_geojson(self) -> Value {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::FaultLineGeometry;
    use serde_json::json;

    #[test]
    fn passes_document_through_untouched() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "LAYER": "plate", "Code": "AF", "PlateName": "Africa" },
                "geometry": { "type": "Polygon", "coordinates": [[[-0.4, -54.8], [0.9, -54.3], [-0.4, -54.8]]] }
            }],
            "crs": { "type": "name", "properties": { "name": "EPSG:4326" } }
        });

        let geometry = FaultLineGeometry::from_value(doc.clone()).expect("plates");
        assert_eq!(geometry.feature_count(), 1);
        assert_eq!(geometry.as_geojson(), &doc);
    }

    #[test]
    fn geometry_collection_is_kept() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "GeometryCollection",
                    "geometries": [
                        { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
                        { "type": "Point", "coordinates": [2.0, 2.0] }
                    ]
                }
            }]
        });

        let geometry = FaultLineGeometry::from_value(doc.clone()).expect("plates");
        assert_eq!(geometry.feature_count(), 1);
        assert_eq!(geometry.as_geojson(), &doc);
    }

    #[test]
    fn features_without_geometry_are_kept() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "Code": "AF" } },
                { "type": "Feature", "properties": {}, "geometry": null },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Curve", "coordinates": [] } }
            ]
        });

        let geometry = FaultLineGeometry::from_value(doc.clone()).expect("plates");
        assert_eq!(geometry.feature_count(), 3);
        assert_eq!(geometry.into_geojson(), doc);
    }

    #[test]
    fn empty_collection_is_valid() {
        let geometry = FaultLineGeometry::empty();
        assert_eq!(geometry.feature_count(), 0);
        assert!(FaultLineGeometry::from_value(geometry.into_geojson()).is_ok());
    }

    #[test]
    fn rejects_non_collection() {
        assert!(FaultLineGeometry::from_value(json!([1, 2, 3])).is_err());
    }
}
