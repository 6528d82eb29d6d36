use foundation::LatLng;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(LatLng),
    MultiPoint(Vec<LatLng>),
    LineString(Vec<LatLng>),
    MultiLineString(Vec<Vec<LatLng>>),
    Polygon(Vec<Vec<LatLng>>),
    MultiPolygon(Vec<Vec<Vec<LatLng>>>),
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` for the GeoJSON `"geometry": null` case.
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::Json(e) => write!(f, "JSON parse error: {e}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoJsonError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl FeatureCollection {
    pub fn parse(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload).map_err(GeoJsonError::Json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, GeoJsonError> {
        let features = feature_array(value)?;

        let mut out = Vec::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            let feature = parse_feature(feature)
                .map_err(|reason| GeoJsonError::InvalidFeature { index, reason })?;
            out.push(feature);
        }
        Ok(Self { features: out })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Checks the FeatureCollection envelope and returns its `features` array.
pub(crate) fn feature_array(value: &Value) -> Result<&Vec<Value>, GeoJsonError> {
    let obj = value
        .as_object()
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    match obj.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {}
        _ => return Err(GeoJsonError::NotAFeatureCollection),
    }
    obj.get("features")
        .and_then(Value::as_array)
        .ok_or(GeoJsonError::NotAFeatureCollection)
}

fn parse_feature(value: &Value) -> Result<Feature, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "feature must be an object".to_string())?;

    match obj.get("type").and_then(Value::as_str) {
        Some("Feature") => {}
        Some(other) => return Err(format!("unexpected feature type: {other}")),
        None => return Err("feature missing type".to_string()),
    }

    let id = match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let geometry = match obj.get("geometry") {
        None => return Err("feature missing geometry".to_string()),
        Some(Value::Null) => None,
        Some(g) => Some(parse_geometry(g)?),
    };

    Ok(Feature {
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "geometry missing type".to_string())?;
    let coords = obj
        .get("coordinates")
        .ok_or_else(|| "geometry missing coordinates".to_string())?;

    Ok(match ty {
        "Point" => Geometry::Point(position(coords)?),
        "MultiPoint" => Geometry::MultiPoint(positions(coords)?),
        "LineString" => Geometry::LineString(positions(coords)?),
        "MultiLineString" => Geometry::MultiLineString(nested(coords, positions)?),
        "Polygon" => Geometry::Polygon(nested(coords, positions)?),
        "MultiPolygon" => {
            Geometry::MultiPolygon(nested(coords, |poly| nested(poly, positions))?)
        }
        other => return Err(format!("unsupported geometry type: {other}")),
    })
}

/// A single `[lon, lat, (alt)]` position. Altitude is ignored.
fn position(coords: &Value) -> Result<LatLng, String> {
    let arr = coords
        .as_array()
        .ok_or_else(|| "position must be an array".to_string())?;
    let [lon, lat, ..] = arr.as_slice() else {
        return Err("position must have [lon, lat]".to_string());
    };
    let lon = lon
        .as_f64()
        .ok_or_else(|| "longitude must be a number".to_string())?;
    let lat = lat
        .as_f64()
        .ok_or_else(|| "latitude must be a number".to_string())?;
    Ok(LatLng::from_lon_lat(lon, lat))
}

fn positions(coords: &Value) -> Result<Vec<LatLng>, String> {
    nested(coords, position)
}

fn nested<T>(coords: &Value, item: impl Fn(&Value) -> Result<T, String>) -> Result<Vec<T>, String> {
    coords
        .as_array()
        .ok_or_else(|| "coordinates must be an array".to_string())?
        .iter()
        .map(item)
        .collect()
}
