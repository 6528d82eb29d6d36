use foundation::{EpochMillis, LatLng};
use serde_json::{Map, Value};
use tracing::warn;

use crate::geojson::{FeatureCollection, GeoJsonError, Geometry};

/// One earthquake from the summary feed, as consumed by the marker builder.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub position: LatLng,
    pub magnitude: f64,
    pub title: String,
    pub time: Option<EpochMillis>,
}

/// Parsed earthquake feed.
///
/// `records` keeps feed order. Features without a numeric `mag` are not
/// records; they are only counted in `skipped`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuakeFeed {
    pub records: Vec<EarthquakeRecord>,
    pub skipped: usize,
}

#[derive(Debug)]
pub enum FeedError {
    GeoJson(GeoJsonError),
    InvalidRecord { index: usize, reason: String },
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::GeoJson(e) => write!(f, "earthquake feed: {e}"),
            FeedError::InvalidRecord { index, reason } => {
                write!(f, "earthquake feed record {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::GeoJson(e) => Some(e),
            FeedError::InvalidRecord { .. } => None,
        }
    }
}

impl From<GeoJsonError> for FeedError {
    fn from(e: GeoJsonError) -> Self {
        FeedError::GeoJson(e)
    }
}

impl QuakeFeed {
    pub fn from_value(value: &Value) -> Result<Self, FeedError> {
        let collection = FeatureCollection::from_value(value)?;
        let mut feed = QuakeFeed {
            records: Vec::with_capacity(collection.len()),
            skipped: 0,
        };

        for (index, feature) in collection.features.into_iter().enumerate() {
            let position = match feature.geometry {
                Some(Geometry::Point(p)) => p,
                Some(other) => {
                    return Err(FeedError::InvalidRecord {
                        index,
                        reason: format!("expected Point geometry, found {}", other.kind()),
                    });
                }
                None => {
                    return Err(FeedError::InvalidRecord {
                        index,
                        reason: "missing geometry".to_string(),
                    });
                }
            };

            let Some(magnitude) = feature.properties.get("mag").and_then(Value::as_f64) else {
                warn!(index, id = ?feature.id, "skipping earthquake without magnitude");
                feed.skipped += 1;
                continue;
            };

            feed.records.push(EarthquakeRecord {
                position,
                magnitude,
                title: title_of(&feature.properties),
                time: time_of(&feature.properties),
            });
        }

        Ok(feed)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn title_of(properties: &Map<String, Value>) -> String {
    properties
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn time_of(properties: &Map<String, Value>) -> Option<EpochMillis> {
    let time = properties.get("time")?;
    // The feed uses integers, but tolerate a float that carries an integral value.
    time.as_i64()
        .or_else(|| time.as_f64().filter(|t| t.is_finite()).map(|t| t as i64))
        .map(EpochMillis)
}
