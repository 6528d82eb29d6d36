use std::fmt::Display;

use chrono::{Local, TimeZone};
use formats::EarthquakeRecord;
use foundation::{EpochMillis, LatLng};
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::popup::{format_timestamp, popup_html};
use crate::symbology::MarkerStyle;

/// A circle marker for one earthquake, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeMarker {
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: String,
    /// Event time, so a viewer can restate the popup time in its own zone.
    pub time: Option<EpochMillis>,
}

/// Builds the marker for one record, formatting its time in `tz`.
pub fn build_marker_in<Tz>(record: &EarthquakeRecord, tz: &Tz) -> QuakeMarker
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    QuakeMarker {
        position: record.position,
        style: MarkerStyle::for_magnitude(record.magnitude),
        popup: popup_html(&record.title, &format_timestamp(record.time, tz)),
        time: record.time,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeLayer {
    id: LayerId,
    markers: Vec<QuakeMarker>,
}

impl EarthquakeLayer {
    pub const NAME: &'static str = "Earthquakes";

    pub fn new(markers: Vec<QuakeMarker>) -> Self {
        Self {
            id: LayerId::EARTHQUAKES,
            markers,
        }
    }

    /// Markers in feed order; later entries draw above earlier ones.
    pub fn markers(&self) -> &[QuakeMarker] {
        &self.markers
    }
}

impl Layer for EarthquakeLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn feature_count(&self) -> usize {
        self.markers.len()
    }
}

/// One marker per record, in input order. Nothing is sorted, merged or dropped.
pub fn build_earthquake_layer_in<Tz>(records: &[EarthquakeRecord], tz: &Tz) -> EarthquakeLayer
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    EarthquakeLayer::new(records.iter().map(|r| build_marker_in(r, tz)).collect())
}

pub fn build_earthquake_layer(records: &[EarthquakeRecord]) -> EarthquakeLayer {
    build_earthquake_layer_in(records, &Local)
}
