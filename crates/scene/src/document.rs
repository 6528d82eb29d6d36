use layers::{Layer, LayerId, MarkerStyle, QuakeMarker};
use serde::Serialize;
use serde_json::Value;

use crate::basemap::Basemap;
use crate::controls::ControlPosition;
use crate::map::{MapView, OverlayRule};

/// Serializable snapshot of a [`MapView`], consumed by the page bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub element_id: String,
    pub center: [f64; 2],
    pub zoom: u8,
    pub basemaps: Vec<BasemapDoc>,
    pub overlays: Vec<OverlayDoc>,
    /// Visible overlays, bottom to top.
    pub draw_order: Vec<LayerId>,
    pub legend: LegendDoc,
    pub layer_control: LayerControlDoc,
    /// Overlays raised whenever any overlay is switched on.
    pub raise_on_overlay_add: Vec<LayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasemapDoc {
    pub key: Basemap,
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDoc {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    #[serde(flatten)]
    pub content: OverlayContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OverlayContent {
    Markers { markers: Vec<MarkerDoc> },
    GeoJson { geojson: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDoc {
    pub position: [f64; 2],
    pub style: MarkerStyle,
    pub popup: String,
    /// Epoch milliseconds; `null` when the feed gave no time.
    pub time: Option<i64>,
}

impl From<&QuakeMarker> for MarkerDoc {
    fn from(marker: &QuakeMarker) -> Self {
        Self {
            position: marker.position.to_array(),
            style: marker.style,
            popup: marker.popup.clone(),
            time: marker.time.map(|t| t.as_millis()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendDoc {
    pub position: ControlPosition,
    pub class_name: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControlDoc {
    pub collapsed: bool,
    /// Basemap keys in control order.
    pub basemaps: Vec<Basemap>,
    /// Overlay ids in control order.
    pub overlays: Vec<LayerId>,
}

impl MapView {
    pub fn to_document(&self) -> MapDocument {
        let basemaps = self
            .layer_control
            .basemaps
            .iter()
            .filter_map(|&b| self.basemap(b))
            .map(|tile| BasemapDoc {
                key: tile.basemap,
                name: tile.basemap.display_name().to_string(),
                url_template: tile.url_template.clone(),
                attribution: tile.attribution.clone(),
                max_zoom: tile.max_zoom,
                active: tile.basemap == self.active_basemap,
            })
            .collect();

        let overlays = vec![
            OverlayDoc {
                id: self.earthquakes.id(),
                name: self.earthquakes.name().to_string(),
                visible: self.is_visible(self.earthquakes.id()),
                content: OverlayContent::Markers {
                    markers: self.earthquakes.markers().iter().map(MarkerDoc::from).collect(),
                },
            },
            OverlayDoc {
                id: self.fault_lines.id(),
                name: self.fault_lines.name().to_string(),
                visible: self.is_visible(self.fault_lines.id()),
                content: OverlayContent::GeoJson {
                    geojson: self.fault_lines.geometry().as_geojson().clone(),
                },
            },
        ];

        let raise_on_overlay_add = self
            .rules
            .iter()
            .map(|rule| match rule {
                OverlayRule::RaiseOnOverlayAdded(id) => *id,
            })
            .collect();

        MapDocument {
            element_id: self.element_id.clone(),
            center: self.center.to_array(),
            zoom: self.zoom,
            basemaps,
            overlays,
            draw_order: self.draw_order.clone(),
            legend: LegendDoc {
                position: self.legend.position,
                class_name: "info legend".to_string(),
                html: self.legend.to_html(),
            },
            layer_control: LayerControlDoc {
                collapsed: self.layer_control.collapsed,
                basemaps: self.layer_control.basemaps.clone(),
                overlays: self.layer_control.overlays.iter().map(|(_, id)| *id).collect(),
            },
            raise_on_overlay_add,
        }
    }
}
