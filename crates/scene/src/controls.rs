use layers::popup::escape_html;
use layers::{LayerId, LegendEntry, legend_entries};
use serde::Serialize;

use crate::basemap::Basemap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    BottomLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendControl {
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
}

impl LegendControl {
    pub fn magnitude() -> Self {
        Self {
            position: ControlPosition::BottomLeft,
            entries: legend_entries(),
        }
    }

    /// Inner markup of the legend box: one swatch row per bucket.
    pub fn to_html(&self) -> String {
        let rows: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "<i style=\"background:{}\"></i> {}",
                    entry.color_swatch,
                    escape_html(&entry.label).replace('\u{2013}', "&ndash;")
                )
            })
            .collect();
        rows.join("<br>")
    }
}

/// Radio group over basemaps plus checkbox group over overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerControl {
    pub basemaps: Vec<Basemap>,
    pub overlays: Vec<(String, LayerId)>,
    pub collapsed: bool,
}

impl LayerControl {
    pub fn expanded(basemaps: Vec<Basemap>, overlays: Vec<(String, LayerId)>) -> Self {
        Self {
            basemaps,
            overlays,
            collapsed: false,
        }
    }
}
