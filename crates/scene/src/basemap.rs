use serde::Serialize;

/// Tile sets offered as basemaps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Basemap {
    Streets,
    Outdoors,
    StreetsSatellite,
}

impl Basemap {
    /// Construction order.
    pub const ALL: [Basemap; 3] = [Basemap::Streets, Basemap::Outdoors, Basemap::StreetsSatellite];

    /// Order in the layer-selection control.
    pub const CONTROL_ORDER: [Basemap; 3] =
        [Basemap::Outdoors, Basemap::StreetsSatellite, Basemap::Streets];

    pub fn tileset(self) -> &'static str {
        match self {
            Basemap::Streets => "streets",
            Basemap::Outdoors => "outdoors",
            Basemap::StreetsSatellite => "streets-satellite",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Basemap::Streets => "Streets Map",
            Basemap::Outdoors => "Outdoors Map",
            Basemap::StreetsSatellite => "Streets-Satellite Map",
        }
    }
}

/// A raster tile host. One provider serves every basemap.
#[derive(Debug, Clone, PartialEq)]
pub struct TileProvider {
    /// Leaflet-style template with `{id}`, `{accessToken}`, `{z}`, `{x}`, `{y}`.
    pub url_template: String,
    pub tileset_prefix: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileProvider {
    pub fn mapbox() -> Self {
        Self {
            url_template:
                "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}"
                    .to_string(),
            tileset_prefix: "mapbox.".to_string(),
            attribution: "Map data &copy; <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, \
                 <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, \
                 Imagery \u{a9} <a href=\"https://www.mapbox.com/\">Mapbox</a>"
                .to_string(),
            max_zoom: 18,
        }
    }

    pub fn tile_layer(&self, basemap: Basemap, access_token: Option<&str>) -> TileLayer {
        let id = format!("{}{}", self.tileset_prefix, basemap.tileset());
        let url_template = self
            .url_template
            .replace("{id}", &id)
            .replace("{accessToken}", access_token.unwrap_or_default());
        TileLayer {
            basemap,
            id,
            url_template,
            attribution: self.attribution.clone(),
            max_zoom: self.max_zoom,
        }
    }
}

impl Default for TileProvider {
    fn default() -> Self {
        Self::mapbox()
    }
}

/// A basemap bound to its provider and credential. Only `{z}/{x}/{y}` remain
/// in `url_template` for the renderer to fill.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub basemap: Basemap,
    pub id: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}
