use serde::{Deserialize, Serialize};

/// A geographic position in degrees, latitude first.
///
/// GeoJSON stores coordinates as `[lon, lat]`; the renderer consumes
/// `(lat, lng)`. Use [`LatLng::from_lon_lat`] at the boundary so the swap
/// happens in exactly one place.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub const fn from_lon_lat(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lat: lat_deg,
            lng: lon_deg,
        }
    }

    /// Leaflet-style `[lat, lng]` pair.
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}
