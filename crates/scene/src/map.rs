use std::collections::BTreeSet;

use foundation::LatLng;
use layers::{EarthquakeLayer, FaultLineLayer, Layer, LayerId};
use runtime::EventBus;
use tracing::debug;

use crate::basemap::{Basemap, TileLayer, TileProvider};
use crate::controls::{LayerControl, LegendControl};

pub const DEFAULT_CENTER: LatLng = LatLng::new(37.7749, -122.4194);
pub const DEFAULT_ZOOM: u8 = 6;
pub const DEFAULT_ELEMENT_ID: &str = "map";

/// Everything the composer needs from the outside world.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    /// Id of the page element the map mounts into.
    pub element_id: String,
    pub provider: TileProvider,
    pub access_token: Option<String>,
    pub initial_basemap: Basemap,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            provider: TileProvider::mapbox(),
            access_token: None,
            initial_basemap: Basemap::StreetsSatellite,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MapEvent {
    BasemapChanged(Basemap),
    OverlayAdded(LayerId),
    OverlayRemoved(LayerId),
}

/// Application-level reactions to map events.
///
/// Serialized into `MapDocument::raise_on_overlay_add`; the quake_server page
/// replays them in its `overlayadd` handler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayRule {
    /// Whenever any overlay is switched on, raise this layer to the top.
    RaiseOnOverlayAdded(LayerId),
}

/// The composed interactive map.
///
/// Owns the overlay layers for the lifetime of the view. Only visible
/// overlays take part in `draw_order`, which runs bottom to top.
#[derive(Debug)]
pub struct MapView {
    pub(crate) center: LatLng,
    pub(crate) zoom: u8,
    pub(crate) element_id: String,
    pub(crate) basemaps: Vec<TileLayer>,
    pub(crate) active_basemap: Basemap,
    pub(crate) earthquakes: EarthquakeLayer,
    pub(crate) fault_lines: FaultLineLayer,
    pub(crate) visible: BTreeSet<LayerId>,
    pub(crate) draw_order: Vec<LayerId>,
    pub(crate) legend: LegendControl,
    pub(crate) layer_control: LayerControl,
    pub(crate) rules: Vec<OverlayRule>,
    pub(crate) events: EventBus<MapEvent>,
}

impl MapView {
    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn basemaps(&self) -> &[TileLayer] {
        &self.basemaps
    }

    pub fn basemap(&self, basemap: Basemap) -> Option<&TileLayer> {
        self.basemaps.iter().find(|t| t.basemap == basemap)
    }

    pub fn active_basemap(&self) -> Basemap {
        self.active_basemap
    }

    pub fn earthquakes(&self) -> &EarthquakeLayer {
        &self.earthquakes
    }

    pub fn fault_lines(&self) -> &FaultLineLayer {
        &self.fault_lines
    }

    pub fn legend(&self) -> &LegendControl {
        &self.legend
    }

    pub fn layer_control(&self) -> &LayerControl {
        &self.layer_control
    }

    pub fn rules(&self) -> &[OverlayRule] {
        &self.rules
    }

    pub fn events(&self) -> &EventBus<MapEvent> {
        &self.events
    }

    pub fn is_visible(&self, id: LayerId) -> bool {
        self.visible.contains(&id)
    }

    pub fn draw_order(&self) -> &[LayerId] {
        &self.draw_order
    }

    pub fn top_overlay(&self) -> Option<LayerId> {
        self.draw_order.last().copied()
    }

    pub fn overlay_name(&self, id: LayerId) -> Option<&str> {
        if id == self.earthquakes.id() {
            Some(self.earthquakes.name())
        } else if id == self.fault_lines.id() {
            Some(self.fault_lines.name())
        } else {
            None
        }
    }

    pub fn register(&mut self, rule: OverlayRule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// Radio-group selection. Returns `false` when already active.
    pub fn select_basemap(&mut self, basemap: Basemap) -> bool {
        if self.active_basemap == basemap {
            return false;
        }
        self.active_basemap = basemap;
        self.dispatch(MapEvent::BasemapChanged(basemap));
        true
    }

    /// Checkbox on. A newly shown overlay lands on top, then rules run.
    /// Returns `false` if the overlay was already visible or is unknown.
    pub fn add_overlay(&mut self, id: LayerId) -> bool {
        if self.overlay_name(id).is_none() || !self.visible.insert(id) {
            return false;
        }
        self.draw_order.push(id);
        self.dispatch(MapEvent::OverlayAdded(id));
        true
    }

    /// Checkbox off.
    pub fn remove_overlay(&mut self, id: LayerId) -> bool {
        if !self.visible.remove(&id) {
            return false;
        }
        self.draw_order.retain(|l| *l != id);
        self.dispatch(MapEvent::OverlayRemoved(id));
        true
    }

    /// Moves a visible overlay to the top of the draw order.
    pub fn bring_to_front(&mut self, id: LayerId) -> bool {
        let Some(pos) = self.draw_order.iter().position(|l| *l == id) else {
            return false;
        };
        let layer = self.draw_order.remove(pos);
        self.draw_order.push(layer);
        true
    }

    /// Records the event and applies every matching rule.
    pub fn dispatch(&mut self, event: MapEvent) {
        self.events.emit(event);
        if let MapEvent::OverlayAdded(added) = event {
            for rule in self.rules.clone() {
                match rule {
                    OverlayRule::RaiseOnOverlayAdded(target) => {
                        if self.bring_to_front(target) {
                            debug!(?added, ?target, "overlay added; raised layer");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MapConfig, MapEvent};
    use crate::basemap::Basemap;
    use crate::compose::compose_map;
    use formats::FaultLineGeometry;
    use layers::{LayerId, build_earthquake_layer, build_fault_line_layer};
    use pretty_assertions::assert_eq;

    fn view() -> super::MapView {
        compose_map(
            &MapConfig::default(),
            build_earthquake_layer(&[]),
            build_fault_line_layer(FaultLineGeometry::empty()),
        )
    }

    #[test]
    fn earthquakes_stay_on_top_when_fault_lines_toggled_back_on() {
        let mut map = view();
        assert!(map.remove_overlay(LayerId::FAULT_LINES));
        assert!(map.add_overlay(LayerId::FAULT_LINES));

        assert_eq!(map.draw_order(), [LayerId::FAULT_LINES, LayerId::EARTHQUAKES]);
        assert_eq!(map.top_overlay(), Some(LayerId::EARTHQUAKES));
    }

    #[test]
    fn toggle_order_does_not_matter() {
        let mut map = view();
        map.remove_overlay(LayerId::EARTHQUAKES);
        map.remove_overlay(LayerId::FAULT_LINES);
        assert!(map.draw_order().is_empty());

        map.add_overlay(LayerId::EARTHQUAKES);
        map.add_overlay(LayerId::FAULT_LINES);
        assert_eq!(map.top_overlay(), Some(LayerId::EARTHQUAKES));
    }

    #[test]
    fn hidden_earthquakes_are_not_resurrected() {
        let mut map = view();
        map.remove_overlay(LayerId::EARTHQUAKES);
        map.remove_overlay(LayerId::FAULT_LINES);
        map.add_overlay(LayerId::FAULT_LINES);

        assert!(!map.is_visible(LayerId::EARTHQUAKES));
        assert_eq!(map.draw_order(), [LayerId::FAULT_LINES]);
    }

    #[test]
    fn redundant_toggles_are_ignored() {
        let mut map = view();
        assert!(!map.add_overlay(LayerId::EARTHQUAKES));
        assert!(!map.add_overlay(LayerId(99)));
        assert!(!map.select_basemap(Basemap::StreetsSatellite));
        assert!(map.events().events().is_empty());
    }

    #[test]
    fn events_are_recorded_in_order() {
        let mut map = view();
        map.select_basemap(Basemap::Outdoors);
        map.remove_overlay(LayerId::FAULT_LINES);
        map.add_overlay(LayerId::FAULT_LINES);

        let events: Vec<MapEvent> = map.events().events().iter().map(|r| r.event).collect();
        assert_eq!(
            events,
            vec![
                MapEvent::BasemapChanged(Basemap::Outdoors),
                MapEvent::OverlayRemoved(LayerId::FAULT_LINES),
                MapEvent::OverlayAdded(LayerId::FAULT_LINES),
            ]
        );
        assert_eq!(map.active_basemap(), Basemap::Outdoors);
    }
}
