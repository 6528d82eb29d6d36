use std::collections::BTreeSet;

use layers::{EarthquakeLayer, FaultLineLayer, Layer};
use runtime::EventBus;
use tracing::info;

use crate::basemap::Basemap;
use crate::controls::{LayerControl, LegendControl};
use crate::map::{MapConfig, MapView, OverlayRule};

/// Assembles the map: three basemaps from one provider, both overlays shown
/// (fault lines below earthquakes), the magnitude legend, an expanded layer
/// control, and the rule that keeps earthquakes on top.
pub fn compose_map(
    config: &MapConfig,
    earthquakes: EarthquakeLayer,
    fault_lines: FaultLineLayer,
) -> MapView {
    let basemaps = Basemap::ALL
        .iter()
        .map(|&b| config.provider.tile_layer(b, config.access_token.as_deref()))
        .collect();

    let layer_control = LayerControl::expanded(
        Basemap::CONTROL_ORDER.to_vec(),
        vec![
            (earthquakes.name().to_string(), earthquakes.id()),
            (fault_lines.name().to_string(), fault_lines.id()),
        ],
    );

    let draw_order = vec![fault_lines.id(), earthquakes.id()];
    let visible: BTreeSet<_> = draw_order.iter().copied().collect();

    info!(
        earthquakes = earthquakes.feature_count(),
        fault_lines = fault_lines.feature_count(),
        basemap = config.initial_basemap.tileset(),
        "composed map"
    );

    let mut view = MapView {
        center: config.center,
        zoom: config.zoom,
        element_id: config.element_id.clone(),
        basemaps,
        active_basemap: config.initial_basemap,
        rules: Vec::new(),
        events: EventBus::new(),
        legend: LegendControl::magnitude(),
        layer_control,
        visible,
        draw_order,
        earthquakes,
        fault_lines,
    };
    let raised = view.earthquakes.id();
    view.register(OverlayRule::RaiseOnOverlayAdded(raised));
    view
}
