use layers::popup::escape_html;
use scene::MapDocument;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE: &str = r#"
html, body { height: 100%; margin: 0; padding: 0; }
.map-root { width: 100%; height: 100%; }
.info { padding: 6px 8px; font: 14px/16px Arial, Helvetica, sans-serif;
        background: rgba(255, 255, 255, 0.8); box-shadow: 0 0 15px rgba(0, 0, 0, 0.2);
        border-radius: 5px; }
.legend { line-height: 18px; color: #555; }
.legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.8; }
.load-error { font: 16px/1.4 Arial, Helvetica, sans-serif; margin: 3em auto; max-width: 40em; }
"#;

/// Browser side of `scene::OverlayRule::RaiseOnOverlayAdded`: after any
/// overlay is switched on, every id in `doc.raiseOnOverlayAdd` that is on the
/// map is brought to the front. `MapView::dispatch` applies the same rule.
const OVERLAY_RULES: &str = r#"
function raiseOnOverlayAdd(map, ids, overlayById) {
  ids.forEach(function (id) {
    var layer = overlayById[id].layer;
    if (map.hasLayer(layer)) { layer.bringToFront(); }
  });
}
"#;

/// Hands the map document to Leaflet. All styling decisions were made
/// server-side; this only instantiates what the document describes.
const BOOTSTRAP: &str = r#"
(function () {
  var doc = JSON.parse(document.getElementById("map-document").textContent);

  var basemapByKey = {};
  doc.basemaps.forEach(function (b) {
    basemapByKey[b.key] = {
      name: b.name,
      active: b.active,
      layer: L.tileLayer(b.urlTemplate, { attribution: b.attribution, maxZoom: b.maxZoom })
    };
  });

  // The popup ends in <p>time</p>, formatted in the server's zone.
  // Restate it in the viewer's zone when the time is known.
  function popupFor(m) {
    if (m.time === null) { return m.popup; }
    var head = m.popup.slice(0, m.popup.lastIndexOf("<p>"));
    return head + "<p>" + new Date(m.time).toString() + "</p>";
  }

  var overlayById = {};
  doc.overlays.forEach(function (o) {
    var layer;
    if (o.kind === "markers") {
      layer = L.featureGroup(o.markers.map(function (m) {
        return L.circleMarker(m.position, m.style).bindPopup(popupFor(m));
      }));
    } else {
      layer = L.geoJSON(o.geojson);
    }
    overlayById[o.id] = { name: o.name, layer: layer };
  });

  var initial = [];
  Object.keys(basemapByKey).forEach(function (key) {
    if (basemapByKey[key].active) { initial.push(basemapByKey[key].layer); }
  });
  doc.drawOrder.forEach(function (id) { initial.push(overlayById[id].layer); });

  var map = L.map(doc.elementId, { center: doc.center, zoom: doc.zoom, layers: initial });

  var legend = L.control({ position: doc.legend.position });
  legend.onAdd = function () {
    var div = L.DomUtil.create("div", doc.legend.className);
    div.innerHTML = doc.legend.html;
    return div;
  };
  legend.addTo(map);

  var baseMaps = {};
  doc.layerControl.basemaps.forEach(function (key) {
    baseMaps[basemapByKey[key].name] = basemapByKey[key].layer;
  });
  var overlayMaps = {};
  doc.layerControl.overlays.forEach(function (id) {
    overlayMaps[overlayById[id].name] = overlayById[id].layer;
  });
  L.control.layers(baseMaps, overlayMaps, { collapsed: doc.layerControl.collapsed }).addTo(map);

  map.on("overlayadd", function () {
    raiseOnOverlayAdd(map, doc.raiseOnOverlayAdd, overlayById);
  });
})();
"#;

/// JSON is embedded in a `<script>` element, so `</` must not appear verbatim.
fn script_safe_json(doc: &MapDocument) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(doc)?.replace("</", "<\\/"))
}

pub fn render_page(doc: &MapDocument) -> Result<String, serde_json::Error> {
    let json = script_safe_json(doc)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Earthquakes and Plate Boundaries</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<style>{STYLE}</style>
</head>
<body>
<div id="{element_id}" class="map-root"></div>
<script src="{LEAFLET_JS}"></script>
<script type="application/json" id="map-document">{json}</script>
<script>{OVERLAY_RULES}{BOOTSTRAP}</script>
</body>
</html>
"#,
        element_id = escape_html(&doc.element_id),
    ))
}

/// Shown instead of a map when a render pass fails.
pub fn render_error_page(stage: &str, detail: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Map unavailable</title>
<style>{STYLE}</style>
</head>
<body>
<div class="load-error">
<h1>Map unavailable</h1>
<p>Could not load the {stage}.</p>
<pre>{detail}</pre>
</div>
</body>
</html>
"#,
        stage = escape_html(stage),
        detail = escape_html(detail),
    )
}
