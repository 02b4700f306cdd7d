//! Rendering seam between the composed document and map output.
//!
//! [`MapRenderer`] is the only thing composition knows about rendering.
//! [`LeafletRenderer`] is the bundled implementation: a standalone HTML page
//! that embeds the document as JSON and draws it with Leaflet.

use std::fs;
use std::path::Path;

use html_escape::encode_text;
use log::info;

use crate::error::{ComposeError, Result};
use crate::layers::MapDocument;

/// Turns a composed document into the bytes of one output file.
pub trait MapRenderer {
    fn render(&self, doc: &MapDocument) -> Result<String>;
}

/// Standalone Leaflet page with an uncollapsed layer control.
#[derive(Debug, Clone)]
pub struct LeafletRenderer {
    pub title: String,
}

impl Default for LeafletRenderer {
    fn default() -> Self {
        Self {
            title: "City map".to_string(),
        }
    }
}

impl MapRenderer for LeafletRenderer {
    fn render(&self, doc: &MapDocument) -> Result<String> {
        // "</" inside a <script> block would end it early
        let json = serde_json::to_string(doc)?.replace("</", "<\\/");
        let title = encode_text(&self.title);
        Ok(fill_template(
            LEAFLET_TEMPLATE,
            &[("__TITLE__", &*title), ("__DOCUMENT__", json.as_str())],
        ))
    }
}

/// Render `doc` and write it to `path`.
pub fn write_map(renderer: &dyn MapRenderer, doc: &MapDocument, path: &Path) -> Result<()> {
    let html = renderer.render(doc)?;
    fs::write(path, html).map_err(|e| ComposeError::io(path, e))?;
    info!("[render] saved {} ({} layers)", path.display(), doc.layers().len());
    Ok(())
}

/// Replace each placeholder of `template` with its value in one pass.
///
/// Substituted values are never scanned again, so user text that happens to
/// contain a placeholder is kept as written.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((at, key, value)) = values
        .iter()
        .filter_map(|&(key, value)| rest.find(key).map(|at| (at, key, value)))
        .min_by_key(|&(at, _, _)| at)
    {
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + key.len()..];
    }
    out.push_str(rest);
    out
}

const LEAFLET_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>__TITLE__</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
  <style>
    html, body, #map { height: 100%; margin: 0; }
    .start-icon div { width: 12px; height: 12px; border-radius: 6px; border: 2px solid #fff; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const doc = __DOCUMENT__;
    const esc = (s) => String(s).replace(/[&<>"']/g, (c) =>
      ({ "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#39;" })[c]);
    const ll = (p) => [p.latitude, p.longitude];

    const map = L.map("map").setView(ll(doc.center), doc.zoom_start);
    const base = L.tileLayer(doc.tiles.url, {
      attribution: doc.tiles.attribution,
      subdomains: "abcd",
      maxZoom: 20,
    }).addTo(map);

    function marker(m) {
      let mk;
      if (m.style.type === "circle") {
        mk = L.circleMarker(ll(m.position), {
          radius: m.style.radius,
          fill: true,
          fillOpacity: m.style.fill_opacity,
        });
      } else if (m.style.type === "icon") {
        mk = L.marker(ll(m.position), {
          icon: L.divIcon({
            className: "start-icon",
            html: '<div style="background:' + esc(m.style.color) + '" title="' + esc(m.style.icon) + '"></div>',
          }),
        });
      } else {
        mk = L.marker(ll(m.position));
      }
      if (m.tooltip) mk.bindTooltip(esc(m.tooltip));
      if (m.popup) {
        const html = ["<b>" + esc(m.popup.title) + "</b>"].concat(m.popup.lines.map(esc)).join("<br>");
        mk.bindPopup(html, { maxWidth: 260 });
      }
      return mk;
    }

    const overlays = {};
    for (const layer of doc.layers) {
      const group = L.layerGroup();
      if (layer.kind === "polyline") {
        const line = L.polyline(layer.points.map(ll), {
          color: layer.color,
          weight: layer.weight,
          opacity: layer.opacity,
        });
        if (layer.tooltip) line.bindTooltip(esc(layer.tooltip));
        line.addTo(group);
        if (layer.start_marker) marker(layer.start_marker).addTo(group);
      } else if (layer.kind === "marker_group") {
        layer.markers.forEach((m) => marker(m).addTo(group));
      } else if (layer.kind === "heatmap") {
        L.heatLayer(layer.samples.map((s) => [s.latitude, s.longitude, s.weight]), {
          radius: layer.style.radius,
          blur: layer.style.blur,
          maxZoom: layer.style.max_zoom,
        }).addTo(group);
      }
      group.addTo(map);
      overlays[esc(layer.name)] = group;
    }

    L.control.layers({ [esc(doc.tiles.name)]: base }, overlays, { collapsed: false }).addTo(map);
  </script>
</body>
</html>
"#;
