use crate::geo::classify::Category;
use crate::geo::BoundingBox;
use crate::templates::{desktop_layout, legend_swatch};
use maud::{html, Markup, PreEscaped};
use serde_json::json;

pub struct LayerStyle {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    /// Which feed the layer is drawn from.
    pub source: &'static str,
}

pub const LAYERS: [LayerStyle; 4] = [
    LayerStyle {
        category: Category::Nightclub,
        label: "Nightclubs",
        color: "#e63946",
        source: "pois",
    },
    LayerStyle {
        category: Category::Gym,
        label: "Gyms",
        color: "#2a9d8f",
        source: "pois",
    },
    LayerStyle {
        category: Category::MartialArts,
        label: "BJJ academies",
        color: "#6a4c93",
        source: "pois",
    },
    LayerStyle {
        category: Category::Studio,
        label: "Studio apartments",
        color: "#f4a261",
        source: "studios",
    },
];

pub struct MapVm {
    pub mapbox_token: Option<String>,
    pub bbox: BoundingBox,
}

const MAP_CSS: &str = r##"
.map-wrapper { display: flex; gap: 1rem; }
.map-sidebar { width: 16rem; flex-shrink: 0; }
.map-sidebar label { display: block; margin: 0.35rem 0; }
#map { flex: 1; height: 70vh; border-radius: 8px; }
.legend-swatch { display: inline-block; width: 12px; height: 12px; border-radius: 50%; }
#map-status { color: #b91c1c; }
"##;

// Two GeoJSON sources (pois, studios), one circle layer per category,
// checkbox toggles, click popups.
const MAP_JS: &str = r##"
(function () {
  const el = document.getElementById("map");
  if (!el || !window.mapboxgl) return;

  mapboxgl.accessToken = el.dataset.token;
  const layers = JSON.parse(el.dataset.layers);
  const status = document.getElementById("map-status");
  const map = new mapboxgl.Map({
    container: el,
    style: "mapbox://styles/mapbox/streets-v12",
    center: JSON.parse(el.dataset.center),
    zoom: 13
  });

  const escapeHtml = (s) =>
    String(s ?? "").replace(/[&<>"']/g, (c) =>
      ({ "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#39;" })[c]);

  const load = (name) =>
    fetch("/api/" + name).then((r) =>
      r.json().then((body) => {
        if (!r.ok || body.error) throw new Error(body.details || body.error || r.status);
        return body;
      }));

  const showPopup = (f) => {
    const p = f.properties || {};
    let body = "<strong>" + escapeHtml(p.name) + "</strong>";
    if (p.description) body += "<p>" + escapeHtml(p.description) + "</p>";
    body += "<p><em>" + escapeHtml(p.category) + "</em></p>";
    if (p.category === "studio") {
      const price = p.price === undefined || p.price === null || p.price === "null"
        ? "Contact for pricing"
        : "$" + Number(p.price).toLocaleString();
      body += "<p>" + escapeHtml(price) + "</p>";
      if (p.address) body += "<p>" + escapeHtml(p.address) + "</p>";
      if (p.url && p.url !== "null") body += '<p><a href="' + escapeHtml(p.url) + '" target="_blank" rel="noopener">Listing</a></p>';
    }
    new mapboxgl.Popup({ offset: 12 })
      .setLngLat(f.geometry.coordinates.slice())
      .setHTML(body)
      .addTo(map);
  };

  map.on("load", () => {
    for (const name of ["pois", "studios"]) {
      map.addSource(name, { type: "geojson", data: { type: "FeatureCollection", features: [] } });
      load(name)
        .then((data) => map.getSource(name).setData(data))
        .catch((err) => { status.textContent = "Could not load " + name + ": " + err.message; });
    }

    for (const layer of layers) {
      const id = "layer-" + layer.category;
      map.addLayer({
        id,
        type: "circle",
        source: layer.source,
        filter: ["==", ["get", "category"], layer.category],
        paint: {
          "circle-color": layer.color,
          "circle-radius": 8,
          "circle-stroke-color": "#fff",
          "circle-stroke-width": 1
        }
      });
      map.on("click", id, (e) => showPopup(e.features[0]));
      map.on("mouseenter", id, () => { map.getCanvas().style.cursor = "pointer"; });
      map.on("mouseleave", id, () => { map.getCanvas().style.cursor = ""; });
    }
  });

  document.querySelectorAll("input[data-layer]").forEach((box) => {
    box.addEventListener("change", () => {
      const id = "layer-" + box.dataset.layer;
      if (map.getLayer(id)) map.setLayoutProperty(id, "visibility", box.checked ? "visible" : "none");
    });
  });
})();
"##;

fn layers_json() -> String {
    let layers: Vec<_> = LAYERS
        .iter()
        .map(|l| json!({ "category": l.category.as_str(), "color": l.color, "source": l.source }))
        .collect();
    serde_json::Value::from(layers).to_string()
}

fn center_json(bbox: &BoundingBox) -> String {
    let lon = (bbox.west + bbox.east) / 2.0;
    let lat = (bbox.south + bbox.north) / 2.0;
    json!([lon, lat]).to_string()
}

pub fn map_page(vm: &MapVm) -> Markup {
    let head = html! {
        style { (PreEscaped(MAP_CSS)) }
        @if vm.mapbox_token.is_some() {
            link rel="stylesheet" href="https://api.mapbox.com/mapbox-gl-js/v3.3.0/mapbox-gl.css";
            script src="https://api.mapbox.com/mapbox-gl-js/v3.3.0/mapbox-gl.js" {}
        }
    };

    desktop_layout(
        "Location Explorer",
        head,
        html! {
            main class="container" {
                p { a href="/dashboard" { "← Back to Dashboard" } }
                h1 { "Location Explorer" }
                p class="muted" { "Explore nightclubs, gyms, and BJJ dojos in downtown Chicago." }

                div class="map-wrapper" {
                    aside class="map-sidebar card" {
                        h3 { "Layers" }
                        @for layer in &LAYERS {
                            label {
                                input type="checkbox" checked data-layer=(layer.category.as_str());
                                " " (layer.label)
                            }
                        }

                        div class="legend" {
                            @for layer in &LAYERS {
                                (legend_swatch(layer.color, layer.label))
                            }
                        }
                        p id="map-status" {}
                    }

                    @match &vm.mapbox_token {
                        Some(token) => {
                            div
                                id="map"
                                data-token=(token)
                                data-center=(center_json(&vm.bbox))
                                data-layers=(layers_json())
                            {}
                            script { (PreEscaped(MAP_JS)) }
                        }
                        None => {
                            div class="card" {
                                p { "Map unavailable: set MAPBOX_TOKEN to enable it." }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_wires_both_feeds_and_all_layers() {
        let page = map_page(&MapVm {
            mapbox_token: Some("pk.test".into()),
            bbox: BoundingBox::DOWNTOWN_CHICAGO,
        })
        .into_string();

        assert!(page.contains("data-token=\"pk.test\""));
        assert!(page.contains("\"/api/\" + name"));
        for layer in &LAYERS {
            assert!(page.contains(&format!("data-layer=\"{}\"", layer.category.as_str())));
            assert!(page.contains(layer.color));
        }
    }

    #[test]
    fn page_without_token_skips_map_script() {
        let page = map_page(&MapVm {
            mapbox_token: None,
            bbox: BoundingBox::DOWNTOWN_CHICAGO,
        })
        .into_string();

        assert!(page.contains("set MAPBOX_TOKEN"));
        assert!(!page.contains("mapbox-gl.js"));
    }

    #[test]
    fn center_is_bbox_midpoint_lon_first() {
        let center: Vec<f64> =
            serde_json::from_str(&center_json(&BoundingBox::DOWNTOWN_CHICAGO)).unwrap();
        assert!((center[0] - -87.64).abs() < 1e-9);
        assert!((center[1] - 41.885).abs() < 1e-9);
    }
}
