//! Bindings to the Leaflet glue module.
//!
//! The widget itself lives in `js/leaflet_glue.js`; this side only holds
//! opaque handles and adapts the `MapSurface` capability set onto them.

use wasm_bindgen::prelude::*;

use firedata::FireRecord;
use geoprim::LatLngBounds;
use overlay::{MapSurface, ViewportConfig};

#[wasm_bindgen(module = "/js/leaflet_glue.js")]
extern "C" {
    pub type JsMap;
    pub type JsMarker;

    fn map_create(
        center_lat: f64,
        center_lng: f64,
        zoom: u32,
        min_zoom: u32,
        max_zoom: u32,
        south: f64,
        west: f64,
        north: f64,
        east: f64,
        tile_url: String,
        attribution: String,
        no_wrap: bool,
    ) -> JsMap;

    fn marker_add(map: &JsMap, lat: f64, lng: f64, popup_html: String) -> JsMarker;

    fn marker_remove(map: &JsMap, marker: JsMarker);

    fn bounds_fit(map: &JsMap, south: f64, west: f64, north: f64, east: f64);
}

/// Opaque reference to one rendered marker, held only for later removal.
pub struct MarkerHandle(JsMarker);

pub struct LeafletSurface {
    map: JsMap,
}

impl LeafletSurface {
    pub fn create(config: &ViewportConfig) -> Self {
        let map = map_create(
            config.center.lat,
            config.center.lng,
            config.zoom as u32,
            config.min_zoom as u32,
            config.max_zoom as u32,
            config.max_bounds.south,
            config.max_bounds.west,
            config.max_bounds.north,
            config.max_bounds.east,
            config.tile_url.clone(),
            config.attribution.clone(),
            config.no_wrap,
        );
        LeafletSurface { map }
    }
}

impl MapSurface for LeafletSurface {
    type Marker = MarkerHandle;

    fn add_fire_marker(&mut self, record: &FireRecord) -> MarkerHandle {
        MarkerHandle(marker_add(
            &self.map,
            record.latitude,
            record.longitude,
            record.popup_html(),
        ))
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        marker_remove(&self.map, marker.0);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, pad_ratio: f64) {
        let padded = bounds.padded(pad_ratio);
        bounds_fit(&self.map, padded.south, padded.west, padded.north, padded.east);
    }
}
