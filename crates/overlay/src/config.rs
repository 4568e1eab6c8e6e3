use geoprim::{LatLng, LatLngBounds};

/// Construction-time configuration for the host map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Panning is clamped to this rectangle.
    pub max_bounds: LatLngBounds,
    pub tile_url: String,
    pub attribution: String,
    /// Do not repeat the base layer horizontally across the antimeridian.
    pub no_wrap: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            // Geographic center of the contiguous United States; the fire
            // feed covers the USA.
            center: LatLng::new(39.8283, -98.5795),
            zoom: 4,
            min_zoom: 2,
            max_zoom: 18,
            max_bounds: LatLngBounds::world(),
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            no_wrap: true,
        }
    }
}
