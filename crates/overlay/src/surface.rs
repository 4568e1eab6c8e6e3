use firedata::FireRecord;
use geoprim::LatLngBounds;

/// Capability set the controller needs from the host map.
///
/// `Marker` is an opaque handle returned when a record is rendered; the
/// controller holds handles in response order purely to remove them later.
pub trait MapSurface {
    type Marker;

    /// Render one fire record as a point marker with its popup attached.
    fn add_fire_marker(&mut self, record: &FireRecord) -> Self::Marker;

    /// Remove a previously added marker from the map.
    fn remove_marker(&mut self, marker: Self::Marker);

    /// Adjust pan/zoom so `bounds` is visible, grown by `pad_ratio` of its
    /// span on each side.
    fn fit_bounds(&mut self, bounds: LatLngBounds, pad_ratio: f64);
}
