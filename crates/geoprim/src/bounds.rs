use crate::latlng::{LatLng, WORLD_LAT_MAX, WORLD_LAT_MIN, WORLD_LNG_MAX, WORLD_LNG_MIN};

/// Axis-aligned geographic rectangle, degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        LatLngBounds {
            south,
            west,
            north,
            east,
        }
    }

    /// The full plate-carree world rectangle.
    pub fn world() -> Self {
        LatLngBounds::new(WORLD_LAT_MIN, WORLD_LNG_MIN, WORLD_LAT_MAX, WORLD_LNG_MAX)
    }

    /// Degenerate bounds containing a single point.
    pub fn of_point(p: LatLng) -> Self {
        LatLngBounds::new(p.lat, p.lng, p.lat, p.lng)
    }

    /// Smallest bounds containing every point, or `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = LatLngBounds::of_point(first);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.west = self.west.min(p.lng);
        self.north = self.north.max(p.lat);
        self.east = self.east.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Grow each side by `ratio` of the corresponding span, then clamp to the
    /// world rectangle. A degenerate single-point bounds has zero span and
    /// passes through unchanged; the viewport falls back to its minimum zoom
    /// margin in that case.
    pub fn padded(&self, ratio: f64) -> Self {
        let lat_pad = (self.north - self.south) * ratio;
        let lng_pad = (self.east - self.west) * ratio;
        LatLngBounds {
            south: (self.south - lat_pad).max(WORLD_LAT_MIN),
            west: (self.west - lng_pad).max(WORLD_LNG_MIN),
            north: (self.north + lat_pad).min(WORLD_LAT_MAX),
            east: (self.east + lng_pad).min(WORLD_LNG_MAX),
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }
}
