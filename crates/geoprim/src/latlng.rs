/// Geographic coordinate in degrees, WGS84.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Latitude limits of the plate-carree world rectangle (degrees).
pub const WORLD_LAT_MIN: f64 = -90.0;
pub const WORLD_LAT_MAX: f64 = 90.0;
/// Longitude limits of the plate-carree world rectangle (degrees).
pub const WORLD_LNG_MIN: f64 = -180.0;
pub const WORLD_LNG_MAX: f64 = 180.0;

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// Clamp into the world rectangle. Out-of-range input is a data error
    /// upstream; this keeps viewport math finite regardless.
    pub fn clamped(self) -> Self {
        LatLng {
            lat: self.lat.clamp(WORLD_LAT_MIN, WORLD_LAT_MAX),
            lng: self.lng.clamp(WORLD_LNG_MIN, WORLD_LNG_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LatLng;

    #[test]
    fn clamps_into_world_rectangle() {
        let p = LatLng::new(95.0, -200.0).clamped();
        assert_eq!(p.lat, 90.0);
        assert_eq!(p.lng, -180.0);
    }

    #[test]
    fn clamp_leaves_valid_points_alone() {
        let p = LatLng::new(34.1, -118.3).clamped();
        assert_eq!(p, LatLng::new(34.1, -118.3));
    }
}
