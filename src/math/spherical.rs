use super::Point3;

/// Planetocentric coordinates of a Cartesian position.
///
/// Latitude is in `[-90, 90]` degrees, east longitude in `[0, 360)` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonRadius {
    /// Latitude in degrees.
    pub lat: f64,
    /// East longitude in degrees.
    pub lon: f64,
    /// Distance from the origin, in the position's length unit.
    pub radius: f64,
}

impl LatLonRadius {
    /// Converts a Cartesian position to latitude, longitude and radius.
    ///
    /// The origin maps to `(0, 0, 0)`.
    #[must_use]
    pub fn from_point(point: &Point3) -> Self {
        let radius = point.coords.norm();
        if radius == 0.0 {
            return Self {
                lat: 0.0,
                lon: 0.0,
                radius,
            };
        }

        let lat = (point.z / radius).clamp(-1.0, 1.0).asin().to_degrees();
        let mut lon = point.y.atan2(point.x).to_degrees();
        if lon < 0.0 {
            lon += 360.0;
        }
        // tiny negative angles round up to a full turn
        if lon >= 360.0 {
            lon = 0.0;
        }

        Self { lat, lon, radius }
    }
}
