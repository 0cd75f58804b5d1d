use crate::math::angles::deg2rad;
use crate::prelude::Projection;
use std::f64::consts::FRAC_PI_4;

/// Semi-major axis used by EPSG:3857, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude bound of the EPSG:3857 square, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Spherical Web Mercator (EPSG:4326 <-> EPSG:3857).
///
/// Unclamped: latitudes beyond [`MAX_LATITUDE`] still project, but the poles
/// map to non-finite `y`. Use [`Projection::covers`] to filter input.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    radius: f64,
}

impl WebMercator {
    pub fn new() -> Self {
        Self {
            radius: EARTH_RADIUS_M,
        }
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for WebMercator {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = self.radius * deg2rad(lon);
        let y = self.radius * (FRAC_PI_4 + deg2rad(lat) / 2.0).tan().ln();
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = (x / self.radius).to_degrees();
        let lat = (2.0 * (y / self.radius).exp().atan() - 2.0 * FRAC_PI_4).to_degrees();
        (lat, lon)
    }

    fn covers(&self, lat: f64, lon: f64) -> bool {
        lat.abs() <= MAX_LATITUDE && (-180.0..=180.0).contains(&lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_origin() {
        let (x, y) = WebMercator::new().project(0.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn known_point_matches_epsg_3857() {
        // lon 180 sits on the edge of the projected square
        let (x, _) = WebMercator::new().project(0.0, 180.0);
        assert!((x - 20_037_508.342789244).abs() < 1e-3);
    }

    #[test]
    fn domain_stops_short_of_the_poles() {
        let projection = WebMercator::new();
        assert!(projection.covers(-11.9, -76.6));
        assert!(projection.covers(MAX_LATITUDE, 180.0));
        assert!(!projection.covers(-90.0, -76.6));
        assert!(!projection.covers(95.0, 0.0));
        assert!(!projection.covers(0.0, 181.0));
        assert!(!projection.project(-90.0, 0.0).1.is_finite());

        let (_, edge) = projection.project(MAX_LATITUDE, 0.0);
        assert!((edge - 20_037_508.342789244).abs() < 1.0);
    }

    #[test]
    fn unproject_inverts_project() {
        let projection = WebMercator::new();
        for &(lat, lon) in &[(-11.9, -76.6), (51.5, -0.12), (0.0, 0.0), (70.0, 140.0)] {
            let (x, y) = projection.project(lat, lon);
            let (lat_back, lon_back) = projection.unproject(x, y);
            assert!((lat - lat_back).abs() < 1e-9);
            assert!((lon - lon_back).abs() < 1e-9);
        }
    }
}
