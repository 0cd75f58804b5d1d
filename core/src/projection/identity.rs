use crate::prelude::Projection;

/// Treats longitude as `x` and latitude as `y`, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjection;

impl Projection for IdentityProjection {
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        (lon, lat)
    }

    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        (y, x)
    }
}
