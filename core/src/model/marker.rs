use crate::prelude::{AlignmentError, AlignmentResult, Projection};
use serde::{Deserialize, Serialize};

/// A fixed ground marker with planar and geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl Marker {
    pub fn new(x: f64, y: f64, lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            lat,
            lon,
            name: name.into(),
        }
    }

    /// Builds a marker from geographic coordinates, filling the planar ones.
    pub fn from_geographic(
        name: impl Into<String>,
        lat: f64,
        lon: f64,
        projection: &dyn Projection,
    ) -> Self {
        let (x, y) = projection.project(lat, lon);
        Self::new(x, y, lat, lon, name)
    }

    /// Builds a marker from planar coordinates, filling the geographic ones.
    pub fn from_planar(
        name: impl Into<String>,
        x: f64,
        y: f64,
        projection: &dyn Projection,
    ) -> Self {
        let (lat, lon) = projection.unproject(x, y);
        Self::new(x, y, lat, lon, name)
    }
}

/// A direction of astronomical interest, e.g. the June solstice sunrise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentTarget {
    pub category: String,
    pub name: String,
    /// Degrees clockwise from geographic north, in `[0, 360)`.
    pub azimuth: f64,
}

impl AlignmentTarget {
    pub fn new(category: impl Into<String>, name: impl Into<String>, azimuth: f64) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            azimuth,
        }
    }

    pub fn label(&self) -> String {
        format!("{}:{}", self.category, self.name)
    }

    pub fn validate(&self) -> AlignmentResult<()> {
        if !(0.0..360.0).contains(&self.azimuth) {
            return Err(AlignmentError::InvalidInput(format!(
                "target {} azimuth {} outside [0, 360)",
                self.label(),
                self.azimuth
            )));
        }
        Ok(())
    }
}
