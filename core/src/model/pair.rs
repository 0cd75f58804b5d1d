use crate::math::geodesy::azimuth;
use crate::model::marker::{AlignmentTarget, Marker};

/// Two distinct markers and the great-circle bearing from the first to the second.
#[derive(Debug, Clone, Copy)]
pub struct PairOfMarkers<'a> {
    pub marker1: &'a Marker,
    pub marker2: &'a Marker,
    pub azimuth: f64,
}

impl<'a> PairOfMarkers<'a> {
    pub fn new(marker1: &'a Marker, marker2: &'a Marker) -> Self {
        let azimuth = azimuth(marker1.lat, marker1.lon, marker2.lat, marker2.lon);
        Self {
            marker1,
            marker2,
            azimuth,
        }
    }

    /// Order-independent key: both names sorted and joined.
    ///
    /// Assumes names are unique within a marker set.
    pub fn unique_key(&self) -> String {
        let (first, second) = if self.marker1.name <= self.marker2.name {
            (&self.marker1.name, &self.marker2.name)
        } else {
            (&self.marker2.name, &self.marker1.name)
        };
        format!("{} and {}", first, second)
    }
}

/// A pair whose bearing lies within tolerance of a target.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub pair: PairOfMarkers<'a>,
    pub target: &'a AlignmentTarget,
}

impl<'a> Match<'a> {
    pub fn new(pair: PairOfMarkers<'a>, target: &'a AlignmentTarget) -> Self {
        Self { pair, target }
    }

    pub fn unique_pair(&self) -> String {
        self.pair.unique_key()
    }

    /// Signed offset of the pair bearing from the target, degrees.
    pub fn offset(&self) -> f64 {
        self.pair.azimuth - self.target.azimuth
    }
}
