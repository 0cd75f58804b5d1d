use crate::model::Marker;
use crate::prelude::{AlignmentError, AlignmentResult, Projection, DEFAULT_MARKER_LIMIT};
use rand::Rng;
use std::f64::consts::PI;
use std::sync::Arc;

/// Disk in the planar frame inside which random markers are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskRegion {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl DiskRegion {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Radius 1 centred on the origin.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Disk centred on the planar centroid of `markers`, reaching the farthest one.
    pub fn enclosing(markers: &[Marker]) -> AlignmentResult<Self> {
        if markers.is_empty() {
            return Err(AlignmentError::InsufficientData(
                "cannot fit a region to an empty marker set".into(),
            ));
        }

        let count = markers.len() as f64;
        let center_x = markers.iter().map(|m| m.x).sum::<f64>() / count;
        let center_y = markers.iter().map(|m| m.y).sum::<f64>() / count;
        let radius = markers
            .iter()
            .map(|m| (m.x - center_x).hypot(m.y - center_y))
            .fold(0.0, f64::max);

        if !(center_x.is_finite() && center_y.is_finite() && radius.is_finite()) {
            return Err(AlignmentError::InvalidInput(
                "markers must have finite planar coordinates".into(),
            ));
        }
        Ok(Self::new(center_x, center_y, radius))
    }

    /// Draws one point with uniform area density.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let r = self.draw_radius(rng);
        let theta = rng.gen_range(0.0..2.0 * PI);
        (
            r * theta.cos() + self.center_x,
            r * theta.sin() + self.center_y,
        )
    }

    fn draw_radius<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let r2_max = self.radius * self.radius;
        if r2_max <= 0.0 {
            return 0.0;
        }
        // sqrt of a uniform r² keeps density proportional to r
        rng.gen_range(0.0..r2_max).sqrt()
    }
}

/// Places simulated markers inside a region and converts them to geographic
/// coordinates through the injected projection.
#[derive(Clone)]
pub struct RandomMarkerGenerator {
    region: DiskRegion,
    projection: Arc<dyn Projection>,
    limit: usize,
}

impl RandomMarkerGenerator {
    pub fn new(region: DiskRegion, projection: Arc<dyn Projection>) -> Self {
        Self {
            region,
            projection,
            limit: DEFAULT_MARKER_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn region(&self) -> DiskRegion {
        self.region
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Fails with [`AlignmentError::TooManyMarkers`] above the configured limit.
    pub fn check_count(&self, count: usize) -> AlignmentResult<()> {
        if count > self.limit {
            return Err(AlignmentError::TooManyMarkers {
                requested: count,
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> AlignmentResult<Vec<Marker>> {
        self.check_count(count)?;

        let markers = (0..count)
            .map(|index| {
                let (x, y) = self.region.sample_point(rng);
                Marker::from_planar(format!("Random {}", index), x, y, self.projection.as_ref())
            })
            .collect();
        Ok(markers)
    }
}

impl std::fmt::Debug for RandomMarkerGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomMarkerGenerator")
            .field("region", &self.region)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
