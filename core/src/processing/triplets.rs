use crate::math::geodesy::planar_angle;
use crate::processing::generator::DiskRegion;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Three directed edge angles of a random triangle, radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleTriplet {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Samples triangles inside a disk and records the angles of their edges.
///
/// Each edge can be read in either direction, so one triangle yields the eight
/// combinations of `(0→1 | 1→0, 1→2 | 2→1, 2→0 | 0→2)`.
#[derive(Debug, Clone, Copy)]
pub struct TripletSampler {
    region: DiskRegion,
}

impl TripletSampler {
    pub const PER_TRIANGLE: usize = 8;

    pub fn new(region: DiskRegion) -> Self {
        Self { region }
    }

    pub fn sample<R: Rng + ?Sized>(&self, triangles: usize, rng: &mut R) -> Vec<AngleTriplet> {
        let mut triplets = Vec::with_capacity(triangles * Self::PER_TRIANGLE);
        for _ in 0..triangles {
            let corners = [
                self.region.sample_point(rng),
                self.region.sample_point(rng),
                self.region.sample_point(rng),
            ];
            triplets.extend(Self::edge_triplets(&corners));
        }
        triplets
    }

    pub fn edge_triplets(corners: &[(f64, f64); 3]) -> Vec<AngleTriplet> {
        // [forward, backward] angle for each edge i -> i+1
        let edges: Vec<[f64; 2]> = (0..3)
            .map(|i| {
                let (xi, yi) = corners[i];
                let (xj, yj) = corners[(i + 1) % 3];
                [planar_angle(xi, yi, xj, yj), planar_angle(xj, yj, xi, yi)]
            })
            .collect();

        let mut triplets = Vec::with_capacity(Self::PER_TRIANGLE);
        for &z in &edges[2] {
            for &y in &edges[1] {
                for &x in &edges[0] {
                    triplets.push(AngleTriplet { x, y, z });
                }
            }
        }
        triplets
    }
}

impl Default for TripletSampler {
    fn default() -> Self {
        Self::new(DiskRegion::unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn right_triangle_edge_angles() {
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        let triplets = TripletSampler::edge_triplets(&corners);
        assert_eq!(triplets.len(), 8);

        let first = triplets[0];
        assert!(first.x.abs() < 1e-12);
        assert!((first.y - FRAC_PI_2).abs() < 1e-12);
        assert!((first.z + 3.0 * PI / 4.0).abs() < 1e-12);

        // x alternates fastest, z slowest
        assert!((triplets[1].x - PI).abs() < 1e-12);
        assert!((triplets[2].y + FRAC_PI_2).abs() < 1e-12);
        assert!((triplets[4].z - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn sampler_emits_eight_triplets_per_triangle() {
        let sampler = TripletSampler::default();
        let mut rng = StdRng::seed_from_u64(5);
        let triplets = sampler.sample(25, &mut rng);
        assert_eq!(triplets.len(), 25 * TripletSampler::PER_TRIANGLE);
        for t in &triplets {
            for angle in [t.x, t.y, t.z] {
                assert!(angle > -PI - 1e-12 && angle <= PI + 1e-12);
            }
        }
    }
}
