use crate::model::{AlignmentTarget, Marker, Match, PairOfMarkers};
use crate::prelude::{AlignmentError, AlignmentResult};
use std::collections::HashSet;

/// Finds marker pairs whose bearing lies within a tolerance of any target.
#[derive(Debug, Clone)]
pub struct AlignmentMatcher {
    targets: Vec<AlignmentTarget>,
    tolerance: f64,
    dedup: bool,
}

impl AlignmentMatcher {
    /// `tolerance` is in degrees; with `dedup` each unordered pair counts once.
    pub fn new(
        targets: Vec<AlignmentTarget>,
        tolerance: f64,
        dedup: bool,
    ) -> AlignmentResult<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(AlignmentError::InvalidInput(format!(
                "tolerance must be a non-negative number of degrees, got {}",
                tolerance
            )));
        }
        for target in &targets {
            target.validate()?;
        }

        Ok(Self {
            targets,
            tolerance,
            dedup,
        })
    }

    pub fn targets(&self) -> &[AlignmentTarget] {
        &self.targets
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn dedup(&self) -> bool {
        self.dedup
    }

    /// Matches over every ordered pair, in row-major order.
    ///
    /// The comparison is a strict `<` on the raw difference, so a bearing
    /// exactly `tolerance` away does not match and bearings do not wrap at north.
    pub fn find_matches<'a>(&'a self, markers: &'a [Marker]) -> Vec<Match<'a>> {
        let mut matches = Vec::new();
        for pair in all_pairs(markers) {
            for target in &self.targets {
                if (target.azimuth - pair.azimuth).abs() < self.tolerance {
                    matches.push(Match::new(pair, target));
                }
            }
        }

        if self.dedup {
            let mut seen = HashSet::new();
            matches.retain(|m| seen.insert(m.unique_pair()));
        }
        matches
    }

    pub fn count_matches(&self, markers: &[Marker]) -> usize {
        self.find_matches(markers).len()
    }
}

/// Every ordered pair `(i, j)` with `i != j`, with its bearing.
pub fn all_pairs(markers: &[Marker]) -> Vec<PairOfMarkers<'_>> {
    let mut pairs = Vec::with_capacity(markers.len() * markers.len().saturating_sub(1));
    for (i, first) in markers.iter().enumerate() {
        for (j, second) in markers.iter().enumerate() {
            if i == j {
                continue;
            }
            pairs.push(PairOfMarkers::new(first, second));
        }
    }
    pairs
}
