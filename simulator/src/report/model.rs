use alignmentcore::math::planar_azimuth;
use alignmentcore::processing::{is_significant, SimulatedExample};
use alignmentcore::{AlignmentTarget, Match, PairOfMarkers};
use serde::{Deserialize, Serialize};

/// Ordered pair bearing, the input to the azimuth circle chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairRecord {
    pub from: String,
    pub to: String,
    pub azimuth: f64,
    /// Bearing in the projected frame, for comparison with the great-circle one.
    pub planar_azimuth: f64,
}

impl From<&PairOfMarkers<'_>> for PairRecord {
    fn from(pair: &PairOfMarkers<'_>) -> Self {
        let (first, second) = (pair.marker1, pair.marker2);
        Self {
            from: first.name.clone(),
            to: second.name.clone(),
            azimuth: pair.azimuth,
            planar_azimuth: planar_azimuth(first.x, first.y, second.x, second.y),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    pub from: String,
    pub to: String,
    pub from_xy: (f64, f64),
    pub to_xy: (f64, f64),
    pub azimuth: f64,
    pub category: String,
    pub target: String,
    pub target_azimuth: f64,
    /// Pair bearing minus target azimuth, degrees.
    pub offset: f64,
}

impl From<&Match<'_>> for MatchRecord {
    fn from(found: &Match<'_>) -> Self {
        let pair = &found.pair;
        Self {
            from: pair.marker1.name.clone(),
            to: pair.marker2.name.clone(),
            from_xy: (pair.marker1.x, pair.marker1.y),
            to_xy: (pair.marker2.x, pair.marker2.y),
            azimuth: pair.azimuth,
            category: found.target.category.clone(),
            target: found.target.name.clone(),
            target_azimuth: found.target.azimuth,
            offset: found.offset(),
        }
    }
}

/// A retained simulated layout with the matches it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleRecord {
    #[serde(flatten)]
    pub example: SimulatedExample,
    pub matches: Vec<MatchRecord>,
}

/// Outcome for one angle tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceReport {
    pub tolerance: f64,
    pub marker_count: usize,
    pub observed_alignments: usize,
    pub observed_matches: Vec<MatchRecord>,
    pub trials: usize,
    pub seed: u64,
    pub p_value: f64,
    pub significant: bool,
    /// Sorted simulated match counts.
    pub distribution: Vec<usize>,
    pub examples: Vec<ExampleRecord>,
}

impl ToleranceReport {
    pub fn new(
        tolerance: f64,
        marker_count: usize,
        observed_matches: Vec<MatchRecord>,
        distribution: Vec<usize>,
        p_value: f64,
        seed: u64,
        examples: Vec<ExampleRecord>,
    ) -> Self {
        Self {
            tolerance,
            marker_count,
            observed_alignments: observed_matches.len(),
            observed_matches,
            trials: distribution.len(),
            seed,
            p_value,
            significant: is_significant(p_value),
            distribution,
            examples,
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "The p-value for {} alignments on {} markers is {:.5} (angle tolerance {} deg)",
            self.observed_alignments, self.marker_count, self.p_value, self.tolerance
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SignificanceReport {
    pub data_file: String,
    pub dedup: bool,
    pub targets: Vec<AlignmentTarget>,
    pub pairs: Vec<PairRecord>,
    pub tolerances: Vec<ToleranceReport>,
}

impl SignificanceReport {
    pub fn summary_lines(&self) -> Vec<String> {
        self.tolerances.iter().map(ToleranceReport::summary_line).collect()
    }
}
