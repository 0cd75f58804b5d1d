//! Monte Carlo significance engine for astronomical alignments between ground markers.
//!
//! Observed marker pairs are matched against target azimuths, and the count is
//! ranked against counts from random layouts drawn in the same region.

pub mod math;
pub mod model;
pub mod prelude;
pub mod processing;
pub mod projection;
pub mod telemetry;

pub use model::{AlignmentTarget, Marker, Match, PairOfMarkers};
pub use prelude::{AlignmentError, AlignmentResult, Projection, SimulationConfig};
