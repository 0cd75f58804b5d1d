pub mod generator;
pub mod matcher;
pub mod significance;
pub mod triplets;

pub use generator::{DiskRegion, RandomMarkerGenerator};
pub use matcher::{all_pairs, AlignmentMatcher};
pub use significance::{
    is_significant, EmpiricalDistribution, SignificanceEngine, SimulatedExample, SimulationOutcome,
};
pub use triplets::{AngleTriplet, TripletSampler};
