pub mod marker;
pub mod pair;

pub use marker::{AlignmentTarget, Marker};
pub use pair::{Match, PairOfMarkers};
