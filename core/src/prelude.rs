use serde::{Deserialize, Serialize};

/// Default cap on simulated marker count; pairwise matching is O(N²).
pub const DEFAULT_MARKER_LIMIT: usize = 50;

/// Conventional significance threshold.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Shared configuration for a Monte Carlo run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of simulated marker layouts.
    pub trials: usize,
    /// How many simulated layouts to keep for inspection.
    pub examples: usize,
    /// Base seed; trial `k` draws from `seed + k`. `None` picks one at random.
    pub seed: Option<u64>,
    /// Worker threads; `None` uses the rayon default.
    pub workers: Option<usize>,
    /// Progress cadence in completed trials; 0 disables progress callbacks.
    pub progress_every: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            examples: 1,
            seed: None,
            workers: None,
            progress_every: 1000,
        }
    }
}

/// Common error type for the alignment core.
#[derive(thiserror::Error, Debug)]
pub enum AlignmentError {
    #[error("requested {requested} simulated markers, limit is {limit}")]
    TooManyMarkers { requested: usize, limit: usize },
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("simulation cancelled after {completed} trials")]
    Cancelled { completed: usize },
    #[error("worker pool failure: {0}")]
    WorkerPool(String),
}

pub type AlignmentResult<T> = Result<T, AlignmentError>;

/// Conversion between geographic coordinates and a planar reference frame.
///
/// Random layouts are drawn in the planar frame and converted back before
/// azimuths are computed, the same way observed markers are loaded.
pub trait Projection: Send + Sync {
    /// Geographic (degrees) to planar.
    fn project(&self, lat: f64, lon: f64) -> (f64, f64);
    /// Planar to geographic (degrees), returned as `(lat, lon)`.
    fn unproject(&self, x: f64, y: f64) -> (f64, f64);

    /// Whether `(lat, lon)` lies inside the projection's domain.
    fn covers(&self, lat: f64, lon: f64) -> bool {
        (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
    }
}

/// Callback invoked while a simulation is running.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, completed: usize, total: usize);
}
