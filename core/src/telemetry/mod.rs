pub mod log;
pub mod metrics;
pub mod progress;

pub use self::log::LogManager;
pub use metrics::TrialCounter;
pub use progress::LogProgress;
