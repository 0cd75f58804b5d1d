use crate::prelude::ProgressObserver;
use crate::telemetry::log::LogManager;

/// Progress observer that writes `iteration i / n` lines to the log.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    logger: LogManager,
}

impl LogProgress {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("simulation"),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for LogProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        self.logger
            .record(&format!("iteration {} / {}", completed, total));
    }
}
