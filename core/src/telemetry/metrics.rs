use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free count of completed simulation trials shared across workers.
#[derive(Debug, Default)]
pub struct TrialCounter {
    completed: AtomicUsize,
}

impl TrialCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one trial complete and returns the new total.
    pub fn record_completed(&self) -> usize {
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}
