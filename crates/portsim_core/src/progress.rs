//! Progress tracking and cooperative cancellation for projection runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared progress handle for a projection run.
///
/// Clones share the same counters, so one clone can be handed to the projector
/// while another is polled or cancelled from a different thread.
#[derive(Debug, Clone)]
pub struct ProjectionProgress {
    /// Completed paths counter
    completed: Arc<AtomicUsize>,
    /// Total paths
    total: Arc<AtomicUsize>,
    /// Cancellation flag
    cancelled: Arc<AtomicBool>,
}

impl ProjectionProgress {
    /// Create a new progress tracker
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(total)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the number of completed paths
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Completed share in `[0, 1]`
    #[must_use]
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.completed() as f64 / total as f64
        }
    }

    /// Size the counters for a run that is about to start, keeping any cancellation request
    pub(crate) fn begin(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn add_completed(&self, paths: usize) {
        self.completed.fetch_add(paths, Ordering::Relaxed);
    }

    /// Reset the counters for a new run
    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    /// Request cancellation; the projector stops at the next batch boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total()
    }
}

impl Default for ProjectionProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let progress = ProjectionProgress::new(200);
        let handle = progress.clone();

        handle.add_completed(50);
        assert_eq!(progress.completed(), 50);
        assert_eq!(progress.fraction(), 0.25);
        assert!(!progress.is_complete());

        handle.add_completed(150);
        assert!(progress.is_complete());

        progress.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_begin_keeps_cancellation() {
        let progress = ProjectionProgress::new(5);
        progress.add_completed(5);
        progress.cancel();

        progress.begin(8);
        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.total(), 8);
        assert!(progress.is_cancelled());
    }

    #[test]
    fn test_reset() {
        let progress = ProjectionProgress::new(10);
        progress.add_completed(10);
        progress.cancel();

        progress.reset(40);
        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.total(), 40);
        assert!(!progress.is_cancelled());
        assert_eq!(ProjectionProgress::default().fraction(), 0.0);
    }
}
