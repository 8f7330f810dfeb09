/// Scan progress reporting — an atomic folder counter shared by the
/// workers, plus lightweight messages sent to the frontend via a crossbeam
/// channel.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Every this many completed folders a milestone is journalled and sent.
pub const MILESTONE_INTERVAL: u64 = 100;

/// Progress updates sent from the scan to the frontend.
///
/// The results live in the `ResultMap`; these messages carry only counters
/// and status.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanProgress {
    /// The census finished; `folders_total` is fixed from here on.
    Started { folders_total: u64 },
    /// A folder's record was published. Sent lossily: a full channel drops
    /// updates rather than stalling workers.
    Update { completed: u64, total: u64 },
    /// `completed` crossed a multiple of [`MILESTONE_INTERVAL`].
    Milestone { completed: u64 },
    /// A directory could not be read and was skipped with its subtree.
    Error { path: String, message: String },
    /// Every worker has finished.
    Complete {
        duration: Duration,
        folders_completed: u64,
        error_count: u64,
    },
}

/// Completed/total folder counts for one scan.
///
/// `total` comes from the census before the scan starts. `completed` can
/// overshoot it when the tree grows while the scan runs.
#[derive(Debug)]
pub struct ProgressCounter {
    completed: AtomicU64,
    total: u64,
}

impl ProgressCounter {
    pub fn new(total: u64) -> Self {
        Self {
            completed: AtomicU64::new(0),
            total,
        }
    }

    /// Record one more published folder and return the new count.
    #[inline]
    pub fn increment(&self) -> u64 {
        self.completed.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Approximate read for display.
    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Completed share of the census in `0.0..=1.0`, clamped when the tree
    /// grew during the scan. An empty census reads as done.
    pub fn fraction(&self) -> f64 {
        fraction_of(self.completed(), self.total)
    }
}

/// `completed / total`, clamped to `0.0..=1.0`.
pub fn fraction_of(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (completed as f64 / total as f64).min(1.0)
}

/// Whether reaching `completed` should emit a milestone.
#[inline]
pub fn is_milestone(completed: u64) -> bool {
    completed > 0 && completed.is_multiple_of(MILESTONE_INTERVAL)
}
