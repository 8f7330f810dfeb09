/// Scanner module — orchestrates a scan.
///
/// A scan runs in three phases:
/// 1. **Census** — a quick `jwalk` walk fixes the total folder count.
/// 2. **Aggregation** — one rayon task per directory on a bounded pool,
///    all spawned into a single scope that joins before the scan returns.
/// 3. **Report** — the populated `ResultMap` plus counters.
///
/// All shared state (result map, counter, journal, progress sender) is
/// owned by the coordinator for the duration of the scope and handed to
/// tasks through a borrowed `ScanContext`.
pub mod aggregate;
pub mod census;
pub mod classify;
pub mod progress;

pub use aggregate::{list_directory, DirectoryListing, ScanContext};
pub use classify::{is_included, InclusionPolicy};
pub use progress::{ProgressCounter, ScanProgress};

use crate::error::ScanError;
use crate::journal::ScanJournal;
use crate::model::ResultMap;
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Maximum number of progress messages that may queue up in the channel.
///
/// `Update` messages are dropped when the channel is full; errors,
/// milestones and completion block until the frontend drains it.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Tunables for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub policy: InclusionPolicy,
    /// Worker threads in the aggregation pool. Caps concurrent directory
    /// listings no matter how wide or deep the tree is.
    pub max_workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            policy: InclusionPolicy::default(),
            max_workers: num_cpus::get(),
        }
    }
}

/// Everything a finished scan produced.
#[derive(Debug)]
pub struct ScanReport {
    /// Absolute scan root.
    pub root: PathBuf,
    pub results: ResultMap,
    /// Census count, fixed before aggregation.
    pub folders_total: u64,
    /// Records published; equals `results.len()`.
    pub folders_completed: u64,
    /// Directories skipped because they could not be read.
    pub error_count: u64,
    pub duration: Duration,
}

/// Runs scans with fixed options, an optional journal and an optional
/// progress channel.
pub struct ScanCoordinator {
    options: ScanOptions,
    journal: ScanJournal,
    progress_tx: Option<Sender<ScanProgress>>,
}

impl ScanCoordinator {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            journal: ScanJournal::disabled(),
            progress_tx: None,
        }
    }

    pub fn with_journal(mut self, journal: ScanJournal) -> Self {
        self.journal = journal;
        self
    }

    /// Send progress messages to `tx`. The receiver must be drained while
    /// the scan runs.
    pub fn with_progress(mut self, tx: Sender<ScanProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Scan `root` and block until every directory task has finished.
    ///
    /// Fails only if `root` is not a readable directory or the worker pool
    /// cannot be built. Per-directory failures are contained and counted in
    /// `ScanReport::error_count`.
    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let root = validate_root(root)?;
        let workers = self.options.max_workers.max(1);

        let folders_total = census::count_folders(&root, workers);
        info!(
            "Scanning {} ({folders_total} folders, {workers} workers)",
            root.display()
        );
        self.send(ScanProgress::Started { folders_total });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("dirscope-worker-{i}"))
            .build()?;

        let results = ResultMap::with_capacity(usize::try_from(folders_total).unwrap_or(0));
        let progress = ProgressCounter::new(folders_total);
        let error_count = AtomicU64::new(0);
        let ctx = ScanContext {
            policy: self.options.policy,
            results: &results,
            progress: &progress,
            journal: &self.journal,
            progress_tx: self.progress_tx.as_ref(),
            error_count: &error_count,
        };

        let scan_root = root.clone();
        pool.scope(|s| aggregate::aggregate(scan_root, &ctx, s));

        let folders_completed = progress.completed();
        let error_count = error_count.load(Ordering::Relaxed);
        let duration = start.elapsed();
        info!(
            "Scan of {} complete: {folders_completed}/{folders_total} folders, {error_count} skipped, in {duration:?}",
            root.display()
        );
        self.send(ScanProgress::Complete {
            duration,
            folders_completed,
            error_count,
        });

        Ok(ScanReport {
            root,
            results,
            folders_total,
            folders_completed,
            error_count,
            duration,
        })
    }

    fn send(&self, message: ScanProgress) {
        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(message);
        }
    }
}

/// Reject roots that do not exist or are not directories, and make the
/// rest absolute. Links are not resolved.
pub fn validate_root(root: &Path) -> Result<PathBuf, ScanError> {
    let invalid = |reason: String| ScanError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };
    let meta = std::fs::metadata(root).map_err(|err| invalid(err.to_string()))?;
    if !meta.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    std::path::absolute(root).map_err(|err| invalid(err.to_string()))
}

/// Handle to a scan running on a background thread.
pub struct ScanHandle {
    /// Progress messages from the scan; drain it until `Complete`.
    pub progress_rx: Receiver<ScanProgress>,
    thread: thread::JoinHandle<Result<ScanReport, ScanError>>,
}

impl ScanHandle {
    /// Wait for the scan thread and take its report.
    pub fn join(self) -> Result<ScanReport, ScanError> {
        self.thread.join().map_err(|_| ScanError::WorkerPanicked)?
    }
}

/// Start a scan of `root` on a named background thread.
pub fn start_scan(
    root: PathBuf,
    options: ScanOptions,
    journal: ScanJournal,
) -> Result<ScanHandle, ScanError> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let coordinator = ScanCoordinator::new(options)
        .with_journal(journal)
        .with_progress(progress_tx);

    let thread = thread::Builder::new()
        .name("dirscope-scanner".into())
        .spawn(move || coordinator.scan(&root))
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        thread,
    })
}
