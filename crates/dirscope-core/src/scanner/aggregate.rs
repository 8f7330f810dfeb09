/// Per-directory aggregation — the unit of work of a scan.
///
/// Each task lists one directory exactly once, sums the sizes of its
/// included files, buckets them by extension, publishes the directory's
/// `FolderRecord`, and then spawns one task per included subdirectory into
/// the scan's rayon scope. A directory's record never waits on its
/// children, so parents and descendants complete in any order.
///
/// Failures are contained: a directory that cannot be listed is logged and
/// dropped together with its subtree; nothing propagates to the parent.
use crate::error::TraversalError;
use crate::journal::ScanJournal;
use crate::model::{extension_key, FileTypeCounts, FolderRecord, ResultMap};
use crate::platform::entry_attributes;
use crate::scanner::classify::{is_included, InclusionPolicy};
use crate::scanner::progress::{is_milestone, ProgressCounter, ScanProgress};
use crossbeam_channel::Sender;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Shared state injected into every task of one scan.
///
/// `policy` is copied; everything else is borrowed from the coordinator,
/// which outlives the scope the tasks run in.
pub struct ScanContext<'a> {
    pub policy: InclusionPolicy,
    pub results: &'a ResultMap,
    pub progress: &'a ProgressCounter,
    pub journal: &'a ScanJournal,
    pub progress_tx: Option<&'a Sender<ScanProgress>>,
    pub error_count: &'a AtomicU64,
}

impl ScanContext<'_> {
    /// Publish a record, then count it. Milestones go to the progress
    /// journal and the channel.
    fn publish(&self, record: FolderRecord) {
        if !self.results.publish(record) {
            return;
        }
        let completed = self.progress.increment();

        if let Some(tx) = self.progress_tx {
            // Display-only; drop when the frontend lags.
            let _ = tx.try_send(ScanProgress::Update {
                completed,
                total: self.progress.total(),
            });
        }

        if is_milestone(completed) {
            debug!(
                "{completed} folders processed ({:.1}%)",
                self.progress.fraction() * 100.0
            );
            self.journal.progress(&format!("{completed} folders processed"));
            if let Some(tx) = self.progress_tx {
                let _ = tx.send(ScanProgress::Milestone { completed });
            }
        }
    }

    fn report(&self, err: &TraversalError) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
        let message = err.describe();
        warn!("skipping {}: {message}", err.path().display());
        self.journal.error(&format!("{}: {message}", err.kind_label()));
        if let Some(tx) = self.progress_tx {
            let _ = tx.send(ScanProgress::Error {
                path: err.path().to_string_lossy().into_owned(),
                message,
            });
        }
    }
}

/// What one listing of a directory yields.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Bytes of included files directly inside the directory.
    pub total_size: u64,
    pub file_type_counts: FileTypeCounts,
    /// Included subdirectories, in listing order.
    pub subdirectories: Vec<PathBuf>,
}

/// List `dir` once and summarise its immediate entries under `policy`.
///
/// Anything that is not a directory counts as a file; symbolic links are
/// never followed and count with their own link size. An entry that
/// vanishes between listing and stat is skipped. Any other error fails the
/// whole directory.
pub fn list_directory(
    dir: &Path,
    policy: InclusionPolicy,
) -> Result<DirectoryListing, TraversalError> {
    let fail = |err: io::Error| TraversalError::from_io(dir, err);
    let mut listing = DirectoryListing::default();

    for entry in fs::read_dir(dir).map_err(fail)? {
        let entry = entry.map_err(fail)?;
        let name = entry.file_name();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(fail(err)),
        };

        if file_type.is_dir() {
            // Only Windows needs metadata to know a directory's attributes.
            let meta = if cfg!(windows) {
                entry.metadata().ok()
            } else {
                None
            };
            if is_included(entry_attributes(&name, meta.as_ref()), policy) {
                listing.subdirectories.push(entry.path());
            }
            continue;
        }

        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} vanished during scan", entry.path().display());
                continue;
            }
            Err(err) => return Err(fail(err)),
        };
        if !is_included(entry_attributes(&name, Some(&meta)), policy) {
            continue;
        }

        listing.total_size += meta.len();
        *listing
            .file_type_counts
            .entry(extension_key(&name.to_string_lossy()))
            .or_insert(0) += 1;
    }

    Ok(listing)
}

/// Aggregate `dir` and fan out to its subdirectories within `scope`.
pub fn aggregate<'s>(dir: PathBuf, ctx: &'s ScanContext<'s>, scope: &rayon::Scope<'s>) {
    let listing = match list_directory(&dir, ctx.policy) {
        Ok(listing) => listing,
        Err(err) => {
            ctx.report(&err);
            return;
        }
    };

    let DirectoryListing {
        total_size,
        file_type_counts,
        subdirectories,
    } = listing;
    ctx.publish(FolderRecord::new(dir, total_size, file_type_counts));

    for child in subdirectories {
        scope.spawn(move |s| aggregate(child, ctx, s));
    }
}
