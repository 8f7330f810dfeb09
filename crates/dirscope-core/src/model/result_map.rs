/// Concurrent `path → FolderRecord` store shared by every scan worker.
///
/// Backed by a sharded `DashMap`, so workers publishing records for
/// unrelated directories never contend on a single lock. Records are only
/// ever inserted; nothing is removed or overwritten.
use super::folder_record::{FileTypeCounts, FolderRecord};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Default)]
pub struct ResultMap {
    inner: DashMap<PathBuf, FolderRecord>,
}

/// Recursive totals for one directory: its own files plus those of every
/// published descendant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtreeTotal {
    pub size: u64,
    pub file_type_counts: FileTypeCounts,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: DashMap::with_capacity(capacity),
        }
    }

    /// Insert a finished record.
    ///
    /// Returns `false` and leaves the existing record untouched if the path
    /// was already published. Each directory is aggregated by exactly one
    /// task, so this only happens on a scheduling bug.
    pub fn publish(&self, record: FolderRecord) -> bool {
        match self.inner.entry(record.path().to_path_buf()) {
            Entry::Occupied(_) => {
                warn!("duplicate record for {} ignored", record.path().display());
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.inner.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<FolderRecord> {
        self.inner.get(path).map(|r| r.value().clone())
    }

    /// Snapshot of every record, in map iteration order.
    pub fn records(&self) -> Vec<FolderRecord> {
        self.inner.iter().map(|r| r.value().clone()).collect()
    }

    /// Compute recursive size and histogram for every published directory.
    ///
    /// Each record is added to itself and to each ancestor present in the
    /// map. The chain of published ancestors is contiguous because a
    /// directory is only visited after its parent listed successfully, so
    /// the walk stops at the first missing ancestor (the scan root's parent).
    pub fn subtree_totals(&self) -> HashMap<PathBuf, SubtreeTotal> {
        let mut totals: HashMap<PathBuf, SubtreeTotal> = HashMap::with_capacity(self.len());
        for entry in self.inner.iter() {
            totals.insert(entry.key().clone(), SubtreeTotal::default());
        }

        for entry in self.inner.iter() {
            let record = entry.value();
            for ancestor in record.path().ancestors() {
                let Some(total) = totals.get_mut(ancestor) else {
                    break;
                };
                total.size += record.total_size();
                for (ext, count) in record.file_type_counts() {
                    *total.file_type_counts.entry(ext.clone()).or_insert(0) += count;
                }
            }
        }

        totals
    }
}
