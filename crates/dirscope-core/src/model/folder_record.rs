/// The immutable per-directory result of a scan.
///
/// A `FolderRecord` describes a directory's *immediate* files only: its
/// size is the sum of the included files listed directly inside it, and its
/// histogram counts those files by extension. Subdirectories publish their
/// own records; nothing is merged upward at publish time.
use compact_str::CompactString;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extension → number of included files carrying it.
///
/// Ordered so that exports and console output are deterministic.
pub type FileTypeCounts = BTreeMap<CompactString, u64>;

/// One scanned directory. Built once by the aggregator, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderRecord {
    path: PathBuf,
    total_size: u64,
    file_type_counts: FileTypeCounts,
}

impl FolderRecord {
    pub fn new(path: PathBuf, total_size: u64, file_type_counts: FileTypeCounts) -> Self {
        Self {
            path,
            total_size,
            file_type_counts,
        }
    }

    /// Absolute directory path; the key in the result map.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes of included files directly inside this directory.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn file_type_counts(&self) -> &FileTypeCounts {
        &self.file_type_counts
    }
}

/// Histogram bucket for a file name.
///
/// Case-sensitive and including the leading dot, taken from the last `.`
/// in the name: `a.tar.gz` → `.gz`, `.bashrc` → `.bashrc`. Names without a
/// dot, or ending in one, fall into the empty-string bucket.
pub fn extension_key(file_name: &str) -> CompactString {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() => CompactString::new(&file_name[dot..]),
        _ => CompactString::default(),
    }
}
