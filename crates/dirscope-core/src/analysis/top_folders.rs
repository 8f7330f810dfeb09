/// Top-N largest folders.
///
/// Ranks the records of a finished scan by size, either by a folder's own
/// immediate files (the size stored in each `FolderRecord`) or by its whole
/// subtree. Sorting is stable over the result map's iteration order, so the
/// relative order of equally sized folders is implementation-defined but
/// consistent within one call.
use crate::model::{FileTypeCounts, FolderRecord, ResultMap};
use serde::Serialize;
use std::path::PathBuf;

/// Which size a folder is ranked and reported by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeBasis {
    /// Files directly inside the folder only.
    Own,
    /// The folder plus every published descendant.
    #[default]
    Subtree,
}

impl SizeBasis {
    pub fn label(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Subtree => "subtree",
        }
    }
}

/// One entry of a ranking, ready for a report sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFolder {
    pub path: PathBuf,
    /// Size in bytes under the chosen [`SizeBasis`].
    pub size: u64,
    pub file_type_counts: FileTypeCounts,
}

impl From<FolderRecord> for RankedFolder {
    fn from(record: FolderRecord) -> Self {
        Self {
            path: record.path().to_path_buf(),
            size: record.total_size(),
            file_type_counts: record.file_type_counts().clone(),
        }
    }
}

/// The `n` folders with the largest own size, largest first.
///
/// Returns `min(n, results.len())` records; `n == 0` yields nothing.
pub fn top_n(results: &ResultMap, n: usize) -> Vec<FolderRecord> {
    if n == 0 {
        return Vec::new();
    }
    let mut records = results.records();
    records.sort_by(|a, b| b.total_size().cmp(&a.total_size()));
    records.truncate(n);
    records
}

/// The `n` largest folders under `basis`, largest first.
pub fn top_n_by(results: &ResultMap, n: usize, basis: SizeBasis) -> Vec<RankedFolder> {
    match basis {
        SizeBasis::Own => top_n(results, n).into_iter().map(RankedFolder::from).collect(),
        SizeBasis::Subtree => {
            if n == 0 {
                return Vec::new();
            }
            let mut ranked: Vec<RankedFolder> = results
                .subtree_totals()
                .into_iter()
                .map(|(path, total)| RankedFolder {
                    path,
                    size: total.size,
                    file_type_counts: total.file_type_counts,
                })
                .collect();
            ranked.sort_by(|a, b| b.size.cmp(&a.size));
            ranked.truncate(n);
            ranked
        }
    }
}
