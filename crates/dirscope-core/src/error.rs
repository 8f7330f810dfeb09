/// Error types for the scanner.
///
/// Two tiers: [`TraversalError`] is contained at the directory that raised
/// it and never stops a scan; [`ScanError`] is fatal and returned before or
/// instead of a report.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure to read one directory. The directory and its subtree are
/// omitted from the results; siblings and ancestors are unaffected.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("access denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path too long: {}", path.display())]
    PathTooLong {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TraversalError {
    /// The display message followed by the underlying OS error.
    pub fn describe(&self) -> String {
        match std::error::Error::source(self) {
            Some(source) => format!("{self} ({source})"),
            None => self.to_string(),
        }
    }

    /// Classify an I/O error raised while listing `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::AccessDenied { path, source }
        } else if is_name_too_long(&source) {
            Self::PathTooLong { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    /// The directory that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::AccessDenied { path, .. }
            | Self::PathTooLong { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// Short category label used in log lines.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "AccessDenied",
            Self::PathTooLong { .. } => "PathTooLong",
            Self::Io { .. } => "IOError",
        }
    }
}

/// OS error codes meaning "file name or path too long".
fn is_name_too_long(err: &io::Error) -> bool {
    #[cfg(windows)]
    const NAME_TOO_LONG: &[i32] = &[206]; // ERROR_FILENAME_EXCED_RANGE
    #[cfg(target_os = "linux")]
    const NAME_TOO_LONG: &[i32] = &[36]; // ENAMETOOLONG
    #[cfg(all(unix, not(target_os = "linux")))]
    const NAME_TOO_LONG: &[i32] = &[63]; // ENAMETOOLONG on BSD/macOS
    #[cfg(not(any(windows, unix)))]
    const NAME_TOO_LONG: &[i32] = &[];

    err.raw_os_error()
        .is_some_and(|code| NAME_TOO_LONG.contains(&code))
}

/// Fatal errors — the scan never started or could not run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid scan root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to open scan journal: {0}")]
    Journal(#[source] io::Error),

    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("scanner thread panicked")]
    WorkerPanicked,
}
