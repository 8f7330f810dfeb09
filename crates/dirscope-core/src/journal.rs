/// Append-only scan journals.
///
/// Two separate log files: one line per contained traversal error, and one
/// line per progress milestone. Every line is prefixed with a local
/// timestamp. Writes are serialised per stream; the scan workers only ever
/// touch a journal on an error or every hundredth folder, so the locks are
/// cold.
use chrono::Local;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Timestamp prefix format for journal lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default file names, created in the working directory.
pub const DEFAULT_ERROR_LOG: &str = "dirscope_errors.log";
pub const DEFAULT_PROGRESS_LOG: &str = "dirscope_progress.log";

/// Where the two journals live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalPaths {
    pub errors: PathBuf,
    pub progress: PathBuf,
}

impl Default for JournalPaths {
    fn default() -> Self {
        Self {
            errors: PathBuf::from(DEFAULT_ERROR_LOG),
            progress: PathBuf::from(DEFAULT_PROGRESS_LOG),
        }
    }
}

/// The error and progress journals for one scan.
#[derive(Debug, Default)]
pub struct ScanJournal {
    errors: Option<Mutex<File>>,
    progress: Option<Mutex<File>>,
}

impl ScanJournal {
    /// Open (creating if needed) both journals in append mode.
    pub fn open(paths: &JournalPaths) -> io::Result<Self> {
        Ok(Self {
            errors: Some(Mutex::new(open_append(&paths.errors)?)),
            progress: Some(Mutex::new(open_append(&paths.progress)?)),
        })
    }

    /// A journal that drops every line.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether any line will reach a file.
    pub fn is_enabled(&self) -> bool {
        self.errors.is_some() || self.progress.is_some()
    }

    pub fn error(&self, message: &str) {
        if let Some(file) = &self.errors {
            append_line(file, message);
        }
    }

    pub fn progress(&self, message: &str) {
        if let Some(file) = &self.progress {
            append_line(file, message);
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Format one journal line (without the trailing newline).
pub fn format_line(message: &str) -> String {
    format!("[{}] {message}", Local::now().format(TIMESTAMP_FORMAT))
}

fn append_line(file: &Mutex<File>, message: &str) {
    let line = format_line(message);
    let mut file = file.lock();
    // A failing journal must not take the scan down with it.
    if let Err(err) = writeln!(file, "{line}") {
        warn!("journal write failed: {err}");
    }
}
