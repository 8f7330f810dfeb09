use clap::{Parser, ValueEnum};
use dirscope_core::analysis::SizeBasis;
use dirscope_core::journal::{JournalPaths, DEFAULT_ERROR_LOG, DEFAULT_PROGRESS_LOG};
use dirscope_core::scanner::{InclusionPolicy, ScanOptions};
use std::path::PathBuf;

/// Folders reported when `--top` is absent or zero.
pub const DEFAULT_TOP: usize = 100;

#[derive(Parser, Debug)]
#[command(
    name = "dirscope",
    version,
    about = "Find the largest folders under a directory or drive"
)]
pub struct Cli {
    /// Directory or drive root to scan
    pub root: PathBuf,

    /// Number of folders to report (0 falls back to 100)
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP)]
    pub top: usize,

    /// Count hidden and system files and folders
    #[arg(long)]
    pub include_hidden: bool,

    /// Rank by a folder's own files or by its whole subtree
    #[arg(long, value_enum, default_value_t = SizeBasisArg::Subtree)]
    pub size_basis: SizeBasisArg,

    /// Write the ranking as CSV to this file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the ranking as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Append skipped-folder errors to this file
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,

    /// Append a line every 100 folders to this file
    #[arg(long, default_value = DEFAULT_PROGRESS_LOG)]
    pub progress_log: PathBuf,

    /// Do not write the error/progress log files
    #[arg(long)]
    pub no_journal: bool,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SizeBasisArg {
    Own,
    Subtree,
}

impl From<SizeBasisArg> for SizeBasis {
    fn from(arg: SizeBasisArg) -> Self {
        match arg {
            SizeBasisArg::Own => SizeBasis::Own,
            SizeBasisArg::Subtree => SizeBasis::Subtree,
        }
    }
}

impl Cli {
    pub fn top_count(&self) -> usize {
        if self.top == 0 {
            DEFAULT_TOP
        } else {
            self.top
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        let defaults = ScanOptions::default();
        ScanOptions {
            policy: InclusionPolicy::new(self.include_hidden),
            max_workers: self
                .threads
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_workers),
        }
    }

    pub fn journal_paths(&self) -> JournalPaths {
        JournalPaths {
            errors: self.error_log.clone(),
            progress: self.progress_log.clone(),
        }
    }
}
