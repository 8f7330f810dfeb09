/// dirscope Report — sinks for ranked scan results.
///
/// Everything here consumes `RankedFolder`s produced by
/// `dirscope_core::analysis` and turns them into something a person reads:
/// a CSV file, a JSON file, a console table, or a progress bar while the
/// scan runs.
pub mod console;
pub mod csv_export;
pub mod format;
pub mod json_export;

pub use console::{render_progress_bar, render_table, PROGRESS_BAR_WIDTH};
pub use csv_export::{read_csv, write_csv, CsvRow, CSV_HEADER};
pub use json_export::write_json;

use thiserror::Error;

/// Errors raised while writing or reading a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed report row {row}: {reason}")]
    Malformed { row: usize, reason: String },
}
