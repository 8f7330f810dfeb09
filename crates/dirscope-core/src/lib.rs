/// dirscope Core — scanning, aggregation, and ranking.
///
/// This crate contains all business logic with zero presentation code.
/// Frontends (the `dirscope` CLI, report sinks) consume its `ScanReport`.
///
/// # Modules
///
/// - [`model`] — Per-folder records and the concurrent result map.
/// - [`scanner`] — Bounded parallel aggregation with progress reporting.
/// - [`analysis`] — Post-scan ranking of the largest folders.
/// - [`platform`] — Entry attributes and privilege checks.
/// - [`journal`] — Timestamped error/progress log files.
/// - [`error`] — Contained traversal errors and fatal scan errors.
pub mod analysis;
pub mod error;
pub mod journal;
pub mod model;
pub mod platform;
pub mod scanner;

pub use error::{ScanError, TraversalError};
