//! dirscope — find the folders eating your disk.
//!
//! Thin binary entry point. Scanning and ranking live in `dirscope-core`;
//! exports and console rendering in `dirscope-report`.

mod cli;

use anyhow::Context;
use clap::Parser;
use dirscope_core::analysis::{top_n_by, SizeBasis};
use dirscope_core::journal::ScanJournal;
use dirscope_core::platform::privilege_check;
use dirscope_core::scanner::{start_scan, ScanHandle, ScanProgress};
use dirscope_core::ScanError;
use dirscope_report::{
    render_progress_bar, render_table, write_csv, write_json, PROGRESS_BAR_WIDTH,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Minimum time between progress bar redraws.
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    info!("dirscope starting");

    let privileges = privilege_check();
    if privileges.is_supported() && !privileges.is_elevated() {
        warn!("Not running as administrator: protected folders will be skipped");
    }

    let journal = if cli.no_journal {
        ScanJournal::disabled()
    } else {
        ScanJournal::open(&cli.journal_paths())
            .map_err(ScanError::Journal)
            .context("cannot open log files (use --no-journal to skip them)")?
    };

    let journal_enabled = journal.is_enabled();
    let handle = start_scan(cli.root.clone(), cli.scan_options(), journal)?;
    follow_progress(&handle, !cli.no_progress);
    let report = handle.join()?;

    let basis: SizeBasis = cli.size_basis.into();
    let ranked = top_n_by(&report.results, cli.top_count(), basis);
    debug!("Ranked {} folders by {} size", ranked.len(), basis.label());
    print!("{}", render_table(&ranked));

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_csv(BufWriter::new(file), &ranked)?;
        info!("CSV written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_json(BufWriter::new(file), &ranked)?;
        info!("JSON written to {}", path.display());
    }

    info!(
        "{} of {} folders scanned, {} skipped, in {:.2?}",
        report.folders_completed, report.folders_total, report.error_count, report.duration
    );
    if report.error_count > 0 && journal_enabled {
        warn!(
            "{} folders could not be read; see {}",
            report.error_count,
            cli.error_log.display()
        );
    }

    Ok(())
}

/// Drain the scan's progress channel until it completes, redrawing a
/// progress bar on stderr when `show_bar` is set.
fn follow_progress(handle: &ScanHandle, show_bar: bool) {
    let mut stderr = std::io::stderr();
    let mut last_draw: Option<Instant> = None;
    let mut total = 0;

    for message in handle.progress_rx.iter() {
        match message {
            ScanProgress::Started { folders_total } => total = folders_total,
            ScanProgress::Update { completed, .. } if show_bar => {
                if last_draw.is_some_and(|t| t.elapsed() < REDRAW_INTERVAL) {
                    continue;
                }
                let _ = write!(
                    stderr,
                    "\r{}",
                    render_progress_bar(completed, total, PROGRESS_BAR_WIDTH)
                );
                let _ = stderr.flush();
                last_draw = Some(Instant::now());
            }
            ScanProgress::Complete {
                folders_completed, ..
            } => {
                if show_bar {
                    let _ = writeln!(
                        stderr,
                        "\r{}",
                        render_progress_bar(folders_completed, total, PROGRESS_BAR_WIDTH)
                    );
                }
                break;
            }
            _ => {}
        }
    }
}
