/// Console rendering — the live progress bar and the final ranking table.
///
/// Both return `String`s; the binary decides where they are printed.
use crate::format::{format_breakdown, format_size};
use dirscope_core::analysis::RankedFolder;
use dirscope_core::scanner::progress::fraction_of;
use std::fmt::Write;

/// Number of cells in the progress bar.
pub const PROGRESS_BAR_WIDTH: usize = 50;

/// `[#####-----]  50.0% (5/10 folders)` with `width` cells.
///
/// The fill is clamped at 100% because the completed count can overshoot
/// the census when the tree grows during the scan; the raw counts are
/// still shown as-is.
pub fn render_progress_bar(completed: u64, total: u64, width: usize) -> String {
    let fraction = fraction_of(completed, total);
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {:>5.1}% ({completed}/{total} folders)",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0
    )
}

/// A numbered table of ranked folders with sizes and breakdowns.
pub fn render_table(folders: &[RankedFolder]) -> String {
    let mut out = String::new();
    if folders.is_empty() {
        out.push_str("No folders to report.\n");
        return out;
    }

    let rank_width = folders.len().to_string().len();
    for (i, folder) in folders.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>rank_width$}. {:>10}  {}",
            i + 1,
            format_size(folder.size),
            folder.path.display()
        );
        if !folder.file_type_counts.is_empty() {
            let _ = writeln!(
                out,
                "{:>rank_width$}  {:>10}  {}",
                "",
                "",
                format_breakdown(&folder.file_type_counts)
            );
        }
    }
    out
}
