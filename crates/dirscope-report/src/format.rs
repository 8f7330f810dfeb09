/// Size and breakdown formatting shared by the sinks.
///
/// Sizes stay `u64` bytes everywhere else; floating point only appears
/// here, at the display boundary. Units are binary (1 GB = 1024³ bytes).
use dirscope_core::model::FileTypeCounts;

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Separator between `extension: count` pairs.
pub const BREAKDOWN_SEPARATOR: &str = " | ";

/// Human-readable size with an adaptive unit.
pub fn format_size(bytes: u64) -> String {
    let b = bytes as f64;
    match b {
        b if b < KB => format!("{bytes} B"),
        b if b < MB => format!("{:.1} KB", b / KB),
        b if b < GB => format!("{:.1} MB", b / MB),
        b if b < TB => format!("{:.2} GB", b / GB),
        b => format!("{:.2} TB", b / TB),
    }
}

/// Bytes as gigabytes with exactly two decimals, no unit.
pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / GB)
}

/// Parse a [`format_gigabytes`] value back to (approximate) bytes.
pub fn parse_gigabytes(text: &str) -> Option<u64> {
    let gb: f64 = text.trim().parse().ok()?;
    (gb.is_finite() && gb >= 0.0).then(|| (gb * GB).round() as u64)
}

/// `".txt: 3 | .rs: 1"`. The no-extension bucket prints as `: n`.
pub fn format_breakdown(counts: &FileTypeCounts) -> String {
    counts
        .iter()
        .map(|(ext, count)| format!("{ext}: {count}"))
        .collect::<Vec<_>>()
        .join(BREAKDOWN_SEPARATOR)
}

/// Inverse of [`format_breakdown`]. Splits each pair on its last `": "` so
/// odd extensions containing a colon survive.
pub fn parse_breakdown(text: &str) -> Option<FileTypeCounts> {
    let mut counts = FileTypeCounts::new();
    if text.is_empty() {
        return Some(counts);
    }
    for pair in text.split(BREAKDOWN_SEPARATOR) {
        let (ext, count) = pair.rsplit_once(": ")?;
        *counts.entry(ext.into()).or_insert(0) += count.trim().parse::<u64>().ok()?;
    }
    Some(counts)
}
