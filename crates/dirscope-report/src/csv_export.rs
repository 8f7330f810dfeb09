/// CSV export of ranked folders.
///
/// Layout: header `Folder,Size (GB),File Types Breakdown`, then one row per
/// folder with the path, the size in gigabytes to two decimals, and the
/// `" | "`-joined `extension: count` pairs. Quoting is left to the `csv`
/// writer so paths with commas or quotes survive.
use crate::format::{format_breakdown, format_gigabytes, parse_breakdown, parse_gigabytes};
use crate::ReportError;
use dirscope_core::analysis::RankedFolder;
use dirscope_core::model::FileTypeCounts;
use std::io::{Read, Write};
use std::path::PathBuf;

pub const CSV_HEADER: [&str; 3] = ["Folder", "Size (GB)", "File Types Breakdown"];

/// One parsed row of an exported report.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub folder: PathBuf,
    /// Bytes recovered from the rounded GB column (±0.005 GB).
    pub size_bytes: u64,
    pub breakdown: FileTypeCounts,
}

/// Write `folders` as CSV to `out`.
pub fn write_csv<W: Write>(out: W, folders: &[RankedFolder]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for folder in folders {
        let path = folder.path.to_string_lossy();
        let size = format_gigabytes(folder.size);
        let breakdown = format_breakdown(&folder.file_type_counts);
        writer.write_record([&*path, size.as_str(), breakdown.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a report written by [`write_csv`].
pub fn read_csv<R: Read>(input: R) -> Result<Vec<CsvRow>, ReportError> {
    let mut reader = csv::Reader::from_reader(input);

    let header = reader.headers()?;
    if header.iter().ne(CSV_HEADER) {
        return Err(ReportError::Malformed {
            row: 0,
            reason: format!("unexpected header {header:?}"),
        });
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let malformed = |reason: &str| ReportError::Malformed {
            row,
            reason: reason.to_string(),
        };

        let folder = record.get(0).ok_or_else(|| malformed("missing folder"))?;
        let size_bytes = record
            .get(1)
            .and_then(parse_gigabytes)
            .ok_or_else(|| malformed("bad size"))?;
        let breakdown = record
            .get(2)
            .and_then(parse_breakdown)
            .ok_or_else(|| malformed("bad breakdown"))?;

        rows.push(CsvRow {
            folder: PathBuf::from(folder),
            size_bytes,
            breakdown,
        });
    }
    Ok(rows)
}
