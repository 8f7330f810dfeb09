/// JSON export — the ranked folders as a pretty-printed array.
use crate::ReportError;
use dirscope_core::analysis::RankedFolder;
use std::io::Write;

pub fn write_json<W: Write>(mut out: W, folders: &[RankedFolder]) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut out, folders)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
