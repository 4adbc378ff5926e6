use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use hwmem::MemorySnapshot;

use crate::cli::Format;

/// Writes one snapshot in `format`, terminated by a newline.
pub(crate) fn write_snapshot<W: Write>(
    out: &mut W,
    snapshot: &MemorySnapshot,
    format: Format,
) -> Result<()> {
    match format {
        Format::Text => writeln!(out, "{snapshot}").context("write text report")?,
        Format::Json => {
            serde_json::to_writer(&mut *out, snapshot).context("encode snapshot")?;
            writeln!(out).context("write json report")?;
        }
    }
    out.flush().context("flush report")
}
