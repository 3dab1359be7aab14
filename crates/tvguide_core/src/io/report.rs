//! Report rendering for screen and file output.

use crate::model::record::Record;
use crate::pipeline::Report;
use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Notice printed instead of entries when no show matched the selected day.
pub const EMPTY_REPORT_NOTICE: &str = "No TV shows found on selected day.";

/// Formats one entry as `HH:MM - title`, hour right-aligned in two columns.
pub fn format_entry(record: &Record) -> String {
    format!(
        "{:>2}:{:02} - {}",
        record.hour(),
        record.minute(),
        record.title()
    )
}

/// Writes one line per record.
pub fn write_entries<W: Write>(out: &mut W, records: &[Record]) -> std::io::Result<()> {
    for record in records {
        writeln!(out, "{}", format_entry(record))?;
    }
    Ok(())
}

/// Prints a report for an operator: a blank separator on `out`, then the
/// entries. An empty report sends the notice to `diagnostics` instead.
pub fn print_report<W: Write, E: Write>(
    out: &mut W,
    diagnostics: &mut E,
    report: &Report,
) -> std::io::Result<()> {
    writeln!(out)?;
    if report.is_empty() {
        writeln!(diagnostics, "{EMPTY_REPORT_NOTICE}")?;
        diagnostics.flush()?;
    } else {
        write_entries(out, report.visible())?;
    }
    out.flush()
}

/// Writes the visible part of `report` to `path`, replacing any existing file.
///
/// An empty report still creates an empty file.
///
/// # Side effects
/// - Emits `report_write` logging events.
pub fn write_report_file(path: impl AsRef<Path>, report: &Report) -> std::io::Result<()> {
    let path = path.as_ref();
    let result = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_entries(&mut writer, report.visible())?;
        writer.flush()
    });

    match &result {
        Ok(()) => info!(
            "event=report_write module=io status=ok path={} entries={}",
            path.display(),
            report.len()
        ),
        Err(err) => error!(
            "event=report_write module=io status=error path={} error={}",
            path.display(),
            err
        ),
    }
    result
}
