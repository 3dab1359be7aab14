//! Guide run orchestration.
//!
//! # Responsibility
//! - Wire file parsing, the report pipeline and report output into one run.
//! - Print for the operator before touching the output file.
//! - Leave the container empty whether the run succeeds or fails.
//!
//! # Invariants
//! - A parse failure clears every record read before the failure.
//! - The output file only ever receives the visible part of the report.

use crate::io::parse::{read_guide_file, ParseError};
use crate::io::report::{print_report, write_report_file};
use crate::list::{ListError, OrderedList};
use crate::model::record::Record;
use crate::pipeline::{run_pipeline, PipelineError, Report, Selection};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::Path;

pub type GuideResult<T> = Result<T, GuideError>;

/// Top-level failure of one guide run.
#[derive(Debug)]
pub enum GuideError {
    /// Input file could not be read or contained an invalid record.
    Parse(ParseError),
    /// Drain/sort/filter failed.
    Pipeline(PipelineError),
    /// Cleanup after a failed read left the container inconsistent.
    Cleanup(ListError),
    /// Report could not be printed for the operator.
    Screen(std::io::Error),
    /// Report could not be written to the output file.
    Output(std::io::Error),
}

impl Display for GuideError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Pipeline(err) => write!(f, "{err}"),
            Self::Cleanup(err) => write!(f, "failed to discard partial guide: {err}"),
            Self::Screen(err) => write!(f, "failed to print report: {err}"),
            Self::Output(err) => write!(f, "failed to write report: {err}"),
        }
    }
}

impl Error for GuideError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Pipeline(err) => Some(err),
            Self::Cleanup(err) => Some(err),
            Self::Screen(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<ParseError> for GuideError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<PipelineError> for GuideError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

/// Loads `input` into a fresh list and runs the pipeline for `selection`.
///
/// The list is cleared if reading fails part way through.
pub fn load_report(input: impl AsRef<Path>, selection: Selection) -> GuideResult<Report> {
    let mut list = OrderedList::new();
    if let Err(err) = read_guide_file(input, &mut list) {
        discard_partial(&mut list)?;
        return Err(err.into());
    }
    Ok(run_pipeline(&mut list, selection)?)
}

/// Runs one full guide pass: read, sort, filter, and write `output`.
///
/// # Side effects
/// - Creates or truncates `output`.
/// - Emits `guide_run` logging events.
pub fn run_guide(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    selection: Selection,
) -> GuideResult<Report> {
    let report = load_report(input, selection)?;
    save_report(output, &report)?;
    Ok(report)
}

/// Prints `report` for the operator, then writes it to `output`.
///
/// The screen copy is produced first, so a failed file write still leaves
/// the operator with the report.
///
/// # Side effects
/// - Creates or truncates `output`.
/// - Emits `guide_run` logging events.
pub fn publish_report<W: Write, E: Write>(
    report: &Report,
    output: impl AsRef<Path>,
    screen: &mut W,
    diagnostics: &mut E,
) -> GuideResult<()> {
    print_report(screen, diagnostics, report).map_err(GuideError::Screen)?;
    save_report(output, report)
}

fn save_report(output: impl AsRef<Path>, report: &Report) -> GuideResult<()> {
    write_report_file(output, report).map_err(GuideError::Output)?;
    let selection = report.selection();
    info!(
        "event=guide_run module=service status=ok day={} sort={} entries={}",
        selection.day,
        selection.sort.as_str(),
        report.len()
    );
    Ok(())
}

fn discard_partial(list: &mut OrderedList<Record>) -> GuideResult<()> {
    let partial = list.len();
    list.clear().map_err(GuideError::Cleanup)?;
    if partial > 0 {
        warn!(
            "event=guide_discard module=service status=ok discarded={}",
            partial
        );
    }
    Ok(())
}
