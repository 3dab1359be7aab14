//! Drain, sort and day-filter pipeline.
//!
//! # Responsibility
//! - Move every record out of an `OrderedList` into a contiguous sequence.
//! - Sort the sequence by the selected comparator.
//! - Compact matching records to the front and expose a logical length.
//!
//! # Invariants
//! - Stages run strictly in order: drain, sort, compact.
//! - Drain preserves list order and leaves the list empty.
//! - Consumers only ever see the first `len` records of a `Report`.

use crate::compare::{compare_by_name, compare_by_time};
use crate::list::{Identity, ListError, OrderedList};
use crate::model::record::{Record, Weekday};
use log::{error, info};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Selection names a day that is not one of the seven canonical days.
    UnknownDay(String),
    /// Container failure while draining.
    List(ListError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDay(value) => write!(f, "unknown day of week: `{value}`"),
            Self::List(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownDay(_) => None,
            Self::List(err) => Some(err),
        }
    }
}

impl From<ListError> for PipelineError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

/// Sort criterion for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Time,
    Name,
}

impl SortMode {
    /// Maps an operator token to a mode: `"name"` selects name order, any
    /// other token selects time order.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("name") {
            Self::Name
        } else {
            Self::Time
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Name => "name",
        }
    }

    pub fn comparator(self) -> fn(&Record, &Record) -> Ordering {
        match self {
            Self::Time => compare_by_time,
            Self::Name => compare_by_name,
        }
    }
}

/// Operator choice: which day to show and how to order it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub day: Weekday,
    pub sort: SortMode,
}

impl Selection {
    pub fn new(day: Weekday, sort: SortMode) -> Self {
        Self { day, sort }
    }

    /// Builds a selection from the two raw operator strings.
    pub fn from_strings(day: &str, sort: &str) -> PipelineResult<Self> {
        let parsed = Weekday::parse(day)
            .ok_or_else(|| PipelineError::UnknownDay(day.trim().to_string()))?;
        Ok(Self::new(parsed, SortMode::from_token(sort)))
    }
}

/// Sorted, compacted records for one selection.
///
/// `records` keeps every drained record; only the first `len` are part of
/// the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    records: Vec<Record>,
    len: usize,
    selection: Selection,
}

impl Report {
    /// Records that matched the selected day, in sorted order.
    pub fn visible(&self) -> &[Record] {
        &self.records[..self.len]
    }

    /// Logical length of the report.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of records drained from the container, matched or not.
    pub fn drained(&self) -> usize {
        self.records.len()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Consumes the report, dropping discarded records.
    pub fn into_visible(mut self) -> Vec<Record> {
        self.records.truncate(self.len);
        self.records
    }
}

/// Removes every value from `list`, head first, into a new sequence.
///
/// # Errors
/// - `AllocationFailure` when the sequence cannot be reserved up front.
/// - `InvariantViolation` when removal fails while values remain.
pub fn drain<T: Identity>(list: &mut OrderedList<T>) -> Result<Vec<T>, ListError> {
    let expected = list.len();
    let mut sequence = Vec::new();
    sequence
        .try_reserve_exact(expected)
        .map_err(|_| ListError::AllocationFailure)?;

    while !list.is_empty()? {
        match list.remove_first() {
            Ok(value) => sequence.push(value),
            Err(err) => {
                return Err(ListError::InvariantViolation(format!(
                    "drain stopped after {} of {expected} values: {err}",
                    sequence.len()
                )));
            }
        }
    }

    if sequence.len() != expected {
        return Err(ListError::InvariantViolation(format!(
            "drained {} values but list reported {expected}",
            sequence.len()
        )));
    }
    Ok(sequence)
}

/// Sorts records in place by the selected mode.
pub fn sort_records(records: &mut [Record], mode: SortMode) {
    records.sort_by(mode.comparator());
}

/// Moves every element satisfying `keep` to the front, preserving order.
///
/// Returns the number of kept elements. Elements past that index are the
/// rejected ones, in unspecified order.
pub fn compact_in_place<T>(items: &mut [T], mut keep: impl FnMut(&T) -> bool) -> usize {
    let mut write = 0;
    for read in 0..items.len() {
        if keep(&items[read]) {
            if read != write {
                items.swap(write, read);
            }
            write += 1;
        }
    }
    write
}

/// Compacts records airing on `day` to the front of `records`.
pub fn compact_by_day(records: &mut [Record], day: Weekday) -> usize {
    compact_in_place(records, |record| record.day() == day)
}

/// Runs drain, sort and compaction for one selection.
///
/// # Side effects
/// - Empties `list`.
/// - Emits `pipeline_run` logging events with counts and duration.
pub fn run_pipeline(
    list: &mut OrderedList<Record>,
    selection: Selection,
) -> PipelineResult<Report> {
    let started_at = Instant::now();
    let mut records = match drain(list) {
        Ok(records) => records,
        Err(err) => {
            error!(
                "event=pipeline_run module=pipeline status=error stage=drain error={}",
                err
            );
            return Err(err.into());
        }
    };

    sort_records(&mut records, selection.sort);
    let len = compact_by_day(&mut records, selection.day);

    info!(
        "event=pipeline_run module=pipeline status=ok day={} sort={} drained={} kept={} duration_ms={}",
        selection.day,
        selection.sort.as_str(),
        records.len(),
        len,
        started_at.elapsed().as_millis()
    );

    Ok(Report {
        records,
        len,
        selection,
    })
}
