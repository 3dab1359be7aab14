//! Guide file parser.
//!
//! A guide file holds two lines per record:
//!
//! ```text
//! Doctor Who
//! saturday 19:05
//! ```
//!
//! The first line is the title, the second is `<day> <hour>:<minute>`.
//! Day names are case-insensitive. Parsing stops at the first bad record.

use crate::list::{ListError, OrderedList};
use crate::model::record::{Record, RecordValidationError, Weekday};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

static SCHEDULE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z]+)\s+(-?\d+):(-?\d+)\s*$").expect("valid schedule line regex")
});

/// Errors raised while reading a guide file. Line numbers are 1-based.
#[derive(Debug)]
pub enum ParseError {
    Io(std::io::Error),
    EmptyTitle {
        line: usize,
    },
    MissingScheduleLine {
        line: usize,
    },
    MalformedScheduleLine {
        line: usize,
        content: String,
    },
    UnknownDay {
        line: usize,
        day: String,
    },
    TimeOutOfRange {
        line: usize,
        hour: i64,
        minute: i64,
    },
    InvalidRecord {
        line: usize,
        source: RecordValidationError,
    },
    /// The list refused the record. Only reachable through a parser or
    /// container defect, since every parsed record gets a fresh id.
    Rejected {
        line: usize,
        source: ListError,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read guide: {err}"),
            Self::EmptyTitle { line } => write!(f, "line {line}: title must not be empty"),
            Self::MissingScheduleLine { line } => {
                write!(f, "line {line}: expected `<day> <hour>:<minute>` after title")
            }
            Self::MalformedScheduleLine { line, content } => write!(
                f,
                "line {line}: could not read `<day> <hour>:<minute>` from `{content}`"
            ),
            Self::UnknownDay { line, day } => write!(f, "line {line}: unknown day `{day}`"),
            Self::TimeOutOfRange { line, hour, minute } => {
                write!(f, "line {line}: time {hour}:{minute} is not a valid time of day")
            }
            Self::InvalidRecord { line, source } => write!(f, "line {line}: {source}"),
            Self::Rejected { line, source } => {
                write!(f, "line {line}: record could not be stored: {source}")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Parses one `<day> <hour>:<minute>` line into its validated parts.
pub fn parse_schedule_line(
    line: usize,
    content: &str,
) -> Result<(Weekday, u32, u32), ParseError> {
    let malformed = || ParseError::MalformedScheduleLine {
        line,
        content: content.trim_end().to_string(),
    };
    let captures = SCHEDULE_LINE_RE.captures(content).ok_or_else(malformed)?;

    let day_text = &captures[1];
    let day = Weekday::parse(day_text).ok_or_else(|| ParseError::UnknownDay {
        line,
        day: day_text.to_string(),
    })?;

    let hour: i64 = captures[2].parse().map_err(|_| malformed())?;
    let minute: i64 = captures[3].parse().map_err(|_| malformed())?;
    match (u32::try_from(hour), u32::try_from(minute)) {
        (Ok(h), Ok(m)) if h <= 23 && m <= 59 => Ok((day, h, m)),
        _ => Err(ParseError::TimeOutOfRange { line, hour, minute }),
    }
}

/// Reads records from `reader` and appends each one to `list`.
///
/// Returns the number of records appended. On error, records appended
/// before the failing one stay in `list`; the caller decides whether to
/// clear it.
pub fn parse_guide<R: BufRead>(
    reader: R,
    list: &mut OrderedList<Record>,
) -> Result<usize, ParseError> {
    let mut lines = reader.lines();
    let mut line_no = 0usize;
    let mut appended = 0usize;

    while let Some(title) = lines.next() {
        let title = title?;
        line_no += 1;
        let title_line = line_no;
        let title = title.trim_end_matches('\r');
        if title.trim().is_empty() {
            return Err(ParseError::EmptyTitle { line: title_line });
        }

        let schedule = match lines.next() {
            Some(schedule) => schedule?,
            None => {
                return Err(ParseError::MissingScheduleLine {
                    line: title_line + 1,
                })
            }
        };
        line_no += 1;
        let (day, hour, minute) = parse_schedule_line(line_no, &schedule)?;

        let record = Record::new(title.trim(), day, hour, minute).map_err(|source| {
            ParseError::InvalidRecord {
                line: title_line,
                source,
            }
        })?;
        list.insert_last(record).map_err(|source| ParseError::Rejected {
            line: title_line,
            source,
        })?;
        appended += 1;
    }

    Ok(appended)
}

/// Opens `path` and parses it into `list`.
///
/// # Side effects
/// - Emits `guide_read` logging events with record count or error.
pub fn read_guide_file(
    path: impl AsRef<Path>,
    list: &mut OrderedList<Record>,
) -> Result<usize, ParseError> {
    let path = path.as_ref();
    let result = File::open(path)
        .map_err(ParseError::from)
        .and_then(|file| parse_guide(BufReader::new(file), list));

    match &result {
        Ok(count) => info!(
            "event=guide_read module=io status=ok path={} records={}",
            path.display(),
            count
        ),
        Err(err) => error!(
            "event=guide_read module=io status=error path={} error={}",
            path.display(),
            err
        ),
    }
    result
}
