//! Interactive day and sort-mode selection.
//!
//! # Invariants
//! - Answers are trimmed and lowercased before validation.
//! - Invalid answers re-prompt; only end of input or I/O failure ends the loop.

use crate::model::record::Weekday;
use crate::pipeline::{Selection, SortMode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

pub const DAY_QUESTION: &str = "Enter a day of the week:";
pub const DAY_COMPLAINT: &str = "Error: Enter a valid day of the week.";
pub const SORT_QUESTION: &str = "Sort by \"time\" or \"name\"?";
pub const SORT_COMPLAINT: &str = "Error: Enter either time or name for sort type.";

/// Failure while collecting a selection.
#[derive(Debug)]
pub enum PromptError {
    Io(std::io::Error),
    /// Input ended before a valid answer was read.
    EndOfInput { expected: &'static str },
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read selection: {err}"),
            Self::EndOfInput { expected } => {
                write!(f, "input ended before a valid {expected} was entered")
            }
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::EndOfInput { .. } => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Terminal streams used by the prompt loop.
pub struct Console<R, W, E> {
    pub input: R,
    pub output: W,
    pub diagnostics: E,
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, output: W, diagnostics: E) -> Self {
        Self {
            input,
            output,
            diagnostics,
        }
    }

    /// Asks for a day until a canonical day name is entered.
    pub fn ask_day(&mut self) -> Result<Weekday, PromptError> {
        self.ask(DAY_QUESTION, DAY_COMPLAINT, "day of the week", Weekday::parse)
    }

    /// Asks for a sort mode until `time` or `name` is entered.
    pub fn ask_sort(&mut self) -> Result<SortMode, PromptError> {
        self.ask(SORT_QUESTION, SORT_COMPLAINT, "sort type", parse_sort_answer)
    }

    /// Asks for whichever parts of the selection are not already known.
    pub fn complete_selection(
        &mut self,
        day: Option<Weekday>,
        sort: Option<SortMode>,
    ) -> Result<Selection, PromptError> {
        let day = match day {
            Some(day) => day,
            None => self.ask_day()?,
        };
        let sort = match sort {
            Some(sort) => sort,
            None => self.ask_sort()?,
        };
        Ok(Selection::new(day, sort))
    }

    fn ask<T>(
        &mut self,
        question: &str,
        complaint: &str,
        expected: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::EndOfInput { expected });
            }
            if let Some(answer) = parse(&line.trim().to_lowercase()) {
                return Ok(answer);
            }
            writeln!(self.diagnostics, "{complaint}")?;
        }
    }
}

/// Strict sort answer: only `time` and `name` are accepted at the prompt.
pub fn parse_sort_answer(answer: &str) -> Option<SortMode> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "time" => Some(SortMode::Time),
        "name" => Some(SortMode::Name),
        _ => None,
    }
}
