//! Guide record domain model.
//!
//! # Responsibility
//! - Define one scheduled show entry (title, weekday, time of day).
//! - Reject invalid field combinations before a record exists.
//!
//! # Invariants
//! - `title` is non-blank and at most `MAX_TITLE_CHARS` characters.
//! - `hour` is in `0..=23`, `minute` is in `0..=59`.
//! - `id` is never nil and is the only input to identity comparison.

use crate::list::Identity;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one guide record.
///
/// Two records with equal fields but different ids are distinct entries.
pub type EntryId = Uuid;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 99;

/// Day of the week a show airs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in rank order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Ordering rank used by time sorting, `1` (Monday) through `7` (Sunday).
    pub fn rank(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Capitalized name as written in generated guide files.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Parses a day name, ignoring surrounding whitespace and ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == normalized)
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised while building a `Record`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NilId,
    EmptyTitle,
    TitleTooLong { chars: usize },
    HourOutOfRange(u32),
    MinuteOutOfRange(u32),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
            Self::EmptyTitle => write!(f, "record title must not be blank"),
            Self::TitleTooLong { chars } => write!(
                f,
                "record title has {chars} characters; at most {MAX_TITLE_CHARS} are allowed"
            ),
            Self::HourOutOfRange(hour) => write!(f, "hour {hour} is outside 0-23"),
            Self::MinuteOutOfRange(minute) => write!(f, "minute {minute} is outside 0-59"),
        }
    }
}

impl Error for RecordValidationError {}

/// One validated guide entry.
///
/// Fields are private so a record cannot be edited into an invalid state
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordWire")]
pub struct Record {
    id: EntryId,
    title: String,
    day: Weekday,
    hour: u32,
    minute: u32,
}

impl Record {
    /// Builds a record with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        day: Weekday,
        hour: u32,
        minute: u32,
    ) -> Result<Self, RecordValidationError> {
        Self::with_id(Uuid::new_v4(), title, day, hour, minute)
    }

    /// Builds a record with a caller-provided id.
    ///
    /// Used when identity already exists outside this process (deserialization).
    pub fn with_id(
        id: EntryId,
        title: impl Into<String>,
        day: Weekday,
        hour: u32,
        minute: u32,
    ) -> Result<Self, RecordValidationError> {
        let record = Self {
            id,
            title: title.into(),
            day,
            hour,
            minute,
        };
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(RecordValidationError::EmptyTitle);
        }
        let chars = self.title.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(RecordValidationError::TitleTooLong { chars });
        }
        if self.hour > 23 {
            return Err(RecordValidationError::HourOutOfRange(self.hour));
        }
        if self.minute > 59 {
            return Err(RecordValidationError::MinuteOutOfRange(self.minute));
        }
        Ok(())
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

impl Identity for Record {
    type Id = EntryId;

    fn identity(&self) -> EntryId {
        self.id
    }
}

#[derive(Deserialize)]
struct RecordWire {
    id: EntryId,
    title: String,
    day: Weekday,
    hour: u32,
    minute: u32,
}

impl TryFrom<RecordWire> for Record {
    type Error = RecordValidationError;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        Self::with_id(wire.id, wire.title, wire.day, wire.hour, wire.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValidationError, Weekday, MAX_TITLE_CHARS};

    #[test]
    fn weekday_parse_accepts_mixed_case_and_padding() {
        assert_eq!(Weekday::parse(" Monday\n"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("SUNDAY"), Some(Weekday::Sunday));
        assert_eq!(Weekday::parse("mon"), None);
        assert_eq!(Weekday::parse(""), None);
    }

    #[test]
    fn weekday_ranks_follow_calendar_order() {
        let ranks: Vec<u8> = Weekday::ALL.iter().map(|day| day.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn new_rejects_each_invalid_field() {
        assert_eq!(
            Record::new("  ", Weekday::Monday, 1, 0).unwrap_err(),
            RecordValidationError::EmptyTitle
        );
        assert_eq!(
            Record::new("News", Weekday::Monday, 24, 0).unwrap_err(),
            RecordValidationError::HourOutOfRange(24)
        );
        assert_eq!(
            Record::new("News", Weekday::Monday, 23, 60).unwrap_err(),
            RecordValidationError::MinuteOutOfRange(60)
        );

        let long_title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            Record::new(long_title, Weekday::Monday, 0, 0).unwrap_err(),
            RecordValidationError::TitleTooLong {
                chars: MAX_TITLE_CHARS + 1
            }
        );
    }

    #[test]
    fn equal_fields_still_produce_distinct_ids() {
        let first = Record::new("News", Weekday::Friday, 18, 0).expect("valid record");
        let second = Record::new("News", Weekday::Friday, 18, 0).expect("valid record");
        assert_ne!(first.id(), second.id());
        assert_ne!(first, second);
    }
}
