//! File and terminal boundaries around the core pipeline.
//!
//! # Responsibility
//! - Parse guide files into an `OrderedList` of records.
//! - Render reports to screen and file.
//! - Collect the operator's day and sort selection.
//! - Generate synthetic guide files for manual testing.
//!
//! # Invariants
//! - Every parsed record is validated before it reaches the list.
//! - Only the visible prefix of a `Report` is ever written.

pub mod generate;
pub mod parse;
pub mod prompt;
pub mod report;
