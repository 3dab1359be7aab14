//! Record orderings used by the report pipeline.
//!
//! Both comparators are total orders, so `sort_by` output is deterministic
//! up to records that compare equal.

use crate::model::record::Record;
use std::cmp::Ordering;

/// Orders by weekday rank, then hour, then minute.
pub fn compare_by_time(a: &Record, b: &Record) -> Ordering {
    a.day()
        .rank()
        .cmp(&b.day().rank())
        .then_with(|| a.hour().cmp(&b.hour()))
        .then_with(|| a.minute().cmp(&b.minute()))
}

/// Orders by title, comparing lowercased characters pairwise.
///
/// A title that is a prefix of another sorts first.
pub fn compare_by_name(a: &Record, b: &Record) -> Ordering {
    let left = a.title().chars().flat_map(char::to_lowercase);
    let right = b.title().chars().flat_map(char::to_lowercase);
    left.cmp(right)
}
