//! Duplicate-free, double-ended ordered container.
//!
//! # Responsibility
//! - Store values in caller-defined order with O(1) access to both ends.
//! - Reject a second value carrying an identity that is already stored.
//!
//! # Invariants
//! - `len()` equals the number of nodes reachable from head to tail.
//! - `len() == 0` exactly when both head and tail are absent.
//! - No two stored values share an identity.
//! - The container never logs; every failure is returned as `ListError`.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

mod ordered_list;

pub use ordered_list::{Iter, OrderedList};

/// Identity key used for duplicate detection and value lookup.
///
/// Two values are "the same" when their keys are equal, independent of any
/// other field.
pub trait Identity {
    type Id: Copy + Eq + Hash + Debug;

    fn identity(&self) -> Self::Id;
}

pub type ListResult<T> = Result<T, ListError>;

/// Errors returned by `OrderedList` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// A value with the same identity is already stored.
    DuplicateValue,
    /// The positional anchor is not stored (or was required but not given).
    AnchorNotFound,
    /// The value to remove is not stored.
    NotFound,
    /// The operation needs at least one stored value.
    Empty,
    /// Backing storage could not grow.
    AllocationFailure,
    /// Internal link or count bookkeeping is inconsistent.
    InvariantViolation(String),
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateValue => write!(f, "value already exists in list"),
            Self::AnchorNotFound => write!(f, "anchor value not found in list"),
            Self::NotFound => write!(f, "value not found in list"),
            Self::Empty => write!(f, "list is empty"),
            Self::AllocationFailure => write!(f, "list storage could not be allocated"),
            Self::InvariantViolation(details) => write!(f, "list invariant violated: {details}"),
        }
    }
}

impl Error for ListError {}

