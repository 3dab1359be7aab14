//! Domain model for guide entries.
//!
//! # Responsibility
//! - Define the canonical record parsed from guide files.
//! - Keep weekday naming and ranking in one place.
//!
//! # Invariants
//! - Every record carries a stable `EntryId` used for identity checks.
//! - A `Record` value is always fully validated.

pub mod record;
