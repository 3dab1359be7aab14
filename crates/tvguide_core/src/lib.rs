//! Core logic for the TV guide report.
//! Parses guide files into an ordered list, then sorts and filters them by day.

pub mod compare;
pub mod io;
pub mod list;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod service;

pub use compare::{compare_by_name, compare_by_time};
pub use io::parse::{parse_guide, read_guide_file, ParseError};
pub use io::prompt::{Console, PromptError};
pub use io::report::{format_entry, print_report, write_report_file};
pub use list::{Identity, ListError, ListResult, OrderedList};
pub use logging::{default_log_dir, default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{EntryId, Record, RecordValidationError, Weekday};
pub use pipeline::{
    compact_by_day, drain, run_pipeline, sort_records, PipelineError, Report, Selection, SortMode,
};
pub use service::guide_service::{load_report, publish_report, run_guide, GuideError, GuideResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
