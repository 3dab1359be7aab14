//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate parsing, the pipeline and output into complete runs.
//! - Keep the CLI free of container and pipeline details.

pub mod guide_service;
