//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Log level configurable through `RUST_LOG`, with a CLI-supplied default
//! - Resolution itself emits nothing; only load, reload, and watch paths log

pub mod logging;
