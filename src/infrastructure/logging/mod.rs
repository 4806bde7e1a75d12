//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON console output on stderr
//! - Optional JSON log file per pipeline
//! - Per-run `run_id` carried on the root span
pub mod config;
pub mod logger;
pub mod run_context;

pub use config::{LogFormat, LogSettings};
pub use logger::LoggerImpl;
pub use run_context::RunContext;
