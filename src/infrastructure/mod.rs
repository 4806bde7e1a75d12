//! Infrastructure layer module
//!
//! Filesystem-facing adapters:
//! - Configuration loading, validation and snapshots
//! - Logging infrastructure

pub mod config;
pub mod logging;
