//! Riskpipe - credit risk model pipelines
//!
//! Training, validation, inference and retraining entry points that share one
//! configuration subsystem:
//!
//! - **Loading** (`infrastructure::config::loader`): one YAML file per section, read from a
//!   configuration directory into a `RawConfigBundle`
//! - **Validation** (`infrastructure::config::validator`): closed-schema checks that produce
//!   an immutable `ValidatedConfig`
//! - **Snapshots** (`infrastructure::config::snapshot`): a sorted YAML dump plus a SHA-256
//!   digest of the canonical JSON form, for proving which configuration produced a run
//!
//! # Example
//!
//! ```no_run
//! use riskpipe::{load_app_config, ConfigSnapshot};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_app_config("configs/")?;
//!     let record = ConfigSnapshot::write(&config, "out/")?;
//!     println!("config digest {}", record.digest);
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{PipelineConfig, PipelineKind, PipelineReport, PipelineRunner};
pub use domain::error::{ConfigError, FieldError, FieldErrorKind, SectionError, ValidationErrors};
pub use domain::models::{
    DataConfig, LogLevel, LoggingConfig, PathsConfig, RawConfigBundle, Section, TrainingConfig,
    ValidatedConfig,
};
pub use infrastructure::config::{
    load_app_config, load_app_config_with, load_config_dir, write_snapshot, ConfigLoader,
    ConfigSnapshot, ConfigValidator, LoadPolicy, SnapshotRecord, SnapshotVerification,
};
pub use infrastructure::logging::{LogFormat, LogSettings, LoggerImpl, RunContext};
