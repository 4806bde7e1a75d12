pub mod bundle;
pub mod config;
pub mod section;

pub use bundle::RawConfigBundle;
pub use config::{
    DataConfig, LogLevel, LoggingConfig, PathsConfig, TrainingConfig, ValidatedConfig,
    DEFAULT_LOG_DIR, DEFAULT_RANDOM_STATE,
};
pub use section::{Section, UnknownSection};
