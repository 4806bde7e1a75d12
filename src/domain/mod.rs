//! Domain layer for riskpipe
//!
//! Configuration models and the error taxonomy shared by every layer.

pub mod error;
pub mod models;

pub use error::{ConfigError, FieldError, FieldErrorKind, SectionError, ValidationErrors};
