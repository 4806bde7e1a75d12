use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::models::section::Section;

/// Errors raised while loading, validating, or snapshotting configuration.
///
/// None of these are transient; every variant is fatal to the current run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Configuration file not found for section '{section}': {}", path.display())]
    FileNotFound { section: Section, path: PathBuf },

    #[error("Failed to read configuration file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing YAML file: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Missing required config sections: {}", join_sections(.missing))]
    MissingRequiredSections { missing: BTreeSet<Section> },

    #[error("Configuration validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Failed to write config snapshot: {}", path.display())]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read config snapshot: {}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config snapshot {}: {reason}", path.display())]
    SnapshotInvalid { path: PathBuf, reason: String },

    #[error("Failed to encode configuration for snapshot: {0}")]
    SnapshotEncode(String),
}

impl ConfigError {
    /// Validation failures, if this is a validation error.
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

fn join_sections(sections: &BTreeSet<Section>) -> String {
    sections
        .iter()
        .map(|section| section.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every failing section from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    sections: Vec<SectionError>,
}

impl ValidationErrors {
    pub(crate) const fn new(sections: Vec<SectionError>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionError] {
        &self.sections
    }

    pub fn section(&self, section: Section) -> Option<&SectionError> {
        self.sections.iter().find(|error| error.section == section)
    }

    /// Names of the failing sections, in validation order.
    pub fn failed_sections(&self) -> Vec<Section> {
        self.sections.iter().map(|error| error.section).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.sections.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join("; "))
    }
}

/// All field failures of a single section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionError {
    pub section: Section,
    pub errors: Vec<FieldError>,
}

impl SectionError {
    /// Whether any error in this section concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "[{}] {}", self.section, rendered.join(", "))
    }
}

/// A single field failure. An empty `field` refers to the section value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub const fn root(kind: FieldErrorKind) -> Self {
        Self {
            field: String::new(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.field, self.kind)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("field required")]
    Missing,

    #[error("extra fields not permitted")]
    UnknownField,

    #[error("expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} out of range: {constraint}")]
    OutOfRange {
        value: String,
        constraint: &'static str,
    },

    #[error("'{value}' is not one of: {}", .allowed.join(", "))]
    NotInEnumeration {
        value: String,
        allowed: Vec<&'static str>,
    },
}
