use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One named subdivision of the pipeline configuration, sourced from one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Data,
    Features,
    Training,
    Tuning,
    Evaluation,
    Inference,
    Logging,
    Paths,
}

impl Section {
    /// Every expected section, in the order the loader reads them.
    pub const ALL: [Self; 8] = [
        Self::Data,
        Self::Features,
        Self::Training,
        Self::Tuning,
        Self::Evaluation,
        Self::Inference,
        Self::Logging,
        Self::Paths,
    ];

    /// Sections a `ValidatedConfig` cannot be built without.
    pub const REQUIRED: [Self; 4] = [Self::Data, Self::Training, Self::Paths, Self::Logging];

    /// Extension shared by every section file.
    pub const FILE_EXTENSION: &'static str = "yaml";

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Features => "features",
            Self::Training => "training",
            Self::Tuning => "tuning",
            Self::Evaluation => "evaluation",
            Self::Inference => "inference",
            Self::Logging => "logging",
            Self::Paths => "paths",
        }
    }

    pub const fn is_required(self) -> bool {
        matches!(self, Self::Data | Self::Training | Self::Paths | Self::Logging)
    }

    /// File name of this section inside a config directory, e.g. `data.yaml`.
    pub fn file_name(self) -> String {
        format!("{}.{}", self.as_str(), Self::FILE_EXTENSION)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown config section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
