use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use super::section::Section;

/// Unvalidated configuration, one parsed value per section.
///
/// Keys are [`Section`]s, so a bundle can never hold an unexpected section name.
/// The loader always fills every expected section; hand-built bundles may be partial,
/// which is what the validator's missing-section check exists for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfigBundle {
    sections: BTreeMap<Section, Value>,
}

impl RawConfigBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, replacing any previous value. `null` is stored as an empty mapping.
    pub fn insert(&mut self, section: Section, value: Value) {
        let value = match value {
            Value::Null => Value::Mapping(Mapping::new()),
            other => other,
        };
        self.sections.insert(section, value);
    }

    pub fn get(&self, section: Section) -> Option<&Value> {
        self.sections.get(&section)
    }

    pub fn contains(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections present in the bundle, in [`Section`] order.
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections.keys().copied()
    }

    /// Required sections absent from the bundle.
    pub fn missing_required(&self) -> Vec<Section> {
        Section::REQUIRED
            .into_iter()
            .filter(|section| !self.contains(*section))
            .collect()
    }

    /// Remove and return a section's value.
    pub fn take(&mut self, section: Section) -> Option<Value> {
        self.sections.remove(&section)
    }
}

impl FromIterator<(Section, Value)> for RawConfigBundle {
    fn from_iter<I: IntoIterator<Item = (Section, Value)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (section, value) in iter {
            bundle.insert(section, value);
        }
        bundle
    }
}
