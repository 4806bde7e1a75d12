//! Closed-schema field reading for a single config section.
//!
//! A [`SectionReader`] wraps one raw section mapping. Each typed read records the field as
//! declared and either returns the coerced value or records a [`FieldError`] and returns
//! `None`. [`SectionReader::finish`] then flags every undeclared key, so a section validator
//! is just the list of reads for its declared fields.

use serde_yaml::{Mapping, Value};
use std::str::FromStr;

use crate::domain::error::{FieldError, FieldErrorKind, SectionError};
use crate::domain::models::Section;

pub(crate) struct SectionReader<'a> {
    section: Section,
    mapping: &'a Mapping,
    declared: Vec<&'static str>,
    errors: Vec<FieldError>,
}

impl<'a> SectionReader<'a> {
    /// Fails when the section value is not a mapping.
    pub(crate) fn new(section: Section, value: &'a Value) -> Result<Self, SectionError> {
        match value {
            Value::Mapping(mapping) => Ok(Self {
                section,
                mapping,
                declared: Vec::new(),
                errors: Vec::new(),
            }),
            other => Err(SectionError {
                section,
                errors: vec![FieldError::root(FieldErrorKind::InvalidType {
                    expected: "mapping",
                    found: describe(other),
                })],
            }),
        }
    }

    fn lookup(&mut self, field: &'static str) -> Option<&'a Value> {
        self.declared.push(field);
        self.mapping.get(field)
    }

    fn require(&mut self, field: &'static str) -> Option<&'a Value> {
        let value = self.lookup(field);
        if value.is_none() {
            self.errors
                .push(FieldError::new(field, FieldErrorKind::Missing));
        }
        value
    }

    fn record<T>(&mut self, field: &'static str, result: Result<T, FieldErrorKind>) -> Option<T> {
        result
            .map_err(|kind| self.errors.push(FieldError::new(field, kind)))
            .ok()
    }

    pub(crate) fn string(&mut self, field: &'static str) -> Option<String> {
        let value = self.require(field)?;
        self.record(field, coerce_string(value))
    }

    pub(crate) fn string_or(&mut self, field: &'static str, default: &str) -> Option<String> {
        match self.lookup(field) {
            Some(value) => self.record(field, coerce_string(value)),
            None => Some(default.to_string()),
        }
    }

    pub(crate) fn int_or(&mut self, field: &'static str, default: i64) -> Option<i64> {
        match self.lookup(field) {
            Some(value) => self.record(field, coerce_int(value)),
            None => Some(default),
        }
    }

    pub(crate) fn bool_or(&mut self, field: &'static str, default: bool) -> Option<bool> {
        match self.lookup(field) {
            Some(value) => self.record(field, coerce_bool(value)),
            None => Some(default),
        }
    }

    /// Required integer that must be > 0.
    pub(crate) fn positive_int(&mut self, field: &'static str) -> Option<u64> {
        let value = self.require(field)?;
        let result = coerce_int(value).and_then(|n| {
            if n <= 0 {
                return Err(FieldErrorKind::OutOfRange {
                    value: n.to_string(),
                    constraint: "must be greater than 0",
                });
            }
            Ok(n.unsigned_abs())
        });
        self.record(field, result)
    }

    /// Required string that must exactly match one of `allowed`.
    pub(crate) fn one_of<T: FromStr>(
        &mut self,
        field: &'static str,
        allowed: &[&'static str],
    ) -> Option<T> {
        let value = self.require(field)?;
        let result = coerce_string(value).and_then(|s| {
            s.parse::<T>().map_err(|_| FieldErrorKind::NotInEnumeration {
                value: s,
                allowed: allowed.to_vec(),
            })
        });
        self.record(field, result)
    }

    /// Flag undeclared keys and return the built section, or every recorded error.
    pub(crate) fn finish<T>(mut self, built: Option<T>) -> Result<T, SectionError> {
        let mapping = self.mapping;
        for key in mapping.keys() {
            let known = key
                .as_str()
                .is_some_and(|name| self.declared.iter().any(|declared| *declared == name));
            if !known {
                self.errors
                    .push(FieldError::new(render_key(key), FieldErrorKind::UnknownField));
            }
        }

        match built {
            Some(section) if self.errors.is_empty() => Ok(section),
            _ => Err(SectionError {
                section: self.section,
                errors: self.errors,
            }),
        }
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn render_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("<{} key>", describe(other)),
    }
}

fn coerce_string(value: &Value) -> Result<String, FieldErrorKind> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(FieldErrorKind::InvalidType {
            expected: "string",
            found: describe(other),
        }),
    }
}

fn coerce_int(value: &Value) -> Result<i64, FieldErrorKind> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if let Some(u) = n.as_u64() {
                return Err(FieldErrorKind::OutOfRange {
                    value: u.to_string(),
                    constraint: "must fit in a signed 64-bit integer",
                });
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e18 => Ok(f as i64),
                _ => Err(FieldErrorKind::InvalidType {
                    expected: "integer",
                    found: "fractional number",
                }),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| FieldErrorKind::InvalidType {
            expected: "integer",
            found: "non-numeric string",
        }),
        other => Err(FieldErrorKind::InvalidType {
            expected: "integer",
            found: describe(other),
        }),
    }
}

fn coerce_bool(value: &Value) -> Result<bool, FieldErrorKind> {
    let invalid = |found| FieldErrorKind::InvalidType {
        expected: "boolean",
        found,
    };
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid("number")),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(invalid("string")),
        },
        other => Err(invalid(describe(other))),
    }
}
