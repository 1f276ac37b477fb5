//! The generated project's `package.json`.
//!
//! A [`Manifest`] is a JSON object whose top-level key order is preserved
//! from the template it was rendered from. The two dependency sections are
//! always rewritten with keys in ascending order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// The dependency sections of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
}

impl DependencySection {
    pub const ALL: [Self; 2] = [Self::Dependencies, Self::DevDependencies];

    pub const fn key(&self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Package metadata of the generated module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// `InvalidManifest` when the text is not a JSON object.
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(DomainError::InvalidManifest(format!(
                "expected a JSON object, found {}",
                json_type(&other)
            ))),
            Err(e) => Err(DomainError::InvalidManifest(e.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn repository(&self) -> Option<&str> {
        self.0.get("repository").and_then(Value::as_str)
    }

    /// Set `repository`, keeping its position if the template declared it.
    pub fn set_repository(&mut self, url: impl Into<String>) {
        self.0
            .insert("repository".to_string(), Value::String(url.into()));
    }

    /// Entries of `section` as string ranges.
    ///
    /// Missing sections read as empty. This is a read-only view: values that
    /// are not strings are left out here but kept by every merge.
    pub fn dependencies(&self, section: DependencySection) -> BTreeMap<String, String> {
        self.raw_section(section)
            .into_iter()
            .filter_map(|(name, range)| range.as_str().map(|r| (name, r.to_string())))
            .collect()
    }

    /// Union `incoming` into `section`; incoming ranges win, keys end sorted.
    ///
    /// The section is created if it did not exist, so both sections are
    /// present once each has been merged.
    pub fn merge_dependencies(
        &mut self,
        section: DependencySection,
        incoming: &BTreeMap<String, String>,
    ) {
        let mut merged = self.raw_section(section);
        merged.extend(
            incoming
                .iter()
                .map(|(name, range)| (name.clone(), Value::String(range.clone()))),
        );
        self.set_section(section, merged);
    }

    /// Bring over the dependency entries of a previous manifest.
    ///
    /// Entries already present in `self` win over `previous`.
    pub fn carry_dependencies_from(&mut self, previous: &Manifest) {
        for section in DependencySection::ALL {
            let mut combined = previous.raw_section(section);
            if combined.is_empty() {
                continue;
            }
            combined.extend(self.raw_section(section));
            self.set_section(section, combined);
        }
    }

    fn raw_section(&self, section: DependencySection) -> BTreeMap<String, Value> {
        self.0
            .get(section.key())
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace `section` with `entries`, written in key order.
    fn set_section(&mut self, section: DependencySection, entries: BTreeMap<String, Value>) {
        self.0.insert(
            section.key().to_string(),
            Value::Object(entries.into_iter().collect()),
        );
    }

    /// Pretty-print with `indent` spaces and a trailing newline.
    pub fn to_json_pretty(&self, indent: usize) -> Result<String, DomainError> {
        to_json_with_indent(&self.0, indent)
            .map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }
}

/// Serialize `value` as pretty JSON indented by `indent` spaces, with a
/// trailing newline.
pub fn to_json_with_indent<T: Serialize + ?Sized>(
    value: &T,
    indent: usize,
) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
