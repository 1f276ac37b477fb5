//! The synthesized file set.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::entities::common::RelativePath;
use crate::domain::entities::manifest::{Manifest, to_json_with_indent};
use crate::domain::error::DomainError;
use crate::domain::rules::{LICENSE_PATH, MANIFEST_PATH};

/// Content of one output file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Text(String),
    Manifest(Manifest),
}

/// Every file a run will write, keyed by path relative to the destination.
///
/// Invariants:
/// - paths are unique and relative
/// - exactly one entry holds the manifest, at `package.json`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputFileSet {
    files: BTreeMap<RelativePath, FileContent>,
}

impl OutputFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    ///
    /// # Errors
    ///
    /// `DuplicatePath` if `path` was already added, `PathOutsideModule`
    /// if it is not relative.
    pub fn insert(&mut self, path: &str, content: FileContent) -> Result<(), DomainError> {
        let path = RelativePath::try_new(path)?;
        if self.files.contains_key(&path) {
            return Err(DomainError::DuplicatePath {
                path: path.to_string(),
            });
        }
        self.files.insert(path, content);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&FileContent> {
        let path = RelativePath::try_new(path).ok()?;
        self.files.get(&path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Text content at `path`, `None` for missing paths and the manifest.
    pub fn text(&self, path: &str) -> Option<&str> {
        match self.get(path)? {
            FileContent::Text(text) => Some(text),
            FileContent::Manifest(_) => None,
        }
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        match self.get(MANIFEST_PATH)? {
            FileContent::Manifest(manifest) => Some(manifest),
            FileContent::Text(_) => None,
        }
    }

    pub fn manifest_mut(&mut self) -> Option<&mut Manifest> {
        let path = RelativePath::try_new(MANIFEST_PATH).ok()?;
        match self.files.get_mut(&path)? {
            FileContent::Manifest(manifest) => Some(manifest),
            FileContent::Text(_) => None,
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.files.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &FileContent)> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Re-serialize the text files at `paths` as pretty JSON.
    ///
    /// Paths that are not in the set are skipped.
    ///
    /// # Errors
    ///
    /// `InvalidTemplateJson` when a file does not parse as JSON.
    pub fn reformat_json(&mut self, paths: &[&str], indent: usize) -> Result<(), DomainError> {
        for path in paths {
            let Ok(key) = RelativePath::try_new(*path) else {
                continue;
            };
            let Some(FileContent::Text(text)) = self.files.get_mut(&key) else {
                continue;
            };

            let invalid = |reason: String| DomainError::InvalidTemplateJson {
                template: path.to_string(),
                reason,
            };
            let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
            *text = to_json_with_indent(&value, indent).map_err(|e| invalid(e.to_string()))?;
        }
        Ok(())
    }

    /// Check the set is ready to be written.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.manifest().is_none() {
            return Err(DomainError::IncompleteOutput(format!(
                "missing manifest at {MANIFEST_PATH}"
            )));
        }
        if self.text(LICENSE_PATH).is_none() {
            return Err(DomainError::IncompleteOutput(format!(
                "missing {LICENSE_PATH}"
            )));
        }
        let stray_manifests = self
            .files
            .iter()
            .filter(|(path, content)| {
                matches!(content, FileContent::Manifest(_)) && path.as_str() != MANIFEST_PATH
            })
            .count();
        if stray_manifests > 0 {
            return Err(DomainError::IncompleteOutput(
                "manifest content outside package.json".into(),
            ));
        }
        Ok(())
    }
}
