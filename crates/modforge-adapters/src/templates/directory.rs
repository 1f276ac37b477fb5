//! Template overrides read from a directory.
//!
//! A directory may hold any subset of the template files, named exactly as
//! the built-in ones (`_package.json`, `.travis.yml`, ...). Files it does
//! not provide fall back to the embedded templates. Unrecognised files are
//! ignored.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, instrument};
use walkdir::WalkDir;

use modforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateName,
    error::ModforgeResult,
};

use super::BuiltinTemplates;

/// Overlay of directory templates over [`BuiltinTemplates`].
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    overrides: HashMap<TemplateName, String>,
    fallback: BuiltinTemplates,
}

impl DirectoryTemplates {
    /// Read every recognised template file directly inside `root`.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn load(root: &Path) -> ModforgeResult<Self> {
        let mut overrides = HashMap::new();

        for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::Io {
                path: root.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(name) = TemplateName::from_file_name(&file_name) else {
                debug!(file = %file_name, "not a template, skipping");
                continue;
            };

            let source = std::fs::read_to_string(entry.path()).map_err(|e| {
                ApplicationError::Io {
                    path: entry.path().to_path_buf(),
                    reason: format!("Failed to read template: {e}"),
                }
            })?;
            debug!(template = %name, "template override loaded");
            overrides.insert(name, source);
        }

        Ok(Self {
            overrides,
            fallback: BuiltinTemplates,
        })
    }

    /// Number of templates overridden by the directory.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl TemplateStore for DirectoryTemplates {
    fn get(&self, name: TemplateName) -> ModforgeResult<String> {
        match self.overrides.get(&name) {
            Some(source) => Ok(source.clone()),
            None => self.fallback.get(name),
        }
    }
}
