//! Failures raised while the services drive their ports.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template store has no source for the requested template.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// A version lookup failed; the manifest was not merged.
    #[error("Could not resolve a version for '{package}': {reason}")]
    DependencyResolution { package: String, reason: String },

    #[error("I/O failure at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// A thread panicked while holding an in-memory store.
    #[error("In-memory store is poisoned")]
    LockPoisoned,

    /// The manifest on disk could not be read back for merging.
    #[error("Cannot read manifest at {path}: {reason}")]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// Identity defaults could not be looked up.
    #[error("Identity lookup failed: {reason}")]
    IdentityLookup { reason: String },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}' was found", name),
                "Check the templates directory in your config".into(),
                "Remove the override to fall back to the built-in templates".into(),
            ],
            Self::DependencyResolution { .. } => vec![
                "Check your network connection and the registry URL".into(),
                "Use --offline to record pinned versions instead".into(),
                "Project files were written; run the command again to merge dependencies".into(),
            ],
            Self::Io { path, .. } => vec![format!(
                "Check permissions on {} and its parent directory",
                path.display()
            )],
            Self::LockPoisoned => Vec::new(),
            Self::ManifestUnreadable { path, .. } => vec![
                format!("Check that {} contains a JSON object", path.display()),
            ],
            Self::IdentityLookup { .. } => vec![
                "Pass --author and --username explicitly".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. }
            | Self::DependencyResolution { .. }
            | Self::IdentityLookup { .. } => ErrorCategory::NotFound,
            Self::Io { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::ManifestUnreadable { .. } => ErrorCategory::Validation,
        }
    }
}
