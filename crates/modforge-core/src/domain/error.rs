//! Failures of pure domain logic: answer validation, template rendering and
//! the shape of the output file set.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // answers
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("You entered an invalid username: '{username}'")]
    InvalidUsername { username: String },

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("No value given for {field}")]
    MissingRequiredField { field: &'static str },

    // templates
    #[error("Template '{template}' references '{{{{{field}}}}}' but no value is available")]
    TemplateFieldMissing { template: String, field: String },

    #[error("Template '{template}' did not produce valid JSON: {reason}")]
    InvalidTemplateJson { template: String, reason: String },

    // output set
    #[error("Duplicate output path: {path}")]
    DuplicatePath { path: String },

    #[error("Output path must be relative: {path}")]
    PathOutsideModule { path: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Output file set is incomplete: {0}")]
    IncompleteOutput(String),
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModuleName { name, .. } => vec![
                format!("'{}' does not contain any letters or digits", name),
                "Examples: my-lib, left-pad, awesome-parser".into(),
            ],
            Self::InvalidUsername { .. } => vec![
                "GitHub usernames here are 2-15 characters long".into(),
                "Letters, commas, spaces and underscores are allowed".into(),
                "The username must not start with an underscore".into(),
            ],
            Self::UnknownLanguage(_) => vec![
                "Supported languages:".into(),
                "  • js          - plain JavaScript".into(),
                "  • babel       - JavaScript compiled with Babel".into(),
                "  • babel-node4 - Babel targeting the Node 4 runtime".into(),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("'{}' is required for the options you selected", field),
                "Disable Travis CI and the repository link, or provide the value".into(),
            ],
            Self::TemplateFieldMissing { template, field } => vec![
                format!("Template '{}' needs a value for {}", template, field),
                "Check the template overrides in your templates directory".into(),
            ],
            Self::InvalidTemplateJson { template, .. } => vec![
                format!("Template '{}' must render to a JSON object", template),
                "Check the template overrides in your templates directory".into(),
            ],
            Self::DuplicatePath { .. }
            | Self::PathOutsideModule { .. }
            | Self::InvalidManifest(_)
            | Self::IncompleteOutput(_) => Vec::new(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidModuleName { .. }
            | Self::InvalidUsername { .. }
            | Self::UnknownLanguage(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::TemplateFieldMissing { .. } | Self::InvalidTemplateJson { .. } => {
                ErrorCategory::Configuration
            }
            Self::DuplicatePath { .. }
            | Self::PathOutsideModule { .. }
            | Self::InvalidManifest(_)
            | Self::IncompleteOutput(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
