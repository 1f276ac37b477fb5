//! The error every public operation of this crate returns.
//!
//! Front ends need two things from a failure besides its message: hints for
//! the user and a coarse [`ErrorCategory`] to pick an exit status.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum ModforgeError {
    /// Bad answers or a broken template.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A port failed: filesystem, template store or a lookup.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// The caller wired something up wrongly, e.g. an HTTP client.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ModforgeError {
    /// Hints for the user, most useful first.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check the registry URL and template directory settings".into(),
            ],
            Self::Internal { .. } => {
                vec!["Re-run with -vvv and include the log when reporting this".into()]
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// How a failure is classified for exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

pub type ModforgeResult<T> = Result<T, ModforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_field_missing_is_a_configuration_error() {
        let err: ModforgeError = DomainError::TemplateFieldMissing {
            template: "_README.md".into(),
            field: "USERNAME".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn invalid_username_is_a_validation_error() {
        let err: ModforgeError = DomainError::InvalidUsername {
            username: "_octocat".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn missing_template_is_not_found() {
        let err: ModforgeError = ApplicationError::TemplateNotFound {
            name: "_.babelrc".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
