//! CLI errors, their exit codes, and how they are shown on stderr.

use std::error::Error as _;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use modforge_core::{
    domain::DomainError,
    error::{ErrorCategory as CoreCategory, ModforgeError},
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Input clap accepted but the command cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `modforge-core` or an adapter.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] ModforgeError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A prompt could not be shown or was aborted.
    #[cfg(feature = "interactive")]
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Prompting in a build without the `interactive` feature.
    #[cfg(not(feature = "interactive"))]
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },

    /// The destination exists and is not a directory.
    #[error("Destination is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    pub fn config(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(source.into().into()),
        }
    }

    /// Next steps shown under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { .. } => vec![
                "Check the config file shown by 'modforge config path'".into(),
                "Use 'modforge init --force' to write a fresh default config".into(),
                "Environment overrides look like MODFORGE_DEFAULTS__AUTHOR".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            #[cfg(feature = "interactive")]
            Self::Prompt(_) => vec![
                "Run from an interactive terminal".into(),
                "Or answer with flags and pass --yes".into(),
            ],

            #[cfg(not(feature = "interactive"))]
            Self::FeatureNotAvailable { feature } => vec![
                format!("This build has no '{feature}' support"),
                "Pass --yes and answer with flags instead".into(),
                format!("Or reinstall with: cargo install modforge-cli --features {feature}"),
            ],

            Self::NotADirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Choose a new or existing directory".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            #[cfg(feature = "interactive")]
            Self::Prompt(_) => ErrorCategory::UserError,
            #[cfg(not(feature = "interactive"))]
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
            Self::NotADirectory { .. } => ErrorCategory::UserError,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Message, causes (verbose only) and suggestions, ready for stderr.
    ///
    /// `styled` adds ANSI colours; without it the text is plain.
    pub fn render(&self, verbose: bool, styled: bool) -> String {
        let paint = |text: String, style: Style| {
            if styled {
                text.style(style).to_string()
            } else {
                text
            }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{}",
            paint(format!("error: {self}"), Style::new().red().bold())
        );

        let mut cause = self.source();
        while let (true, Some(err)) = (verbose, cause) {
            let _ = writeln!(
                out,
                "{}",
                paint(format!("  caused by: {err}"), Style::new().dimmed())
            );
            cause = err.source();
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("hint:".to_string(), Style::new().yellow().bold())
            );
            for line in suggestions {
                let _ = writeln!(out, "  - {line}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint(
                    "Run again with -v to see the cause.".into(),
                    Style::new().dimmed()
                )
            );
        }
        out
    }

    /// Users get the message on stderr; the trace only repeats it.
    pub fn log(&self) {
        let cause = self.source().map(ToString::to_string);
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(error = %self, cause, "command rejected");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(error = %self, cause, "command failed");
            }
        }
    }
}

/// Coarse error kind; decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// `.with_cli_context(|| "what we were doing")` on I/O results.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use modforge_core::application::ApplicationError;

    use super::*;

    #[test]
    fn core_categories_map_to_exit_codes() {
        let validation: CliError = ModforgeError::from(DomainError::InvalidUsername {
            username: "_x".into(),
        })
        .into();
        assert_eq!(validation.exit_code(), 2);

        let not_found: CliError = ModforgeError::from(ApplicationError::DependencyResolution {
            package: "ava".into(),
            reason: "offline".into(),
        })
        .into();
        assert_eq!(not_found.exit_code(), 3);

        let template: CliError = ModforgeError::from(DomainError::TemplateFieldMissing {
            template: "_README.md".into(),
            field: "NOPE".into(),
        })
        .into();
        assert_eq!(template.exit_code(), 4);
    }

    #[test]
    fn local_exit_codes() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(
            CliError::config("bad", io::Error::other("e")).exit_code(),
            4
        );
        assert_eq!(CliError::from(io::Error::other("e")).exit_code(), 1);
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err: CliError = ModforgeError::from(DomainError::MissingRequiredField {
            field: "username",
        })
        .into();
        assert_eq!(
            err.suggestions(),
            ModforgeError::from(DomainError::MissingRequiredField { field: "username" })
                .suggestions()
        );
    }

    #[test]
    fn plain_rendering_has_message_and_hints() {
        let err = CliError::NotADirectory {
            path: PathBuf::from("/tmp/x"),
        };
        let text = err.render(false, false);
        assert!(text.contains("error: Destination is not a directory: /tmp/x"));
        assert!(text.contains("  - Choose a new or existing directory"));
        assert!(text.contains("-v"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn verbose_rendering_walks_the_source_chain() {
        let err = CliError::config("unreadable", io::Error::other("disk on fire"));
        let text = err.render(true, false);
        assert!(text.contains("caused by: disk on fire"));
        assert!(!text.contains("Run again with -v"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
