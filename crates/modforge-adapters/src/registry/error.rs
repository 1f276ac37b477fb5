//! Registry error types.

use thiserror::Error;

use modforge_core::{application::ApplicationError, error::ModforgeError};

/// Errors that can occur when talking to a package registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The registry returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Failed to parse a registry response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The offline table has no entry for the package.
    #[error("no pinned version")]
    NotPinned,
}

impl RegistryError {
    /// Wrap as the core error for a failed lookup of `package`.
    pub fn into_resolution(self, package: &str) -> ModforgeError {
        ApplicationError::DependencyResolution {
            package: package.to_string(),
            reason: self.to_string(),
        }
        .into()
    }
}
