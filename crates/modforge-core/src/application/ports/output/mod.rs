//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `modforge-adapters` crate provides implementations.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::TemplateName;
use crate::error::ModforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `modforge_adapters::filesystem::LocalFilesystem` (production)
/// - `modforge_adapters::filesystem::MemoryFilesystem` (tests)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ModforgeResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> ModforgeResult<()>;

    /// Read a file. `Ok(None)` when it does not exist.
    fn read_file(&self, path: &Path) -> ModforgeResult<Option<String>>;
}

/// Port for template source lookup.
///
/// Implemented by:
/// - `modforge_adapters::templates::BuiltinTemplates` (embedded in the binary)
/// - `modforge_adapters::templates::DirectoryTemplates` (user overrides)
pub trait TemplateStore: Send + Sync {
    /// Raw source of a template.
    ///
    /// # Errors
    ///
    /// `ApplicationError::TemplateNotFound` when the store has no such file.
    fn get(&self, name: TemplateName) -> ModforgeResult<String>;
}

/// Port for resolving the version range to record for a package.
///
/// Implemented by:
/// - `modforge_adapters::registry::NpmRegistry` (registry lookup)
/// - `modforge_adapters::registry::PinnedVersions` (offline table)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionResolver: Send + Sync {
    /// Range such as `^1.2.3` for `package`.
    async fn resolve(&self, package: &str) -> ModforgeResult<String>;
}

/// Port for identity defaults offered by the answer collector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The configured git user name, if any.
    async fn git_name(&self) -> Option<String>;

    /// The GitHub login matching the configured git email.
    async fn github_username(&self) -> ModforgeResult<String>;
}
