//! Infrastructure adapters for Modforge.
//!
//! This crate implements the ports defined in `modforge_core::application::ports`.
//! It contains all external dependencies and I/O operations: the local and
//! in-memory filesystems, the template stores, the npm registry client and
//! the git/GitHub identity lookup.

pub mod filesystem;
pub mod identity;
pub mod registry;
pub mod templates;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use identity::GitIdentity;
pub use registry::{NpmRegistry, PinnedVersions, RegistryError};
pub use templates::{BuiltinTemplates, DirectoryTemplates, open_store};
