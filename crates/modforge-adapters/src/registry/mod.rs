//! Version resolvers.
//!
//! [`NpmRegistry`] asks the registry for each package's `latest` dist-tag;
//! [`PinnedVersions`] answers from a fixed table for offline runs.

mod error;
mod http;
mod npm;
mod pinned;

pub use error::RegistryError;
pub use npm::{DEFAULT_REGISTRY_URL, NpmRegistry, caret_range};
pub use pinned::PinnedVersions;

pub(crate) use http::{check_response, client};
