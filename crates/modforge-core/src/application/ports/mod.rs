//! What the services need from the outside world.
//!
//! Each trait here is implemented in `modforge-adapters` (disk, HTTP, git)
//! and by in-memory fakes in tests. The two lookup ports are async because
//! their real implementations talk to the network or spawn processes.

pub mod output;

pub use output::{Filesystem, IdentityProvider, TemplateStore, VersionResolver};

#[cfg(test)]
pub use output::{MockIdentityProvider, MockVersionResolver};
