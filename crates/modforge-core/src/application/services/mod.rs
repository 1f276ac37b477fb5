//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "synthesize the files" or "scaffold a module".

pub mod dependency_service;
pub mod identity_service;
pub mod scaffold_service;
pub mod synthesis_service;

pub use dependency_service::{DependencyService, ResolvedDependencies};
pub use identity_service::IdentityService;
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
pub use synthesis_service::ProjectSynthesizer;
