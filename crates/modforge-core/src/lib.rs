//! Domain and application layers of modforge.
//!
//! A run flows in one direction:
//!
//! ```text
//! AnswerRecord ──▶ ProjectSynthesizer ──▶ OutputFileSet     (pure, domain)
//!                        │ TemplateStore
//!                        ▼
//! ScaffoldService ──▶ Filesystem: write every file
//!        │
//!        └──▶ DependencyService ──▶ VersionResolver (concurrent lookups)
//!                        │
//!                        ▼
//!              package.json read back, merged, rewritten
//! ```
//!
//! The ports (`TemplateStore`, `Filesystem`, `VersionResolver`,
//! `IdentityProvider`) are implemented in `modforge-adapters`; nothing in
//! this crate touches the disk or the network itself.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use modforge_core::prelude::*;
//!
//! # async fn run(
//! #     store: Box<dyn TemplateStore>,
//! #     resolver: Box<dyn VersionResolver>,
//! #     filesystem: Box<dyn Filesystem>,
//! # ) -> ModforgeResult<()> {
//! let answers = AnswerRecord::builder()
//!     .name("My Lib")?
//!     .author("Mona Lisa")
//!     .language(Language::Plain)
//!     .username("octocat")
//!     .build()?;
//!
//! let service = ScaffoldService::new(
//!     ProjectSynthesizer::new(store),
//!     DependencyService::new(resolver),
//!     filesystem,
//! );
//! service.scaffold(&answers, "./my-lib".as_ref()).await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// The types a front end needs to run a scaffold.
pub mod prelude {
    pub use crate::application::{
        DependencyService, IdentityService, ProjectSynthesizer, ResolvedDependencies,
        ScaffoldReport, ScaffoldService,
        ports::{Filesystem, IdentityProvider, TemplateStore, VersionResolver},
    };
    pub use crate::domain::{
        AnswerRecord, CompiledOptions, DependencyPlan, DependencySection, Dialect, FileContent,
        GithubUsername, Language, Manifest, ModuleName, OutputFileSet, RenderContext, Runtime,
        TemplateName,
    };
    pub use crate::error::{ModforgeError, ModforgeResult};
}
