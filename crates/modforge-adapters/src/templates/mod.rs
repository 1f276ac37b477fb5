//! Template stores.
//!
//! # Template resolution order
//!
//! [`open_store`] uses the first override directory found:
//!
//! 1. **explicit** - the `templates.dir` config value or `--templates` flag;
//!    it must exist
//! 2. **`$MODFORGE_TEMPLATES_DIR`** - skipped when missing
//! 3. **`<executable-dir>/templates`** - skipped when missing
//!
//! Templates the directory does not provide come from the embedded set. With
//! no directory at all, the embedded set is used as is.

mod builtin;
mod directory;

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use modforge_core::{
    application::ports::TemplateStore,
    error::{ModforgeError, ModforgeResult},
};

pub use builtin::BuiltinTemplates;
pub use directory::DirectoryTemplates;

/// Environment variable naming a template override directory.
pub const TEMPLATES_DIR_ENV: &str = "MODFORGE_TEMPLATES_DIR";

/// Open the template store for a run.
///
/// # Errors
///
/// `Configuration` when `explicit` is given but is not a directory, and the
/// loader's error when a chosen directory cannot be read.
#[instrument(skip_all)]
pub fn open_store(explicit: Option<&Path>) -> ModforgeResult<Box<dyn TemplateStore>> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(ModforgeError::Configuration {
                message: format!("template directory {} does not exist", dir.display()),
            });
        }
        return overlay(dir);
    }

    for candidate in implicit_candidates() {
        debug!(path = %candidate.display(), "checking candidate templates path");
        if candidate.is_dir() {
            return overlay(&candidate);
        }
    }

    debug!("no template override directory, using built-in templates");
    Ok(Box::new(BuiltinTemplates))
}

fn overlay(dir: &Path) -> ModforgeResult<Box<dyn TemplateStore>> {
    let store = DirectoryTemplates::load(dir)?;
    info!(
        path = %dir.display(),
        overrides = store.override_count(),
        "using template overrides"
    );
    Ok(Box::new(store))
}

/// Directories looked at when nothing was configured; unresolvable entries
/// are omitted.
fn implicit_candidates() -> Vec<PathBuf> {
    let env_dir = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
    let exe_sibling = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")));
    env_dir.into_iter().chain(exe_sibling).collect()
}
