//! In-memory filesystem adapter for tests.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use modforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ModforgeResult,
};

/// In-memory filesystem.
///
/// Clones share the same storage, so a test can hand one clone to a service
/// and inspect the result through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    tree: Arc<RwLock<Tree>>,
}

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a file, `None` if absent.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().ok()?.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|tree| tree.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> ModforgeResult<RwLockReadGuard<'_, Tree>> {
        self.tree.read().map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> ModforgeResult<RwLockWriteGuard<'_, Tree>> {
        self.tree.write().map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> ModforgeResult<()> {
        let mut tree = self.write()?;
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            tree.directories.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ModforgeResult<()> {
        let mut tree = self.write()?;
        let orphan = path
            .parent()
            .is_some_and(|dir| !dir.as_os_str().is_empty() && !tree.directories.contains(dir));
        if orphan {
            return Err(ApplicationError::Io {
                path: path.to_path_buf(),
                reason: "no such directory".into(),
            }
            .into());
        }

        tree.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ModforgeResult<Option<String>> {
        Ok(self.read()?.files.get(path).cloned())
    }
}
