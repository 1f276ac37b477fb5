use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// Location of an output file inside the module directory.
///
/// Never absolute and never climbs out with `..`. Sorts by path, which is
/// what gives output sets their stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if path.is_absolute() || path.has_root() || escapes {
            return Err(DomainError::PathOutsideModule {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Output paths come from the rule tables and are always ASCII.
        self.0.to_str().unwrap_or_default()
    }

    /// Parent directory, `None` for top-level files.
    pub fn parent(&self) -> Option<&Path> {
        self.0.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_and_escaping_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("../outside").is_err());
        assert!(RelativePath::try_new("test/../../x").is_err());
        assert!(RelativePath::try_new("test/test.js").is_ok());
    }

    #[test]
    fn parent_of_top_level_file_is_none() {
        assert_eq!(RelativePath::try_new("LICENSE").unwrap().parent(), None);
        assert_eq!(
            RelativePath::try_new("test/.eslintrc.json").unwrap().parent(),
            Some(Path::new("test"))
        );
    }
}
