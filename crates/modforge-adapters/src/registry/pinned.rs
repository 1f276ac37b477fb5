//! Offline version table.

use std::collections::BTreeMap;

use async_trait::async_trait;

use modforge_core::{application::ports::VersionResolver, error::ModforgeResult};

use super::RegistryError;

/// Ranges used when the registry must not be contacted.
const KNOWN_RANGES: &[(&str, &str)] = &[
    ("ava", "^0.15.2"),
    ("babel-cli", "^6.10.1"),
    ("babel-eslint", "^6.1.0"),
    ("babel-plugin-transform-runtime", "^6.9.0"),
    ("babel-preset-es2015", "^6.9.0"),
    ("babel-preset-es2015-node4", "^2.1.0"),
    ("babel-preset-stage-0", "^6.5.0"),
    ("babel-register", "^6.9.0"),
    ("babel-runtime", "^6.9.2"),
    ("eslint", "^2.13.1"),
    ("onchange", "^2.5.0"),
];

/// Resolver backed by a fixed table.
#[derive(Debug, Clone)]
pub struct PinnedVersions {
    ranges: BTreeMap<String, String>,
}

impl Default for PinnedVersions {
    fn default() -> Self {
        Self {
            ranges: KNOWN_RANGES
                .iter()
                .map(|&(name, range)| (name.to_string(), range.to_string()))
                .collect(),
        }
    }
}

impl PinnedVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry.
    pub fn with_range(mut self, package: impl Into<String>, range: impl Into<String>) -> Self {
        self.ranges.insert(package.into(), range.into());
        self
    }

    pub fn get(&self, package: &str) -> Option<&str> {
        self.ranges.get(package).map(String::as_str)
    }
}

#[async_trait]
impl VersionResolver for PinnedVersions {
    async fn resolve(&self, package: &str) -> ModforgeResult<String> {
        self.get(package)
            .map(str::to_string)
            .ok_or_else(|| RegistryError::NotPinned.into_resolution(package))
    }
}

#[cfg(test)]
mod tests {
    use modforge_core::domain::{AnswerRecord, DependencyPlan, DependencySection, Language};

    use super::*;

    #[tokio::test]
    async fn covers_every_planned_package() {
        let pinned = PinnedVersions::new();
        for language in Language::ALL {
            let answers = AnswerRecord::builder()
                .name("covered")
                .unwrap()
                .language(language)
                .experimental(true)
                .username("octocat")
                .build()
                .unwrap();
            let plan = DependencyPlan::for_answers(&answers);
            for section in DependencySection::ALL {
                for name in plan.names(section) {
                    assert!(pinned.resolve(name).await.is_ok(), "{name} not pinned");
                }
            }
        }
    }

    #[tokio::test]
    async fn unknown_package_fails() {
        assert!(PinnedVersions::new().resolve("left-pad").await.is_err());
    }

    #[tokio::test]
    async fn overrides_replace_entries() {
        let pinned = PinnedVersions::new().with_range("ava", "^6.0.0");
        assert_eq!(pinned.resolve("ava").await.unwrap(), "^6.0.0");
    }
}
